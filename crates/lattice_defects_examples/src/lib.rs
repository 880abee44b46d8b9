#![forbid(unsafe_code)]

mod rendering;
mod summary;

pub use rendering::{render_ensemble_to_png, RenderConfig};
pub use summary::{init_tracing, EnsembleSummary};
