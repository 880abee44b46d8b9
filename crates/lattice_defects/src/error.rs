//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration and exhausted rejection loops.
use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Rejection loop that ran out of attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SamplingStage {
    /// Drawing an even, positive, capacity-respecting defect count.
    Count,
    /// Finding a free origin for a defect in the primary half.
    PrimaryOrigin,
    /// Finding a free origin for a charge-conjugate partner.
    ConjugateOrigin,
}

impl fmt::Display for SamplingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingStage::Count => "defect count",
            SamplingStage::PrimaryOrigin => "primary origin",
            SamplingStage::ConjugateOrigin => "conjugate origin",
        };
        f.write_str(name)
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("sampling exhausted while drawing {stage} after {attempts} attempts")]
    SamplingExhausted { stage: SamplingStage, attempts: usize },
}
