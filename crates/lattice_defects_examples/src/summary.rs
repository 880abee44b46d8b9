use std::fmt;

use glam::DVec2;
use lattice_defects::prelude::*;
use tracing_subscriber::EnvFilter;

/// Installs a formatted tracing subscriber honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Aggregate figures for a batch of ensembles.
#[derive(Debug, Clone, Default)]
pub struct EnsembleSummary {
    pub ensembles: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub total_len: usize,
    pub count_draws: usize,
    pub origin_collisions: usize,
    pub max_abs_net: f64,
}

impl EnsembleSummary {
    pub fn record(&mut self, ensemble: &DislocationEnsemble, stats: &SamplingStats) {
        let len = ensemble.len();
        self.min_len = if self.ensembles == 0 {
            len
        } else {
            self.min_len.min(len)
        };
        self.max_len = self.max_len.max(len);
        self.total_len += len;
        self.ensembles += 1;
        self.count_draws += stats.count_draws;
        self.origin_collisions += stats.origin_collisions();
        let net: DVec2 = ensemble.net_burgers_vector();
        self.max_abs_net = self.max_abs_net.max(net.abs().max_element());
    }

    pub fn mean_len(&self) -> f64 {
        if self.ensembles == 0 {
            0.0
        } else {
            self.total_len as f64 / self.ensembles as f64
        }
    }
}

impl fmt::Display for EnsembleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ensembles, length {}..={} (mean {:.2}), {} count draws, {} origin collisions, max |net b| = {}",
            self.ensembles,
            self.min_len,
            self.max_len,
            self.mean_len(),
            self.count_draws,
            self.origin_collisions,
            self.max_abs_net
        )
    }
}
