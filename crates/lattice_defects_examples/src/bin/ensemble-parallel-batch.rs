use std::thread;

use lattice_defects::prelude::*;
use lattice_defects_examples::{init_tracing, EnsembleSummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

const WORKERS: u64 = 4;
const PER_WORKER: u64 = 250;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = DistributionConfig::new(0.1, 64).with_ly(32);
    let base_seed = 0x5EED_u64;

    // One random source per ensemble, derived from the base seed, so the batch is
    // reproducible regardless of how it is split across threads.
    let partials = thread::scope(|scope| {
        let handles: Vec<_> = (0..WORKERS)
            .map(|worker| {
                let config = config.clone();
                scope.spawn(move || -> lattice_defects::error::Result<EnsembleSummary> {
                    let mut summary = EnsembleSummary::default();
                    for k in 0..PER_WORKER {
                        let index = worker * PER_WORKER + k;
                        let rng = StdRng::seed_from_u64(seed_for_ensemble(base_seed, index));
                        let mut dist = RandomDislocationDistribution::try_new(config.clone(), rng)?;
                        let (ensemble, stats) = dist.collect_dislocations_with_stats()?;
                        summary.record(&ensemble, &stats);
                    }
                    Ok(summary)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| anyhow::anyhow!("worker panicked")))
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    for (worker, partial) in partials.into_iter().enumerate() {
        info!("worker {worker}: {}", partial?);
    }

    Ok(())
}
