use lattice_defects::prelude::*;
use lattice_defects_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Each case triggers a different step of the fixed-count correction.
    let cases: [(f64, u32); 5] = [(0.01, 10), (1.0, 3), (1.0, 10), (0.05, 10), (0.2, 10)];

    for (concentration, l) in cases {
        let config = DistributionConfig::new(concentration, l).with_random_defect_number(false);
        let capacity = config.extent()?.capacity();
        let raw = (concentration * capacity as f64).round_ties_even();
        let mut dist = RandomDislocationDistribution::try_new(config, StdRng::seed_from_u64(1))?;
        let ensemble = dist.collect_dislocations()?;
        info!(
            "concentration {concentration} on {l}x{l}: raw target {raw}, sampled {} dislocations",
            ensemble.len()
        );
    }

    Ok(())
}
