use lattice_defects::prelude::*;
use lattice_defects_examples::{init_tracing, render_ensemble_to_png, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // 5% of a 40x40 lattice on average, binomially distributed.
    let config = DistributionConfig::new(0.05, 40);
    let extent = config.extent()?;
    let mut dist = RandomDislocationDistribution::try_new(config, StdRng::seed_from_u64(2025))?;

    let (ensemble, stats) = dist.collect_dislocations_with_stats()?;
    info!(
        "{} dislocations, net Burgers vector {}, {} rejected counts, {} origin collisions",
        ensemble.len(),
        ensemble.net_burgers_vector(),
        stats.rejected_counts(),
        stats.origin_collisions()
    );
    ensemble.check_invariants(&extent)?;

    let out = "ensemble-random-count-basic.png";
    render_ensemble_to_png(&ensemble, &extent, &RenderConfig::default(), out)?;
    info!("wrote {out}");

    Ok(())
}
