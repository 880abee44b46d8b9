use glam::DVec2;
use lattice_defects::prelude::*;
use lattice_defects_examples::{init_tracing, render_ensemble_to_png, EnsembleSummary, RenderConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Unit vectors at 60 degree spacing.
    let hexagonal: Vec<DVec2> = (0..6)
        .map(|k| DVec2::from_angle(k as f64 * std::f64::consts::FRAC_PI_3))
        .collect();
    let config = DistributionConfig::new(0.08, 48)
        .try_with_burgers_vectors(hexagonal)?
        .with_budget(SamplingBudget::new().with_max_count_draws(100));
    let extent = config.extent()?;
    let mut dist = RandomDislocationDistribution::try_new(config, StdRng::seed_from_u64(60))?;

    let mut summary = EnsembleSummary::default();
    let mut last = None;
    for _ in 0..100 {
        let (ensemble, stats) = dist.collect_dislocations_with_stats()?;
        summary.record(&ensemble, &stats);
        last = Some(ensemble);
    }
    info!("{summary}");

    if let Some(ensemble) = last {
        let out = "ensemble-custom-palette.png";
        render_ensemble_to_png(
            &ensemble,
            &extent,
            &RenderConfig::default().with_cell_px(16),
            out,
        )?;
        info!("wrote {out}");
    }

    Ok(())
}
