use std::thread;

use glam::DVec2;
use lattice_defects::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn distribution(config: DistributionConfig, seed: u64) -> RandomDislocationDistribution<StdRng> {
    RandomDislocationDistribution::try_new(config, StdRng::seed_from_u64(seed))
        .expect("valid configuration")
}

#[test]
fn random_count_ensembles_are_valid_on_small_lattice() {
    let config = DistributionConfig::new(0.5, 4);
    let extent = config.extent().unwrap();
    let mut dist = distribution(config, 1234);

    for _ in 0..500 {
        let ensemble = dist.collect_dislocations().unwrap();
        let n = ensemble.len();
        assert!(n >= 2, "empty ensemble");
        assert_eq!(n % 2, 0, "odd ensemble length {n}");
        assert!(n <= 16, "ensemble length {n} exceeds capacity");
        assert!(ensemble.has_unique_origins());
        assert_eq!(ensemble.net_burgers_vector(), DVec2::ZERO);
        ensemble.check_invariants(&extent).unwrap();
    }
}

#[test]
fn conjugates_mirror_primaries_for_rectangular_lattice() {
    let config = DistributionConfig::new(0.2, 12).with_ly(5);
    let extent = config.extent().unwrap();
    let mut dist = distribution(config, 99);

    for ensemble in dist.sample_many(50).unwrap() {
        let half = ensemble.half();
        let ds = ensemble.as_slice();
        for i in 0..half {
            assert_eq!(ds[half + i].burgers_vector, -ds[i].burgers_vector);
        }
        for d in &ensemble {
            assert!(d.origin.x >= 1.5 && d.origin.x <= extent.lx() as f64 + 0.5);
            assert!(d.origin.y >= 1.5 && d.origin.y <= extent.ly() as f64 + 0.5);
        }
    }
}

#[test]
fn fixed_count_targets_follow_correction_ladder() {
    let cases = [
        // (concentration, l, expected length)
        (0.01, 10, 2),
        (1.0, 3, 8),
        (0.05, 10, 6),
        (0.3, 10, 30),
    ];
    for (concentration, l, expected) in cases {
        let config = DistributionConfig::new(concentration, l).with_random_defect_number(false);
        let mut dist = distribution(config, 5);
        let ensemble = dist.collect_dislocations().unwrap();
        assert_eq!(
            ensemble.len(),
            expected,
            "concentration {concentration} on {l}x{l}"
        );
    }
}

#[test]
fn identically_seeded_distributions_are_bit_identical() {
    let config = DistributionConfig::new(0.15, 16)
        .with_ly(9)
        .with_random_defect_number(true);
    let mut a = distribution(config.clone(), 2025);
    let mut b = distribution(config, 2025);

    for _ in 0..10 {
        let ea = a.collect_dislocations().unwrap();
        let eb = b.collect_dislocations().unwrap();
        assert_eq!(ea.len(), eb.len());
        for (da, db) in ea.iter().zip(eb.iter()) {
            assert_eq!(da.burgers_vector.x.to_bits(), db.burgers_vector.x.to_bits());
            assert_eq!(da.burgers_vector.y.to_bits(), db.burgers_vector.y.to_bits());
            assert_eq!(da.origin.x.to_bits(), db.origin.x.to_bits());
            assert_eq!(da.origin.y.to_bits(), db.origin.y.to_bits());
        }
    }
}

#[test]
fn threaded_batches_reproduce_sequential_batches() {
    let config = DistributionConfig::new(0.1, 20);
    let base_seed = 0xD15_u64;

    let sequential: Vec<DislocationEnsemble> = (0..8)
        .map(|i| {
            distribution(config.clone(), seed_for_ensemble(base_seed, i))
                .collect_dislocations()
                .unwrap()
        })
        .collect();

    let threaded: Vec<DislocationEnsemble> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let config = config.clone();
                scope.spawn(move || {
                    distribution(config, seed_for_ensemble(base_seed, i))
                        .collect_dislocations()
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, threaded);
}

#[test]
fn custom_policies_plug_into_the_sampler() {
    let extent = LatticeExtent::new(6, 4).unwrap();
    let count = CountDistribution::fixed(extent, 0.5).unwrap();
    let placement = UniformBurgersVector::tetragonal(extent).unwrap();
    let budget = SamplingBudget::new().with_max_count_draws(1);
    let mut rng = StdRng::seed_from_u64(8);

    let (ensemble, stats) =
        collect_dislocations_with_stats(&count, &placement, &mut rng, &budget).unwrap();
    assert_eq!(ensemble.len(), 12);
    assert_eq!(stats.count_draws, 1);
    ensemble.check_invariants(&extent).unwrap();
}
