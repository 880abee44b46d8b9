//! Count policies: how many dislocations an ensemble should contain.
//!
//! Two modes are supported:
//! - random: `Binomial(n = capacity, p = concentration)`, one Bernoulli trial per plaquette;
//! - fixed: a point mass at `round(concentration * capacity)`, corrected by
//!   [`corrected_fixed_count`] to an even target the sampler can realise.
use rand::RngCore;
use rand_distr::{Binomial, Distribution};
use tracing::warn;

use crate::error::{Error, Result};
use crate::lattice::LatticeExtent;
use crate::policy::CountPolicy;

/// Probability distribution over defect counts.
#[derive(Debug, Clone)]
pub enum CountDistribution {
    /// One Bernoulli trial per plaquette.
    Random {
        trials: u64,
        probability: f64,
        binomial: Binomial,
    },
    /// Always the same, already corrected, count.
    Fixed(usize),
}

impl CountDistribution {
    /// Selects the random or fixed mode from `random_defect_number`.
    pub fn new(
        extent: LatticeExtent,
        concentration: f64,
        random_defect_number: bool,
    ) -> Result<Self> {
        if random_defect_number {
            Self::random(extent, concentration)
        } else {
            Self::fixed(extent, concentration)
        }
    }

    /// Binomial count over all plaquettes of `extent`.
    pub fn random(extent: LatticeExtent, concentration: f64) -> Result<Self> {
        validate_concentration(concentration)?;
        let trials = extent.capacity() as u64;
        let binomial = Binomial::new(trials, concentration)
            .map_err(|e| Error::InvalidConfig(format!("binomial count distribution: {e}")))?;
        Ok(Self::Random {
            trials,
            probability: concentration,
            binomial,
        })
    }

    /// Point mass at the corrected fixed target for `extent`.
    pub fn fixed(extent: LatticeExtent, concentration: f64) -> Result<Self> {
        validate_concentration(concentration)?;
        Ok(Self::Fixed(corrected_fixed_count(
            concentration,
            extent.capacity(),
        )))
    }

    /// Expected number of defects per draw, before rejection.
    pub fn mean(&self) -> f64 {
        match self {
            Self::Random {
                trials,
                probability,
                ..
            } => *trials as f64 * probability,
            Self::Fixed(target) => *target as f64,
        }
    }

    pub fn is_random(&self) -> bool {
        matches!(self, Self::Random { .. })
    }
}

impl CountPolicy for CountDistribution {
    fn sample(&self, rng: &mut dyn RngCore) -> usize {
        match self {
            Self::Random { binomial, .. } => binomial.sample(rng) as usize,
            Self::Fixed(target) => *target,
        }
    }
}

pub(crate) fn validate_concentration(concentration: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&concentration) {
        return Err(Error::InvalidConfig(format!(
            "concentration must be within [0, 1], got {concentration}"
        )));
    }
    Ok(())
}

/// Turns `round(concentration * capacity)` into an even, achievable defect count.
///
/// Steps, applied in order, each logging a warning when it changes the target:
/// 1. a target of at most one becomes two;
/// 2. a target at or above capacity becomes the largest even value below capacity;
/// 3. a remaining odd target moves to the neighbouring even value, downwards only
///    when it sits at `capacity - 1`.
///
/// Rounding is half-to-even. Lattices with capacity below three yield targets the
/// sampler can never accept, so sampling from them exhausts the count budget.
pub fn corrected_fixed_count(concentration: f64, capacity: usize) -> usize {
    let raw = (concentration * capacity as f64).round_ties_even() as usize;
    let mut target = raw;

    if target <= 1 {
        warn!(
            "Fixed defect count {} is too small for a charge-neutral pair; using 2.",
            target
        );
        target = 2;
    }

    if target >= capacity {
        let below = capacity.saturating_sub(1);
        let corrected = if below % 2 == 1 {
            capacity.saturating_sub(2)
        } else {
            below
        };
        warn!(
            "Fixed defect count {} does not fit {} plaquettes; using {}.",
            target, capacity, corrected
        );
        target = corrected;
    }

    if target % 2 == 1 {
        let corrected = if target == capacity.saturating_sub(1) {
            target - 1
        } else {
            target + 1
        };
        warn!(
            "Fixed defect count {} is odd; using {}.",
            target, corrected
        );
        target = corrected;
    }

    target
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn square(l: u32) -> LatticeExtent {
        LatticeExtent::square(l).unwrap()
    }

    #[test]
    fn tiny_target_is_raised_to_two() {
        assert_eq!(corrected_fixed_count(0.01, 100), 2);
        assert_eq!(corrected_fixed_count(0.0, 100), 2);
    }

    #[test]
    fn full_lattice_drops_below_capacity() {
        // capacity 9: 9 - 1 = 8 is even
        assert_eq!(corrected_fixed_count(1.0, 9), 8);
        // capacity 100: 99 is odd, so 98
        assert_eq!(corrected_fixed_count(1.0, 100), 98);
    }

    #[test]
    fn odd_target_moves_up_unless_at_capacity_minus_one() {
        assert_eq!(corrected_fixed_count(0.05, 100), 6);
        assert_eq!(corrected_fixed_count(0.99, 100), 98);
        assert_eq!(corrected_fixed_count(0.5, 10), 6);
    }

    #[test]
    fn even_target_in_range_is_kept() {
        assert_eq!(corrected_fixed_count(0.1, 100), 10);
        assert_eq!(corrected_fixed_count(0.5, 16), 8);
    }

    #[test]
    fn rounding_is_half_to_even() {
        // 0.25 * 10 = 2.5 rounds to 2
        assert_eq!(corrected_fixed_count(0.25, 10), 2);
        // 0.35 * 10 = 3.5 rounds to 4
        assert_eq!(corrected_fixed_count(0.35, 10), 4);
    }

    #[test]
    fn tiny_lattices_produce_unrealisable_targets() {
        assert_eq!(corrected_fixed_count(0.5, 1), 0);
        assert_eq!(corrected_fixed_count(0.5, 2), 0);
        assert_eq!(corrected_fixed_count(0.5, 3), 2);
    }

    #[test]
    fn fixed_distribution_is_a_point_mass() {
        let dist = CountDistribution::fixed(square(10), 0.01).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..8 {
            assert_eq!(dist.sample(&mut rng), 2);
        }
        assert_eq!(dist.mean(), 2.0);
        assert!(!dist.is_random());
    }

    #[test]
    fn random_distribution_stays_within_trials() {
        let dist = CountDistribution::random(square(4), 0.5).unwrap();
        assert!(dist.is_random());
        assert_eq!(dist.mean(), 8.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            assert!(dist.sample(&mut rng) <= 16);
        }
    }

    #[test]
    fn rejects_out_of_range_concentration() {
        for c in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                CountDistribution::random(square(4), c),
                Err(Error::InvalidConfig(_))
            ));
            assert!(matches!(
                CountDistribution::fixed(square(4), c),
                Err(Error::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn degenerate_concentrations_are_accepted() {
        let mut rng = StdRng::seed_from_u64(4);

        let zero = CountDistribution::random(square(4), 0.0).unwrap();
        assert!((0..50).all(|_| zero.sample(&mut rng) == 0));

        let full = CountDistribution::random(square(3), 1.0).unwrap();
        assert!((0..50).all(|_| full.sample(&mut rng) == 9));

        let tiny = CountDistribution::fixed(square(1), 0.5).unwrap();
        assert_eq!(tiny.sample(&mut rng), 0);
    }

    /// Collects formatted log output emitted while `f` runs.
    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Buffer {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let value = tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        (value, String::from_utf8(bytes).unwrap())
    }

    #[test]
    fn each_correction_step_logs_a_warning() {
        let (target, logs) = capture_warnings(|| corrected_fixed_count(0.01, 100));
        assert_eq!(target, 2);
        assert!(logs.contains("WARN"), "missing warning: {logs}");
        assert!(logs.contains("too small"), "missing warning: {logs}");

        let (target, logs) = capture_warnings(|| corrected_fixed_count(1.0, 9));
        assert_eq!(target, 8);
        assert!(logs.contains("does not fit 9 plaquettes; using 8"), "{logs}");

        let (target, logs) = capture_warnings(|| corrected_fixed_count(0.05, 100));
        assert_eq!(target, 6);
        assert!(logs.contains("Fixed defect count 5 is odd; using 6"), "{logs}");
    }

    #[test]
    fn valid_target_logs_nothing() {
        let (target, logs) = capture_warnings(|| corrected_fixed_count(0.1, 100));
        assert_eq!(target, 10);
        assert!(logs.is_empty(), "unexpected warnings: {logs}");
    }
}
