//! Randomized scheduling delays.

use std::time::Duration;

use rand::Rng;

use crate::config::{WARM_UP_MAX, WARM_UP_MIN};

/// Draws a delay uniformly from `[min, max]` at millisecond resolution.
///
/// A degenerate or inverted range yields `min`.
pub fn next_interval<R: Rng + ?Sized>(rng: &mut R, min: Duration, max: Duration) -> Duration {
    let lo = min.as_millis() as u64;
    let hi = max.as_millis() as u64;
    if lo >= hi {
        return min;
    }
    Duration::from_millis(rng.random_range(lo..=hi))
}

/// Delay before the first sequence after `start()`.
pub fn warm_up_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    next_interval(rng, WARM_UP_MIN, WARM_UP_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_intervals_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for (min, max) in [(0, 0), (0, 1), (3000, 7000), (250, 251), (10_000, 60_000)] {
            let (min, max) = (Duration::from_millis(min), Duration::from_millis(max));
            for _ in 0..1000 {
                let d = next_interval(&mut rng, min, max);
                assert!(d >= min && d <= max, "{:?} outside [{:?}, {:?}]", d, min, max);
            }
        }
    }

    #[test]
    fn test_equal_bounds_are_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = Duration::from_millis(4200);
        assert_eq!(next_interval(&mut rng, d, d), d);
    }

    #[test]
    fn test_warm_up_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let draws: Vec<Duration> = (0..2000).map(|_| warm_up_delay(&mut rng)).collect();
        assert!(draws.iter().all(|d| *d >= WARM_UP_MIN && *d <= WARM_UP_MAX));
        // Both halves of the range get used
        assert!(draws.iter().any(|d| *d < Duration::from_millis(3000)));
        assert!(draws.iter().any(|d| *d > Duration::from_millis(4000)));
    }

    #[test]
    fn test_same_seed_same_schedule() {
        let min = Duration::from_millis(3000);
        let max = Duration::from_millis(7000);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(next_interval(&mut a, min, max), next_interval(&mut b, min, max));
        }
    }
}
