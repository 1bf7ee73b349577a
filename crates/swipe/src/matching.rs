//! Match check after a like or super like.
//!
//! One uniform sample per accepted like; it is a match when the sample
//! falls below the direction's probability. Skips never draw.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use crate::gesture::Direction;

/// Source of uniform samples in `[0, 1)`
pub trait Sampler: Send {
    fn sample(&mut self) -> f64;
}

/// Sampler backed by `StdRng`
pub struct RngSampler {
    rng: StdRng,
}

impl RngSampler {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, for tests and demo replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Sampler for RngSampler {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of samples, then never matches again
#[derive(Debug, Default)]
pub struct ReplaySampler {
    samples: VecDeque<f64>,
}

impl ReplaySampler {
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl Sampler for ReplaySampler {
    fn sample(&mut self) -> f64 {
        self.samples.pop_front().unwrap_or(1.0)
    }
}

pub struct MatchPolicy {
    like_probability: f64,
    superlike_probability: f64,
    sampler: Box<dyn Sampler>,
}

impl MatchPolicy {
    pub fn new(
        like_probability: f64,
        superlike_probability: f64,
        sampler: Box<dyn Sampler>,
    ) -> Self {
        Self {
            like_probability,
            superlike_probability,
            sampler,
        }
    }

    pub fn probability(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Left => 0.0,
            Direction::Right => self.like_probability,
            Direction::Up => self.superlike_probability,
        }
    }

    /// Decide whether a swipe in `direction` produced a match
    pub fn roll(&mut self, direction: Direction) -> bool {
        if direction == Direction::Left {
            return false;
        }
        let p = self.probability(direction);
        self.sampler.sample() < p
    }
}

impl std::fmt::Debug for MatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchPolicy")
            .field("like_probability", &self.like_probability)
            .field("superlike_probability", &self.superlike_probability)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_thresholds() {
        let samples = ReplaySampler::new([0.29, 0.31, 0.69, 0.71]);
        let mut policy = MatchPolicy::new(0.3, 0.7, Box::new(samples));
        assert!(policy.roll(Direction::Right));
        assert!(!policy.roll(Direction::Right));
        assert!(policy.roll(Direction::Up));
        assert!(!policy.roll(Direction::Up));
    }

    #[test]
    fn test_skip_never_draws() {
        let mut policy = MatchPolicy::new(1.0, 1.0, Box::new(ReplaySampler::new([0.0])));
        assert!(!policy.roll(Direction::Left));
        // the single sample is still there for the next like
        assert!(policy.roll(Direction::Right));
    }

    #[test]
    fn test_seeded_sampler_is_reproducible() {
        let mut a = RngSampler::seeded(42);
        let mut b = RngSampler::seeded(42);
        for _ in 0..16 {
            let x = a.sample();
            assert_eq!(x, b.sample());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn test_exhausted_replay_never_matches() {
        let mut policy = MatchPolicy::new(0.99, 0.99, Box::new(ReplaySampler::default()));
        assert!(!policy.roll(Direction::Up));
    }
}
