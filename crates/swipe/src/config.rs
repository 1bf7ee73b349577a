//! Tunables for the deck.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Distances are in pointer units (CSS pixels in a browser).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{SwipeError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Distance a release must exceed to count as a swipe
    pub release_threshold: f64,
    /// Distance at which the action hint starts to show
    pub hint_threshold: f64,
    /// Distance at which the action hint is fully opaque
    pub hint_full_opacity: f64,
    /// Degrees of card rotation per unit of horizontal drag
    pub rotation_factor: f64,
    /// Number of cards rendered in the stack
    pub stack_depth: usize,
    /// Free swipes per day
    pub daily_limit: u32,
    pub like_match_probability: f64,
    pub superlike_match_probability: f64,
    pub exit_animation_ms: u64,
    pub match_delay_ms: u64,
    pub tick_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            release_threshold: 100.0,
            hint_threshold: 50.0,
            hint_full_opacity: 150.0,
            rotation_factor: 0.1,
            stack_depth: 3,
            daily_limit: 30,
            like_match_probability: 0.3,
            superlike_match_probability: 0.7,
            exit_animation_ms: 300,
            match_delay_ms: 500,
            tick_ms: 1000,
        }
    }
}

impl SwipeConfig {
    /// Configure the release threshold (default: 100)
    pub fn with_release_threshold(mut self, threshold: f64) -> Self {
        self.release_threshold = threshold;
        self
    }

    /// Configure the daily swipe limit (default: 30)
    pub fn with_daily_limit(mut self, limit: u32) -> Self {
        self.daily_limit = limit;
        self
    }

    /// Configure how many cards the stack shows (default: 3)
    pub fn with_stack_depth(mut self, depth: usize) -> Self {
        self.stack_depth = depth;
        self
    }

    /// Configure match probabilities for like and super like
    pub fn with_match_probabilities(mut self, like: f64, superlike: f64) -> Self {
        self.like_match_probability = like;
        self.superlike_match_probability = superlike;
        self
    }

    /// Configure the exit animation and match announcement delays
    pub fn with_delays(mut self, exit_animation: Duration, match_delay: Duration) -> Self {
        self.exit_animation_ms = exit_animation.as_millis() as u64;
        self.match_delay_ms = match_delay.as_millis() as u64;
        self
    }

    pub fn exit_animation(&self) -> Duration {
        Duration::from_millis(self.exit_animation_ms)
    }

    pub fn match_delay(&self) -> Duration {
        Duration::from_millis(self.match_delay_ms)
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Check the values make sense together
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("release_threshold", self.release_threshold),
            ("hint_threshold", self.hint_threshold),
            ("hint_full_opacity", self.hint_full_opacity),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value <= 0.0 {
                return Err(SwipeError::InvalidConfig {
                    field,
                    reason: format!("must be a positive distance, got {}", value),
                });
            }
        }
        if self.hint_threshold >= self.release_threshold {
            return Err(SwipeError::InvalidConfig {
                field: "hint_threshold",
                reason: "must be below release_threshold".to_string(),
            });
        }
        if self.hint_full_opacity < self.hint_threshold {
            return Err(SwipeError::InvalidConfig {
                field: "hint_full_opacity",
                reason: "must not be below hint_threshold".to_string(),
            });
        }
        for (field, p) in [
            ("like_match_probability", self.like_match_probability),
            ("superlike_match_probability", self.superlike_match_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SwipeError::InvalidConfig {
                    field,
                    reason: format!("must be within [0, 1], got {}", p),
                });
            }
        }
        if self.stack_depth == 0 {
            return Err(SwipeError::InvalidConfig {
                field: "stack_depth",
                reason: "must show at least one card".to_string(),
            });
        }
        if self.daily_limit == 0 {
            return Err(SwipeError::InvalidConfig {
                field: "daily_limit",
                reason: "must allow at least one swipe".to_string(),
            });
        }
        if self.tick_ms == 0 {
            return Err(SwipeError::InvalidConfig {
                field: "tick_ms",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}
