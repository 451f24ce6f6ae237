use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MascotError;
use crate::motion::tuning::Tuning;

/// Behavior mode: a persisted preset that reparameterizes the motion loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BehaviorMode {
    /// Sits still; the motion tick never moves the sprite.
    Quiet,
    #[default]
    Active,
    /// Always follows the pointer, rarely stops.
    Clingy,
}

const ALL_MODES: [BehaviorMode; 3] = [BehaviorMode::Quiet, BehaviorMode::Active, BehaviorMode::Clingy];

impl BehaviorMode {
    pub fn label(self) -> &'static str {
        match self {
            BehaviorMode::Quiet => "quiet",
            BehaviorMode::Active => "active",
            BehaviorMode::Clingy => "clingy",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BehaviorMode::Quiet => BehaviorMode::Active,
            BehaviorMode::Active => BehaviorMode::Clingy,
            BehaviorMode::Clingy => BehaviorMode::Quiet,
        }
    }

    pub fn all_modes() -> &'static [BehaviorMode] {
        &ALL_MODES
    }

    /// Tuning parameters for this mode. Pure: same inputs, same output.
    ///
    /// Scaled values are derived from the base values in `tuning`, so a host
    /// that retunes `stop_chance` or the retarget interval gets consistent
    /// per-mode variants.
    pub fn params(self, tuning: &Tuning) -> BehaviorParams {
        match self {
            BehaviorMode::Quiet => BehaviorParams {
                follow_override: Some(false),
                stop_chance: Some((tuning.stop_chance * 2.0).min(0.9)),
                rest_chance: Some((tuning.rest_chance * 1.5).min(0.95)),
                target_min: Some(scale_ticks(tuning.target_change_min, 1.6)),
                target_max: Some(scale_ticks(tuning.target_change_max, 1.6)),
                speed_mul: 0.7,
                min_move_ticks: 0,
            },
            BehaviorMode::Active => BehaviorParams {
                follow_override: None,
                stop_chance: None,
                rest_chance: Some(tuning.active_rest_chance),
                target_min: None,
                target_max: None,
                speed_mul: 1.0,
                min_move_ticks: 18,
            },
            BehaviorMode::Clingy => BehaviorParams {
                follow_override: Some(true),
                stop_chance: Some((tuning.stop_chance * 0.3).max(0.0001)),
                rest_chance: Some((tuning.rest_chance * 0.3).max(0.05)),
                target_min: Some(scale_ticks(tuning.target_change_min, 0.7)),
                target_max: Some(scale_ticks(tuning.target_change_max, 0.7)),
                speed_mul: 1.1,
                min_move_ticks: 10,
            },
        }
    }
}

/// Truncated like an integer cast; the epsilon keeps `500 * 0.7` at 350.
fn scale_ticks(base: i32, factor: f64) -> i32 {
    (base as f64 * factor + 1e-6) as i32
}

impl fmt::Display for BehaviorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BehaviorMode {
    type Err = MascotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_MODES
            .iter()
            .copied()
            .find(|m| m.label() == s)
            .ok_or_else(|| MascotError::UnknownMode(s.to_string()))
    }
}

/// Per-mode overrides. `None` means "use the global value from [`Tuning`]"
/// (or, for `follow_override`, the sprite's own follow flag).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorParams {
    pub follow_override: Option<bool>,
    pub stop_chance: Option<f32>,
    pub rest_chance: Option<f32>,
    pub target_min: Option<i32>,
    pub target_max: Option<i32>,
    pub speed_mul: f32,
    pub min_move_ticks: u32,
}

impl BehaviorParams {
    pub fn stop_chance_or(&self, tuning: &Tuning) -> f32 {
        self.stop_chance.unwrap_or(tuning.stop_chance)
    }

    pub fn rest_chance_or(&self, tuning: &Tuning) -> f32 {
        self.rest_chance.unwrap_or(tuning.rest_chance)
    }

    /// Inclusive retarget interval in ticks.
    pub fn target_range(&self, tuning: &Tuning) -> (i32, i32) {
        (
            self.target_min.unwrap_or(tuning.target_change_min),
            self.target_max.unwrap_or(tuning.target_change_max),
        )
    }
}
