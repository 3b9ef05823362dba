//! Data-driven game balance
//!
//! Every number the spawner and physics stepper use lives here so a run can be
//! rebalanced from JSON without touching the simulation. Missing fields fall
//! back to the defaults, so partial override files are fine.

use serde::{Deserialize, Serialize};

use crate::consts::LOGICAL_HEIGHT;
use crate::error::GameError;
use crate::sim::TargetKind;

/// Relative spawn weights, drawn first-fit in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub shrimp: u32,
    pub bomb: u32,
    pub golden_shrimp: u32,
    pub octopus: u32,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            shrimp: 60,
            bomb: 15,
            golden_shrimp: 5,
            octopus: 20,
        }
    }
}

impl KindWeights {
    /// Weights in draw order
    pub fn ordered(&self) -> [(TargetKind, u32); 4] {
        [
            (TargetKind::Shrimp, self.shrimp),
            (TargetKind::Bomb, self.bomb),
            (TargetKind::GoldenShrimp, self.golden_shrimp),
            (TargetKind::Octopus, self.octopus),
        ]
    }

    /// Sum of all weights, `None` if it does not fit in a `u32`
    pub fn total(&self) -> Option<u32> {
        self.ordered()
            .iter()
            .try_fold(0u32, |sum, &(_, weight)| sum.checked_add(weight))
    }
}

/// Inclusive-exclusive range sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `t` in [0, 1) into the span
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + t * (self.max - self.min)
    }

    fn validate(&self, name: &str) -> Result<(), GameError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(GameError::InvalidTuning(format!(
                "{name}: expected finite min <= max, got {}..{}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Balance knobs for spawning and physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub weights: KindWeights,
    /// Radius-like size of ordinary targets
    pub target_size: f32,
    /// Golden shrimp are a bit bigger
    pub golden_size: f32,
    /// Base speed along the travel axis (logical px per tick at scale 1)
    pub speed: Span,
    /// Max perpendicular drift speed (sampled in [-jitter, jitter))
    pub jitter: f32,
    /// Speed bonus per level above 1
    pub level_speed_step: f32,
    /// Travel budget as a fraction of the longer playfield side
    pub travel_small: Span,
    pub travel_large: Span,
    /// Max rotation speed in radians per tick
    pub rotation_speed: f32,
    pub gravity: f32,
    /// Extra damping applied on top of the scale-tiered gravity
    pub gravity_damping: f32,
    /// Spawn chance per tick at level 1 (before screen-size adjustment)
    pub spawn_chance: f32,
    /// Culling margin as a multiple of target size
    pub cull_margin: f32,
    /// Cull on every side instead of only the departure side
    pub full_bounds_cull: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            weights: KindWeights::default(),
            target_size: 40.0,
            golden_size: 50.0,
            speed: Span::new(6.0, 9.0),
            jitter: 2.0,
            level_speed_step: 0.08,
            travel_small: Span::new(0.1, 0.8),
            travel_large: Span::new(0.1, 0.7),
            rotation_speed: 0.075,
            gravity: 0.5,
            gravity_damping: 0.8,
            spawn_chance: 0.02,
            cull_margin: 2.0,
            full_bounds_cull: false,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check invariants the simulation relies on
    pub fn validate(&self) -> Result<(), GameError> {
        match self.weights.total() {
            None => {
                return Err(GameError::InvalidTuning(
                    "spawn weights overflow when summed".into(),
                ));
            }
            Some(0) => {
                return Err(GameError::InvalidTuning(
                    "spawn weights must not all be zero".into(),
                ));
            }
            Some(_) => {}
        }
        // Targets must fit between the edge insets on the shorter side
        let max_size = LOGICAL_HEIGHT / 2.0;
        for (name, size) in [("target_size", self.target_size), ("golden_size", self.golden_size)] {
            if !(size > 0.0 && size < max_size) {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be in (0, {max_size}), got {size}"
                )));
            }
        }
        self.speed.validate("speed")?;
        self.travel_small.validate("travel_small")?;
        self.travel_large.validate("travel_large")?;
        for (name, value) in [
            ("jitter", self.jitter),
            ("level_speed_step", self.level_speed_step),
            ("rotation_speed", self.rotation_speed),
            ("gravity", self.gravity),
            ("gravity_damping", self.gravity_damping),
            ("spawn_chance", self.spawn_chance),
            ("cull_margin", self.cull_margin),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::InvalidTuning(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }

    pub fn size_of(&self, kind: TargetKind) -> f32 {
        match kind {
            TargetKind::GoldenShrimp => self.golden_size,
            _ => self.target_size,
        }
    }

    /// Travel budget range for the given render scale
    pub fn travel_span(&self, scale: f32) -> Span {
        if scale <= crate::consts::SMALL_SCREEN_SCALE {
            self.travel_small
        } else {
            self.travel_large
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.weights.total(), Some(100));
    }

    #[test]
    fn test_partial_override() {
        let tuning = Tuning::from_json(r#"{ "spawn_chance": 0.05, "weights": { "bomb": 0 } }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.spawn_chance, 0.05);
        assert_eq!(tuning.weights.bomb, 0);
        assert_eq!(tuning.weights.shrimp, 60);
        assert_eq!(tuning.target_size, 40.0);
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.full_bounds_cull = true;
        tuning.speed = Span::new(4.0, 5.0);
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_rejects_zero_weights() {
        let json = r#"{ "weights": { "shrimp": 0, "bomb": 0, "golden_shrimp": 0, "octopus": 0 } }"#;
        assert!(matches!(Tuning::from_json(json), Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_overflowing_weights() {
        let json = r#"{ "weights": { "shrimp": 4294967295, "bomb": 1 } }"#;
        match Tuning::from_json(json) {
            Err(GameError::InvalidTuning(msg)) => assert!(msg.contains("overflow"), "{msg}"),
            other => panic!("expected overflow rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_max_u32_weight_alone_is_accepted() {
        let json = r#"{ "weights": { "shrimp": 4294967295, "bomb": 0, "golden_shrimp": 0, "octopus": 0 } }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.weights.total(), Some(u32::MAX));
    }

    #[test]
    fn test_rejects_oversized_targets() {
        for json in [
            r#"{ "target_size": 300.0 }"#,
            r#"{ "golden_size": 450.0 }"#,
            r#"{ "target_size": 0.0 }"#,
        ] {
            assert!(
                matches!(Tuning::from_json(json), Err(GameError::InvalidTuning(_))),
                "{json} should be rejected"
            );
        }
        assert!(Tuning::from_json(r#"{ "golden_size": 299.0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_inverted_span() {
        let json = r#"{ "speed": { "min": 9.0, "max": 6.0 } }"#;
        assert!(matches!(Tuning::from_json(json), Err(GameError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(GameError::Tuning(_))));
    }

    #[test]
    fn test_travel_span_tiers() {
        let tuning = Tuning::default();
        assert_eq!(tuning.travel_span(0.5).max, 0.8);
        assert_eq!(tuning.travel_span(0.7).max, 0.8);
        assert_eq!(tuning.travel_span(0.9).max, 0.7);
    }
}
