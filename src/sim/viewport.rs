//! Logical playfield to physical surface mapping
//!
//! The simulation always works in an 800x600 logical space; the canvas is
//! shrunk to fit narrow containers but never grown past 1:1.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Edge, Target};
use crate::consts::*;
use crate::error::{GameError, ensure_finite};

/// Render surface size for a given container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub scale: f32,
    /// Physical surface width in pixels
    pub width: f32,
    /// Physical surface height in pixels
    pub height: f32,
}

impl Viewport {
    /// Fit the playfield to a container width
    pub fn from_container_width(container_width: f32) -> Result<Self, GameError> {
        let width = ensure_finite("container width", container_width)?;
        Ok(Self::from_scale(width / LOGICAL_WIDTH))
    }

    /// Build from a raw scale, capped at 1. Non-positive scales (a collapsed
    /// container) fall back to `MIN_SCALE`.
    pub fn from_scale(scale: f32) -> Self {
        let scale = if scale.is_nan() {
            1.0
        } else if scale <= 0.0 {
            MIN_SCALE
        } else {
            scale.min(1.0)
        };
        Self {
            scale,
            width: LOGICAL_WIDTH * scale,
            height: LOGICAL_HEIGHT * scale,
        }
    }
}

/// Convert a pointer position on the rendered surface into logical coordinates.
///
/// `rendered_width` is the on-screen width of the canvas (CSS pixels), which can
/// differ from the backing surface width.
pub fn to_logical(physical: Vec2, rendered_width: f32) -> Result<Vec2, GameError> {
    let rendered_width = ensure_finite("rendered width", rendered_width)?;
    if rendered_width <= 0.0 {
        return Err(GameError::InvalidInput(format!(
            "rendered width must be positive, got {rendered_width}"
        )));
    }
    ensure_finite("pointer x", physical.x)?;
    ensure_finite("pointer y", physical.y)?;
    Ok(physical * (LOGICAL_WIDTH / rendered_width))
}

/// Keep targets that are still off-field on their spawn side pinned just
/// outside it after a resize, instead of letting them pop into view.
pub fn repin_targets(targets: &mut [Target]) {
    for t in targets.iter_mut() {
        match t.edge {
            Edge::Top if t.pos.y < 0.0 => t.pos.y = -t.size,
            Edge::Right if t.pos.x > LOGICAL_WIDTH => t.pos.x = LOGICAL_WIDTH + t.size,
            Edge::Bottom if t.pos.y > LOGICAL_HEIGHT => t.pos.y = LOGICAL_HEIGHT + t.size,
            Edge::Left if t.pos.x < 0.0 => t.pos.x = -t.size,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::TargetKind;
    use proptest::prelude::*;

    fn target(id: u32, kind: TargetKind, edge: Edge, pos: Vec2) -> Target {
        Target {
            id,
            kind,
            pos,
            vel: Vec2::new(1.0, 1.0),
            size: 40.0,
            active: id % 2 == 0,
            edge,
            origin: 0.0,
            max_distance: 200.0,
            rotation: 0.0,
            rotation_speed: 0.0,
        }
    }

    #[test]
    fn test_wide_container_caps_at_one() {
        let v = Viewport::from_container_width(1920.0).unwrap();
        assert_eq!(v.scale, 1.0);
        assert_eq!((v.width, v.height), (800.0, 600.0));
    }

    #[test]
    fn test_narrow_container() {
        let v = Viewport::from_container_width(400.0).unwrap();
        assert_eq!(v.scale, 0.5);
        assert_eq!((v.width, v.height), (400.0, 300.0));
    }

    #[test]
    fn test_tiny_container_is_not_floored() {
        let v = Viewport::from_container_width(8.0).unwrap();
        assert_eq!(v.scale, 8.0 / LOGICAL_WIDTH);
        assert!(v.scale < MIN_SCALE);
    }

    #[test]
    fn test_degenerate_widths_clamp() {
        assert_eq!(Viewport::from_container_width(0.0).unwrap().scale, MIN_SCALE);
        assert_eq!(Viewport::from_container_width(-50.0).unwrap().scale, MIN_SCALE);
        assert!(Viewport::from_container_width(f32::NAN).is_err());
        assert!(Viewport::from_container_width(f32::INFINITY).is_err());
    }

    #[test]
    fn test_to_logical() {
        let p = to_logical(Vec2::new(200.0, 150.0), 400.0).unwrap();
        assert_eq!(p, Vec2::new(400.0, 300.0));
        assert!(to_logical(Vec2::new(f32::NAN, 0.0), 400.0).is_err());
        assert!(to_logical(Vec2::ZERO, 0.0).is_err());
    }

    #[test]
    fn test_repin_keeps_offscreen_targets_outside() {
        let mut targets = vec![
            target(1, TargetKind::Shrimp, Edge::Top, Vec2::new(300.0, -10.0)),
            target(2, TargetKind::Bomb, Edge::Right, Vec2::new(820.0, 200.0)),
            target(3, TargetKind::Octopus, Edge::Bottom, Vec2::new(300.0, 601.0)),
            target(4, TargetKind::GoldenShrimp, Edge::Left, Vec2::new(-5.0, 200.0)),
            target(5, TargetKind::Shrimp, Edge::Top, Vec2::new(300.0, 250.0)),
        ];
        repin_targets(&mut targets);
        assert_eq!(targets[0].pos.y, -40.0);
        assert_eq!(targets[1].pos.x, 840.0);
        assert_eq!(targets[2].pos.y, 640.0);
        assert_eq!(targets[3].pos.x, -40.0);
        assert_eq!(targets[4].pos, Vec2::new(300.0, 250.0), "on-field targets untouched");
    }

    #[test]
    fn test_resize_roundtrip_preserves_flags_and_kinds() {
        use crate::sim::GameSession;
        use crate::tuning::Tuning;

        let mut session = GameSession::new(3, Tuning::default());
        session.targets = vec![
            target(1, TargetKind::Shrimp, Edge::Top, Vec2::new(300.0, -10.0)),
            target(2, TargetKind::Bomb, Edge::Left, Vec2::new(100.0, 200.0)),
            target(3, TargetKind::Octopus, Edge::Bottom, Vec2::new(300.0, 610.0)),
        ];
        let before: Vec<_> = session.targets.iter().map(|t| (t.id, t.kind, t.active)).collect();

        assert_eq!(session.resize(400.0).unwrap(), 0.5);
        assert_eq!(session.resize(800.0).unwrap(), 1.0);

        let after: Vec<_> = session.targets.iter().map(|t| (t.id, t.kind, t.active)).collect();
        assert_eq!(before, after);
        assert_eq!(session.stats.current_scale, 1.0);
    }

    proptest! {
        #[test]
        fn prop_scale_matches_container(width in 0.01f32..4000.0) {
            let v = Viewport::from_container_width(width).unwrap();
            let expected = (width / LOGICAL_WIDTH).min(1.0);
            prop_assert!((v.scale - expected).abs() < 1e-6);
            prop_assert!(v.scale > 0.0 && v.scale <= 1.0);
            prop_assert!((v.width - LOGICAL_WIDTH * v.scale).abs() < 1e-3);
        }
    }
}
