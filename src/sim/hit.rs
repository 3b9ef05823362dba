//! Tap resolution
//!
//! Later targets are drawn on top, so they are tested first and a single tap
//! can only ever strike one target.

use glam::Vec2;

use super::state::Target;

/// Index of the topmost active target under `point`, if any
pub fn resolve(point: Vec2, targets: &[Target]) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .rev()
        .find(|(_, t)| t.active && t.contains_point(point))
        .map(|(i, _)| i)
}
