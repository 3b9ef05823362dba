//! Per-tick target motion
//!
//! Targets fly in a straight line until they have used up their travel
//! budget, then a gravity pointing back out through their spawn edge bends
//! them around so they leave the way they came.

use super::state::Target;
use crate::motion_multiplier;
use crate::tuning::Tuning;

/// Gravity strength for the given render scale
#[inline]
pub fn gravity_for_scale(tuning: &Tuning, scale: f32) -> f32 {
    tuning.gravity * scale * motion_multiplier(scale) * tuning.gravity_damping
}

/// Advance a single target by one tick
pub fn advance(target: &mut Target, gravity: f32) {
    target.pos += target.vel;
    if target.overshoot() > 0.0 {
        target.vel += target.edge.outward() * gravity;
    }
    target.rotation += target.rotation_speed;
}

/// Whether a target has left the field for good
pub fn is_offscreen(target: &Target, tuning: &Tuning) -> bool {
    let margin = target.size * tuning.cull_margin;
    if tuning.full_bounds_cull {
        super::state::Edge::ALL
            .iter()
            .any(|edge| edge.is_past(target.pos, margin))
    } else {
        target.edge.is_past(target.pos, margin)
    }
}

/// Drop inactive targets, move the rest, and cull the ones that left.
pub fn step(targets: &mut Vec<Target>, tuning: &Tuning, scale: f32) {
    let gravity = gravity_for_scale(tuning, scale);
    targets.retain_mut(|t| {
        if !t.active {
            return false;
        }
        advance(t, gravity);
        let gone = is_offscreen(t, tuning);
        if gone {
            log::trace!("Target #{} left through {:?}", t.id, t.edge);
        }
        !gone
    });
}
