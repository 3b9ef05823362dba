//! Procedural target generation
//!
//! Targets enter from a random edge, just outside the playfield, heading
//! inward with a little sideways drift. Speeds scale with the viewport and
//! with the current level.

use glam::Vec2;
use rand::Rng;

use super::state::{Edge, Target, TargetKind};
use crate::consts::*;
use crate::motion_multiplier;
use crate::tuning::{KindWeights, Tuning};

/// Pick a target kind from the weighted table.
pub fn draw_kind<R: Rng + ?Sized>(rng: &mut R, weights: &KindWeights) -> TargetKind {
    let total = weights.total().unwrap_or(u32::MAX);
    let roll = rng.random::<f32>() * total as f32;
    kind_for_roll(roll, weights)
}

/// First-fit weighted pick: subtract weights in order until the remainder
/// drops to zero or below. A roll landing exactly on a boundary goes to the
/// earlier kind. Zero-weight kinds are never chosen.
pub fn kind_for_roll(roll: f32, weights: &KindWeights) -> TargetKind {
    let mut remainder = roll;
    let mut fallback = None;
    for (kind, weight) in weights.ordered() {
        if weight == 0 {
            continue;
        }
        fallback.get_or_insert(kind);
        remainder -= weight as f32;
        if remainder <= 0.0 {
            return kind;
        }
    }
    fallback.unwrap_or(TargetKind::Shrimp)
}

/// Speed multiplier from level (+8% per level above 1 by default)
#[inline]
pub fn level_speed_factor(tuning: &Tuning, level: u32) -> f32 {
    1.0 + level.saturating_sub(1) as f32 * tuning.level_speed_step
}

/// Per-tick spawn probability for a level and scale
#[inline]
pub fn spawn_chance(tuning: &Tuning, level: u32, scale: f32) -> f32 {
    tuning.spawn_chance * level as f32 * crate::spawn_rate_multiplier(scale)
}

/// Build a new target. Pure apart from the RNG; the caller owns insertion.
pub fn spawn_target<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
    scale: f32,
    id: u32,
) -> Target {
    let kind = draw_kind(rng, &tuning.weights);
    let size = tuning.size_of(kind);
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];

    let motion = scale * motion_multiplier(scale);
    let speed = tuning.speed.lerp(rng.random::<f32>()) * motion;
    let drift = (rng.random::<f32>() - 0.5) * 2.0 * tuning.jitter * motion;

    // Perpendicular coordinate stays clear of the corners
    let along = |dim: f32, t: f32| size + t * (dim - size * 2.0);
    let t: f32 = rng.random();

    let (pos, vel, origin) = match edge {
        Edge::Top => {
            let y = -size;
            (Vec2::new(along(LOGICAL_WIDTH, t), y), Vec2::new(drift, speed), y)
        }
        Edge::Right => {
            let x = LOGICAL_WIDTH + size;
            (Vec2::new(x, along(LOGICAL_HEIGHT, t)), Vec2::new(-speed, drift), x)
        }
        Edge::Bottom => {
            let y = LOGICAL_HEIGHT + size;
            (Vec2::new(along(LOGICAL_WIDTH, t), y), Vec2::new(drift, -speed), y)
        }
        Edge::Left => {
            let x = -size;
            (Vec2::new(x, along(LOGICAL_HEIGHT, t)), Vec2::new(speed, drift), x)
        }
    };

    let vel = vel * level_speed_factor(tuning, level);
    let max_distance =
        LOGICAL_WIDTH.max(LOGICAL_HEIGHT) * tuning.travel_span(scale).lerp(rng.random());
    let rotation_speed = (rng.random::<f32>() - 0.5) * 2.0 * tuning.rotation_speed * motion;

    log::debug!(
        "Spawn #{id} {} from {:?} at ({:.0}, {:.0}) vel ({:.2}, {:.2}) budget {:.0}",
        kind.as_str(),
        edge,
        pos.x,
        pos.y,
        vel.x,
        vel.y,
        max_distance
    );

    Target {
        id,
        kind,
        pos,
        vel,
        size,
        active: true,
        edge,
        origin,
        max_distance,
        rotation: 0.0,
        rotation_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashMap;

    #[test]
    fn test_first_fit_boundaries() {
        let w = KindWeights::default();
        assert_eq!(kind_for_roll(0.0, &w), TargetKind::Shrimp);
        assert_eq!(kind_for_roll(60.0, &w), TargetKind::Shrimp, "tie goes to earlier kind");
        assert_eq!(kind_for_roll(60.5, &w), TargetKind::Bomb);
        assert_eq!(kind_for_roll(75.0, &w), TargetKind::Bomb);
        assert_eq!(kind_for_roll(75.5, &w), TargetKind::GoldenShrimp);
        assert_eq!(kind_for_roll(80.5, &w), TargetKind::Octopus);
        assert_eq!(kind_for_roll(99.99, &w), TargetKind::Octopus);
    }

    #[test]
    fn test_zero_weight_never_drawn() {
        let w = KindWeights {
            shrimp: 0,
            bomb: 10,
            golden_shrimp: 0,
            octopus: 10,
        };
        assert_eq!(kind_for_roll(0.0, &w), TargetKind::Bomb);
        assert_eq!(kind_for_roll(10.0, &w), TargetKind::Bomb);
        assert_eq!(kind_for_roll(15.0, &w), TargetKind::Octopus);
    }

    #[test]
    fn test_weighted_distribution_converges() {
        let mut rng = Pcg32::seed_from_u64(42);
        let weights = KindWeights::default();
        let trials = 100_000;
        let mut counts: HashMap<TargetKind, u32> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(draw_kind(&mut rng, &weights)).or_default() += 1;
        }
        for (kind, expected) in [
            (TargetKind::Shrimp, 0.60),
            (TargetKind::Bomb, 0.15),
            (TargetKind::GoldenShrimp, 0.05),
            (TargetKind::Octopus, 0.20),
        ] {
            let share = counts.get(&kind).copied().unwrap_or(0) as f64 / trials as f64;
            assert!(
                (share - expected).abs() < 0.01,
                "{kind:?}: {share:.4} vs {expected}"
            );
        }
    }

    #[test]
    fn test_spawn_geometry() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..2_000 {
            let t = spawn_target(&mut rng, &tuning, 1, 1.0, id);
            assert!(t.active);
            assert_eq!(t.rotation, 0.0);
            let expected_size = if t.kind == TargetKind::GoldenShrimp { 50.0 } else { 40.0 };
            assert_eq!(t.size, expected_size);

            // Starts exactly one size outside its edge, heading inward
            assert_eq!(t.edge.travelled(t.pos, t.origin), 0.0);
            assert!(t.vel.dot(t.edge.outward()) < 0.0);
            match t.edge {
                Edge::Top => assert_eq!(t.pos.y, -t.size),
                Edge::Right => assert_eq!(t.pos.x, LOGICAL_WIDTH + t.size),
                Edge::Bottom => assert_eq!(t.pos.y, LOGICAL_HEIGHT + t.size),
                Edge::Left => assert_eq!(t.pos.x, -t.size),
            }
            let (perp, dim) = match t.edge {
                Edge::Top | Edge::Bottom => (t.pos.x, LOGICAL_WIDTH),
                Edge::Left | Edge::Right => (t.pos.y, LOGICAL_HEIGHT),
            };
            assert!(perp >= t.size && perp <= dim - t.size);

            // Speed 6..9 and drift within 2, at scale 1 the multiplier is 0.91
            let inward = -t.vel.dot(t.edge.outward());
            assert!(inward >= 6.0 * 0.91 - 1e-4 && inward <= 9.0 * 0.91 + 1e-4);
            let sideways = (t.vel - (-t.edge.outward() * inward)).length();
            assert!(sideways <= 2.0 * 0.91 + 1e-4);

            assert!(t.max_distance >= 80.0 - 1e-3 && t.max_distance <= 560.0 + 1e-3);
            assert!(t.rotation_speed.abs() <= 0.075 * 0.91 + 1e-6);
        }
    }

    #[test]
    fn test_small_screen_travel_budget() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let max = (0..2_000)
            .map(|id| spawn_target(&mut rng, &tuning, 1, 0.5, id).max_distance)
            .fold(0.0f32, f32::max);
        assert!(max > 560.0 && max <= 640.0 + 1e-3);
    }

    #[test]
    fn test_level_scales_velocity() {
        let tuning = Tuning::default();
        let a = spawn_target(&mut Pcg32::seed_from_u64(5), &tuning, 1, 1.0, 1);
        let b = spawn_target(&mut Pcg32::seed_from_u64(5), &tuning, 6, 1.0, 1);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.edge, b.edge);
        assert!((b.vel - a.vel * 1.4).length() < 1e-4);
        assert_eq!(a.max_distance, b.max_distance);
    }

    #[test]
    fn test_spawn_chance_grows_with_level() {
        let tuning = Tuning::default();
        assert!((spawn_chance(&tuning, 1, 1.0) - 0.0188).abs() < 1e-6);
        assert!((spawn_chance(&tuning, 3, 1.0) - 0.0564).abs() < 1e-6);
        assert!(spawn_chance(&tuning, 1, 0.5) > spawn_chance(&tuning, 1, 1.0));
    }
}
