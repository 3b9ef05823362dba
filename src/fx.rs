//! Short-lived presentation effects
//!
//! Hit rings, the level-up screen flash and the level banner all fade on
//! their own clock. Instead of spawning timers, the host keeps an [`Effects`]
//! list and advances it once per frame alongside the simulation.

use glam::Vec2;

use crate::sim::{Target, TargetKind};

/// Fade time of the ring drawn around a struck target (10 steps of 50 ms)
pub const HIT_RING_SECS: f32 = 0.5;
/// Screen flash on level up
pub const FLASH_SECS: f32 = 0.5;
/// "LEVEL UP!" banner
pub const BANNER_SECS: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectKind {
    HitRing { pos: Vec2, radius: f32, kind: TargetKind },
    ScreenFlash,
    LevelBanner { level: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Effect {
    pub kind: EffectKind,
    /// Seconds since the effect started
    pub age: f32,
    pub duration: f32,
}

impl Effect {
    pub fn new(kind: EffectKind, duration: f32) -> Self {
        Self {
            kind,
            age: 0.0,
            duration,
        }
    }

    /// 0 at start, 1 when finished
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.age / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Opacity for drawing; banners stay solid until they vanish
    pub fn alpha(&self) -> f32 {
        match self.kind {
            EffectKind::LevelBanner { .. } => 1.0,
            _ => 1.0 - self.progress(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.age >= self.duration
    }
}

/// Ring colour per target kind (CSS hex)
pub fn hit_color(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Shrimp => "#FF6B6B",
        TargetKind::GoldenShrimp => "#FFD700",
        TargetKind::Bomb => "#FF0000",
        TargetKind::Octopus => "#800080",
    }
}

/// Active effects in start order
#[derive(Debug, Clone, Default)]
pub struct Effects {
    items: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.items.push(effect);
    }

    /// Ring around a target that was just struck
    pub fn hit_ring(&mut self, target: &Target) {
        self.push(Effect::new(
            EffectKind::HitRing {
                pos: target.pos,
                radius: target.size * 1.5,
                kind: target.kind,
            },
            HIT_RING_SECS,
        ));
    }

    /// Flash plus banner; a newer banner replaces an older one
    pub fn level_up(&mut self, level: u32) {
        self.items
            .retain(|e| !matches!(e.kind, EffectKind::LevelBanner { .. }));
        self.push(Effect::new(EffectKind::ScreenFlash, FLASH_SECS));
        self.push(Effect::new(EffectKind::LevelBanner { level }, BANNER_SECS));
    }

    /// Age every effect and drop the finished ones
    pub fn advance(&mut self, dt: f32) {
        for e in &mut self.items {
            e.age += dt;
        }
        self.items.retain(|e| !e.is_finished());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.items.iter()
    }

    /// Level shown by the current banner, if one is up
    pub fn banner_level(&self) -> Option<u32> {
        self.items.iter().rev().find_map(|e| match e.kind {
            EffectKind::LevelBanner { level } => Some(level),
            _ => None,
        })
    }

    pub fn flash_alpha(&self) -> f32 {
        self.items
            .iter()
            .filter(|e| e.kind == EffectKind::ScreenFlash)
            .map(Effect::alpha)
            .fold(0.0, f32::max)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
