//! Shrimp Catch - A tap-the-target browser arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, hit-testing, session state)
//! - `presenter`: Interface the simulation calls into for UI side effects
//! - `fx`: Short-lived presentation effects advanced once per frame
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural Web Audio sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod fx;
pub mod presenter;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use presenter::Presenter;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Logical playfield dimensions (all simulation coordinates use these)
    pub const LOGICAL_WIDTH: f32 = 800.0;
    pub const LOGICAL_HEIGHT: f32 = 600.0;

    /// Scale used when the container has collapsed to zero width
    pub const MIN_SCALE: f32 = 0.05;
    /// Scale at or below which the "small screen" tuning tier applies
    pub const SMALL_SCREEN_SCALE: f32 = 0.7;

    /// Player lives
    pub const START_HP: i32 = 3;
    pub const MAX_HP: i32 = 3;

    /// Score needed per level step (gap to level n+1 is this times n)
    pub const LEVEL_SCORE_STEP: u64 = 1000;

    /// Countdown before a run starts (whole seconds)
    pub const COUNTDOWN_STEPS: u8 = 3;
    pub const COUNTDOWN_STEP_SECS: f32 = 1.0;
}

/// Scale-tiered multiplier shared by speed, jitter, rotation and gravity.
///
/// Smaller viewports get relatively faster motion so the game feels the same
/// at lower resolution.
#[inline]
pub fn motion_multiplier(scale: f32) -> f32 {
    tiered(scale, 0.5, 0.3)
}

/// Scale-tiered multiplier for the per-tick spawn chance.
#[inline]
pub fn spawn_rate_multiplier(scale: f32) -> f32 {
    tiered(scale, 0.3, 0.2)
}

#[inline]
fn tiered(scale: f32, small_gain: f32, large_falloff: f32) -> f32 {
    if scale <= consts::SMALL_SCREEN_SCALE {
        1.0 + (1.0 - scale) * small_gain
    } else {
        1.0 - (scale - consts::SMALL_SCREEN_SCALE) * large_falloff
    }
}
