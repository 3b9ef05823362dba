//! Presentation interface
//!
//! The simulation never touches the DOM, canvas or audio. It reports what
//! happened through this trait and the host decides how to show it. Every
//! call is fire-and-forget.

use crate::sim::{ClickMarker, GamePhase, Target};

pub trait Presenter {
    /// Draw the playfield for this tick
    fn render_frame(&mut self, targets: &[Target], marker: Option<&ClickMarker>);

    /// Refresh the score / lives / level labels
    fn update_stats(&mut self, score: u64, hp: i32, level: u32);

    fn on_level_up(&mut self, _level: u32) {}

    fn on_game_over(&mut self, _score: u64, _level: u32) {}

    /// Player left voluntarily
    fn on_quit(&mut self, _score: u64, _level: u32) {}

    /// Countdown number to display (3, 2, 1)
    fn on_countdown(&mut self, _remaining: u8) {}

    fn on_phase_change(&mut self, _phase: GamePhase) {}

    /// A target was struck (already deactivated)
    fn on_hit(&mut self, _target: &Target) {}
}
