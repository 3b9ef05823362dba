//! Game state and core simulation types
//!
//! `GameSession` owns everything that changes during a run: the live targets,
//! the scoreboard, the seeded RNG and queued pointer input.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::session::SessionState;
use super::viewport::{self, Viewport};
use crate::consts::*;
use crate::error::{GameError, ensure_finite};
use crate::tuning::Tuning;

/// Target types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// Common target, +100
    Shrimp,
    /// Hazard, costs a life
    Bomb,
    /// Rare bonus, +500 and a life back
    GoldenShrimp,
    /// Penalty, -200
    Octopus,
}

impl TargetKind {
    pub const ALL: [TargetKind; 4] = [
        TargetKind::Shrimp,
        TargetKind::Bomb,
        TargetKind::GoldenShrimp,
        TargetKind::Octopus,
    ];

    /// Tap tolerance as a multiple of target size
    pub fn hit_radius_factor(self) -> f32 {
        match self {
            TargetKind::Shrimp => 1.3,
            TargetKind::GoldenShrimp => 1.4,
            TargetKind::Bomb | TargetKind::Octopus => 1.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TargetKind::Shrimp => "shrimp",
            TargetKind::Bomb => "bomb",
            TargetKind::GoldenShrimp => "golden shrimp",
            TargetKind::Octopus => "octopus",
        }
    }
}

/// Playfield edge a target enters from (and normally leaves through)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Distance covered from `origin` along the travel axis, positive inward
    #[inline]
    pub fn travelled(self, pos: Vec2, origin: f32) -> f32 {
        match self {
            Edge::Top => pos.y - origin,
            Edge::Right => origin - pos.x,
            Edge::Bottom => origin - pos.y,
            Edge::Left => pos.x - origin,
        }
    }

    /// Unit direction pointing back out through this edge
    #[inline]
    pub fn outward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::NEG_Y,
            Edge::Right => Vec2::X,
            Edge::Bottom => Vec2::Y,
            Edge::Left => Vec2::NEG_X,
        }
    }

    /// Whether `pos` has left the playfield through this edge by more than `margin`
    #[inline]
    pub fn is_past(self, pos: Vec2, margin: f32) -> bool {
        match self {
            Edge::Top => pos.y < -margin,
            Edge::Right => pos.x > LOGICAL_WIDTH + margin,
            Edge::Bottom => pos.y > LOGICAL_HEIGHT + margin,
            Edge::Left => pos.x < -margin,
        }
    }
}

/// A clickable target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    /// Center in logical playfield coordinates
    pub pos: Vec2,
    /// Logical px per tick
    pub vel: Vec2,
    pub size: f32,
    pub active: bool,
    pub edge: Edge,
    /// Spawn coordinate on the travel axis (y for Top/Bottom, x for Left/Right)
    pub origin: f32,
    /// Travel budget before gravity starts pulling the target back
    pub max_distance: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
}

impl Target {
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.size * self.kind.hit_radius_factor()
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.pos.distance(point) < self.hit_radius()
    }

    /// How far past its travel budget the target is (negative while inside it)
    #[inline]
    pub fn overshoot(&self) -> f32 {
        self.edge.travelled(self.pos, self.origin) - self.max_distance
    }
}

/// Feedback for the most recent tap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClickMarker {
    pub pos: Vec2,
    pub hit: bool,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing simulated yet
    Idle,
    /// 3-2-1 before a run, cannot be cancelled
    Countdown,
    /// Active gameplay
    Running,
    /// Lives ran out
    GameOver,
    /// Player quit voluntarily
    Completed,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Completed)
    }
}

/// One player's game, driven by [`super::tick`]
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub stats: SessionState,
    /// Live targets in spawn order (later = drawn on top)
    pub targets: Vec<Target>,
    pub click_marker: Option<ClickMarker>,
    /// Running frames simulated in the current run
    pub time_ticks: u64,
    pub(crate) pending_taps: Vec<Vec2>,
    pub(crate) countdown_remaining: u8,
    pub(crate) countdown_elapsed: f32,
    pub(crate) announced_countdown: Option<u8>,
    pub(crate) reported_phase: GamePhase,
    next_id: u32,
}

impl GameSession {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Idle,
            stats: SessionState::new(1.0),
            targets: Vec::new(),
            click_marker: None,
            time_ticks: 0,
            pending_taps: Vec::new(),
            countdown_remaining: 0,
            countdown_elapsed: 0.0,
            announced_countdown: None,
            reported_phase: GamePhase::Idle,
            next_id: 1,
        }
    }

    /// Allocate a new target ID
    pub fn next_target_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Surface size for the current scale
    pub fn viewport(&self) -> Viewport {
        Viewport::from_scale(self.stats.current_scale)
    }

    /// Begin the countdown from the start screen. Returns false if not idle.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.enter_countdown();
        true
    }

    /// Play again after game over or quitting. Returns false otherwise.
    pub fn restart(&mut self) -> bool {
        if !self.phase.is_terminal() {
            return false;
        }
        self.enter_countdown();
        true
    }

    /// End a running game voluntarily, keeping score and level for display
    pub fn quit(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            log::debug!("Ignoring quit in {:?}", self.phase);
            return false;
        }
        log::info!(
            "Player quit (score {}, level {})",
            self.stats.score,
            self.stats.level
        );
        self.phase = GamePhase::Completed;
        true
    }

    /// Queue a tap in logical coordinates, resolved on the next running tick
    pub fn pointer_input(&mut self, x: f32, y: f32) -> Result<(), GameError> {
        let x = ensure_finite("pointer x", x).inspect_err(|e| log::warn!("{e}"))?;
        let y = ensure_finite("pointer y", y).inspect_err(|e| log::warn!("{e}"))?;
        if self.phase == GamePhase::Running {
            self.pending_taps.push(Vec2::new(x, y));
        }
        Ok(())
    }

    /// Refit to a new container width; returns the resulting scale
    pub fn resize(&mut self, container_width: f32) -> Result<f32, GameError> {
        let view = Viewport::from_container_width(container_width)?;
        if view.scale != self.stats.current_scale {
            log::info!(
                "Scale {:.3} -> {:.3} ({}x{})",
                self.stats.current_scale,
                view.scale,
                view.width,
                view.height
            );
            self.stats.current_scale = view.scale;
            viewport::repin_targets(&mut self.targets);
        }
        Ok(view.scale)
    }

    fn enter_countdown(&mut self) {
        self.phase = GamePhase::Countdown;
        self.countdown_remaining = COUNTDOWN_STEPS;
        self.countdown_elapsed = 0.0;
        self.announced_countdown = None;
    }

    /// Fresh scoreboard and empty field, keeping the current scale
    pub(crate) fn begin_run(&mut self) {
        self.stats.reset();
        self.targets.clear();
        self.pending_taps.clear();
        self.click_marker = None;
        self.time_ticks = 0;
        self.phase = GamePhase::Running;
        log::info!("Run started (seed {})", self.seed);
    }
}
