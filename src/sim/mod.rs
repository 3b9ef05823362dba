//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame, logical 800x600 coordinates
//! - Seeded RNG only
//! - Stable iteration order (spawn order doubles as draw order)
//! - No rendering or platform dependencies

pub mod hit;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod viewport;

pub use hit::resolve;
pub use physics::step;
pub use session::SessionState;
pub use spawn::spawn_target;
pub use state::{ClickMarker, Edge, GamePhase, GameSession, Target, TargetKind};
pub use tick::tick;
pub use viewport::{Viewport, to_logical};
