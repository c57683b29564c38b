//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-frame ticks only (cadences and delays are tick counters)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use spawn::Cadence;
pub use state::{Bullet, FallingObject, GamePhase, GameState};
pub use tick::{Command, TickInput, apply_command, tick};
