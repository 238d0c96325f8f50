//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes only from tick deltas, never a wall clock
//! - Seeded (or injected) RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod config;
pub mod obstacles;
pub mod state;
pub mod tick;

pub use body::Character;
pub use collision::{Rect, overlaps_any};
pub use config::{Config, ConfigError};
pub use obstacles::{Obstacle, ObstacleField};
pub use state::{GamePhase, GameState, Snapshot};
pub use tick::{TickInput, sanitize_dt, tick};
