//! Ground Runner - a single-screen endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, obstacles, collisions, game state)
//!
//! Drawing and input wiring live in the binary (`main.rs`); they only read
//! [`sim::Snapshot`] and call the [`sim::GameState`] commands.

pub mod sim;

pub use sim::{Config, ConfigError, GamePhase, GameState, Rect, Snapshot, TickInput};

/// Game configuration constants
///
/// Defaults for [`sim::Config`]. Units are pixels and seconds; y grows downward.
pub mod consts {
    /// Seconds the character must survive to win
    pub const SURVIVAL_SECONDS: f32 = 60.0;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_VELOCITY: f32 = -750.0;

    /// Obstacle scroll speed (pixels/s)
    pub const OBSTACLE_SPEED: f32 = 320.0;
    /// Spawn interval bounds (seconds, inclusive)
    pub const SPAWN_INTERVAL_MIN: f32 = 1.2;
    pub const SPAWN_INTERVAL_MAX: f32 = 2.5;

    /// Obstacle size bounds (inclusive)
    pub const OBSTACLE_WIDTH_MIN: f32 = 40.0;
    pub const OBSTACLE_WIDTH_MAX: f32 = 90.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 60.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 150.0;

    /// Playfield dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;
    pub const GROUND_HEIGHT: f32 = 70.0;

    /// Character geometry
    pub const CHARACTER_X: f32 = 140.0;
    pub const CHARACTER_WIDTH: f32 = 72.0;
    pub const CHARACTER_HEIGHT: f32 = 96.0;

    /// Longest frame the simulation accepts; anything longer is truncated
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Upper bound accepted for `max_frame_dt`
    pub const FRAME_DT_LIMIT: f32 = 1.0;
    /// Longest single physics sub-step
    pub const MAX_STEP_DT: f32 = 1.0 / 60.0;
    /// Accepted range for `max_step_dt`; the upper bound prevents tunneling
    pub const STEP_DT_MIN: f32 = 1.0 / 1000.0;
    pub const STEP_DT_LIMIT: f32 = 1.0 / 30.0;
    /// Most sub-steps a single tick can run (`FRAME_DT_LIMIT / STEP_DT_MIN`)
    pub const MAX_SUBSTEPS: u32 = 1000;
}
