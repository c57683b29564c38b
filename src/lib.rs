//! Sky Raid - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `render`: Drawing-surface abstraction + canvas 2D backend
//! - `audio`: Background music over an HTML audio element

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod render;
pub mod sim;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the cadence intervals are expressed in
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default canvas dimensions (the driver may shrink them to fit the
    /// viewport; tests use these values directly)
    pub const CANVAS_WIDTH: f32 = 500.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Turret rectangle, anchored near the bottom edge
    pub const TURRET_WIDTH: f32 = 50.0;
    pub const TURRET_HEIGHT: f32 = 20.0;
    /// Turret top edge sits at `height - TURRET_BOTTOM_OFFSET`
    pub const TURRET_BOTTOM_OFFSET: f32 = 50.0;

    /// Bullet rectangle and motion
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    /// Pixels per tick, straight up
    pub const BULLET_SPEED: f32 = 5.0;
    /// Bullets spawn at `turret_x + BULLET_MUZZLE_OFFSET`
    pub const BULLET_MUZZLE_OFFSET: f32 = 20.0;
    /// Bullet spawn height: `height - BULLET_SPAWN_OFFSET`
    pub const BULLET_SPAWN_OFFSET: f32 = 60.0;

    /// Falling object square
    pub const OBJECT_SIZE: f32 = 30.0;
    /// Fall speed at level 1, pixels per tick
    pub const OBJECT_START_SPEED: f32 = 2.0;
    /// Fall speed gain per level
    pub const OBJECT_SPEED_STEP: f32 = 0.5;

    /// Points per destroyed object
    pub const SCORE_PER_HIT: u32 = 5;
    /// Score points per difficulty level
    pub const POINTS_PER_LEVEL: u32 = 20;

    /// Auto-fire cadence (500 ms)
    pub const BULLET_CADENCE_TICKS: u32 = TICKS_PER_SECOND / 2;
    /// Falling-object cadence (2000 ms)
    pub const OBJECT_CADENCE_TICKS: u32 = TICKS_PER_SECOND * 2;
    /// Delay before a game-over session restarts itself (5 s)
    pub const RESTART_DELAY_TICKS: u32 = TICKS_PER_SECOND * 5;
}
