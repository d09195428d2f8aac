//! Astro Dodge - A side-scrolling obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, scoring)
//! - `render`: Render adapter contract and a text renderer
//! - `persistence`: Run history storage behind a background worker
//! - `highscores`: Display-side read model of history and all-time high
//! - `settings`: Tunables fixed at startup
//! - `session`: Frame loop wiring input, simulation, rendering and persistence

pub mod error;
pub mod highscores;
pub mod input;
pub mod mission_log;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PersistError};
pub use highscores::{Scoreboard, SyncStatus};
pub use settings::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the native loop (one tick per frame)
    pub const FRAME_RATE: u32 = 60;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Player craft defaults
    pub const PLAYER_SIZE: f32 = 40.0;
    pub const PLAYER_X: f32 = 60.0;
    /// Vertical displacement per tick while a direction key is held
    pub const PLAYER_STEP: f32 = 6.0;

    /// Shield charge is a percentage
    pub const SHIELD_MAX: f32 = 100.0;
    pub const SHIELD_RECHARGE_RATE: f32 = 0.15; // per tick

    /// Obstacle defaults
    pub const BASE_SPEED: f32 = 4.0;
    /// Random extra speed added on top of the base (uniform [0, spread))
    pub const SPEED_SPREAD: f32 = 2.0;
    pub const OBSTACLE_MIN_SIZE: f32 = 25.0;
    pub const OBSTACLE_SIZE_RANGE: f32 = 45.0; // sizes in [25, 70)
    /// Obstacles spawn this far past the right edge
    pub const SPAWN_OFFSET_X: f32 = 100.0;
    /// Obstacles are culled once their trailing edge passes -DESPAWN_MARGIN
    pub const DESPAWN_MARGIN: f32 = 50.0;
    pub const ROTATION_STEP: f32 = 0.02;
    pub const SPAWN_CADENCE_TICKS: u32 = 60;

    /// Speed multiplier is 1 + score / DIFFICULTY_SCORE_SCALE
    pub const DIFFICULTY_SCORE_SCALE: f64 = 2000.0;

    /// Collision hitbox is shrunk by this much on every side
    pub const HITBOX_MARGIN: f32 = 5.0;

    /// Scoring
    pub const DODGE_BONUS: f64 = 10.0;
    pub const SURVIVAL_SCORE_PER_TICK: f64 = 0.2;

    /// Number of runs returned in the recent history summary
    pub const HISTORY_LIMIT: usize = 5;
}
