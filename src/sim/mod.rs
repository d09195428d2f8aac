//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Randomness only through the spawner's injected generator
//! - Stable iteration order (spawn order)
//! - No rendering or persistence dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod spawner;
pub mod state;
pub mod stats;
pub mod tick;

pub use autopilot::Autopilot;
pub use clock::{FramePacer, SimClock};
pub use collision::{Aabb, first_hit};
pub use spawner::{FixedSequence, SpawnRng, Spawner, speed_multiplier};
pub use state::{FrameSnapshot, GameEvent, GamePhase, GameState, Obstacle, ObstacleKind, Player};
pub use stats::{FinalRun, RunStats};
pub use tick::{TickInput, tick};
