//! Game state and core simulation types
//!
//! Everything a run mutates lives in [`GameState`], owned by whoever drives
//! ticks. Display code only ever sees a [`FrameSnapshot`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::clock::SimClock;
use super::spawner::Spawner;
use super::stats::{FinalRun, RunStats};
use crate::consts::*;
use crate::settings::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start a run
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Absorbs the next hit when set
    pub shield_active: bool,
    /// 0-100, the shield comes back online at 100
    pub shield_charge: f32,
}

impl Player {
    /// Fresh craft, vertically centred at the left of the playfield
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, tuning.playfield_height / 2.0 - tuning.player_size / 2.0),
            size: Vec2::splat(tuning.player_size),
            shield_active: true,
            shield_charge: SHIELD_MAX,
        }
    }

    /// Apply one tick of vertical input and clamp to the playfield
    pub fn steer(&mut self, up: bool, down: bool, max_y: f32) {
        if up {
            self.pos.y -= PLAYER_STEP;
        }
        if down {
            self.pos.y += PLAYER_STEP;
        }
        self.pos.y = self.pos.y.min(max_y).max(0.0);
    }

    /// Regain charge. Returns true on the tick the shield comes back online.
    pub fn recharge_shield(&mut self, rate: f32) -> bool {
        if self.shield_charge >= SHIELD_MAX {
            return false;
        }
        self.shield_charge = (self.shield_charge + rate).clamp(0.0, SHIELD_MAX);
        if self.shield_charge >= SHIELD_MAX {
            self.shield_charge = SHIELD_MAX;
            self.shield_active = true;
            return true;
        }
        false
    }

    /// Spend the shield on a hit
    pub fn break_shield(&mut self) {
        self.shield_active = false;
        self.shield_charge = 0.0;
    }
}

/// Obstacle kinds. All collide the same way, they only differ in look and
/// in what speeds feel natural for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Heavy rock, drawn as a jagged polygon
    Asteroid,
    /// Light and fast, drawn as a bright square
    Comet,
    /// Cosmetic junk, drawn as a plain square
    Debris,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [
        ObstacleKind::Asteroid,
        ObstacleKind::Comet,
        ObstacleKind::Debris,
    ];

    /// Rendering hint for text output
    pub fn glyph(&self) -> char {
        match self {
            ObstacleKind::Asteroid => '@',
            ObstacleKind::Comet => '*',
            ObstacleKind::Debris => '#',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Asteroid => "asteroid",
            ObstacleKind::Comet => "comet",
            ObstacleKind::Debris => "debris",
        }
    }
}

/// An obstacle drifting toward the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Leftward displacement per tick
    pub speed: f32,
    pub kind: ObstacleKind,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
}

impl Obstacle {
    /// Move one tick to the left and spin
    pub fn advance(&mut self) {
        self.pos.x -= self.speed;
        self.rotation += ROTATION_STEP;
    }

    /// True once the trailing edge is past the left despawn margin
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= -DESPAWN_MARGIN
    }
}

/// Something that happened during a tick, for logging and presentation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, kind: ObstacleKind },
    Dodged { count: u32 },
    ShieldAbsorbed { obstacle_id: u32 },
    ShieldRecharged,
    RunEnded(FinalRun),
}

/// Complete game state for one session
#[derive(Debug)]
pub struct GameState {
    /// Tunables the state was built with
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Player craft
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Score and dodge tracking
    pub stats: RunStats,
    /// Frame counter
    pub clock: SimClock,
    /// Obstacle generator
    pub spawner: Spawner,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create an idle game with a seeded spawner
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_spawner(tuning, Spawner::seeded(seed))
    }

    /// Create an idle game around a specific spawner
    pub fn with_spawner(tuning: Tuning, spawner: Spawner) -> Self {
        Self {
            tuning,
            phase: GamePhase::Idle,
            player: Player::new(&tuning),
            obstacles: Vec::new(),
            stats: RunStats::default(),
            clock: SimClock::default(),
            spawner,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Idle -> Playing. Returns false if not idle.
    pub fn start_run(&mut self) -> bool {
        if self.phase != GamePhase::Idle {
            return false;
        }
        self.stats.reset();
        self.player = Player::new(&self.tuning);
        self.phase = GamePhase::Playing;
        log::info!("Run started");
        true
    }

    /// Enter Idle: clear the field and reset the craft and score
    pub fn return_to_idle(&mut self) {
        self.obstacles.clear();
        self.events.clear();
        self.player = Player::new(&self.tuning);
        self.stats.reset();
        self.clock.reset();
        if self.phase != GamePhase::Idle {
            log::info!("Back to idle");
        }
        self.phase = GamePhase::Idle;
    }

    /// Record the high score reported by the run store
    pub fn set_high_score(&mut self, high_score: u64) {
        self.stats.high_score = high_score;
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            frame: self.clock.frame(),
            playfield: Vec2::new(self.tuning.playfield_width, self.tuning.playfield_height),
            player: self.player,
            obstacles: self.obstacles.clone(),
            score: self.stats.display_score(),
            obstacles_dodged: self.stats.obstacles_dodged,
            high_score: self.stats.high_score,
            shield_percent: self.player.shield_charge.floor() as u32,
        }
    }
}

/// Immutable copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    /// Frame counter, drives cosmetic animation
    pub frame: u64,
    pub playfield: Vec2,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    /// Score floored for display
    pub score: u64,
    pub obstacles_dodged: u32,
    pub high_score: u64,
    pub shield_percent: u32,
}
