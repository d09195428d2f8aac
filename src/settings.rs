//! Game tunables
//!
//! Fixed at initialization and never mutated while a run is in progress.
//! Persisted as JSON next to the run history.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// The enumerated gameplay tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width in playfield units
    pub playfield_width: f32,
    /// Playfield height in playfield units
    pub playfield_height: f32,
    /// Player craft edge length (the craft is square)
    pub player_size: f32,
    /// Minimum obstacle speed before difficulty scaling
    pub base_speed: f32,
    /// Shield charge regained per tick (percent)
    pub shield_recharge_rate: f32,
    /// Ticks between obstacle spawns
    pub spawn_cadence_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player_size: PLAYER_SIZE,
            base_speed: BASE_SPEED,
            shield_recharge_rate: SHIELD_RECHARGE_RATE,
            spawn_cadence_ticks: SPAWN_CADENCE_TICKS,
        }
    }
}

impl Tuning {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        positive("player_size", self.player_size)?;
        positive("base_speed", self.base_speed)?;

        if self.player_size > self.playfield_height {
            return Err(ConfigError::OutOfRange {
                name: "player_size",
                value: self.player_size as f64,
                expected: "<= playfield_height",
            });
        }
        // Largest obstacle must fit vertically or spawn y would be negative
        if self.playfield_height < OBSTACLE_MIN_SIZE + OBSTACLE_SIZE_RANGE {
            return Err(ConfigError::OutOfRange {
                name: "playfield_height",
                value: self.playfield_height as f64,
                expected: ">= 70",
            });
        }
        if !(self.shield_recharge_rate > 0.0 && self.shield_recharge_rate <= SHIELD_MAX) {
            return Err(ConfigError::OutOfRange {
                name: "shield_recharge_rate",
                value: self.shield_recharge_rate as f64,
                expected: "(0, 100]",
            });
        }
        if self.spawn_cadence_ticks == 0 {
            return Err(ConfigError::OutOfRange {
                name: "spawn_cadence_ticks",
                value: 0.0,
                expected: ">= 1",
            });
        }
        Ok(())
    }

    /// Read tunables from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let tuning: Tuning = serde_json::from_str(&json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tunables, falling back to defaults when the file is missing or bad
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("No tuning file at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write tunables as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Tuning saved to {}", path.display());
        Ok(())
    }

    /// Top of the valid player y range, never below zero
    pub fn player_max_y(&self) -> f32 {
        (self.playfield_height - self.player_size).max(0.0)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            name,
            value: value as f64,
            expected: "> 0",
        })
    }
}
