//! Obstacle spawning
//!
//! Randomness comes from a [`SpawnRng`] so tests can swap the seeded PCG for a
//! fixed sequence and get reproducible obstacles.

use std::fmt::Debug;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::*;
use crate::settings::Tuning;

/// Source of uniform samples in [0, 1)
pub trait SpawnRng: Debug + Send {
    fn next_unit(&mut self) -> f32;
}

impl SpawnRng for Pcg32 {
    fn next_unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Replays a fixed list of samples, wrapping around at the end
#[derive(Debug, Clone)]
pub struct FixedSequence {
    values: Vec<f32>,
    cursor: usize,
}

impl FixedSequence {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns the same sample
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl SpawnRng for FixedSequence {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}

/// Difficulty multiplier applied to obstacle speed
pub fn speed_multiplier(score: f64) -> f32 {
    (1.0 + score / DIFFICULTY_SCORE_SCALE) as f32
}

/// Builds obstacles from an owned random source
#[derive(Debug)]
pub struct Spawner {
    rng: Box<dyn SpawnRng>,
}

impl Spawner {
    pub fn new(rng: Box<dyn SpawnRng>) -> Self {
        Self { rng }
    }

    /// Production spawner backed by a seeded PCG
    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(Pcg32::seed_from_u64(seed)))
    }

    /// Deterministic spawner for tests and replays
    pub fn fixed(values: Vec<f32>) -> Self {
        Self::new(Box::new(FixedSequence::new(values)))
    }

    /// Roll a new obstacle just past the right edge.
    ///
    /// Samples are drawn in order: size, y, speed, kind, rotation.
    pub fn spawn(&mut self, id: u32, tuning: &Tuning, score: f64) -> Obstacle {
        let size = OBSTACLE_MIN_SIZE + self.rng.next_unit() * OBSTACLE_SIZE_RANGE;
        let y = self.rng.next_unit() * (tuning.playfield_height - size).max(0.0);
        let speed =
            (tuning.base_speed + self.rng.next_unit() * SPEED_SPREAD) * speed_multiplier(score);
        let kind_index = (self.rng.next_unit() * ObstacleKind::ALL.len() as f32) as usize;
        let kind = ObstacleKind::ALL[kind_index.min(ObstacleKind::ALL.len() - 1)];
        let rotation = self.rng.next_unit() * std::f32::consts::TAU;

        Obstacle {
            id,
            pos: Vec2::new(tuning.playfield_width + SPAWN_OFFSET_X, y),
            size: Vec2::splat(size),
            speed,
            kind,
            rotation,
        }
    }
}
