//! Character-grid renderer for terminals and logs

use std::io::Write;

use glam::Vec2;

use super::RenderAdapter;
use super::starfield::{outline_jitter, stars};
use crate::sim::{FrameSnapshot, GamePhase, ObstacleKind};

const EMPTY: char = ' ';
const STAR: char = '.';
const CRAFT: char = '>';
const SHIELD: char = ')';

/// Draws snapshots as a coarse grid of characters
pub struct TextRenderer<W: Write> {
    out: W,
    cols: usize,
    rows: usize,
    /// Only every n-th frame is written out
    every: u64,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            out,
            cols: cols.max(1),
            rows: rows.max(1),
            every: 1,
        }
    }

    /// Write only every `every`-th frame
    pub fn with_interval(mut self, every: u64) -> Self {
        self.every = every.max(1);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a snapshot to a string: grid rows followed by the HUD line
    pub fn compose(&self, frame: &FrameSnapshot) -> String {
        let mut grid = vec![vec![EMPTY; self.cols]; self.rows];
        let cell = Vec2::new(
            frame.playfield.x / self.cols as f32,
            frame.playfield.y / self.rows as f32,
        );

        for star in stars(frame.frame, frame.playfield) {
            if let Some((c, r)) = self.cell_of(star, cell) {
                grid[r][c] = STAR;
            }
        }

        for obstacle in &frame.obstacles {
            let (pos, size) = match obstacle.kind {
                ObstacleKind::Asteroid => {
                    // Rough outline: shrink toward the centre by the mean jitter
                    let scale =
                        (0..6).map(|v| outline_jitter(obstacle.id, v)).sum::<f32>() / 6.0;
                    let size = obstacle.size * scale;
                    (obstacle.pos + (obstacle.size - size) / 2.0, size)
                }
                ObstacleKind::Comet | ObstacleKind::Debris => (obstacle.pos, obstacle.size),
            };
            self.fill(&mut grid, pos, size, cell, obstacle.kind.glyph());
        }

        let player = &frame.player;
        self.fill(&mut grid, player.pos, player.size, cell, CRAFT);
        if player.shield_active {
            let front = Vec2::new(player.pos.x + player.size.x + cell.x * 0.5, player.pos.y);
            if let Some((c, r0)) = self.cell_of(front, cell) {
                let r1 = self
                    .cell_of(front + Vec2::new(0.0, player.size.y - 1.0), cell)
                    .map(|(_, r)| r)
                    .unwrap_or(r0);
                for row in grid.iter_mut().take(r1 + 1).skip(r0) {
                    if row[c] != CRAFT {
                        row[c] = SHIELD;
                    }
                }
            }
        }

        let mut text = String::with_capacity((self.cols + 1) * (self.rows + 2));
        text.push('+');
        text.push_str(&"-".repeat(self.cols));
        text.push_str("+\n");
        for row in &grid {
            text.push('|');
            text.extend(row.iter());
            text.push_str("|\n");
        }
        text.push('+');
        text.push_str(&"-".repeat(self.cols));
        text.push_str("+\n");
        text.push_str(&hud_line(frame));
        text.push('\n');
        text
    }

    fn cell_of(&self, point: Vec2, cell: Vec2) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let c = (point.x / cell.x) as usize;
        let r = (point.y / cell.y) as usize;
        (c < self.cols && r < self.rows).then_some((c, r))
    }

    fn fill(&self, grid: &mut [Vec<char>], pos: Vec2, size: Vec2, cell: Vec2, glyph: char) {
        let c0 = (pos.x / cell.x).floor().max(0.0) as usize;
        let r0 = (pos.y / cell.y).floor().max(0.0) as usize;
        let c1 = ((pos.x + size.x) / cell.x).ceil().max(0.0) as usize;
        let r1 = ((pos.y + size.y) / cell.y).ceil().max(0.0) as usize;
        for row in grid.iter_mut().take(r1.min(self.rows)).skip(r0) {
            for slot in row.iter_mut().take(c1.min(self.cols)).skip(c0) {
                *slot = glyph;
            }
        }
    }
}

/// Status line under the playfield
pub fn hud_line(frame: &FrameSnapshot) -> String {
    match frame.phase {
        GamePhase::Idle => format!("READY  high score {}  press start", frame.high_score),
        GamePhase::Playing => format!(
            "SCORE {:>7}  DODGED {:>4}  SHIELD {:>3}%{}  HIGH {}",
            frame.score,
            frame.obstacles_dodged,
            frame.shield_percent,
            if frame.player.shield_active { " [UP]" } else { "" },
            frame.high_score
        ),
        GamePhase::GameOver => format!(
            "GAME OVER  score {}  dodged {}",
            frame.score, frame.obstacles_dodged
        ),
    }
}

impl<W: Write> RenderAdapter for TextRenderer<W> {
    fn draw(&mut self, frame: &FrameSnapshot) {
        if !frame.frame.is_multiple_of(self.every) && frame.phase == GamePhase::Playing {
            return;
        }
        let text = self.compose(frame);
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            log::warn!("Dropped frame {}: {}", frame.frame, e);
        }
    }
}
