//! Demo-mode pilot
//!
//! Picks up/down input for the craft so the headless build can play a run on
//! its own. Not part of the deterministic rules, it only produces input.

use super::state::{GameState, Obstacle};
use super::tick::TickInput;

/// How many frames ahead an obstacle counts as incoming
const LOOKAHEAD_FRAMES: f32 = 45.0;
/// Extra vertical clearance the pilot tries to keep
const CLEARANCE: f32 = 12.0;

/// Simple threat-avoiding pilot
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl Autopilot {
    /// Choose input for the next tick
    pub fn steer(&self, state: &GameState) -> TickInput {
        let player = &state.player;
        let top = player.pos.y - CLEARANCE;
        let bottom = player.pos.y + player.size.y + CLEARANCE;
        let center = player.pos.y + player.size.y / 2.0;
        let max_y = state.tuning.player_max_y();

        // Nearest obstacle that will reach us soon and shares our lane
        let threat = state
            .obstacles
            .iter()
            .filter(|o| is_incoming(o, player.pos.x, player.size.x))
            .filter(|o| o.pos.y < bottom && o.pos.y + o.size.y > top)
            .min_by(|a, b| {
                a.pos
                    .x
                    .partial_cmp(&b.pos.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(threat) = threat else {
            // Drift back toward the middle when nothing is coming
            let mid = max_y / 2.0;
            let y = player.pos.y;
            return TickInput {
                up: y > mid + 20.0,
                down: y < mid - 20.0,
            };
        };

        let threat_center = threat.pos.y + threat.size.y / 2.0;
        let room_above = threat.pos.y;
        let room_below = state.tuning.playfield_height - (threat.pos.y + threat.size.y);

        // Dodge away from the threat's centre unless that side is too cramped
        let prefer_up = if threat_center > center {
            room_above >= player.size.y + CLEARANCE
        } else {
            room_below < player.size.y + CLEARANCE
        };

        TickInput {
            up: prefer_up && player.pos.y > 0.0,
            down: !prefer_up && player.pos.y < max_y,
        }
    }
}

fn is_incoming(obstacle: &Obstacle, player_x: f32, player_w: f32) -> bool {
    let reach = obstacle.speed * LOOKAHEAD_FRAMES;
    obstacle.pos.x + obstacle.size.x > player_x && obstacle.pos.x < player_x + player_w + reach
}
