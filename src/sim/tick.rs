//! Per-frame simulation tick
//!
//! Advances the game state by exactly one frame. Order of operations is fixed:
//! steer, recharge shield, move obstacles, cull dodged obstacles, survival
//! score, spawn, then resolve at most one collision.

use super::collision::first_hit;
use super::state::{GameEvent, GamePhase, GameState};
use super::stats::FinalRun;
use crate::consts::HITBOX_MARGIN;

/// Input commands for a single tick, sampled once at tick start
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
}

/// Advance the game state by one frame.
///
/// Returns the finalized run on the tick the craft is destroyed. Outside of
/// `Playing` this is a no-op and returns `None`.
pub fn tick(state: &mut GameState, input: &TickInput) -> Option<FinalRun> {
    state.events.clear();

    if state.phase != GamePhase::Playing {
        return None;
    }

    // Movement
    let max_y = state.tuning.player_max_y();
    state.player.steer(input.up, input.down, max_y);

    // Shield recharge
    if state
        .player
        .recharge_shield(state.tuning.shield_recharge_rate)
    {
        state.events.push(GameEvent::ShieldRecharged);
    }

    // Obstacles drift left
    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }

    // Anything fully past the left edge was dodged
    let before = state.obstacles.len();
    state.obstacles.retain(|o| !o.is_off_screen());
    let dodged = (before - state.obstacles.len()) as u32;
    if dodged > 0 {
        state.stats.record_dodges(dodged);
        state.events.push(GameEvent::Dodged { count: dodged });
    }

    // Survival score
    state.stats.record_survival_tick();

    // Spawning
    state.clock.advance();
    if state.clock.on_cadence(state.tuning.spawn_cadence_ticks) {
        let id = state.next_entity_id();
        let obstacle = state.spawner.spawn(id, &state.tuning, state.stats.score);
        log::debug!(
            "Spawned {} #{} size {:.1} speed {:.2}",
            obstacle.kind.as_str(),
            obstacle.id,
            obstacle.size.x,
            obstacle.speed
        );
        state.events.push(GameEvent::Spawned {
            id,
            kind: obstacle.kind,
        });
        state.obstacles.push(obstacle);
    }

    // Collisions: only the first hit counts this tick
    let hit = first_hit(&state.player, &state.obstacles, HITBOX_MARGIN)?;

    if state.player.shield_active {
        let obstacle = state.obstacles.remove(hit);
        state.player.break_shield();
        log::debug!("Shield absorbed {} #{}", obstacle.kind.as_str(), obstacle.id);
        state.events.push(GameEvent::ShieldAbsorbed {
            obstacle_id: obstacle.id,
        });
        return None;
    }

    let final_run = state.stats.finalize();
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::RunEnded(final_run));
    log::info!(
        "Run ended at frame {}: score {} ({} dodged)",
        state.clock.frame(),
        final_run.score,
        final_run.obstacles_dodged
    );
    Some(final_run)
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::settings::Tuning;
    use crate::sim::spawner::Spawner;
    use crate::sim::state::{Obstacle, ObstacleKind};

    /// Spawner that puts every obstacle in the top-left corner band, far
    /// from a player parked at the bottom.
    fn quiet_state() -> GameState {
        let mut state = GameState::with_spawner(Tuning::default(), Spawner::fixed(vec![0.0]));
        state.start_run();
        state.player.pos.y = state.tuning.player_max_y();
        state
    }

    fn obstacle(state: &mut GameState, x: f32, y: f32, speed: f32) -> Obstacle {
        Obstacle {
            id: state.next_entity_id(),
            pos: Vec2::new(x, y),
            size: Vec2::splat(30.0),
            speed,
            kind: ObstacleKind::Asteroid,
            rotation: 0.0,
        }
    }

    const DOWN: TickInput = TickInput {
        up: false,
        down: true,
    };

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(Tuning::default(), 1);
        let before = state.snapshot();
        assert_eq!(tick(&mut state, &DOWN), None);
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn test_survival_score_per_tick() {
        let mut state = quiet_state();
        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.stats.score - 2.0).abs() < 1e-9);
        assert_eq!(state.clock.frame(), 10);
    }

    #[test]
    fn test_spawn_on_cadence() {
        let mut state = quiet_state();
        for _ in 0..59 {
            tick(&mut state, &DOWN);
        }
        assert!(state.obstacles.is_empty());
        tick(&mut state, &DOWN);
        assert_eq!(state.obstacles.len(), 1);
        assert!(matches!(state.events[0], GameEvent::Spawned { .. }));
        assert_eq!(state.obstacles[0].pos.x, 900.0);
    }

    #[test]
    fn test_dodge_scores_bonus() {
        let mut state = quiet_state();
        let o = obstacle(&mut state, -75.0, 0.0, 10.0);
        state.obstacles.push(o);

        tick(&mut state, &DOWN);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.stats.obstacles_dodged, 1);
        assert!((state.stats.score - 10.2).abs() < 1e-9);
        assert_eq!(state.events, vec![GameEvent::Dodged { count: 1 }]);
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let mut state = quiet_state();
        let (px, py) = (state.player.pos.x, state.player.pos.y);
        let first = obstacle(&mut state, px, py, 0.0);
        let second = obstacle(&mut state, px + 2.0, py + 2.0, 0.0);
        let first_id = first.id;
        state.obstacles.push(first);
        state.obstacles.push(second);

        assert_eq!(tick(&mut state, &DOWN), None);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!state.player.shield_active);
        assert_eq!(state.player.shield_charge, 0.0);
        assert_eq!(state.obstacles.len(), 1);
        assert_ne!(state.obstacles[0].id, first_id);
        assert!(
            state
                .events
                .contains(&GameEvent::ShieldAbsorbed { obstacle_id: first_id })
        );
    }

    #[test]
    fn test_unshielded_hit_ends_run_once() {
        let mut state = quiet_state();
        state.player.break_shield();
        state.stats.score = 1499.6;
        let (px, py) = (state.player.pos.x, state.player.pos.y);
        let o = obstacle(&mut state, px, py, 0.0);
        state.obstacles.push(o);

        let result = tick(&mut state, &DOWN);
        assert_eq!(
            result,
            Some(FinalRun {
                score: 1499,
                obstacles_dodged: 0
            })
        );
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen afterwards
        let frozen = state.snapshot();
        for _ in 0..5 {
            assert_eq!(tick(&mut state, &DOWN), None);
        }
        assert_eq!(state.snapshot(), frozen);
    }

    #[test]
    fn test_shield_recharges_after_absorb() {
        let mut state = quiet_state();
        state.player.break_shield();
        state.player.shield_charge = 99.9;
        tick(&mut state, &DOWN);
        assert!(state.player.shield_active);
        assert_eq!(state.player.shield_charge, 100.0);
        assert_eq!(state.events[0], GameEvent::ShieldRecharged);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(Tuning::default(), 99999);
        let mut state2 = GameState::new(Tuning::default(), 99999);
        state1.start_run();
        state2.start_run();

        let inputs = [
            TickInput { up: true, down: false },
            TickInput::default(),
            TickInput { up: false, down: true },
        ];

        for i in 0..600 {
            let input = &inputs[i % inputs.len()];
            let a = tick(&mut state1, input);
            let b = tick(&mut state2, input);
            assert_eq!(a, b);
        }

        assert_eq!(state1.snapshot(), state2.snapshot());
    }

    #[test]
    fn test_oversized_craft_is_pinned_to_top() {
        let tuning = Tuning {
            player_size: 600.0,
            ..Default::default()
        };
        let mut state = GameState::with_spawner(tuning, Spawner::fixed(vec![0.0]));
        state.start_run();
        for _ in 0..5 {
            tick(&mut state, &DOWN);
            assert_eq!(state.player.pos.y, 0.0);
        }
    }
}
