//! End-to-end run scenarios driven through the public API

use std::time::Duration;

use astro_dodge::SyncStatus;
use astro_dodge::Tuning;
use astro_dodge::persistence::{MemoryStore, PersistenceWorker, RunStore};
use astro_dodge::render::FrameRecorder;
use astro_dodge::session::Session;
use astro_dodge::sim::{
    FinalRun, GamePhase, GameState, Obstacle, ObstacleKind, Spawner, TickInput, tick,
};
use glam::Vec2;

const PARK: TickInput = TickInput {
    up: false,
    down: true,
};

/// Obstacles always spawn in the top lane, the craft hides at the bottom
fn top_lane_game() -> GameState {
    let mut state = GameState::with_spawner(Tuning::default(), Spawner::fixed(vec![0.0]));
    state.start_run();
    state
}

fn drop_on_player(state: &mut GameState) {
    let id = state.next_entity_id();
    let pos = state.player.pos;
    state.obstacles.push(Obstacle {
        id,
        pos,
        size: Vec2::splat(50.0),
        speed: 0.0,
        kind: ObstacleKind::Asteroid,
        rotation: 0.0,
    });
}

#[test]
fn test_three_dodges_in_a_row() {
    let mut state = top_lane_game();
    let mut ticks = 0u32;
    while state.stats.obstacles_dodged < 3 {
        assert_eq!(tick(&mut state, &PARK), None, "craft should never be hit");
        ticks += 1;
        assert!(ticks < 2_000, "obstacles never left the playfield");
    }
    assert_eq!(state.stats.obstacles_dodged, 3);
    assert!(state.stats.score >= 30.0);
    let expected = 30.0 + 0.2 * ticks as f64;
    assert!((state.stats.score - expected).abs() < 1e-6);
}

#[test]
fn test_final_score_is_floored() {
    let mut state = top_lane_game();
    state.stats.score = 1499.6;
    state.player.break_shield();
    drop_on_player(&mut state);
    // 1499.6 + 0.2 survival = 1499.8
    let result = tick(&mut state, &TickInput::default());
    assert_eq!(
        result,
        Some(FinalRun {
            score: 1499,
            obstacles_dodged: 0
        })
    );
}

#[test]
fn test_shield_then_death() {
    let mut state = top_lane_game();
    drop_on_player(&mut state);
    assert_eq!(tick(&mut state, &TickInput::default()), None);
    assert!(state.obstacles.is_empty());
    assert!(!state.player.shield_active);

    drop_on_player(&mut state);
    assert!(tick(&mut state, &TickInput::default()).is_some());
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn test_game_over_idle_playing_resets_everything() {
    let mut state = top_lane_game();
    for _ in 0..300 {
        tick(&mut state, &PARK);
    }
    state.player.break_shield();
    drop_on_player(&mut state);
    tick(&mut state, &PARK);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert!(state.stats.score > 0.0);

    state.return_to_idle();
    assert!(state.start_run());
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.stats.score, 0.0);
    assert_eq!(state.stats.obstacles_dodged, 0);
    assert!(state.obstacles.is_empty());
    assert!(state.player.shield_active);
    assert_eq!(state.player.shield_charge, 100.0);
    assert_eq!(state.clock.frame(), 0);
}

#[test]
fn test_high_score_comes_from_the_store() {
    let mut store = MemoryStore::new();
    store.submit_run(4_200, 80).unwrap();
    let worker = PersistenceWorker::spawn(store).unwrap();

    let mut session = Session::new(top_lane_game(), FrameRecorder::default(), Some(worker));
    assert_eq!(session.wait_for_sync(Duration::from_secs(5)), SyncStatus::Synced);
    assert_eq!(session.state.stats.high_score, 4_200);

    session.frame_with(PARK);
    let last = session.renderer().frames.last().unwrap();
    assert_eq!(last.high_score, 4_200);
}
