//! Per-frame simulation tick
//!
//! Fixed pipeline, run to completion once per display refresh:
//! sonar fire request -> player movement and pickup -> node respawn and enemy
//! spawn -> enemy pursuit and collision -> sonar expansion -> terminal check.
//!
//! Enemies steer toward (and collide against) the player's position from the
//! start of the tick, before this tick's movement is applied. The sonar tests
//! the node as it was at the start of the tick; a node that was collected and
//! replaced this tick always starts hidden.

use super::event_log::LogKind;
use super::player::Player;
use super::score::Score;
use super::state::{GameEvent, GamePhase, GameState};
use super::sonar::SonarStep;
use crate::grid_to_pixel;

/// Input intents for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Start a new sonar pulse (one per key press)
    pub fire_sonar: bool,
}

/// What a tick did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Player-to-node distance after movement; None when the tick was skipped
    pub distance: Option<f32>,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    if state.phase == GamePhase::GameOver {
        return TickReport::default();
    }

    state.time_ticks += 1;
    let mut events = Vec::new();

    let player_before = state.player.pos;
    let target_before = (state.target.id, state.target.pixel_pos());

    // Sonar fire request: ring starts where the player was when the key went down
    if input.fire_sonar {
        let origin = grid_to_pixel(player_before);
        state.sonar.fire(origin);
        state.target.clear_reveal();
        log::debug!("Sonar fired at ({:.0}, {:.0})", origin.x, origin.y);
        events.push(GameEvent::PulseFired { origin });
    }

    // 1. Player movement and pickup
    state.player.step(Player::velocity(input));
    let proximity = state.player.proximity(&state.target);

    // 2. Node respawn and escalation
    if proximity.picked_up {
        let collected = state.target.id;
        let score = state.score.award();
        let next = state.next_entity_id();
        state.target.respawn(next, &mut state.rng);
        state.record(LogKind::Pickup);
        log::debug!(
            "Node {} secured, score {}, next node at ({}, {})",
            collected,
            score,
            state.target.pos.x,
            state.target.pos.y
        );
        events.push(GameEvent::TargetCollected {
            collected,
            next,
            score,
        });

        if Score::spawns_enemy(score) {
            let enemy = state.spawn_enemy();
            log::debug!("Enemy {} spawned ({} total)", enemy, state.enemies.len());
            events.push(GameEvent::EnemySpawned { enemy });
        }
    }

    // 3. Enemy pursuit and collision
    for enemy in state.enemies.step(player_before) {
        let lives = state.player.take_hit();
        state.record(LogKind::Damage);
        log::debug!("Enemy {} hit the player, {} lives left", enemy, lives);
        events.push(GameEvent::PlayerHit { enemy, lives });
    }

    // 4. Sonar expansion
    let step = state.sonar.expand(target_before.1);
    if step.covers_target() && state.target.id == target_before.0 && !state.target.revealed {
        state.target.reveal();
        log::debug!("Node {} revealed", state.target.id);
        events.push(GameEvent::TargetRevealed {
            target: state.target.id,
        });
    }
    if let SonarStep::Expired { .. } = step {
        events.push(GameEvent::PulseExpired);
    }

    if !state.player.is_alive() {
        state.phase = GamePhase::GameOver;
        let final_score = state.score.value();
        log::info!("Connection lost, final score {}", final_score);
        events.push(GameEvent::GameOver { final_score });
    }

    TickReport {
        distance: Some(proximity.distance),
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::enemy::SPAWN_CORNER;
    use glam::Vec2;

    fn fixed_clock() -> String {
        "12:00:00 PM".to_string()
    }

    fn new_state() -> GameState {
        GameState::with_timestamper(12345, fixed_clock)
    }

    fn fire() -> TickInput {
        TickInput {
            fire_sonar: true,
            ..Default::default()
        }
    }

    /// Park the enemies far from the player so they can't interfere
    fn park_enemies(state: &mut GameState) {
        let ids: Vec<_> = state.enemies.as_slice().iter().map(|e| e.id).collect();
        for id in ids {
            if let Some(enemy) = state.enemies.get_mut(id) {
                enemy.pos = Vec2::new(-1000.0, -1000.0);
            }
        }
    }

    #[test]
    fn test_idle_tick_reports_distance() {
        let mut state = new_state();
        let report = tick(&mut state, &TickInput::default());
        let d = report.distance.unwrap_or_default();
        assert!((d - 32.0_f32.sqrt()).abs() < 1e-3);
        assert!(report.events.is_empty());
        assert_eq!(state.score.value(), 0);
        assert_eq!(state.player.pos, Vec2::new(7.0, 7.0));
    }

    #[test]
    fn test_pickup_scores_once_and_respawns() {
        let mut state = new_state();
        park_enemies(&mut state);
        state.player.pos = Vec2::new(3.2, 3.0);
        let old_id = state.target.id;

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.score.value(), 100);
        assert_ne!(state.target.id, old_id);
        assert!(!state.target.revealed);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.log.len(), 2);
        let collected = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TargetCollected { .. }))
            .count();
        assert_eq!(collected, 1);
    }

    #[test]
    fn test_third_pickup_spawns_enemy() {
        let mut state = new_state();
        park_enemies(&mut state);
        let mut spawned = Vec::new();
        for _ in 0..3 {
            state.player.pos = state.target.pos;
            let report = tick(&mut state, &TickInput::default());
            spawned.push(
                report
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::EnemySpawned { .. })),
            );
        }
        assert_eq!(spawned, vec![false, false, true]);
        assert_eq!(state.enemies.len(), 2);
        assert_eq!(state.score.value(), 300);
    }

    #[test]
    fn test_enemy_hit_costs_one_life() {
        let mut state = new_state();
        let enemy = state.enemies.as_slice()[0].id;
        if let Some(e) = state.enemies.get_mut(enemy) {
            e.pos = Vec2::new(6.7, 7.0);
        }

        let report = tick(&mut state, &TickInput::default());

        assert_eq!(state.player.lives, PLAYER_LIVES - 1);
        assert_eq!(state.enemies.get(enemy).map(|e| e.pos), Some(SPAWN_CORNER));
        assert!(report.events.contains(&GameEvent::PlayerHit {
            enemy,
            lives: PLAYER_LIVES - 1
        }));
        assert_eq!(
            state.log.newest_first().next().map(|e| e.kind),
            Some(LogKind::Damage)
        );
    }

    #[test]
    fn test_enemies_chase_pre_movement_position() {
        let mut state = new_state();
        let enemy = state.enemies.as_slice()[0].id;
        if let Some(e) = state.enemies.get_mut(enemy) {
            e.pos = Vec2::new(7.0, 3.0);
        }
        // Player moves right this tick; the enemy still heads straight down at (7, 7)
        let input = TickInput {
            right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        let pos = state.enemies.get(enemy).map(|e| e.pos).unwrap_or_default();
        assert!((pos.x - 7.0).abs() < 1e-5);
        assert!((pos.y - (3.0 + ENEMY_SPEED)).abs() < 1e-5);
        assert!((state.player.pos.x - (7.0 + PLAYER_SPEED)).abs() < 1e-5);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = new_state();
        state.player.lives = 1;
        let enemy = state.enemies.as_slice()[0].id;
        if let Some(e) = state.enemies.get_mut(enemy) {
            e.pos = Vec2::new(7.2, 7.0);
        }

        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(report.events.contains(&GameEvent::GameOver { final_score: 0 }));

        let ticks = state.time_ticks;
        let enemy_pos = state.enemies.as_slice()[0].pos;
        let held = TickInput {
            right: true,
            fire_sonar: true,
            ..Default::default()
        };
        for _ in 0..10 {
            let report = tick(&mut state, &held);
            assert_eq!(report, TickReport::default());
        }
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.player.pos, Vec2::new(7.0, 7.0));
        assert_eq!(state.enemies.as_slice()[0].pos, enemy_pos);
        assert!(!state.sonar.is_active());
    }

    #[test]
    fn test_lives_never_negative_with_many_hits() {
        let mut state = new_state();
        state.player.lives = 1;
        for _ in 0..4 {
            state.spawn_enemy();
        }
        let ids: Vec<_> = state.enemies.as_slice().iter().map(|e| e.id).collect();
        for id in &ids {
            if let Some(e) = state.enemies.get_mut(*id) {
                e.pos = Vec2::new(7.0, 7.2);
            }
        }
        let report = tick(&mut state, &TickInput::default());
        assert_eq!(state.player.lives, 0);
        let hits = report
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerHit { .. }))
            .count();
        assert_eq!(hits, ids.len());
    }

    #[test]
    fn test_sonar_reveals_and_expires() {
        let mut state = new_state();
        park_enemies(&mut state);

        let report = tick(&mut state, &fire());
        assert!(report
            .events
            .contains(&GameEvent::PulseFired { origin: Vec2::new(300.0, 300.0) }));
        assert!(!state.target.revealed);

        // Node at (3,3) is 160*sqrt(2) ~ 226 px from the origin
        let mut revealed_at = None;
        let mut expired_at = None;
        for t in 2..=60 {
            let report = tick(&mut state, &TickInput::default());
            if report
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::TargetRevealed { .. }))
            {
                revealed_at = Some(t);
            }
            if report.events.contains(&GameEvent::PulseExpired) {
                expired_at = Some(t);
                break;
            }
        }
        assert_eq!(revealed_at, Some(33));
        assert_eq!(expired_at, Some(55));
        assert!(state.target.revealed, "reveal is sticky after expiry");
    }

    #[test]
    fn test_refire_hides_target_again() {
        let mut state = new_state();
        park_enemies(&mut state);
        tick(&mut state, &fire());
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.target.revealed);

        tick(&mut state, &fire());
        assert!(!state.target.revealed);
        assert_eq!(state.sonar.pulse().map(|p| p.radius), Some(SONAR_SPEED));
    }

    #[test]
    fn test_respawned_node_starts_hidden_under_active_ring() {
        let mut state = new_state();
        park_enemies(&mut state);
        tick(&mut state, &fire());
        for _ in 0..40 {
            tick(&mut state, &TickInput::default());
        }
        state.player.pos = state.target.pos;
        let report = tick(&mut state, &TickInput::default());
        assert!(report
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::TargetCollected { .. })));
        assert!(!state.target.revealed);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = new_state();
        let mut state2 = new_state();

        let inputs = [
            TickInput {
                left: true,
                up: true,
                ..Default::default()
            },
            fire(),
            TickInput::default(),
            TickInput {
                right: true,
                ..Default::default()
            },
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.target.pos, state2.target.pos);
        assert_eq!(state1.enemies.len(), state2.enemies.len());
    }
}
