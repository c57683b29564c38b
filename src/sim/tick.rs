//! Per-frame simulation tick and session state machine
//!
//! The driver schedules one `tick` per rendered frame in every phase; the
//! tick itself only advances the world while Running (GameOver additionally
//! counts down its auto-restart). UI buttons feed `Command`s through
//! `apply_command` between frames.

use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input gathered by the driver for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Target turret x from pointer/touch position (pre-clamp)
    pub target_x: Option<f32>,
    /// Manual bullet from a tap/click
    pub fire: bool,
}

impl TickInput {
    /// Record a pointer/touch target for the turret. Ignored entirely
    /// outside Running, so a move made while paused does not relocate the
    /// turret on resume.
    pub fn record_target(&mut self, phase: GamePhase, target_x: f32) {
        if phase == GamePhase::Running {
            self.target_x = Some(target_x);
        }
    }
}

/// Discrete session commands from the UI buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
}

/// Apply a UI command to the session state machine.
///
/// Every command is idempotent and none can fail; commands that do not apply
/// to the current phase are ignored. Quitted is sticky: once there, nothing
/// transitions out.
pub fn apply_command(state: &mut GameState, command: Command) {
    if state.phase == GamePhase::Quitted {
        return;
    }
    match command {
        Command::Start => {
            if state.phase == GamePhase::Idle {
                state.reset_session();
            }
        }
        Command::Pause => {
            if state.phase == GamePhase::Running {
                state.phase = GamePhase::Paused;
            }
        }
        Command::Resume => {
            if state.phase == GamePhase::Paused {
                state.phase = GamePhase::Running;
            }
        }
        Command::Restart => {
            if state.phase != GamePhase::Idle {
                state.reset_session();
            }
        }
        Command::Quit => {
            state.phase = GamePhase::Quitted;
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Running => {}
        GamePhase::GameOver => {
            // The frame loop keeps ticking through the countdown; when it
            // elapses the session restarts itself.
            state.restart_ticks = state.restart_ticks.saturating_sub(1);
            if state.restart_ticks == 0 {
                state.reset_session();
            }
            return;
        }
        // Idle/Paused/Quitted: frame stays scheduled but nothing moves
        _ => return,
    }

    state.time_ticks += 1;

    // Pointer and tap input, gated to Running by the match above
    if let Some(target_x) = input.target_x {
        state.set_turret_target(target_x);
    }
    if input.fire {
        state.spawn_bullet();
    }

    // Spawn cadences; both only advance while Running
    if state.bullet_cadence.advance() {
        state.spawn_bullet();
    }
    if state.object_cadence.advance() {
        state.spawn_object();
    }

    // Bullets rise; drop any that left the top edge
    for bullet in &mut state.bullets {
        bullet.pos.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);

    // Objects fall at the shared level speed
    let object_speed = state.object_speed;
    for object in &mut state.objects {
        object.pos.y += object_speed;
    }

    // Floor check comes before the collision pass: an object that reaches
    // the floor and is shot in the same frame still ends the game.
    if state
        .objects
        .iter()
        .any(|o| o.rect().bottom() >= state.height)
    {
        state.phase = GamePhase::GameOver;
        state.restart_ticks = RESTART_DELAY_TICKS;
        return;
    }

    resolve_collisions(state);
}

/// Mark-and-sweep collision pass over all bullet/object pairs.
///
/// Hits are collected first and removed afterward so that removing one
/// entity never disturbs iteration over the others. Each hit scores 5; each
/// time the score lands on a multiple of 20 the level and fall speed step up
/// together (incremental accumulation, not a closed formula).
fn resolve_collisions(state: &mut GameState) {
    let mut dead_bullets = vec![false; state.bullets.len()];
    let mut dead_objects = vec![false; state.objects.len()];
    let mut hits = 0u32;

    for (obj_idx, object) in state.objects.iter().enumerate() {
        for (bullet_idx, bullet) in state.bullets.iter().enumerate() {
            if dead_bullets[bullet_idx] {
                continue;
            }
            if bullet.rect().overlaps(&object.rect()) {
                dead_bullets[bullet_idx] = true;
                dead_objects[obj_idx] = true;
                hits += 1;
                break;
            }
        }
    }

    for _ in 0..hits {
        state.score += SCORE_PER_HIT;
        if state.score % POINTS_PER_LEVEL == 0 {
            state.level += 1;
            state.object_speed += OBJECT_SPEED_STEP;
        }
    }

    let mut idx = 0;
    state.bullets.retain(|_| {
        let dead = dead_bullets[idx];
        idx += 1;
        !dead
    });
    let mut idx = 0;
    state.objects.retain(|_| {
        let dead = dead_objects[idx];
        idx += 1;
        !dead
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, FallingObject};
    use glam::Vec2;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 12345);
        apply_command(&mut state, Command::Start);
        state
    }

    fn bullet_at(x: f32, y: f32) -> Bullet {
        Bullet {
            pos: Vec2::new(x, y),
        }
    }

    fn object_at(x: f32, y: f32) -> FallingObject {
        FallingObject {
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_start_begins_session() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 1);
        assert_eq!(state.phase, GamePhase::Idle);
        apply_command(&mut state, Command::Start);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_idle_tick_is_noop() {
        let mut state = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 1);
        let input = TickInput {
            target_x: Some(10.0),
            fire: true,
        };
        let before_x = state.turret_x;
        tick(&mut state, &input);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.turret_x, before_x);
        assert!(state.bullets.is_empty());
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_pause_resume_idempotence() {
        let mut state = running_state();
        apply_command(&mut state, Command::Pause);
        assert_eq!(state.phase, GamePhase::Paused);

        // Pausing again changes nothing
        let snapshot = state.clone();
        apply_command(&mut state, Command::Pause);
        assert_eq!(state.phase, snapshot.phase);

        apply_command(&mut state, Command::Resume);
        assert_eq!(state.phase, GamePhase::Running);
        // Resuming while already Running changes nothing
        apply_command(&mut state, Command::Resume);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_paused_freezes_world() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 300.0));
        state.objects.push(object_at(200.0, 100.0));
        apply_command(&mut state, Command::Pause);

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
        }
        // No movement, no cadence spawns while paused
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.bullets[0].pos.y, 300.0);
        assert_eq!(state.objects[0].pos.y, 100.0);
    }

    #[test]
    fn test_three_quiet_ticks_shift_positions_only() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 300.0));
        state.objects.push(object_at(200.0, 100.0));

        for _ in 0..3 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.bullets[0].pos.y, 300.0 - 3.0 * BULLET_SPEED);
        assert_eq!(state.objects[0].pos.y, 100.0 + 3.0 * OBJECT_START_SPEED);
    }

    #[test]
    fn test_hit_removes_both_and_scores() {
        let mut state = running_state();
        // Bullet closing in from below; still inside the object after this
        // frame's movement (bullet rises 5, object falls 2)
        state.bullets.push(bullet_at(100.0, 90.0));
        state.objects.push(object_at(98.0, 55.0));

        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
        assert!(state.objects.is_empty());
        assert_eq!(state.score, SCORE_PER_HIT);
        assert_eq!(state.level, 1);
        assert_eq!(state.object_speed, OBJECT_START_SPEED);
    }

    #[test]
    fn test_miss_leaves_both() {
        let mut state = running_state();
        state.bullets.push(bullet_at(400.0, 300.0));
        state.objects.push(object_at(0.0, 100.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_level_up_at_twenty_points() {
        let mut state = running_state();
        state.score = 15;
        state.bullets.push(bullet_at(100.0, 90.0));
        state.objects.push(object_at(98.0, 55.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 20);
        assert_eq!(state.level, 2);
        assert_eq!(state.object_speed, OBJECT_START_SPEED + OBJECT_SPEED_STEP);
    }

    #[test]
    fn test_multiple_hits_one_frame() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 90.0));
        state.objects.push(object_at(98.0, 55.0));
        state.bullets.push(bullet_at(300.0, 240.0));
        state.objects.push(object_at(290.0, 205.0));

        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
        assert!(state.objects.is_empty());
        assert_eq!(state.score, 2 * SCORE_PER_HIT);
    }

    #[test]
    fn test_one_bullet_kills_one_object() {
        let mut state = running_state();
        // Two overlapping objects, one bullet: only one object dies
        state.bullets.push(bullet_at(100.0, 90.0));
        state.objects.push(object_at(98.0, 55.0));
        state.objects.push(object_at(99.0, 56.0));

        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
        assert_eq!(state.objects.len(), 1);
        assert_eq!(state.score, SCORE_PER_HIT);
    }

    #[test]
    fn test_bullet_removed_past_top() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 3.0));
        tick(&mut state, &TickInput::default());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_floor_reach_triggers_game_over() {
        let mut state = running_state();
        let floor_y = CANVAS_HEIGHT - OBJECT_SIZE;
        state.objects.push(object_at(100.0, floor_y - 1.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.restart_ticks, RESTART_DELAY_TICKS);
    }

    #[test]
    fn test_floor_beats_simultaneous_hit() {
        let mut state = running_state();
        // The object reaches the floor this frame while overlapping a
        // bullet; the floor check wins.
        let floor_y = CANVAS_HEIGHT - OBJECT_SIZE;
        state.objects.push(object_at(100.0, floor_y - 1.0));
        state.bullets.push(bullet_at(102.0, floor_y + 10.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_game_over_auto_restarts() {
        let mut state = running_state();
        state.score = 35;
        state.level = 2;
        state.object_speed = 2.5;
        state.objects.push(object_at(100.0, CANVAS_HEIGHT - OBJECT_SIZE));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        // World stays frozen through the countdown
        for _ in 0..RESTART_DELAY_TICKS - 1 {
            tick(&mut state, &TickInput::default());
            assert_eq!(state.phase, GamePhase::GameOver);
        }
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.object_speed, OBJECT_START_SPEED);
        assert!(state.bullets.is_empty());
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_manual_restart_resets_session() {
        let mut state = running_state();
        state.score = 40;
        state.level = 3;
        state.objects.push(object_at(10.0, 10.0));

        apply_command(&mut state, Command::Restart);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_quit_is_sticky() {
        let mut state = running_state();
        state.bullets.push(bullet_at(100.0, 300.0));
        apply_command(&mut state, Command::Quit);
        assert_eq!(state.phase, GamePhase::Quitted);

        // No command leaves Quitted
        for command in [
            Command::Start,
            Command::Pause,
            Command::Resume,
            Command::Restart,
        ] {
            apply_command(&mut state, command);
            assert_eq!(state.phase, GamePhase::Quitted);
        }

        // Inputs and ticks change nothing either
        let snapshot = state.clone();
        let input = TickInput {
            target_x: Some(0.0),
            fire: true,
        };
        tick(&mut state, &input);
        assert_eq!(state.turret_x, snapshot.turret_x);
        assert_eq!(state.bullets.len(), snapshot.bullets.len());
        assert_eq!(state.time_ticks, snapshot.time_ticks);
    }

    #[test]
    fn test_paused_pointer_move_is_dropped() {
        let mut state = running_state();
        // One persistent input, the way the driver keeps it across frames
        let mut input = TickInput::default();
        input.record_target(state.phase, 300.0);
        tick(&mut state, &input);
        assert_eq!(state.turret_x, 300.0);

        apply_command(&mut state, Command::Pause);
        // Moves made while paused are not recorded
        input.record_target(state.phase, 0.0);
        assert_eq!(input.target_x, Some(300.0));
        tick(&mut state, &input);

        apply_command(&mut state, Command::Resume);
        tick(&mut state, &input);
        assert_eq!(state.turret_x, 300.0);
    }

    #[test]
    fn test_cadences_spawn_on_schedule() {
        let mut state = running_state();
        for _ in 0..OBJECT_CADENCE_TICKS {
            tick(&mut state, &TickInput::default());
        }
        // 120 ticks: four cadence bullets, one object
        assert_eq!(state.bullets.len(), 4);
        assert_eq!(state.objects.len(), 1);
    }

    #[test]
    fn test_tap_fires_bullet() {
        let mut state = running_state();
        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_pointer_moves_turret() {
        let mut state = running_state();
        let input = TickInput {
            target_x: Some(321.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.turret_x, 321.0);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 99999);
        let mut b = GameState::new(CANVAS_WIDTH, CANVAS_HEIGHT, 99999);
        apply_command(&mut a, Command::Start);
        apply_command(&mut b, Command::Start);

        let input = TickInput {
            target_x: Some(250.0),
            fire: true,
        };
        for _ in 0..500 {
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.bullets, b.bullets);
        assert_eq!(a.objects, b.objects);
        assert_eq!(a.time_ticks, b.time_ticks);
    }

    proptest! {
        #[test]
        fn prop_turret_stays_in_bounds(target in -10_000.0f32..10_000.0) {
            let mut state = running_state();
            let input = TickInput { target_x: Some(target), ..Default::default() };
            tick(&mut state, &input);
            prop_assert!(state.turret_x >= 0.0);
            prop_assert!(state.turret_x <= CANVAS_WIDTH - TURRET_WIDTH);
        }

        #[test]
        fn prop_level_tracks_score(hits in 0u32..50) {
            // Feed one clean hit per frame; the ramp must follow
            // level = 1 + score/20 and speed = 2.0 + 0.5 * (level - 1).
            let mut state = running_state();
            for _ in 0..hits {
                state.bullets.push(bullet_at(100.0, 90.0));
                state.objects.push(object_at(98.0, 55.0));
                tick(&mut state, &TickInput::default());
            }
            let score = hits * SCORE_PER_HIT;
            prop_assert_eq!(state.score, score);
            prop_assert_eq!(state.level, 1 + score / POINTS_PER_LEVEL);
            let expected_speed = OBJECT_START_SPEED
                + OBJECT_SPEED_STEP * (score / POINTS_PER_LEVEL) as f32;
            prop_assert!((state.object_speed - expected_speed).abs() < 1e-5);
        }

        #[test]
        fn prop_no_bullet_survives_above_top(y in -20.0f32..200.0) {
            let mut state = running_state();
            state.bullets.push(bullet_at(100.0, y));
            tick(&mut state, &TickInput::default());
            for bullet in &state.bullets {
                prop_assert!(bullet.pos.y >= 0.0);
            }
        }
    }
}
