use std::collections::HashMap;

use arena_pong::consts::NOMINAL_FRAME_MS;
use arena_pong::sim::{Game, GameEvent, InputEvent, Player, RoundState, SurfaceId, TickInput};
use glam::{Vec2, Vec3};

fn press(game: &mut Game, events: &[InputEvent]) -> Vec<GameEvent> {
    game.tick(NOMINAL_FRAME_MS, &TickInput::new(events.iter().copied()))
}

fn idle(game: &mut Game) -> Vec<GameEvent> {
    game.tick(NOMINAL_FRAME_MS, &TickInput::default())
}

/// Serve, then run until the ball leaves the arena on its own
fn play_until_goal(game: &mut Game) -> Vec<GameEvent> {
    let mut events = press(game, &[InputEvent::Serve]);
    for _ in 0..20_000 {
        events.extend(idle(game));
        if game.phase() == RoundState::Scoring {
            return events;
        }
    }
    panic!("no goal after 20000 frames");
}

#[test]
fn test_full_round_recenters_paddles() {
    let mut game = Game::with_seed(2024).unwrap();

    // Move both paddles away from center before the serve
    for _ in 0..10 {
        press(&mut game, &[InputEvent::Paddle1Up, InputEvent::Paddle2Down]);
    }
    assert!(game.state().paddle(Player::One).z > 0.0);
    assert!(game.state().paddle(Player::Two).z < 0.0);

    let events = play_until_goal(&mut game);
    let scored: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RoundScored { .. }))
        .collect();
    assert_eq!(scored.len(), 1);
    assert_eq!(game.score().player1 + game.score().player2, 1);

    let complete = game.complete_scoring();
    assert!(complete.contains(&GameEvent::StateChanged {
        state: RoundState::AwaitingServe
    }));

    let state = game.state();
    assert_eq!(state.paddle(Player::One).z, state.arena.neutral_z());
    assert_eq!(state.paddle(Player::Two).z, state.arena.neutral_z());
    assert_eq!(state.ball.pos, Vec3::ZERO);
    assert_eq!(state.boost.level, 0);
    assert!(!state.input_locked);
}

#[test]
fn test_unattended_ball_bounces_off_walls_and_scores() {
    let mut game = Game::with_seed(77).unwrap();
    let events = play_until_goal(&mut game);

    let wall_hits = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::SurfaceHit {
                    surface: SurfaceId::WallTop | SurfaceId::WallBottom,
                    ..
                }
            )
        })
        .count();
    assert!(wall_hits > 0, "ball should have bounced off a wall");

    // The ball never leaves the walls
    for event in &events {
        if let GameEvent::BallMoved { position } = event {
            assert!(position.z.abs() < 4.55);
            assert_eq!(position.y, 0.0);
        }
    }
}

#[test]
fn test_serve_signs_cover_all_quadrants() {
    let mut game = Game::with_seed(5).unwrap();
    let mut counts: HashMap<(bool, bool), u32> = HashMap::new();
    let trials = 4000;

    for _ in 0..trials {
        press(&mut game, &[InputEvent::Serve]);
        assert_eq!(game.phase(), RoundState::Playing);
        let vel = game.state().ball.vel;
        *counts.entry((vel.x > 0.0, vel.y > 0.0)).or_default() += 1;

        // Force a goal and skip the delay
        game.state_mut().ball.pos = Vec3::new(9.0, 0.0, 0.0);
        game.state_mut().ball.vel = Vec2::ZERO;
        idle(&mut game);
        assert_eq!(game.phase(), RoundState::Scoring);
        game.complete_scoring();
    }

    assert_eq!(counts.len(), 4);
    for (signs, count) in &counts {
        // Expect ~1000 each; 5 sigma is about 137
        assert!(
            (850..=1150).contains(count),
            "sign combination {:?} served {} times",
            signs,
            count
        );
    }
    assert_eq!(game.score().player1, trials);
}

#[test]
fn test_goal_scenario_left_end() {
    let mut game = Game::with_seed(1).unwrap();
    press(&mut game, &[InputEvent::Serve]);

    game.state_mut().boost.level = 3;
    game.state_mut().ball.pos = Vec3::new(-8.1, 0.0, 0.0);
    game.state_mut().ball.vel = Vec2::ZERO;
    let events = idle(&mut game);

    assert_eq!(game.phase(), RoundState::Scoring);
    assert_eq!(game.score().player2, 1);
    assert_eq!(game.score().player1, 0);
    assert_eq!(game.state().boost.level, 0);
    assert!(events.contains(&GameEvent::RoundScored {
        player: Player::Two,
        score: 1
    }));
}

#[test]
fn test_scoring_waits_for_delay() {
    let mut game = Game::with_seed(3).unwrap();
    press(&mut game, &[InputEvent::Serve]);
    game.state_mut().ball.pos = Vec3::new(9.0, 0.0, 0.0);
    idle(&mut game);
    assert_eq!(game.phase(), RoundState::Scoring);

    // Pausing and serving are ignored for the whole delay
    let mut frames = 0;
    while game.phase() == RoundState::Scoring {
        let events = press(&mut game, &[InputEvent::PauseToggle, InputEvent::Serve]);
        frames += 1;
        if game.phase() == RoundState::Scoring {
            assert!(events.is_empty());
        }
        assert!(frames < 1000);
    }

    let delay = game.state().config.scoring_delay_ms;
    let elapsed = frames as f64 * NOMINAL_FRAME_MS as f64;
    assert!(elapsed >= delay);
    assert!(elapsed < delay + 2.0 * NOMINAL_FRAME_MS as f64);
    // The frame that ran the reset also accepted its serve
    assert_eq!(game.phase(), RoundState::Playing);
}
