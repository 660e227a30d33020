//! Arena Pong headless driver
//!
//! Runs a bot-vs-bot match and prints the presentation event stream as JSON
//! lines on stdout.
//!
//! Usage: `arena-pong [config.json] [frames]`

use std::io::{BufWriter, Write};
use std::process::ExitCode;

use arena_pong::GameConfig;
use arena_pong::consts::NOMINAL_FRAME_MS;
use arena_pong::sim::{BoxSweep, Game, InputEvent, Player, RoundState, SimulationState, TickInput};

const DEFAULT_FRAMES: u64 = 60 * 60;

/// Paddles ignore the ball while it is further than this from their end
const BOT_REACTION_X: f32 = 3.0;
/// Bots hold boost when the ball is this close to their paddle
const BOT_BOOST_X: f32 = 1.0;

fn main() -> ExitCode {
    env_logger::init();

    let mut config_path = None;
    let mut frames = DEFAULT_FRAMES;
    for arg in std::env::args().skip(1) {
        match arg.parse::<u64>() {
            Ok(n) => frames = n,
            Err(_) => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);

    let mut game = match Game::new(config, BoxSweep, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Arena Pong (headless) running {} frames", frames);

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for _ in 0..frames {
        let input = bot_input(game.state());
        for event in game.tick(NOMINAL_FRAME_MS, &input) {
            match serde_json::to_string(&event) {
                Ok(line) => {
                    if writeln!(out, "{}", line).is_err() {
                        // Reader went away
                        return ExitCode::SUCCESS;
                    }
                }
                Err(e) => log::warn!("Could not encode {:?}: {}", event, e),
            }
        }
    }

    let score = game.score();
    log::info!("Final score {} - {}", score.player1, score.player2);
    if out.flush().is_err() {
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Simple tracking bots for both paddles
fn bot_input(state: &SimulationState) -> TickInput {
    let mut events = Vec::new();

    if state.phase == RoundState::AwaitingServe {
        events.push(InputEvent::Serve);
    }

    let ball = state.ball.plane_pos();
    for player in Player::BOTH {
        let paddle = state.paddle(player);
        let (up, down, press, release) = match player {
            Player::One => (
                InputEvent::Paddle1Up,
                InputEvent::Paddle1Down,
                InputEvent::Boost1Press,
                InputEvent::Boost1Release,
            ),
            Player::Two => (
                InputEvent::Paddle2Up,
                InputEvent::Paddle2Down,
                InputEvent::Boost2Press,
                InputEvent::Boost2Release,
            ),
        };

        let gap_x = (ball.x - paddle.x).abs();
        if gap_x < BOT_REACTION_X {
            let dz = ball.y - paddle.z;
            if dz > state.config.paddle_speed {
                events.push(up);
            } else if dz < -state.config.paddle_speed {
                events.push(down);
            }
        }

        let want_boost = gap_x < BOT_BOOST_X;
        if want_boost != state.boost.is_active(player) {
            events.push(if want_boost { press } else { release });
        }
    }

    TickInput::new(events)
}
