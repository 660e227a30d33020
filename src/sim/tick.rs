//! Per-frame simulation tick
//!
//! Drives the round life cycle: AwaitingServe -> Playing <-> Paused,
//! Playing -> Scoring on a goal, and Scoring -> AwaitingServe once the
//! deferred reset runs.

use glam::Vec2;
use rand::Rng;

use super::arena::Player;
use super::collision::resolve_step;
use super::geometry::SweepQuery;
use super::schedule::DeferredAction;
use super::state::{GameEvent, GoalExit, InputEvent, RoundState, SimulationState, TickInput};

/// Advance the simulation by one rendered frame of `frame_ms` milliseconds
///
/// Order within a tick: clock, due deferred task, input, physics, goal check.
pub fn tick<Q, R>(
    state: &mut SimulationState,
    query: &Q,
    input: &TickInput,
    frame_ms: f32,
    rng: &mut R,
) -> Vec<GameEvent>
where
    Q: SweepQuery + ?Sized,
    R: Rng + ?Sized,
{
    let mut events = Vec::new();

    let frame_ms = sanitize_frame(frame_ms, state.config.max_frame_ms);
    state.clock_ms += frame_ms as f64;
    state.time_ticks += 1;

    // The reset completes before anything else this tick looks at state
    if let Some(action) = state.deferred.take_due(state.clock_ms) {
        apply_deferred(state, action, &mut events);
    }

    let step_scale = frame_ms / state.config.nominal_frame_ms;

    for &event in &input.events {
        apply_input(state, event, step_scale, rng, &mut events);
    }

    if state.phase != RoundState::Playing {
        return events;
    }

    let exit_velocity = state.ball.vel;
    let colliders = state.colliders();
    let multiplier = state.config.boost_multiplier;
    if let Some(hit) = resolve_step(
        &mut state.ball,
        step_scale,
        &colliders,
        query,
        &mut state.boost,
        multiplier,
    ) {
        events.push(GameEvent::SurfaceHit {
            position: hit.position,
            surface: hit.surface,
            boost_level: hit.boost_level,
        });
    }
    events.push(GameEvent::BallMoved {
        position: state.ball.pos,
    });

    if let Some(player) = state.arena.goal_side(state.ball.pos.x) {
        enter_scoring(state, player, exit_velocity, &mut events);
    }

    events
}

/// Run the pending deferred task immediately, if there is one
///
/// Used when the presentation layer reports its scoring sequence finished.
pub fn complete_deferred(state: &mut SimulationState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if let Some(action) = state.deferred.take_now() {
        apply_deferred(state, action, &mut events);
    }
    events
}

/// Negative or non-finite deltas count as zero; large ones are clamped
fn sanitize_frame(frame_ms: f32, max_frame_ms: f32) -> f32 {
    if frame_ms.is_finite() && frame_ms > 0.0 {
        frame_ms.min(max_frame_ms)
    } else {
        0.0
    }
}

fn set_phase(state: &mut SimulationState, phase: RoundState, events: &mut Vec<GameEvent>) {
    if state.phase == phase {
        return;
    }
    log::info!("Round state {:?} -> {:?}", state.phase, phase);
    state.phase = phase;
    events.push(GameEvent::StateChanged { state: phase });
}

fn apply_input<R: Rng + ?Sized>(
    state: &mut SimulationState,
    event: InputEvent,
    step_scale: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    if state.input_locked {
        log::trace!("Input locked, discarding {:?}", event);
        return;
    }

    let phase = state.phase;
    let live = matches!(phase, RoundState::AwaitingServe | RoundState::Playing);

    if let Some((player, dir)) = event.paddle_move() {
        if live {
            let delta = dir * state.config.paddle_speed * step_scale;
            let arena = &state.arena;
            state.paddles[player.index()].slide(delta, arena);
        }
        return;
    }

    if let Some((player, held)) = event.boost_change() {
        // A key let go while paused must not still count as held on resume
        let released_while_paused = !held && phase == RoundState::Paused;
        if live || released_while_paused {
            state.boost.set_input(player, held);
        }
        return;
    }

    match (event, phase) {
        (InputEvent::PauseToggle, RoundState::Playing) => {
            set_phase(state, RoundState::Paused, events);
        }
        (InputEvent::PauseToggle, RoundState::Paused) => {
            set_phase(state, RoundState::Playing, events);
        }
        (InputEvent::Serve, RoundState::AwaitingServe) => {
            state.ball.serve(state.config.serve_speed, rng);
            log::debug!("Serve with velocity {}", state.ball.vel);
            set_phase(state, RoundState::Playing, events);
        }
        _ => log::trace!("Ignoring {:?} while {:?}", event, phase),
    }
}

fn enter_scoring(
    state: &mut SimulationState,
    player: Player,
    exit_velocity: Vec2,
    events: &mut Vec<GameEvent>,
) {
    state.input_locked = true;
    state.boost.release_all();
    state.boost.reset_level();

    state.last_goal = Some(GoalExit {
        player,
        position: state.ball.pos,
        velocity: exit_velocity,
    });
    state.ball.visible = false;
    state.ball.center();

    let score = state.score.increment(player);
    log::info!(
        "{:?} scores ({} - {})",
        player,
        state.score.player1,
        state.score.player2
    );
    events.push(GameEvent::RoundScored { player, score });

    set_phase(state, RoundState::Scoring, events);

    let due = state.clock_ms + state.config.scoring_delay_ms;
    state.deferred.schedule(DeferredAction::ReturnToServe, due);
}

fn apply_deferred(state: &mut SimulationState, action: DeferredAction, events: &mut Vec<GameEvent>) {
    match action {
        DeferredAction::ReturnToServe => {
            if state.phase != RoundState::Scoring {
                log::warn!("ReturnToServe fired while {:?}, ignoring", state.phase);
                return;
            }
            state.recenter_paddles();
            // Stays hidden until the next serve
            state.ball.center();
            state.input_locked = false;
            set_phase(state, RoundState::AwaitingServe, events);
            events.push(GameEvent::BallMoved {
                position: state.ball.pos,
            });
        }
    }
}
