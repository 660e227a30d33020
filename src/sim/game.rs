//! Game controller
//!
//! Owns the simulation state, the geometry collaborator and the seeded RNG.
//! All mutation goes through [`Game::tick`] or [`Game::complete_scoring`].

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::geometry::{BoxSweep, SurfaceId, SweepQuery};
use super::score::Score;
use super::state::{GameEvent, RoundState, SimulationState, TickInput};
use super::tick::{complete_deferred, tick};
use crate::config::GameConfig;
use crate::error::GameError;

/// One match: simulation state plus the collaborators that drive it
pub struct Game<Q: SweepQuery = BoxSweep> {
    state: SimulationState,
    geometry: Q,
    rng: Pcg32,
    seed: u64,
}

impl Game<BoxSweep> {
    /// Default arena with the built-in box sweeper
    pub fn with_seed(seed: u64) -> Result<Self, GameError> {
        Self::new(GameConfig::default(), BoxSweep, seed)
    }
}

impl<Q: SweepQuery> Game<Q> {
    /// Validate `config`, check `geometry` can answer sweeps, and start in AwaitingServe
    pub fn new(config: GameConfig, geometry: Q, seed: u64) -> Result<Self, GameError> {
        if let Err(e) = config.validate() {
            log::error!("Refusing to start: {}", e);
            return Err(e);
        }

        let state = SimulationState::new(config);
        if let Err(e) = probe_geometry(&state, &geometry) {
            log::error!("Refusing to start: {}", e);
            return Err(e);
        }

        log::info!("Game initialized with seed: {}", seed);
        Ok(Self {
            state,
            geometry,
            rng: Pcg32::seed_from_u64(seed),
            seed,
        })
    }

    /// Advance one rendered frame
    pub fn tick(&mut self, frame_ms: f32, input: &TickInput) -> Vec<GameEvent> {
        tick(&mut self.state, &self.geometry, input, frame_ms, &mut self.rng)
    }

    /// Presentation signal that the scoring sequence has finished
    ///
    /// Fires the pending Scoring-to-AwaitingServe reset now instead of waiting
    /// for its delay. Does nothing outside Scoring.
    pub fn complete_scoring(&mut self) -> Vec<GameEvent> {
        complete_deferred(&mut self.state)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Direct access for tooling and tests
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    #[inline]
    pub fn phase(&self) -> RoundState {
        self.state.phase
    }

    pub fn score(&self) -> Score {
        self.state.score.snapshot()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// One sweep from the center spot toward the top wall must find it
fn probe_geometry<Q: SweepQuery + ?Sized>(
    state: &SimulationState,
    geometry: &Q,
) -> Result<(), GameError> {
    let top = state.arena.walls[0].collider();
    let reach = top.center.z + top.half_extents.z;
    let hit = geometry.sweep(Vec3::ZERO, Vec3::Z, reach, &[top]);

    if !hit.hit || hit.surface != Some(SurfaceId::WallTop) {
        return Err(GameError::GeometryUnavailable(format!(
            "probe toward the top wall returned {:?}",
            hit
        )));
    }

    let radius = geometry.bounding_radius(&state.ball);
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GameError::GeometryUnavailable(format!(
            "ball bounding radius is {}",
            radius
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{Collider, SweepHit};
    use crate::sim::state::{Ball, InputEvent};

    /// Geometry that was never loaded
    struct EmptyScene;

    impl SweepQuery for EmptyScene {
        fn sweep(&self, _: Vec3, _: Vec3, _: f32, _: &[Collider]) -> SweepHit {
            SweepHit::miss()
        }
    }

    struct PointBall;

    impl SweepQuery for PointBall {
        fn sweep(&self, o: Vec3, d: Vec3, m: f32, c: &[Collider]) -> SweepHit {
            BoxSweep.sweep(o, d, m, c)
        }

        fn bounding_radius(&self, _: &Ball) -> f32 {
            0.0
        }
    }

    #[test]
    fn test_default_game_starts_awaiting_serve() {
        let game = Game::with_seed(42).unwrap();
        assert_eq!(game.phase(), RoundState::AwaitingServe);
        assert_eq!(game.score(), Score::default());
        assert_eq!(game.seed(), 42);
    }

    #[test]
    fn test_uninitialized_geometry_is_fatal() {
        let result = Game::new(GameConfig::default(), EmptyScene, 1);
        assert!(matches!(result, Err(GameError::GeometryUnavailable(_))));
    }

    #[test]
    fn test_zero_radius_is_fatal() {
        let result = Game::new(GameConfig::default(), PointBall, 1);
        assert!(matches!(result, Err(GameError::GeometryUnavailable(_))));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = GameConfig {
            ball_radius: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            Game::new(config, BoxSweep, 1),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_determinism() {
        // Two games with same seed should produce identical results
        let mut game1 = Game::with_seed(99999).unwrap();
        let mut game2 = Game::with_seed(99999).unwrap();

        let inputs = [
            TickInput::new([InputEvent::Paddle1Up]),
            TickInput::new([InputEvent::Serve]),
            TickInput::new([InputEvent::Boost2Press, InputEvent::Paddle2Down]),
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                let a = game1.tick(16.0, input);
                let b = game2.tick(16.0, input);
                assert_eq!(a, b);
            }
        }
        assert_eq!(game1.state().ball, game2.state().ball);
    }
}
