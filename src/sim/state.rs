//! Game state and the per-episode state machine
//!
//! All mutation goes through [`GameState::tick`], [`GameState::jump`] and
//! [`GameState::reset`]; renderers read a [`Snapshot`].

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Character;
use super::collision::Rect;
use super::config::{Config, ConfigError};
use super::obstacles::ObstacleField;

/// Outcome of the current episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Running; the only phase in which ticks advance anything
    Playing,
    /// Survived for the full duration
    Won,
    /// Hit an obstacle
    Lost,
}

impl GamePhase {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GamePhase::Playing
    }
}

/// Complete game state for one episode, generic over its random source
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub(crate) config: Config,
    pub(crate) rng: R,
    pub(crate) phase: GamePhase,
    /// Survival time accumulated from tick deltas
    pub(crate) elapsed: f64,
    pub(crate) character: Character,
    pub(crate) field: ObstacleField,
    /// Number of resets since construction (1 = first episode)
    pub(crate) episode: u32,
}

impl GameState<Pcg32> {
    /// Create a new game with a seeded PCG generator
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        log::info!("Seeding game with {}", seed);
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new game drawing randomness from `rng`.
    ///
    /// The config is validated once here; nothing later can fail.
    pub fn with_rng(config: Config, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let character = Character::new(&config);
        let field = ObstacleField::new(&config, &mut rng);
        log::info!(
            "New game: survive {}s, spawn every {}-{}s",
            config.survival_seconds,
            config.spawn_interval_min,
            config.spawn_interval_max
        );
        Ok(Self {
            config,
            rng,
            phase: GamePhase::Playing,
            elapsed: 0.0,
            character,
            field,
            episode: 1,
        })
    }

    /// Start a new episode from any phase
    pub fn reset(&mut self) {
        self.character = Character::new(&self.config);
        self.field = ObstacleField::new(&self.config, &mut self.rng);
        self.elapsed = 0.0;
        self.phase = GamePhase::Playing;
        self.episode += 1;
        log::info!("Episode {} started", self.episode);
    }

    /// Jump if playing and grounded. Returns whether a jump started.
    pub fn jump(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.character.jump(self.config.jump_velocity)
    }

    /// Touch gesture: jump while playing, otherwise start over
    pub fn tap(&mut self) {
        if self.phase.is_over() {
            self.reset();
        } else {
            self.jump();
        }
    }
}

impl<R> GameState<R> {
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Seconds left before a win (0 once over)
    pub fn remaining(&self) -> f64 {
        (f64::from(self.config.survival_seconds) - self.elapsed).max(0.0)
    }

    /// Immutable per-frame view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            elapsed_seconds: self.elapsed,
            remaining_seconds: self.remaining(),
            phase: self.phase,
            episode: self.episode,
            character: self.character.rect(),
            character_grounded: self.character.grounded,
            obstacles: self.field.obstacles().iter().map(|o| o.rect()).collect(),
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            floor_y: self.config.floor_y(),
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub elapsed_seconds: f64,
    pub remaining_seconds: f64,
    pub phase: GamePhase,
    pub episode: u32,
    pub character: Rect,
    pub character_grounded: bool,
    /// In spawn order
    pub obstacles: Vec<Rect>,
    pub field_width: f32,
    pub field_height: f32,
    pub floor_y: f32,
}

impl Snapshot {
    /// One-line HUD status
    pub fn status_line(&self) -> String {
        match self.phase {
            GamePhase::Playing => format!("Time left: {:.1}s", self.remaining_seconds),
            GamePhase::Won => "CLEAR!".to_string(),
            GamePhase::Lost => "GAME OVER - press R to restart".to_string(),
        }
    }
}
