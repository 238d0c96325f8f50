//! Frame tick
//!
//! Advances the simulation by an untrusted host delta. Frames are sanitized,
//! truncated to `max_frame_dt`, then split into equal sub-steps no longer
//! than `max_step_dt` so nothing moves far enough in one step to pass
//! through another rectangle.

use rand::Rng;

use super::body::Character;
use super::state::{GamePhase, GameState};
use crate::consts::MAX_SUBSTEPS;

/// Commands collected between frames, applied at the start of the next tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (Space / ArrowUp)
    pub jump: bool,
    /// Start a new episode (R)
    pub reset: bool,
    /// Touch: jump while playing, restart once over
    pub tap: bool,
    /// Demo mode - the character jumps on its own
    pub autopilot: bool,
}

/// Apply input, then advance the game state by one frame
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput, dt: f32) {
    if input.reset {
        state.reset();
    }
    if input.jump {
        state.jump();
    }
    if input.tap {
        state.tap();
    }
    if input.autopilot && state.autopilot_wants_jump() {
        state.jump();
    }
    state.tick(dt);
}

/// Negative, NaN and infinite deltas count as zero; long frames are truncated
pub fn sanitize_dt(dt: f32, max_frame_dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else if dt > max_frame_dt {
        log::debug!("Frame of {:.3}s truncated to {:.3}s", dt, max_frame_dt);
        max_frame_dt
    } else {
        dt
    }
}

impl<R: Rng> GameState<R> {
    /// Advance one frame. A no-op once the episode is won or lost.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != GamePhase::Playing {
            return;
        }

        let dt = sanitize_dt(dt, self.config.max_frame_dt);

        // Whole frame counted once, in f64, so a frame sum of the survival time always wins
        self.elapsed += f64::from(dt);
        if self.elapsed >= f64::from(self.config.survival_seconds) {
            self.phase = GamePhase::Won;
            log::info!("Episode {} won after {:.2}s", self.episode, self.elapsed);
            return;
        }

        // Bounded by validation: max_frame_dt / max_step_dt <= MAX_SUBSTEPS
        let substeps = ((dt / self.config.max_step_dt).ceil() as u32).clamp(1, MAX_SUBSTEPS);
        let h = dt / substeps as f32;

        for _ in 0..substeps {
            self.step(h);
            if self.phase != GamePhase::Playing {
                break;
            }
        }
    }

    fn step(&mut self, dt: f32) {
        let floor_y = self.config.floor_y();
        self.character.integrate(self.config.gravity, floor_y, dt);
        self.field.advance(&self.config, &mut self.rng, dt);

        if self.field.collides(&self.character.rect()) {
            self.phase = GamePhase::Lost;
            log::info!("Episode {} lost after {:.2}s", self.episode, self.elapsed);
        }
    }

    /// Should a demo player jump now?
    ///
    /// Times the jump so the apex lines up with the middle of the horizontal
    /// overlap with the nearest obstacle ahead.
    pub fn autopilot_wants_jump(&self) -> bool {
        if self.phase != GamePhase::Playing || !self.character.grounded {
            return false;
        }

        let me = self.character.rect();
        let Some(next) = self
            .field
            .obstacles()
            .iter()
            .filter(|o| o.pos.x + o.size.x >= me.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
        else {
            return false;
        };

        let speed = self.config.obstacle_speed;
        let air = Character::air_time(self.config.jump_velocity, self.config.gravity);
        let trigger = speed * air / 2.0 - (me.width + next.size.x) / 2.0;
        next.pos.x - me.right() <= trigger
    }
}
