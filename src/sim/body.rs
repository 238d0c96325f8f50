//! Character vertical motion
//!
//! Semi-implicit Euler integration (velocity first, then position) with a
//! hard clamp to the ground line.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::config::Config;

/// The player-controlled runner. Only `y` moves; `x` is fixed per episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/s, negative = up)
    pub velocity_y: f32,
    pub grounded: bool,
}

impl Character {
    /// A character standing on the ground at the configured x
    pub fn new(config: &Config) -> Self {
        let size = Vec2::new(config.character_width, config.character_height);
        Self {
            pos: Vec2::new(config.character_x, config.floor_y() - size.y),
            size,
            velocity_y: 0.0,
            grounded: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Advance one step under gravity, then clamp to the floor
    pub fn integrate(&mut self, gravity: f32, floor_y: f32, dt: f32) {
        self.velocity_y += gravity * dt;
        self.pos.y += self.velocity_y * dt;

        if self.pos.y + self.size.y >= floor_y {
            self.pos.y = floor_y - self.size.y;
            self.velocity_y = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Start a jump. Returns false (and does nothing) while airborne.
    pub fn jump(&mut self, jump_velocity: f32) -> bool {
        if !self.grounded {
            return false;
        }
        self.velocity_y = jump_velocity;
        self.grounded = false;
        true
    }

    /// Total time spent airborne for a jump from the ground
    pub fn air_time(jump_velocity: f32, gravity: f32) -> f32 {
        2.0 * -jump_velocity / gravity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_new_character_grounded() {
        let config = Config::default();
        let c = Character::new(&config);
        assert!(c.grounded);
        assert_eq!(c.velocity_y, 0.0);
        assert_eq!(c.pos.x, CHARACTER_X);
        assert_eq!(c.pos.y + c.size.y, config.floor_y());
    }

    #[test]
    fn test_semi_implicit_euler() {
        let mut c = Character::new(&Config::default());
        c.pos.y = 100.0;
        c.velocity_y = 0.0;
        c.grounded = false;

        c.integrate(1000.0, 470.0, 0.1);
        // Velocity is updated before position
        assert!((c.velocity_y - 100.0).abs() < 1e-4);
        assert!((c.pos.y - 110.0).abs() < 1e-4);
        assert!(!c.grounded);
    }

    #[test]
    fn test_ground_clamp() {
        let mut c = Character::new(&Config::default());
        c.pos.y = 360.0;
        c.velocity_y = 2000.0;
        c.grounded = false;

        c.integrate(GRAVITY, 470.0, DT);
        assert_eq!(c.pos.y + c.size.y, 470.0);
        assert_eq!(c.velocity_y, 0.0);
        assert!(c.grounded);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut c = Character::new(&Config::default());
        assert!(c.jump(JUMP_VELOCITY));
        assert_eq!(c.velocity_y, JUMP_VELOCITY);
        assert!(!c.grounded);

        // Second request before landing is ignored
        c.integrate(GRAVITY, 470.0, DT);
        let v = c.velocity_y;
        assert!(!c.jump(JUMP_VELOCITY));
        assert_eq!(c.velocity_y, v);
    }

    #[test]
    fn test_jump_lands_again() {
        let config = Config::default();
        let mut c = Character::new(&config);
        c.jump(config.jump_velocity);

        let air = Character::air_time(config.jump_velocity, config.gravity);
        let mut t = 0.0;
        let mut apex = c.pos.y;
        while t < air + 0.1 {
            c.integrate(config.gravity, config.floor_y(), DT);
            apex = apex.min(c.pos.y);
            t += DT;
        }
        assert!(c.grounded, "should have landed after {air}s");
        // Apex height v²/2g = 156.25 px above the start
        let start_y = config.floor_y() - c.size.y;
        assert!((start_y - apex - 156.25).abs() < 15.0);
    }
}
