//! Obstacle spawning, scrolling and culling

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps_any};
use super::config::Config;

/// A ground-standing block scrolling leftward
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// An obstacle resting on the floor with its left edge at `x`
    pub fn on_floor(id: u32, x: f32, size: Vec2, floor_y: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(x, floor_y - size.y),
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Fully scrolled past the left edge
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x <= 0.0
    }
}

/// Active obstacles (in spawn order) plus the spawn timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
    /// Seconds since the last spawn
    spawn_timer: f32,
    /// Seconds from the last spawn until the next one
    next_spawn_in: f32,
    next_id: u32,
}

impl ObstacleField {
    /// Empty field with a freshly sampled spawn delay
    pub fn new<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            next_spawn_in: Self::sample_interval(config, rng),
            next_id: 1,
        }
    }

    /// Uniform sample from `[spawn_interval_min, spawn_interval_max]`
    pub fn sample_interval<R: Rng + ?Sized>(config: &Config, rng: &mut R) -> f32 {
        rng.random_range(config.spawn_interval_min..=config.spawn_interval_max)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn next_spawn_in(&self) -> f32 {
        self.next_spawn_in
    }

    /// Spawn one obstacle just beyond the right edge, invisible until it scrolls in
    pub fn spawn<R: Rng + ?Sized>(&mut self, config: &Config, rng: &mut R) -> &Obstacle {
        let height = rng.random_range(config.obstacle_height_min..=config.obstacle_height_max);
        let width = rng.random_range(config.obstacle_width_min..=config.obstacle_width_max);

        let id = self.next_id;
        self.next_id += 1;

        let obstacle = Obstacle::on_floor(
            id,
            config.field_width + width,
            Vec2::new(width, height),
            config.floor_y(),
        );
        log::trace!("Spawned obstacle {} ({}x{})", id, width, height);

        self.obstacles.push(obstacle);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// One step: run the spawn timer, scroll everything left, drop what left the screen.
    ///
    /// Returns true if an obstacle was spawned.
    pub fn advance<R: Rng + ?Sized>(&mut self, config: &Config, rng: &mut R, dt: f32) -> bool {
        self.spawn_timer += dt;
        let spawned = self.spawn_timer >= self.next_spawn_in;
        if spawned {
            self.spawn(config, rng);
            self.spawn_timer = 0.0;
            self.next_spawn_in = Self::sample_interval(config, rng);
        }

        let dx = config.obstacle_speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= dx;
        }

        self.cull();
        spawned
    }

    /// Remove off-screen obstacles, keeping the rest in spawn order
    pub fn cull(&mut self) {
        self.obstacles.retain(|o| !o.is_off_screen());
    }

    /// Does `rect` touch or overlap any active obstacle?
    pub fn collides(&self, rect: &Rect) -> bool {
        overlaps_any(rect, self.obstacles.iter().map(Obstacle::rect))
    }

    /// Place an obstacle directly, bypassing the spawn timer
    #[cfg(test)]
    pub(crate) fn insert(&mut self, pos: Vec2, size: Vec2) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.obstacles.push(Obstacle { id, pos, size });
        id
    }
}
