//! Arcade physics for the disc and the water surface
//!
//! Stands in for the engine's rigid-body layer: gravity, constant horizontal
//! speed, and a bouncy contact plane. Screen space, +y is down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// The skipping disc
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscBody {
    /// Center position
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Downward acceleration
    pub gravity: f32,
    /// Vertical speed multiplier on water and world-top contact
    pub restitution: f32,
    /// Per-axis speed cap
    pub max_speed: f32,
}

impl DiscBody {
    /// Disc at its launch point, moving right
    pub fn launch(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.start_x, tuning.start_y),
            vel: Vec2::new(tuning.launch_speed, 0.0),
            radius: tuning.disc_radius,
            gravity: tuning.gravity,
            restitution: tuning.restitution,
            max_speed: tuning.max_speed,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    /// Bottom-center point, where splashes are anchored
    #[inline]
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.bottom())
    }

    /// Semi-implicit Euler step, clamped to the world bounds.
    ///
    /// The top edge (y = 0) bounces the disc back down with its restitution;
    /// the side edges stop it. Each axis of velocity stays within
    /// `max_speed`, so repeated restitution gains can't run away.
    pub fn integrate(&mut self, dt: f32, world_width: f32) {
        self.vel.y += self.gravity * dt;
        self.clamp_speed();
        self.pos += self.vel * dt;

        let max_x = (world_width - self.radius).max(self.radius);
        if self.pos.x < self.radius || self.pos.x > max_x {
            self.pos.x = self.pos.x.clamp(self.radius, max_x);
            self.vel.x = 0.0;
        }

        if self.top() < 0.0 {
            self.pos.y = self.radius;
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y * self.restitution;
                self.clamp_speed();
            }
        }
    }

    fn clamp_speed(&mut self) {
        self.vel = self.vel.clamp(Vec2::splat(-self.max_speed), Vec2::splat(self.max_speed));
    }
}

/// Immovable contact plane of the water
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterSurface {
    pub surface_y: f32,
}

impl WaterSurface {
    pub fn new(surface_y: f32) -> Self {
        Self { surface_y }
    }

    /// Gap between the water and the disc's top edge, floored at zero
    pub fn distance_to(&self, disc: &DiscBody) -> f32 {
        (self.surface_y - disc.top()).max(0.0)
    }

    /// Resolve penetration. Returns true if the disc touched the water.
    ///
    /// Only a disc moving down is reflected; the reflected speed is scaled by
    /// the disc's restitution.
    pub fn collide(&self, disc: &mut DiscBody) -> bool {
        if disc.bottom() < self.surface_y || disc.vel.y <= 0.0 {
            return false;
        }
        disc.pos.y = self.surface_y - disc.radius;
        disc.vel.y = -disc.vel.y * disc.restitution;
        disc.clamp_speed();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn disc_at(y: f32, vy: f32) -> DiscBody {
        DiscBody {
            pos: Vec2::new(100.0, y),
            vel: Vec2::new(250.0, vy),
            radius: 16.0,
            gravity: 200.0,
            restitution: 1.2,
            max_speed: 10_000.0,
        }
    }

    #[test]
    fn test_gravity_accelerates_down() {
        let mut disc = disc_at(100.0, 0.0);
        disc.integrate(0.5, 10_000.0);
        assert!((disc.vel.y - 100.0).abs() < 1e-4);
        assert!((disc.pos.y - 150.0).abs() < 1e-4);
        assert!((disc.pos.x - 225.0).abs() < 1e-4);
    }

    #[test]
    fn test_world_bound_stops_disc() {
        let mut disc = disc_at(100.0, 0.0);
        disc.pos.x = 990.0;
        disc.integrate(1.0, 1000.0);
        assert_eq!(disc.pos.x, 984.0);
        assert_eq!(disc.vel.x, 0.0);
    }

    #[test]
    fn test_world_top_bounces_down() {
        let mut disc = disc_at(20.0, -600.0);
        disc.integrate(0.01, 10_000.0);

        // -600 + 2 = -598 up, reflected and scaled by 1.2
        assert_eq!(disc.top(), 0.0);
        assert!((disc.vel.y - 717.6).abs() < 1e-3);
    }

    #[test]
    fn test_world_top_never_exceeded() {
        let mut disc = disc_at(300.0, -5000.0);
        for _ in 0..1000 {
            disc.integrate(1.0 / 120.0, 10_000.0);
            assert!(disc.top() >= 0.0);
        }
    }

    #[test]
    fn test_rebounds_capped_at_max_speed() {
        let water = WaterSurface::new(500.0);
        let mut disc = disc_at(490.0, 9_500.0);

        assert!(water.collide(&mut disc));
        assert_eq!(disc.vel.y, -10_000.0);

        disc.pos.y = 17.0;
        disc.integrate(1.0 / 120.0, 1_000_000.0);
        assert_eq!(disc.vel.y, 10_000.0);
        assert!(disc.vel.x.abs() <= 10_000.0);
    }

    #[test]
    fn test_collide_reflects_with_restitution() {
        let water = WaterSurface::new(500.0);
        let mut disc = disc_at(490.0, 100.0);

        assert!(water.collide(&mut disc));
        assert_eq!(disc.bottom(), 500.0);
        assert!((disc.vel.y - -120.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_contact_when_rising_or_above() {
        let water = WaterSurface::new(500.0);

        let mut above = disc_at(400.0, 100.0);
        assert!(!water.collide(&mut above));

        let mut rising = disc_at(490.0, -100.0);
        assert!(!water.collide(&mut rising));
        assert_eq!(rising.vel.y, -100.0);
    }

    #[test]
    fn test_distance_floored() {
        let water = WaterSurface::new(500.0);
        assert_eq!(water.distance_to(&disc_at(400.0, 0.0)), 116.0);
        assert_eq!(water.distance_to(&disc_at(600.0, 0.0)), 0.0);
    }
}
