//! Velocity handling for server-driven sprites.
//!
//! Every server update overwrites position and velocity outright; between
//! updates sprites coast along their last velocity.

use glam::Vec2;

/// Converts server speed units into pixels per second.
pub const VELOCITY_SCALE: f32 = 7.92;

/// Velocity vector for a heading (radians, y down) and server speed.
pub fn velocity_from_rotation(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * (speed * VELOCITY_SCALE)
}

/// Kinematic state of a sprite: body center plus the velocity it coasts on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Motion {
    pub center: Vec2,
    pub velocity: Vec2,
}

impl Motion {
    pub fn at(center: Vec2) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
        }
    }

    /// Snap to a server position and start moving along `angle`.
    pub fn start(&mut self, center: Vec2, speed: f32, angle: f32) {
        self.center = center;
        self.velocity = velocity_from_rotation(angle, speed);
    }

    /// Snap to a server position and stand still.
    pub fn stop(&mut self, center: Vec2) {
        self.center = center;
        self.velocity = Vec2::ZERO;
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != Vec2::ZERO
    }

    /// Advance by `dt` seconds.
    pub fn integrate(&mut self, dt: f32) {
        if self.velocity.x != 0.0 {
            self.center.x += self.velocity.x * dt;
        }
        if self.velocity.y != 0.0 {
            self.center.y += self.velocity.y * dt;
        }
    }

    /// Keep a circular body of `radius` inside `[0, bounds]`.
    pub fn clamp_to_bounds(&mut self, radius: f32, bounds: Vec2) {
        let min = Vec2::splat(radius);
        let max = (bounds - Vec2::splat(radius)).max(min);
        self.center = self.center.clamp(min, max);
    }
}

/// True once `point` has left the `[0, bounds]` rectangle.
pub fn is_out_of_bounds(point: Vec2, bounds: Vec2) -> bool {
    point.x < 0.0 || point.y < 0.0 || point.x > bounds.x || point.y > bounds.y
}
