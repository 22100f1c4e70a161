use glam::Vec2;

/// Axis-aligned rectangle in world space (y grows downward, as on the server).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::new(min, min + size)
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self::from_min_size(center - size / 2.0, size)
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn translate(&self, by: Vec2) -> Self {
        Self {
            min: self.min + by,
            max: self.max + by,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }

    /// Displacement that moves a circle out of this rectangle, or `None` if
    /// they do not overlap. The rectangle is treated as immovable.
    pub fn separate_circle(&self, center: Vec2, radius: f32) -> Option<Vec2> {
        if !self.overlaps_circle(center, radius) {
            return None;
        }

        if !self.contains(center) {
            let closest = self.closest_point(center);
            let delta = center - closest;
            let dist = delta.length();
            return Some(delta / dist * (radius - dist));
        }

        // Center is inside: push out through the nearest edge.
        let push_left = center.x - self.min.x + radius;
        let push_right = self.max.x - center.x + radius;
        let push_up = center.y - self.min.y + radius;
        let push_down = self.max.y - center.y + radius;
        let min = push_left.min(push_right).min(push_up).min(push_down);
        Some(if min == push_left {
            Vec2::new(-push_left, 0.0)
        } else if min == push_right {
            Vec2::new(push_right, 0.0)
        } else if min == push_up {
            Vec2::new(0.0, -push_up)
        } else {
            Vec2::new(0.0, push_down)
        })
    }
}
