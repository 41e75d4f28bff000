use crate::vector::Vector2D;

/// Obstacle controlled by the host's pointer. The flock only reads it, once per tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTarget {
    pub position: Vector2D,
    pub radius: f32,
}

impl PointerTarget {
    pub fn new(position: Vector2D, radius: f32) -> Self {
        Self { position, radius }
    }

    /// Whether `point` lies strictly inside the avoidance radius.
    pub fn reaches(&self, point: Vector2D) -> bool {
        self.position.distance(&point) < self.radius
    }
}
