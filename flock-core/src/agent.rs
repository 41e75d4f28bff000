use crate::bounds::Bounds;
use crate::vector::Vector2D;
use rand::Rng;

/// A single boid: kinematic state only.
///
/// Agents have no identity of their own. Inside a tick an agent is identified
/// by its index in the flock, so two agents with identical state stay distinct.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vector2D,
    pub velocity: Vector2D,
}

impl Agent {
    pub fn new(position: Vector2D, velocity: Vector2D) -> Self {
        Self { position, velocity }
    }

    /// Uniform position inside `bounds`, velocity uniform in `[-1, 1)` per axis.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, bounds: Bounds) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..bounds.width()),
            rng.gen_range(0.0..bounds.height()),
        );
        Self::new(position, random_velocity(rng))
    }

    /// Agent at `position` with a random velocity, as spawned by a click.
    pub fn random_at<R: Rng + ?Sized>(rng: &mut R, position: Vector2D) -> Self {
        Self::new(position, random_velocity(rng))
    }

    /// Direction of travel in radians. Derived from the velocity, used for drawing.
    pub fn heading(&self) -> f32 {
        self.velocity.angle()
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

fn random_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vector2D {
    Vector2D::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_at_keeps_position() {
        let mut rng = SmallRng::seed_from_u64(11);
        let spot = Vector2D::new(42.0, 17.5);
        let agent = Agent::random_at(&mut rng, spot);

        assert_eq!(agent.position, spot);
        assert!(agent.is_finite());
        assert!(agent.speed() <= core::f32::consts::SQRT_2);
        assert!(!Agent::new(spot, Vector2D::new(f32::NAN, 0.0)).is_finite());
    }

    #[test]
    fn test_random_agent_inside_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bounds = Bounds::new(80.0, 60.0).unwrap();
        for _ in 0..200 {
            let agent = Agent::random(&mut rng, bounds);
            assert!(bounds.contains(agent.position));
            assert!(agent.velocity.x >= -1.0 && agent.velocity.x < 1.0);
            assert!(agent.velocity.y >= -1.0 && agent.velocity.y < 1.0);
        }
    }

    #[test]
    fn test_heading_follows_velocity() {
        let agent = Agent::new(Vector2D::zero(), Vector2D::new(0.0, -2.0));
        assert_eq!(agent.heading(), -core::f32::consts::FRAC_PI_2);
        assert_eq!(agent.speed(), 2.0);
    }
}
