use crate::agent::Agent;
use crate::vector::Vector2D;

/// Summary measures of a population, for status displays and headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockStats {
    pub population: usize,
    pub mean_speed: f32,
    /// Arithmetic mean of positions. Ignores wrap-around, so a flock straddling
    /// an edge reports a centroid between its two halves.
    pub centroid: Vector2D,
    /// Order parameter: magnitude of the mean velocity over the mean speed.
    /// `1.0` when every agent flies the same way, near `0.0` for disorder.
    pub polarization: f32,
}

impl FlockStats {
    pub fn from_agents(agents: &[Agent]) -> Self {
        if agents.is_empty() {
            return Self::default();
        }

        let n = agents.len() as f32;
        let centroid = agents.iter().map(|a| a.position).sum::<Vector2D>() / n;
        let mean_velocity = agents.iter().map(|a| a.velocity).sum::<Vector2D>() / n;
        let mean_speed = agents.iter().map(Agent::speed).sum::<f32>() / n;

        let polarization = if mean_speed > 1e-10 {
            mean_velocity.magnitude() / mean_speed
        } else {
            0.0
        };

        Self {
            population: agents.len(),
            mean_speed,
            centroid,
            polarization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_population() {
        assert_eq!(FlockStats::from_agents(&[]), FlockStats::default());
    }

    #[test]
    fn test_aligned_flock_is_fully_polarized() {
        let agents = [
            Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(1.0, 1.0)),
            Agent::new(Vector2D::new(4.0, 2.0), Vector2D::new(1.0, 1.0)),
        ];
        let stats = FlockStats::from_agents(&agents);
        assert_eq!(stats.population, 2);
        assert_eq!(stats.centroid, Vector2D::new(2.0, 1.0));
        assert!((stats.polarization - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposed_flock_has_no_polarization() {
        let agents = [
            Agent::new(Vector2D::zero(), Vector2D::new(2.0, 0.0)),
            Agent::new(Vector2D::zero(), Vector2D::new(-2.0, 0.0)),
        ];
        let stats = FlockStats::from_agents(&agents);
        assert_eq!(stats.mean_speed, 2.0);
        assert_eq!(stats.polarization, 0.0);
    }
}
