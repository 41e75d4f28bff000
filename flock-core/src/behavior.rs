//! The steering rules.
//!
//! Each neighbor rule is one linear scan over the whole population. The subject
//! is passed by index and skipped by index, never by comparing state.

use crate::agent::Agent;
use crate::config::FlockConfig;
use crate::pointer::PointerTarget;
use crate::vector::Vector2D;

/// The four unweighted steering forces acting on one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Forces {
    pub cohesion: Vector2D,
    pub separation: Vector2D,
    pub alignment: Vector2D,
    pub pointer: Vector2D,
}

impl Forces {
    pub fn compute(
        agents: &[Agent],
        index: usize,
        config: &FlockConfig,
        pointer: Option<&PointerTarget>,
    ) -> Self {
        let subject = &agents[index];
        Self {
            cohesion: cohesion(agents, index, config),
            separation: separation(agents, index, config),
            alignment: alignment(agents, index, config),
            pointer: pointer
                .map(|target| avoid_pointer(subject, target))
                .unwrap_or_default(),
        }
    }

    /// Weighted sum of the forces, the velocity change for this tick before jitter.
    pub fn weighted(&self, config: &FlockConfig) -> Vector2D {
        self.cohesion * config.cohesion_weight
            + self.separation * config.separation_weight
            + self.alignment * config.alignment_weight
            + self.pointer * config.pointer_weight
    }
}

/// Iterates every agent except the one at `index`, with its distance to the subject.
fn neighbors<'a>(
    agents: &'a [Agent],
    index: usize,
) -> impl Iterator<Item = (&'a Agent, f32)> + 'a {
    let subject = agents[index].position;
    agents
        .iter()
        .enumerate()
        .filter(move |(i, _)| *i != index)
        .map(move |(_, other)| (other, subject.distance(&other.position)))
}

/// Offset from the subject to the centroid of neighbors with
/// `cohesion_min_distance < dist < cohesion_distance`.
pub fn cohesion(agents: &[Agent], index: usize, config: &FlockConfig) -> Vector2D {
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for (other, distance) in neighbors(agents, index) {
        if distance > config.cohesion_min_distance && distance < config.cohesion_distance {
            sum += other.position;
            count += 1;
        }
    }

    if count > 0 {
        sum / count as f32 - agents[index].position
    } else {
        Vector2D::zero()
    }
}

/// Sum of unit vectors pointing away from every neighbor with
/// `0 < dist <= separation_distance`. Not normalized: crowding increases it.
///
/// Coincident neighbors have no direction to push along and contribute nothing.
pub fn separation(agents: &[Agent], index: usize, config: &FlockConfig) -> Vector2D {
    let subject = agents[index].position;
    let mut force = Vector2D::zero();

    for (other, distance) in neighbors(agents, index) {
        if distance > 0.0 && distance <= config.separation_distance {
            force += (subject - other.position) / distance;
        }
    }

    force
}

/// Mean velocity of neighbors with `dist <= alignment_distance`.
pub fn alignment(agents: &[Agent], index: usize, config: &FlockConfig) -> Vector2D {
    let mut sum = Vector2D::zero();
    let mut count = 0;

    for (other, distance) in neighbors(agents, index) {
        if distance <= config.alignment_distance {
            sum += other.velocity;
            count += 1;
        }
    }

    if count > 0 {
        sum / count as f32
    } else {
        Vector2D::zero()
    }
}

/// Displacement away from the pointer when the agent is inside its radius.
pub fn avoid_pointer(agent: &Agent, target: &PointerTarget) -> Vector2D {
    if target.reaches(agent.position) {
        agent.position - target.position
    } else {
        Vector2D::zero()
    }
}
