use crate::agent::Agent;
use crate::behavior::Forces;
use crate::bounds::Bounds;
use crate::config::FlockConfig;
use crate::error::{Error, Result};
use crate::pointer::PointerTarget;
use crate::vector::Vector2D;
use alloc::vec::Vec;
use rand::Rng;

/// The agent population and the rules that move it.
///
/// Updates are double-buffered: every agent's next state is computed from the
/// start-of-tick population and the whole population is swapped in at the end,
/// so the result does not depend on iteration order.
#[derive(Debug, Clone)]
pub struct Flock {
    agents: Vec<Agent>,
    next: Vec<Agent>,
    config: FlockConfig,
}

impl Flock {
    pub fn new(config: FlockConfig) -> Result<Self> {
        Self::with_agents(config, Vec::new())
    }

    pub fn with_agents(config: FlockConfig, agents: Vec<Agent>) -> Result<Self> {
        config.validate()?;
        if agents.iter().any(|agent| !agent.is_finite()) {
            return Err(Error::NonFinite { what: "agent state" });
        }
        Ok(Self {
            next: Vec::with_capacity(agents.len()),
            agents,
            config,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn config(&self) -> &FlockConfig {
        &self.config
    }

    /// Replaces the configuration; invalid configurations leave the flock untouched.
    pub fn set_config(&mut self, config: FlockConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Appends an agent at the tail of the population.
    pub fn spawn(&mut self, agent: Agent) -> Result<()> {
        if !agent.is_finite() {
            return Err(Error::NonFinite { what: "agent state" });
        }
        self.agents.push(agent);
        Ok(())
    }

    /// Removes up to `count` agents from the tail. Returns how many were removed.
    pub fn despawn(&mut self, count: usize) -> usize {
        let removed = count.min(self.agents.len());
        self.agents.truncate(self.agents.len() - removed);
        removed
    }

    /// Unweighted steering forces on the agent at `index`, against the current population.
    pub fn forces(&self, index: usize, pointer: Option<&PointerTarget>) -> Option<Forces> {
        (index < self.agents.len())
            .then(|| Forces::compute(&self.agents, index, &self.config, pointer))
    }

    /// Advances every agent by one tick.
    ///
    /// `rng` is only drawn from when jitter is enabled, so with `jitter == 0.0`
    /// the result is fully determined by the population, bounds and pointer.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        bounds: Bounds,
        pointer: Option<&PointerTarget>,
        rng: &mut R,
    ) {
        let mut next = core::mem::take(&mut self.next);
        next.clear();
        next.reserve(self.agents.len());

        for index in 0..self.agents.len() {
            let jitter = self.jitter(rng);
            next.push(self.step(index, bounds, pointer, jitter));
        }

        self.next = core::mem::replace(&mut self.agents, next);
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D {
        let magnitude = self.config.jitter;
        if magnitude > 0.0 {
            Vector2D::new(
                rng.gen_range(-magnitude..=magnitude),
                rng.gen_range(-magnitude..=magnitude),
            )
        } else {
            Vector2D::zero()
        }
    }

    fn step(
        &self,
        index: usize,
        bounds: Bounds,
        pointer: Option<&PointerTarget>,
        jitter: Vector2D,
    ) -> Agent {
        let agent = self.agents[index];
        let forces = Forces::compute(&self.agents, index, &self.config, pointer);

        let velocity = (agent.velocity + forces.weighted(&self.config) + jitter)
            .limit(self.config.speed_limit);
        let position = bounds.wrap(agent.position + velocity);

        if velocity.is_finite() && position.is_finite() {
            return Agent::new(position, velocity);
        }

        // Hold the agent at its start-of-tick state so NaN or infinity never
        // reaches its neighbors.
        log::warn!(
            "agent {} produced non-finite state ({:?}), keeping start-of-tick state",
            index,
            forces
        );
        agent
    }
}
