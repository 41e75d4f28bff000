use crate::agent::Agent;
use crate::bounds::Bounds;
use crate::config::{FlockConfig, Preset};
use crate::error::{Error, Result};
use crate::flock::Flock;
use crate::math;
use crate::pointer::PointerTarget;
use crate::render::{Glyph, Surface};
use crate::stats::FlockStats;
use crate::vector::Vector2D;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Largest population density sizing may produce.
pub const MAX_POPULATION: usize = 100_000;

/// Number of agents for `bounds` at `density` units of area per agent.
///
/// Saturates at `usize::MAX`; see [`MAX_POPULATION`] for what a simulation accepts.
pub fn population_for(bounds: Bounds, density: f32) -> usize {
    math::floor(bounds.area() / density) as usize
}

/// Population for `bounds` at `density`, rejected above [`MAX_POPULATION`].
fn sized_population(bounds: Bounds, density: f32) -> Result<usize> {
    let population = population_for(bounds, density);
    if population > MAX_POPULATION {
        return Err(Error::PopulationTooLarge {
            max: MAX_POPULATION,
        });
    }
    Ok(population)
}

/// Everything one running simulation owns: the flock, the world bounds, the
/// pointer obstacle, the drawing glyph and the random source.
///
/// Hosts construct one of these and drive it from their scheduler, pointer and
/// resize callbacks.
#[derive(Debug, Clone)]
pub struct Simulation {
    flock: Flock,
    bounds: Bounds,
    pointer: Option<Vector2D>,
    glyph: Glyph,
    density: f32,
    rng: SmallRng,
    ticks: u64,
}

impl Simulation {
    pub fn from_preset(preset: Preset, bounds: Bounds, seed: u64) -> Result<Self> {
        Self::with_config(
            preset.config(),
            preset.glyph(),
            preset.density(),
            bounds,
            seed,
        )
    }

    /// Builds a simulation and fills it with randomly placed agents at `density`.
    pub fn with_config(
        config: FlockConfig,
        glyph: Glyph,
        density: f32,
        bounds: Bounds,
        seed: u64,
    ) -> Result<Self> {
        check_density(density)?;
        sized_population(bounds, density)?;
        let mut simulation = Self {
            flock: Flock::new(config)?,
            bounds,
            pointer: None,
            glyph,
            density,
            rng: SmallRng::seed_from_u64(seed),
            ticks: 0,
        };
        simulation.rescale_population()?;
        Ok(simulation)
    }

    /// Builds a simulation around an existing population without adding agents.
    pub fn with_flock(
        flock: Flock,
        glyph: Glyph,
        density: f32,
        bounds: Bounds,
        seed: u64,
    ) -> Result<Self> {
        check_density(density)?;
        Ok(Self {
            flock,
            bounds,
            pointer: None,
            glyph,
            density,
            rng: SmallRng::seed_from_u64(seed),
            ticks: 0,
        })
    }

    /// Advances the simulation by one tick.
    pub fn update(&mut self) {
        let target = self.pointer();
        self.flock.update(self.bounds, target.as_ref(), &mut self.rng);
        self.ticks += 1;
    }

    /// Clears `surface` and draws every agent, then the pointer ring if present.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> core::result::Result<(), S::Error> {
        surface.clear(self.bounds.width(), self.bounds.height())?;

        let speed_limit = self.flock.config().speed_limit;
        for agent in self.flock.agents() {
            let shade = (agent.speed() / speed_limit).min(1.0);
            self.glyph.draw(surface, agent, shade)?;
        }

        if let Some(target) = self.pointer() {
            surface.draw_circle(target.position, target.radius, 1.0)?;
        }
        Ok(())
    }

    pub fn flock(&self) -> &Flock {
        &self.flock
    }

    pub fn agents(&self) -> &[Agent] {
        self.flock.agents()
    }

    pub fn config(&self) -> &FlockConfig {
        self.flock.config()
    }

    pub fn set_config(&mut self, config: FlockConfig) -> Result<()> {
        self.flock.set_config(config)
    }

    /// Switches radii, weights, glyph and density to `preset` and resizes the
    /// population to the new density. Agents keep their current state.
    pub fn apply_preset(&mut self, preset: Preset) -> Result<()> {
        sized_population(self.bounds, preset.density())?;
        self.flock.set_config(preset.config())?;
        self.glyph = preset.glyph();
        self.density = preset.density();
        self.rescale_population()
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Changes the world size and grows or shrinks the population to keep the
    /// configured density. Agents outside the new bounds are wrapped on the next tick.
    /// Sizes that would exceed [`MAX_POPULATION`] are rejected and leave the
    /// simulation untouched.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<()> {
        let bounds = Bounds::new(width, height)?;
        sized_population(bounds, self.density)?;
        self.bounds = bounds;
        self.rescale_population()?;
        log::debug!(
            "resized to {}x{}, population {}",
            width,
            height,
            self.flock.len()
        );
        Ok(())
    }

    /// Current pointer obstacle, with the configured radius.
    pub fn pointer(&self) -> Option<PointerTarget> {
        self.pointer
            .map(|position| PointerTarget::new(position, self.flock.config().pointer_radius))
    }

    /// Moves the pointer obstacle; `None` when the pointer left the surface.
    pub fn set_pointer(&mut self, position: Option<Vector2D>) {
        self.pointer = position.filter(Vector2D::is_finite);
    }

    pub fn spawn(&mut self, position: Vector2D, velocity: Vector2D) -> Result<()> {
        self.flock.spawn(Agent::new(position, velocity))
    }

    /// Adds an agent at `position` with a random velocity.
    pub fn spawn_random_at(&mut self, position: Vector2D) -> Result<()> {
        let agent = Agent::random_at(&mut self.rng, position);
        self.flock.spawn(agent)?;
        log::debug!(
            "spawned agent at {:?}, population {}",
            position,
            self.flock.len()
        );
        Ok(())
    }

    /// Removes up to `count` agents from the tail of the population.
    pub fn despawn(&mut self, count: usize) -> usize {
        self.flock.despawn(count)
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn set_glyph(&mut self, glyph: Glyph) {
        self.glyph = glyph;
    }

    pub fn density(&self) -> f32 {
        self.density
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stats(&self) -> FlockStats {
        FlockStats::from_agents(self.flock.agents())
    }

    fn rescale_population(&mut self) -> Result<()> {
        let target = sized_population(self.bounds, self.density)?;
        let current = self.flock.len();

        if target > current {
            for _ in current..target {
                let agent = Agent::random(&mut self.rng, self.bounds);
                self.flock.spawn(agent)?;
            }
        } else {
            self.flock.despawn(current - target);
        }
        log::debug!("population {} -> {}", current, self.flock.len());
        Ok(())
    }
}

fn check_density(density: f32) -> Result<()> {
    if density.is_finite() && density > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfig {
            field: "density",
            reason: "must be positive",
        })
    }
}
