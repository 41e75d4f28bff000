use flock_core::{
    behavior, Agent, Bounds, Flock, FlockConfig, PointerTarget, Preset, Simulation, Vector2D,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn random_population(rng: &mut SmallRng, bounds: Bounds, count: usize) -> Vec<Agent> {
    (0..count)
        .map(|_| {
            // start well outside the speed limit to exercise the clamp
            let position = Vector2D::new(
                rng.gen_range(0.0..bounds.width()),
                rng.gen_range(0.0..bounds.height()),
            );
            let velocity = Vector2D::new(rng.gen_range(-20.0..20.0), rng.gen_range(-20.0..20.0));
            Agent::new(position, velocity)
        })
        .collect()
}

#[test]
fn speed_bound_and_wrap_hold_for_random_populations() {
    for seed in 0..24u64 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let preset = Preset::ALL[seed as usize % Preset::ALL.len()];
        let bounds = Bounds::new(rng.gen_range(50.0..400.0), rng.gen_range(50.0..400.0)).unwrap();
        let count = rng.gen_range(1..80);
        let agents = random_population(&mut rng, bounds, count);
        let mut flock = Flock::with_agents(preset.config(), agents).unwrap();
        let limit = flock.config().speed_limit;
        let pointer = PointerTarget::new(
            Vector2D::new(bounds.width() / 2.0, bounds.height() / 2.0),
            flock.config().pointer_radius,
        );

        for _ in 0..40 {
            flock.update(bounds, Some(&pointer), &mut rng);
            for agent in flock.agents() {
                assert!(
                    agent.speed() <= limit * (1.0 + 1e-5),
                    "seed {seed}: speed {} over {limit}",
                    agent.speed()
                );
                assert!(
                    bounds.contains(agent.position),
                    "seed {seed}: {:?} outside {:?}",
                    agent.position,
                    bounds
                );
            }
        }
    }
}

#[test]
fn two_agent_cohesion_scenario() {
    let agents = vec![
        Agent::new(Vector2D::new(0.0, 0.0), Vector2D::new(0.0, 0.0)),
        Agent::new(Vector2D::new(10.0, 0.0), Vector2D::new(1.0, 0.0)),
    ];
    let config = FlockConfig {
        cohesion_min_distance: 8.0,
        cohesion_distance: 40.0,
        separation_distance: 5.0,
        alignment_distance: 5.0,
        ..FlockConfig::default()
    };
    let flock = Flock::with_agents(config, agents).unwrap();

    let a = flock.forces(0, None).unwrap();
    let b = flock.forces(1, None).unwrap();

    assert_eq!(a.cohesion, Vector2D::new(10.0, 0.0));
    assert_eq!(b.cohesion, Vector2D::new(-10.0, 0.0));
    assert_eq!(a.separation, Vector2D::zero());
    assert_eq!(a.alignment, Vector2D::zero());
    assert_eq!(a.pointer, Vector2D::zero());
    assert!(flock.forces(2, None).is_none());
}

#[test]
fn coincident_agents_stay_finite() {
    let agents = vec![
        Agent::new(Vector2D::new(50.0, 50.0), Vector2D::new(1.0, 0.0)),
        Agent::new(Vector2D::new(50.0, 50.0), Vector2D::new(1.0, 0.0)),
        Agent::new(Vector2D::new(50.0, 50.0), Vector2D::new(0.0, 0.0)),
    ];
    let bounds = Bounds::new(100.0, 100.0).unwrap();
    let mut flock = Flock::with_agents(FlockConfig::default(), agents).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);

    for _ in 0..10 {
        flock.update(bounds, None, &mut rng);
        assert!(flock.agents().iter().all(Agent::is_finite));
    }
}

#[test]
fn pointer_on_top_of_agent_has_no_effect() {
    let agent = Agent::new(Vector2D::new(30.0, 30.0), Vector2D::new(0.5, 0.0));
    let target = PointerTarget::new(Vector2D::new(30.0, 30.0), 22.0);
    assert_eq!(behavior::avoid_pointer(&agent, &target), Vector2D::zero());
}

#[test]
fn simulation_runs_headless_across_resizes() {
    let mut sim = Simulation::from_preset(Preset::Classic, Bounds::new(640.0, 480.0).unwrap(), 5)
        .unwrap();
    assert_eq!(sim.agents().len(), 102);

    for tick in 0..60 {
        if tick == 20 {
            sim.resize(320.0, 240.0).unwrap();
        }
        if tick == 40 {
            sim.resize(800.0, 600.0).unwrap();
        }
        sim.set_pointer(Some(Vector2D::new(tick as f32 * 3.0, 100.0)));
        sim.update();
        for agent in sim.agents() {
            assert!(sim.bounds().contains(agent.position));
        }
    }

    assert_eq!(sim.agents().len(), 160);
    assert_eq!(sim.stats().population, 160);
}
