use anyhow::{Context, Result};
use clap::Parser;
use flock_core::{Bounds, FrameLimiter, Simulation, Vector2D};
use flock_shared::{Settings, StatusReport};
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

pub mod surface;

pub use surface::AsciiSurface;

const DEFAULT_WIDTH: f32 = 800.0;
const DEFAULT_HEIGHT: f32 = 600.0;

/// Radians the orbiting pointer advances per tick.
const ORBIT_STEP: f32 = 0.02;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Headless and terminal runner for the flock simulation", long_about = None)]
pub struct Args {
    /// JSON settings file; flags given on the command line take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preset name: classic, murmuration, school or swarm
    #[arg(short, long)]
    pub preset: Option<String>,

    /// World width in simulation units
    #[arg(long)]
    pub width: Option<f32>,

    /// World height in simulation units
    #[arg(long)]
    pub height: Option<f32>,

    /// Simulation-space area per agent
    #[arg(long)]
    pub density: Option<f32>,

    /// Number of ticks to run
    #[arg(short, long, default_value_t = 600)]
    pub ticks: u64,

    /// Target frame rate when pacing in real time
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seed for the population and jitter; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// Draw every frame to the terminal
    #[arg(short, long)]
    pub render: bool,

    /// Terminal columns used when rendering
    #[arg(long, default_value_t = 80)]
    pub columns: usize,

    /// Terminal rows used when rendering
    #[arg(long, default_value_t = 24)]
    pub rows: usize,

    /// Pace ticks at the target frame rate instead of running flat out
    #[arg(long)]
    pub realtime: bool,

    /// Circle a pointer obstacle around the middle of the world
    #[arg(long)]
    pub orbit_pointer: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

impl Args {
    /// Settings from the `--config` file (if any) with command line flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read settings from {}", path.display()))?;
                Settings::from_json(&json)
                    .with_context(|| format!("Invalid settings in {}", path.display()))?
            }
            None => Settings::default(),
        };

        if let Some(preset) = &self.preset {
            settings.preset = Some(preset.clone());
        }
        settings.width = self.width.or(settings.width);
        settings.height = self.height.or(settings.height);
        settings.density = self.density.or(settings.density);
        settings.seed = self.seed.or(settings.seed);
        settings.fps = self.fps.or(settings.fps);

        Ok(settings)
    }
}

/// Builds a populated simulation from resolved settings.
pub fn build_simulation(settings: &Settings) -> Result<Simulation> {
    let bounds = Bounds::new(
        settings.width.unwrap_or(DEFAULT_WIDTH),
        settings.height.unwrap_or(DEFAULT_HEIGHT),
    )?;
    let seed = settings.seed.unwrap_or_else(rand::random);
    log::debug!("Using seed {}", seed);

    let simulation = Simulation::with_config(
        settings.flock_config()?,
        settings.glyph()?,
        settings.density()?,
        bounds,
        seed,
    )?;
    Ok(simulation)
}

/// Position of the orbiting pointer at a given tick.
pub fn orbit_position(bounds: Bounds, tick: u64) -> Vector2D {
    let center = Vector2D::new(bounds.width() / 2.0, bounds.height() / 2.0);
    let radius = bounds.width().min(bounds.height()) / 3.0;
    center + Vector2D::from_angle(tick as f32 * ORBIT_STEP) * radius
}

pub struct FlockRunner {
    simulation: Simulation,
    limiter: FrameLimiter,
    ticks: u64,
    surface: Option<AsciiSurface>,
    realtime: bool,
    orbit_pointer: bool,
}

impl FlockRunner {
    pub fn new(args: &Args) -> Result<Self> {
        let settings = args.settings()?;
        let simulation = build_simulation(&settings).context("Failed to build simulation")?;
        let limiter = FrameLimiter::new(settings.fps())?;

        log::info!(
            "Flock of {} agents in {}x{} world, {} preset",
            simulation.agents().len(),
            simulation.bounds().width(),
            simulation.bounds().height(),
            settings.preset()?
        );

        Ok(Self {
            simulation,
            limiter,
            ticks: args.ticks,
            surface: args
                .render
                .then(|| AsciiSurface::new(args.columns, args.rows)),
            realtime: args.realtime,
            orbit_pointer: args.orbit_pointer,
        })
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Renders (when enabled) and advances one tick.
    pub fn step(&mut self, out: &mut impl Write) -> Result<()> {
        if self.orbit_pointer {
            let position = orbit_position(self.simulation.bounds(), self.simulation.ticks());
            self.simulation.set_pointer(Some(position));
        }

        if let Some(surface) = self.surface.as_mut() {
            if let Err(never) = self.simulation.render(surface) {
                match never {}
            }
            // cursor home, then the frame
            write!(out, "\x1b[H{}", surface)?;
            writeln!(out)?;
            out.flush()?;
        }

        self.simulation.update();

        let tick = self.simulation.ticks();
        if tick % 100 == 0 {
            let stats = self.simulation.stats();
            log::debug!(
                "Tick {}: mean speed {:.3}, polarization {:.3}",
                tick,
                stats.mean_speed,
                stats.polarization
            );
        }
        Ok(())
    }

    /// Runs the configured number of ticks and reports the final state.
    pub fn run(&mut self, out: &mut impl Write) -> Result<StatusReport> {
        log::info!("Running {} ticks...", self.ticks);
        let start = Instant::now();

        if self.surface.is_some() {
            // clear screen once, frames then overwrite in place
            write!(out, "\x1b[2J")?;
        }

        let mut done = 0;
        while done < self.ticks {
            if self.realtime {
                let now_ms = start.elapsed().as_secs_f64() * 1000.0;
                if !self.limiter.ready(now_ms) {
                    std::thread::sleep(Duration::from_millis(1));
                    continue;
                }
            }
            self.step(out)?;
            done += 1;
        }

        let elapsed = start.elapsed();
        log::info!(
            "Ran {} ticks in {:.2?} ({:.1} ticks/s)",
            done,
            elapsed,
            done as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );

        Ok(StatusReport::from_simulation(&self.simulation))
    }
}
