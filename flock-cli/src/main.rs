use anyhow::{Context, Result};
use clap::Parser;
use flock_cli::{Args, FlockRunner};

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Flock runner starting...");
    if let Some(path) = &args.config {
        log::info!("Settings: {}", path.display());
    }

    let mut runner = FlockRunner::new(&args).context("Failed to initialize runner")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = runner.run(&mut out).context("Simulation error")?;

    println!("{}", report.to_json()?);

    Ok(())
}
