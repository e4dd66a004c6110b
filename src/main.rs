//! Riptide - ocean height fields and singularity orbits from the command line

use clap::Parser;
use log::{error, info};

use riptide::cli::{Args, Command, InitialArgs, OceanArgs, ParticleArgs};
use riptide::export::{save_heightmap, save_initial_heightmap};
use riptide::ocean::{InitialState, SpectralOcean};
use riptide::particles::{ParticleSystem, StepReport};
use riptide::Result;

fn run_ocean(args: &OceanArgs) -> Result<()> {
    let params = args.ocean_params();
    let mut ocean = SpectralOcean::new(&params)?;
    ocean.evaluate_waves_fft(args.time);

    let heights = ocean.heights();
    let (min, max) = heights
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), h| {
            (lo.min(*h), hi.max(*h))
        });
    let rms = (heights.iter().map(|h| h * h).sum::<f64>() / heights.len() as f64).sqrt();

    info!(
        "Ocean {}x{} at t = {:.4} s: min {:.6} m, max {:.6} m, rms {:.6} m",
        params.lattice_size, params.lattice_size, args.time, min, max, rms
    );

    if let Some(path) = &args.output {
        save_heightmap(&ocean, path)?;
    }
    Ok(())
}

fn run_particles(args: &ParticleArgs) -> Result<()> {
    let mut system = ParticleSystem::new(&args.particle_params())?;

    let mut total = StepReport::default();
    for _ in 0..args.steps {
        total = total.merge(system.update());
    }

    let mean_radius =
        system.positions().map(|p| p.length()).sum::<f64>() / system.len().max(1) as f64;
    info!(
        "{} particles, {} steps: {} escaped, {} singular, mean radius {:.4} m",
        system.len(),
        args.steps,
        total.escaped,
        total.singular,
        mean_radius
    );
    Ok(())
}

fn run_initial(args: &InitialArgs) -> Result<()> {
    let grid = args.grid_params();
    let mut ocean = SpectralOcean::new(&args.ocean_params())?;
    let state = InitialState::from_preset(&grid, args.preset.into(), &mut ocean)?;

    let peak = state
        .heights()
        .iter()
        .fold(f64::NEG_INFINITY, |acc, h| acc.max(*h));
    info!(
        "Initial state {:?}: {}x{} cells, lambda {} m, peak height {:.4} m",
        args.preset,
        state.size(),
        state.size(),
        state.lambda_m(),
        peak
    );

    if let Some(path) = &args.output {
        save_initial_heightmap(&state, path)?;
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let result = match &args.command {
        Command::Ocean(ocean) => run_ocean(ocean),
        Command::Particles(particles) => run_particles(particles),
        Command::Initial(initial) => run_initial(initial),
    };

    if let Err(e) = result {
        error!("{}", e);
        std::process::exit(1);
    }
}
