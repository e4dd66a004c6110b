//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use glam::DVec2;

use crate::ocean::InitialPreset;
use crate::params::{CellGridParams, OceanParams, ParticleParams};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "riptide")]
#[command(about = "Spectral ocean heights and RK4 particle orbits", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize one ocean height field
    Ocean(OceanArgs),

    /// Run the singularity particle system for a number of steps
    Particles(ParticleArgs),

    /// Build shallow-wave initial conditions on a cell lattice
    Initial(InitialArgs),
}

#[derive(clap::Args, Debug)]
pub struct OceanArgs {
    /// Lattice cells per side (power of two recommended)
    #[arg(long, value_name = "N", default_value_t = 64)]
    pub size: usize,

    /// Phillips spectrum amplitude
    #[arg(long, default_value_t = 0.00005)]
    pub amplitude: f64,

    /// Wind velocity along x (m/s)
    #[arg(long, value_name = "M_PER_S", default_value_t = 0.0, allow_hyphen_values = true)]
    pub wind_x: f64,

    /// Wind velocity along z (m/s)
    #[arg(long, value_name = "M_PER_S", default_value_t = 32.0, allow_hyphen_values = true)]
    pub wind_z: f64,

    /// Patch side length (meters)
    #[arg(long, value_name = "METERS", default_value_t = 64.0)]
    pub length: f64,

    /// Simulation time to evaluate (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 1.0 / 30.0)]
    pub time: f64,

    /// Random seed for the spectral amplitudes
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write a 16-bit grayscale PNG heightmap here
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl OceanArgs {
    /// Build ocean parameters from command-line arguments
    pub fn ocean_params(&self) -> OceanParams {
        OceanParams {
            lattice_size: self.size,
            amplitude: self.amplitude,
            wind: DVec2::new(self.wind_x, self.wind_z),
            length_m: self.length,
            seed: self.seed,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct ParticleArgs {
    /// Number of bodies
    #[arg(long, default_value_t = 10_000)]
    pub count: usize,

    /// Number of update steps to run
    #[arg(long, default_value_t = 1000)]
    pub steps: usize,

    /// Attractor mass (kg)
    #[arg(long, value_name = "KG", default_value_t = 9.5e9)]
    pub singularity_mass: f64,

    /// Random seed for launch directions
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl ParticleArgs {
    /// Build particle parameters; unlisted values keep the demo defaults
    pub fn particle_params(&self) -> ParticleParams {
        ParticleParams {
            count: self.count,
            singularity_mass: self.singularity_mass,
            seed: self.seed,
            ..ParticleParams::default()
        }
    }
}

/// Initial height preset
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    Gaussian,
    Phillips,
    GaussianAndPhillips,
}

impl From<PresetArg> for InitialPreset {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Gaussian => InitialPreset::Gaussian,
            PresetArg::Phillips => InitialPreset::Phillips,
            PresetArg::GaussianAndPhillips => InitialPreset::GaussianAndPhillips,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct InitialArgs {
    /// Height preset
    #[arg(long, value_enum, default_value_t = PresetArg::GaussianAndPhillips)]
    pub preset: PresetArg,

    /// Cells per side; also the ocean lattice size
    #[arg(long, value_name = "N", default_value_t = 128)]
    pub size: usize,

    /// Random seed for the spectral amplitudes
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Write a 16-bit grayscale PNG of the cell heights here
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl InitialArgs {
    /// Cell lattice with the demo bounds and the requested size
    pub fn grid_params(&self) -> CellGridParams {
        CellGridParams {
            size: self.size,
            ..CellGridParams::default()
        }
    }

    /// Ocean sized to the cell lattice; other values keep the demo defaults
    pub fn ocean_params(&self) -> OceanParams {
        OceanParams {
            lattice_size: self.size,
            seed: self.seed,
            ..OceanParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocean_defaults_match_params() {
        let args = Args::parse_from(["riptide", "ocean"]);
        let Command::Ocean(ocean) = args.command else {
            panic!("expected ocean subcommand");
        };
        assert_eq!(ocean.ocean_params(), OceanParams::default());
        assert!(ocean.output.is_none());
    }

    #[test]
    fn test_ocean_overrides() {
        let args = Args::parse_from([
            "riptide", "ocean", "--size", "128", "--wind-x", "-5", "--output", "h.png",
        ]);
        let Command::Ocean(ocean) = args.command else {
            panic!("expected ocean subcommand");
        };
        let params = ocean.ocean_params();
        assert_eq!(params.lattice_size, 128);
        assert_eq!(params.wind, DVec2::new(-5.0, 32.0));
        assert_eq!(ocean.output, Some(PathBuf::from("h.png")));
    }

    #[test]
    fn test_particle_args() {
        let args = Args::parse_from(["riptide", "particles", "--count", "12", "--steps", "3"]);
        let Command::Particles(particles) = args.command else {
            panic!("expected particles subcommand");
        };
        assert_eq!(particles.steps, 3);
        let params = particles.particle_params();
        assert_eq!(params.count, 12);
        assert_eq!(params.particle_mass, ParticleParams::default().particle_mass);
    }

    #[test]
    fn test_initial_args() {
        let args = Args::parse_from(["riptide", "initial", "--preset", "phillips", "--size", "32"]);
        let Command::Initial(initial) = args.command else {
            panic!("expected initial subcommand");
        };
        assert_eq!(InitialPreset::from(initial.preset), InitialPreset::Phillips);
        assert_eq!(initial.grid_params().size, 32);
        assert_eq!(initial.ocean_params().lattice_size, 32);

        let args = Args::parse_from(["riptide", "initial"]);
        let Command::Initial(initial) = args.command else {
            panic!("expected initial subcommand");
        };
        assert_eq!(initial.preset, PresetArg::GaussianAndPhillips);
        assert_eq!(initial.grid_params(), CellGridParams::default());
    }
}
