//! Riptide library - spectral ocean synthesis and RK4 particle integration

pub mod cli;
pub mod error;
pub mod export;
pub mod ocean;
pub mod params;
pub mod particles;

pub use error::{Error, Result};
