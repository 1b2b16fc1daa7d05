// src/lib.rs

pub mod boltzmann;
pub mod config;
pub mod cooling;
pub mod coupling;
pub mod entropy;
pub mod error;
pub mod grid;
pub mod params;
pub mod phonon;
pub mod root;
pub mod spins;

pub use error::{PhysicsError, Result};
