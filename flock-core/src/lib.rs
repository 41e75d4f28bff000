#![cfg_attr(not(feature = "std"), no_std)]

//! Flocking simulation engine.
//!
//! Agents follow three local rules (cohesion, separation, alignment) plus an
//! optional push away from a pointer-controlled obstacle, in a toroidal 2D space.
//! [`Simulation`] bundles the flock with its bounds, pointer and random source
//! and is what hosts drive; [`Flock`] and [`behavior`] expose the engine itself.

extern crate alloc;

mod agent;
pub mod behavior;
mod bounds;
mod config;
mod error;
mod flock;
mod math;
mod pointer;
pub mod render;
mod schedule;
mod simulation;
mod stats;
mod vector;

pub use agent::Agent;
pub use behavior::Forces;
pub use bounds::{wrap_coordinate, Bounds};
pub use config::{FlockConfig, Preset};
pub use error::{Error, Result};
pub use flock::Flock;
pub use pointer::PointerTarget;
pub use render::{Glyph, Surface};
pub use schedule::{FrameLimiter, DEFAULT_FPS};
pub use simulation::{population_for, Simulation, MAX_POPULATION};
pub use stats::FlockStats;
pub use vector::Vector2D;
