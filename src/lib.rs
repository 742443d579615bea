#![allow(non_snake_case)]

//! Two-body orbit propagation with patched-conic transitions.
//!
//! A [`Spacecraft`] follows a precomputed [`Trajectory`] around whichever
//! [`GravitatingBody`] currently dominates it. Leaving a sphere of influence
//! hands the craft over to the parent body, entering a child's sphere hands
//! it down, and every velocity change (engine burn, frame switch) re-derives
//! the conic through [`OrbitPropagator::recalculate`].
//!
//! ```
//! use patched_conics::{vec2, BodyId, GravitatingBody, OrbitPropagator, PropagationConfig};
//!
//! let sun = GravitatingBody::new("sun", 1.0, 0.01, 100.0).unwrap();
//! let mut orbit = OrbitPropagator::new(BodyId::PRIMARY, &sun, PropagationConfig::default());
//!
//! orbit.recalculate(vec2(0.5, 0.3), vec2(0.4, -1.1)).unwrap();
//!
//! assert!(orbit.elements().semi_major_axis > 0.0);
//! assert!(!orbit.trajectory().is_empty());
//! ```

pub mod astro;
pub mod body;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod elements;
pub mod engine;
pub mod error;
pub mod propagator;
pub mod spacecraft;
pub mod state_vectors;
pub mod static_orbit;
pub mod system;
pub mod trajectory;
pub mod vector;
pub mod warp;

#[cfg(feature = "f64")]
pub type Num = f64;
#[cfg(not(feature = "f64"))]
pub type Num = f32;

#[cfg(feature = "f64")]
pub use glam::{dvec2 as vec2, DVec2 as Vec2};
#[cfg(not(feature = "f64"))]
pub use glam::{vec2, Vec2};

pub use body::{BodyId, BodySet, Capabilities, GravitatingBody};
pub use calendar::SimulationCalendar;
pub use config::{
    CalendarConfig, PlanetConfig, PropagationConfig, SpacecraftConfig, StarConfig, SystemConfig,
};
pub use constants::{HALF_PI, PI, TWO_PI};
pub use elements::{ConicKind, OrbitalElements, Rotation};
pub use engine::Engine;
pub use error::OrbitError;
pub use propagator::OrbitPropagator;
pub use spacecraft::{BurnDirection, DestructionCause, FlightEvent, Spacecraft};
pub use state_vectors::StateVectors;
pub use static_orbit::StaticOrbit;
pub use system::{SimulationContext, SolarSystem};
pub use trajectory::{Trajectory, TrajectorySample};
pub use vector::Polar;
pub use warp::WarpLevel;
