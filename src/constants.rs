#[cfg(feature = "f64")]
pub use std::f64::consts::PI;
#[cfg(not(feature = "f64"))]
pub use std::f32::consts::PI;

use crate::Num;

pub const TWO_PI: Num = 2.0 * PI;

pub const HALF_PI: Num = 0.5 * PI;

/// Below this eccentricity an orbit is treated as a circle and its
/// periapsis direction is taken from the current position.
#[cfg(feature = "f64")]
pub const CIRCULAR_TOLERANCE: Num = 1e-9;
#[cfg(not(feature = "f64"))]
pub const CIRCULAR_TOLERANCE: Num = 1e-5;

/// Relative band around zero specific energy (`2 - r·v²/μ`) that is
/// classified as a parabola instead of a huge ellipse or hyperbola.
#[cfg(feature = "f64")]
pub const PARABOLIC_TOLERANCE: Num = 1e-12;
#[cfg(not(feature = "f64"))]
pub const PARABOLIC_TOLERANCE: Num = 1e-6;

/// Mean length of a year in days, used by the simulation calendar.
pub const DAYS_PER_YEAR: Num = 365.256;
