use crate::constants::TWO_PI;
use crate::Num;

/// https://en.wikipedia.org/wiki/Sphere_of_influence_(astrodynamics)
///
/// Laplace radius of a body orbiting at `distance` from its parent. The
/// ratio of gravitational parameters equals the mass ratio.
pub fn sphere_of_influence(distance: Num, mu: Num, parent_mu: Num) -> Num {
    distance * (mu / parent_mu).powf(2.0 / 5.0)
}

/// https://en.wikipedia.org/wiki/Orbital_period
pub fn period(a: Num, mu: Num) -> Num {
    TWO_PI * (a.powi(3) / mu).sqrt()
}

#[inline]
pub fn circular_speed(r: Num, mu: Num) -> Num {
    (mu / r).sqrt()
}

#[inline]
pub fn escape_speed(r: Num, mu: Num) -> Num {
    (2.0 * mu / r).sqrt()
}
