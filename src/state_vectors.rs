#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{CIRCULAR_TOLERANCE, PARABOLIC_TOLERANCE};
use crate::elements::{ConicKind, OrbitalElements};
use crate::{Num, OrbitError, Polar, Vec2};

/// Position and velocity of a body relative to some frame origin.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StateVectors {
    pub position: Vec2,
    pub velocity: Vec2,
}

impl StateVectors {
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self { position, velocity }
    }

    pub fn abs_diff(&self, other: &Self) -> Num {
        self.position.distance(other.position) + self.velocity.distance(other.velocity)
    }

    /// Re-expresses a state given relative to a body in the frame that body
    /// is itself described in. Plain vector addition, no approximation.
    pub fn to_parent_frame(&self, body: &StateVectors) -> Self {
        Self {
            position: self.position + body.position,
            velocity: self.velocity + body.velocity,
        }
    }

    /// Inverse of [`Self::to_parent_frame`]: the state as seen from `body`.
    pub fn relative_to(&self, body: &StateVectors) -> Self {
        Self {
            position: self.position - body.position,
            velocity: self.velocity - body.velocity,
        }
    }

    pub fn validate(&self) -> Result<(), OrbitError> {
        if !self.position.is_finite() || !self.velocity.is_finite() {
            return Err(OrbitError::NonFiniteState);
        }
        if self.position.length_squared() == 0.0 {
            return Err(OrbitError::ZeroRadius);
        }
        if self.velocity.length_squared() == 0.0 {
            return Err(OrbitError::ZeroVelocity);
        }

        Ok(())
    }

    /// Derives the conic this state lies on, using the energy/angular
    /// momentum method.
    ///
    /// The sign of the specific angular momentum decides the rotation
    /// direction; the sign of `r·v` decides whether the body is heading away
    /// from or towards periapsis. Together they resolve the `acos` branch of
    /// the true anomaly.
    pub fn to_elements(&self, mu: Num) -> Result<OrbitalElements, OrbitError> {
        self.validate()?;

        let rv = self.position;
        let r = rv.length();
        let vv = self.velocity;
        let v2 = vv.length_squared();

        // Specific angular momentum, positive when counter-clockwise
        let h = rv.cross(vv);

        if h.abs() <= Num::EPSILON * r * v2.sqrt() {
            return Err(OrbitError::RadialTrajectory);
        }

        // Vis-viva: a = r / (2 - r v² / μ)
        let denominator = 2.0 - r * v2 / mu;

        let conic = if denominator.abs() < PARABOLIC_TOLERANCE {
            ConicKind::Parabola
        } else if denominator > 0.0 {
            ConicKind::Ellipse
        } else {
            ConicKind::Hyperbola
        };

        let a = match conic {
            ConicKind::Parabola => Num::INFINITY,
            _ => r / denominator,
        };

        // Eccentricity vector points at periapsis
        let ev = ((v2 - mu / r) * rv - rv.dot(vv) * vv) / mu;
        let mut e = ev.length();

        if conic != ConicKind::Ellipse {
            e = e.max(1.0);
        }

        let l = h.powi(2) / mu;

        let (ω, v) = if e < CIRCULAR_TOLERANCE {
            // Periapsis is undefined for a circle, measure from here
            (rv.polar_angle(), 0.0)
        } else {
            let cos_v = ((l / r - 1.0) / e).clamp(-1.0, 1.0);
            let mut v = cos_v.acos();

            let receding = rv.dot(vv) >= 0.0;
            let counter_clockwise = h > 0.0;

            if receding != counter_clockwise {
                v = -v;
            }

            (ev.polar_angle(), v)
        };

        Ok(OrbitalElements {
            semi_major_axis: a,
            eccentricity: e,
            semi_latus_rectum: l,
            argument_of_periapsis: ω,
            specific_angular_momentum: h,
            true_anomaly_at_epoch: v,
            mu,
        })
    }
}
