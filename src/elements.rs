#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astro;
use crate::{Num, Polar, StateVectors, Vec2, PI};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConicKind {
    Ellipse,
    Parabola,
    Hyperbola,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// +1 for counter-clockwise, -1 for clockwise.
    pub fn signum(self) -> Num {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::CounterClockwise => 1.0,
        }
    }
}

/// Planar orbital elements relative to the orbit's own center.
///
/// `semi_major_axis` is positive for ellipses, negative for hyperbolas and
/// infinite for the parabolic boundary. `specific_angular_momentum` keeps
/// its sign, which encodes the rotation direction.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrbitalElements {
    pub semi_major_axis: Num,
    pub eccentricity: Num,
    pub semi_latus_rectum: Num,
    pub argument_of_periapsis: Num,
    pub specific_angular_momentum: Num,
    /// True anomaly of the state these elements were derived from
    pub true_anomaly_at_epoch: Num,
    /// Gravitational parameter of the center
    pub mu: Num,
}

impl OrbitalElements {
    pub fn conic(&self) -> ConicKind {
        if self.semi_major_axis.is_infinite() {
            ConicKind::Parabola
        } else if self.semi_major_axis > 0.0 {
            ConicKind::Ellipse
        } else {
            ConicKind::Hyperbola
        }
    }

    pub fn is_elliptical(&self) -> bool {
        self.conic() == ConicKind::Ellipse
    }

    pub fn direction(&self) -> Rotation {
        if self.specific_angular_momentum > 0.0 {
            Rotation::CounterClockwise
        } else {
            Rotation::Clockwise
        }
    }

    /// Distance from the focus at true anomaly `v`.
    ///
    /// Infinite (or negative) past the asymptotes of an open orbit.
    #[inline]
    pub fn distance_at_true_anomaly(&self, v: Num) -> Num {
        self.semi_latus_rectum / (1.0 + self.eccentricity * v.cos())
    }

    #[inline]
    pub fn position_at_true_anomaly(&self, v: Num) -> Vec2 {
        let r = self.distance_at_true_anomaly(v);

        Vec2::from_polar(r, self.argument_of_periapsis + v)
    }

    #[inline]
    pub fn velocity_at_true_anomaly(&self, v: Num) -> Vec2 {
        let e = self.eccentricity;
        let h = self.specific_angular_momentum;
        let μ = self.mu;

        // Perifocal components, the sign of h carries the direction
        let vp = -(μ / h) * v.sin();
        let vq = (μ / h) * (e + v.cos());

        Vec2::new(vp, vq).rotated(self.argument_of_periapsis)
    }

    pub fn state_vectors_at_true_anomaly(&self, v: Num) -> StateVectors {
        StateVectors {
            position: self.position_at_true_anomaly(v),
            velocity: self.velocity_at_true_anomaly(v),
        }
    }

    /// Rate of change of the true anomaly at distance `r` (Kepler's second law).
    #[inline]
    pub fn angular_velocity_at_distance(&self, r: Num) -> Num {
        self.specific_angular_momentum / (r * r)
    }

    pub fn periapsis_distance(&self) -> Num {
        self.semi_latus_rectum / (1.0 + self.eccentricity)
    }

    pub fn apoapsis_distance(&self) -> Option<Num> {
        self.is_elliptical()
            .then(|| self.semi_latus_rectum / (1.0 - self.eccentricity))
    }

    /// Always defined, independent of whether a trajectory reaches it.
    pub fn periapsis(&self) -> Vec2 {
        Vec2::from_polar(self.periapsis_distance(), self.argument_of_periapsis)
    }

    pub fn apoapsis(&self) -> Option<Vec2> {
        self.apoapsis_distance()
            .map(|r| Vec2::from_polar(r, self.argument_of_periapsis + PI))
    }

    pub fn period(&self) -> Option<Num> {
        self.is_elliptical()
            .then(|| astro::period(self.semi_major_axis, self.mu))
    }
}
