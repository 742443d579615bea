use crate::elements::OrbitalElements;
use crate::{Num, OrbitError, StateVectors, TWO_PI};

/// Fixed ellipse for bodies that never change orbit (planets).
///
/// The elements are set once; [`StaticOrbit::advance`] only moves the true
/// anomaly forward with Kepler's second law, `dν/dt = h / r²`, split into
/// sub-steps no larger than `max_anomaly_step` radians so that large warp
/// factors do not skip over periapsis.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticOrbit {
    elements: OrbitalElements,
    true_anomaly: Num,
    swept_anomaly: Num,
    max_anomaly_step: Num,
}

impl StaticOrbit {
    pub fn new(
        semi_major_axis: Num,
        eccentricity: Num,
        argument_of_periapsis: Num,
        true_anomaly: Num,
        parent_mu: Num,
        max_anomaly_step: Num,
    ) -> Result<Self, OrbitError> {
        if !(semi_major_axis > 0.0) || !(0.0..1.0).contains(&eccentricity) {
            return Err(OrbitError::InvalidBody(format!(
                "static orbit must be a closed ellipse (a = {semi_major_axis}, e = {eccentricity})"
            )));
        }
        if !(parent_mu > 0.0) || !(max_anomaly_step > 0.0) {
            return Err(OrbitError::InvalidBody(format!(
                "static orbit needs a positive parent mu and anomaly step (mu = {parent_mu})"
            )));
        }

        let l = semi_major_axis * (1.0 - eccentricity.powi(2));

        let elements = OrbitalElements {
            semi_major_axis,
            eccentricity,
            semi_latus_rectum: l,
            argument_of_periapsis,
            // Planets always run counter-clockwise
            specific_angular_momentum: (parent_mu * l).sqrt(),
            true_anomaly_at_epoch: true_anomaly,
            mu: parent_mu,
        };

        Ok(Self {
            elements,
            true_anomaly,
            swept_anomaly: 0.0,
            max_anomaly_step,
        })
    }

    pub fn advance(&mut self, dt: Num) {
        let mut remaining = dt;

        while remaining > 0.0 {
            let r = self.elements.distance_at_true_anomaly(self.true_anomaly);
            let angular_velocity = self.elements.angular_velocity_at_distance(r);

            let step = remaining.min(self.max_anomaly_step / angular_velocity);
            let swept = angular_velocity * step;

            self.true_anomaly += swept;
            self.swept_anomaly += swept;
            remaining -= step;
        }

        self.true_anomaly = self.true_anomaly.rem_euclid(TWO_PI);
    }

    pub fn reset(&mut self) {
        self.true_anomaly = self.elements.true_anomaly_at_epoch;
        self.swept_anomaly = 0.0;
    }

    pub fn state_vectors(&self) -> StateVectors {
        self.elements.state_vectors_at_true_anomaly(self.true_anomaly)
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn true_anomaly(&self) -> Num {
        self.true_anomaly
    }

    /// Total anomaly covered since construction or the last reset, not wrapped.
    pub fn swept_anomaly(&self) -> Num {
        self.swept_anomaly
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::astro;
    use crate::constants::tolerance::TIGHT;

    fn earth_like() -> StaticOrbit {
        StaticOrbit::new(2.8, 0.2, 0.0, 0.0, 0.1, 0.005).unwrap()
    }

    #[test]
    fn starts_at_periapsis() {
        let orbit = earth_like();
        let sv = orbit.state_vectors();

        assert_relative_eq!(sv.position.x, 2.8 * 0.8, epsilon = TIGHT);
        assert_relative_eq!(sv.position.y, 0.0, epsilon = TIGHT);
        assert!(sv.velocity.y > 0.0);
    }

    #[test]
    fn one_period_is_one_revolution() {
        let mut orbit = earth_like();
        let period = astro::period(2.8, 0.1);

        for _ in 0..1000 {
            orbit.advance(period / 1000.0);
        }

        assert_relative_eq!(orbit.swept_anomaly(), TWO_PI, epsilon = 1e-2);
    }

    #[test]
    fn large_steps_are_subdivided() {
        let mut coarse = earth_like();
        let mut fine = earth_like();

        coarse.advance(10.0);
        for _ in 0..1000 {
            fine.advance(0.01);
        }

        assert_relative_eq!(coarse.true_anomaly(), fine.true_anomaly(), epsilon = 1e-2);
    }

    #[test]
    fn reset_restores_epoch() {
        let mut orbit = earth_like();
        orbit.advance(25.0);
        orbit.reset();

        assert_eq!(orbit.true_anomaly(), 0.0);
        assert_eq!(orbit.swept_anomaly(), 0.0);
    }

    #[test]
    fn open_orbits_are_rejected() {
        assert!(StaticOrbit::new(2.8, 1.2, 0.0, 0.0, 0.1, 0.005).is_err());
        assert!(StaticOrbit::new(-1.0, 0.5, 0.0, 0.0, 0.1, 0.005).is_err());
    }
}
