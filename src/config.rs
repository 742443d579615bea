//! Scenario configuration.
//!
//! Every struct has a [`Default`] that reproduces the stock sun, earth and
//! mars scenario with a spacecraft in a low circular orbit around earth.
//! With the `serde` feature a whole [`SystemConfig`] can be read from JSON:
//!
//! ```json
//! {
//!   "star": { "name": "sun", "mu": 0.1, "radius": 0.1, "sphere_of_influence": 10.0 },
//!   "planets": [
//!     { "name": "earth", "mu": 0.005, "radius": 0.04, "sphere_of_influence": 0.75,
//!       "semi_major_axis": 2.8, "eccentricity": 0.2,
//!       "argument_of_periapsis": 0.0, "true_anomaly": 0.0 }
//!   ],
//!   "spacecraft": { "center": "earth", "altitude": 0.2, "angle": 0.785398,
//!                   "direction": "Clockwise", "dry_mass": 500.0, "fuel_mass": 500.0,
//!                   "exhaust_velocity": 2.7, "max_mass_flow": 1.0, "throttle": 1.0 },
//!   "propagation": { "fine_step": 0.001, "coarse_step": 0.01,
//!                    "fine_step_max_semi_major_axis": 3.0, "max_samples": 250000,
//!                    "capture_soi_fraction": 0.9, "planet_max_anomaly_step": 0.005 },
//!   "calendar": { "start": "2024-01-01", "reference_planet": "earth" },
//!   "tick_duration": 0.01
//! }
//! ```

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::elements::{OrbitalElements, Rotation};
use crate::{Num, OrbitError, PI};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StarConfig {
    pub name: String,
    pub mu: Num,
    pub radius: Num,
    pub sphere_of_influence: Num,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            name: "sun".to_string(),
            mu: 0.1,
            radius: 0.1,
            sphere_of_influence: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanetConfig {
    pub name: String,
    pub mu: Num,
    pub radius: Num,
    /// Derived from the Laplace radius at `semi_major_axis` when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub sphere_of_influence: Option<Num>,
    pub semi_major_axis: Num,
    pub eccentricity: Num,
    #[cfg_attr(feature = "serde", serde(default))]
    pub argument_of_periapsis: Num,
    #[cfg_attr(feature = "serde", serde(default))]
    pub true_anomaly: Num,
}

impl PlanetConfig {
    pub fn earth() -> Self {
        Self {
            name: "earth".to_string(),
            mu: 0.005,
            radius: 0.04,
            sphere_of_influence: Some(0.75),
            semi_major_axis: 2.8,
            eccentricity: 0.2,
            argument_of_periapsis: 0.0,
            true_anomaly: 0.0,
        }
    }

    pub fn mars() -> Self {
        Self {
            name: "mars".to_string(),
            mu: 0.003,
            radius: 0.02,
            sphere_of_influence: Some(0.45),
            semi_major_axis: 4.9,
            eccentricity: 0.15,
            argument_of_periapsis: 0.0,
            true_anomaly: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpacecraftConfig {
    /// Name of the body the craft starts around
    pub center: String,
    /// Radius of the starting circular orbit, measured from the center
    pub altitude: Num,
    /// Polar angle of the starting position
    pub angle: Num,
    #[cfg_attr(feature = "serde", serde(default = "clockwise"))]
    pub direction: Rotation,
    pub dry_mass: Num,
    pub fuel_mass: Num,
    pub exhaust_velocity: Num,
    /// Propellant mass burnt per tick at full throttle
    pub max_mass_flow: Num,
    pub throttle: Num,
}

impl Default for SpacecraftConfig {
    fn default() -> Self {
        Self {
            center: "earth".to_string(),
            altitude: 0.2,
            angle: 0.25 * PI,
            direction: Rotation::Clockwise,
            dry_mass: 500.0,
            fuel_mass: 500.0,
            exhaust_velocity: 2.7,
            max_mass_flow: 1.0,
            throttle: 1.0,
        }
    }
}

#[cfg(feature = "serde")]
fn clockwise() -> Rotation {
    Rotation::Clockwise
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropagationConfig {
    /// Sampling step for tight ellipses
    pub fine_step: Num,
    /// Sampling step for wide ellipses and open orbits
    pub coarse_step: Num,
    pub fine_step_max_semi_major_axis: Num,
    /// Hard cap on samples per propagation
    pub max_samples: usize,
    /// Capture happens below this fraction of a body's sphere of influence
    pub capture_soi_fraction: Num,
    /// Largest true anomaly increment per planet sub-step, in radians
    pub planet_max_anomaly_step: Num,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            fine_step: 0.001,
            coarse_step: 0.01,
            fine_step_max_semi_major_axis: 3.0,
            max_samples: 250_000,
            capture_soi_fraction: 0.9,
            planet_max_anomaly_step: 0.005,
        }
    }
}

impl PropagationConfig {
    /// Requires positive steps, a positive sample cap and a capture fraction
    /// in `(0, 1]`.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let invalid = |what: String| Err(OrbitError::InvalidConfig(what));

        if !(self.fine_step > 0.0) || !self.fine_step.is_finite() {
            return invalid(format!("fine_step = {}", self.fine_step));
        }
        if !(self.coarse_step > 0.0) || !self.coarse_step.is_finite() {
            return invalid(format!("coarse_step = {}", self.coarse_step));
        }
        if self.max_samples == 0 {
            return invalid("max_samples = 0".to_string());
        }
        if !(self.capture_soi_fraction > 0.0 && self.capture_soi_fraction <= 1.0) {
            return invalid(format!("capture_soi_fraction = {}", self.capture_soi_fraction));
        }
        if !(self.planet_max_anomaly_step > 0.0) || !self.planet_max_anomaly_step.is_finite() {
            return invalid(format!(
                "planet_max_anomaly_step = {}",
                self.planet_max_anomaly_step
            ));
        }

        Ok(())
    }

    /// Small, fast ellipses need the fine step to keep their shape; anything
    /// larger or open is sampled coarsely.
    pub fn step_for(&self, elements: &OrbitalElements) -> Num {
        if elements.is_elliptical()
            && elements.semi_major_axis < self.fine_step_max_semi_major_axis
        {
            self.fine_step
        } else {
            self.coarse_step
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarConfig {
    pub start: NaiveDate,
    /// Planet whose revolutions count the years. First planet when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference_planet: Option<String>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            reference_planet: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SystemConfig {
    pub star: StarConfig,
    pub planets: Vec<PlanetConfig>,
    pub spacecraft: SpacecraftConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub propagation: PropagationConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub calendar: CalendarConfig,
    /// Simulated time per tick at real-time warp
    pub tick_duration: Num,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            star: StarConfig::default(),
            planets: vec![PlanetConfig::earth(), PlanetConfig::mars()],
            spacecraft: SpacecraftConfig::default(),
            propagation: PropagationConfig::default(),
            calendar: CalendarConfig::default(),
            tick_duration: 0.01,
        }
    }
}

#[cfg(feature = "serde")]
impl SystemConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{vec2, StateVectors};

    #[test]
    fn step_selection() {
        let config = PropagationConfig::default();

        let tight = StateVectors::new(vec2(0.5, 0.3), vec2(0.4, -1.1))
            .to_elements(1.0)
            .unwrap();
        let wide = StateVectors::new(vec2(4.0, 0.0), vec2(0.0, 0.45))
            .to_elements(1.0)
            .unwrap();
        let open = StateVectors::new(vec2(0.0, -2.0), vec2(1.3, 0.2))
            .to_elements(1.0)
            .unwrap();

        assert_eq!(config.step_for(&tight), config.fine_step);
        assert_eq!(config.step_for(&wide), config.coarse_step);
        assert_eq!(config.step_for(&open), config.coarse_step);
    }

    #[test]
    fn default_propagation_is_valid() {
        assert_eq!(PropagationConfig::default().validate(), Ok(()));
    }

    #[test_case(|c| c.fine_step = 0.0 ; "zero fine step")]
    #[test_case(|c| c.coarse_step = -0.01 ; "negative coarse step")]
    #[test_case(|c| c.coarse_step = Num::NAN ; "nan coarse step")]
    #[test_case(|c| c.max_samples = 0 ; "no samples")]
    #[test_case(|c| c.capture_soi_fraction = 0.0 ; "capture fraction zero")]
    #[test_case(|c| c.capture_soi_fraction = 1.5 ; "capture fraction above one")]
    #[test_case(|c| c.planet_max_anomaly_step = 0.0 ; "zero planet step")]
    fn rejects_invalid_propagation(tweak: fn(&mut PropagationConfig)) {
        let mut config = PropagationConfig::default();
        tweak(&mut config);

        assert!(matches!(config.validate(), Err(OrbitError::InvalidConfig(_))));
    }

    #[test]
    fn capture_fraction_of_one_is_allowed() {
        let config = PropagationConfig {
            capture_soi_fraction: 1.0,
            ..Default::default()
        };

        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn default_scenario() {
        let config = SystemConfig::default();

        assert_eq!(config.planets.len(), 2);
        assert_eq!(config.spacecraft.center, "earth");
        assert_eq!(config.calendar.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_keeps_planets() {
        let config = SystemConfig::default();

        let parsed = SystemConfig::from_json(&config.to_json().unwrap()).unwrap();

        assert_eq!(parsed, config);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn optional_fields_fall_back_to_defaults() {
        let json = r#"{
            "star": { "name": "sol", "mu": 1.0, "radius": 0.1, "sphere_of_influence": 50.0 },
            "planets": [
                { "name": "rock", "mu": 0.01, "radius": 0.05,
                  "semi_major_axis": 5.0, "eccentricity": 0.1 }
            ],
            "spacecraft": { "center": "rock", "altitude": 0.2, "angle": 0.0,
                            "dry_mass": 100.0, "fuel_mass": 50.0,
                            "exhaust_velocity": 3.0, "max_mass_flow": 0.5, "throttle": 1.0 },
            "tick_duration": 0.02
        }"#;

        let config = SystemConfig::from_json(json).unwrap();

        assert_eq!(config.planets[0].sphere_of_influence, None);
        assert_eq!(config.propagation, PropagationConfig::default());
        assert_eq!(config.calendar.reference_planet, None);
    }
}
