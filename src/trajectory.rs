use log::warn;

use crate::elements::OrbitalElements;
use crate::{Num, Polar, StateVectors, Vec2, TWO_PI};

/// One point of a sampled trajectory, relative to the orbit's periapsis
/// direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub distance: Num,
    pub true_anomaly: Num,
}

/// Where generation has to stop, taken from the center body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundaries {
    pub physical_radius: Num,
    pub sphere_of_influence: Num,
}

/// Time-discretized conic, generated once per propagation and never edited.
///
/// Consecutive samples are `step` time units apart. Sample 0 is the state the
/// orbit was derived from. A closed orbit stops one step short of a full
/// revolution so that wrapping the index lands back on sample 0. A sample
/// that crosses the sphere of influence or the surface is kept as the last
/// one and sets the matching flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    elements: OrbitalElements,
    samples: Vec<TrajectorySample>,
    step: Num,
    escape: bool,
    crash: bool,
    truncated: bool,
}

impl Trajectory {
    pub fn generate(
        elements: OrbitalElements,
        boundaries: Boundaries,
        step: Num,
        max_samples: usize,
    ) -> Self {
        let mut samples = Vec::new();
        let mut escape = false;
        let mut crash = false;
        let mut truncated = false;

        let closed = elements.is_elliptical();
        let v0 = elements.true_anomaly_at_epoch;
        let mut v = v0;
        let mut r = elements.distance_at_true_anomaly(v);

        loop {
            if samples.len() >= max_samples {
                warn!(
                    "Trajectory truncated at {max_samples} samples (e = {}, a = {}), assuming escape",
                    elements.eccentricity, elements.semi_major_axis
                );
                truncated = true;
                escape = true;
                break;
            }

            // Past the asymptote of an open conic the distance flips sign
            if !r.is_finite() || r <= 0.0 {
                escape = true;
                break;
            }

            samples.push(TrajectorySample {
                distance: r,
                true_anomaly: v,
            });

            if r > boundaries.sphere_of_influence {
                escape = true;
                break;
            }
            if r < boundaries.physical_radius {
                crash = true;
                break;
            }

            v += elements.angular_velocity_at_distance(r) * step;

            if closed && (v - v0).abs() >= TWO_PI {
                break;
            }

            r = elements.distance_at_true_anomaly(v);
        }

        Self {
            elements,
            samples,
            step,
            escape,
            crash,
            truncated,
        }
    }

    pub fn elements(&self) -> &OrbitalElements {
        &self.elements
    }

    pub fn samples(&self) -> &[TrajectorySample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time between consecutive samples.
    pub fn step(&self) -> Num {
        self.step
    }

    /// Samples to skip per tick of `dt` so that on-screen speed does not
    /// depend on the step chosen for this orbit.
    pub fn stride(&self, dt: Num) -> usize {
        if self.step <= 0.0 {
            return 1;
        }

        ((dt / self.step).round() as usize).max(1)
    }

    pub fn is_on_escape_path(&self) -> bool {
        self.escape
    }

    pub fn is_on_crash_path(&self) -> bool {
        self.crash
    }

    /// Generation hit the sample cap. Implies [`Self::is_on_escape_path`].
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn position_at(&self, index: usize) -> Option<Vec2> {
        self.samples.get(index).map(|s| {
            Vec2::from_polar(s.distance, self.elements.argument_of_periapsis + s.true_anomaly)
        })
    }

    pub fn velocity_at(&self, index: usize) -> Option<Vec2> {
        self.samples
            .get(index)
            .map(|s| self.elements.velocity_at_true_anomaly(s.true_anomaly))
    }

    pub fn state_at(&self, index: usize) -> Option<StateVectors> {
        Some(StateVectors::new(
            self.position_at(index)?,
            self.velocity_at(index)?,
        ))
    }

    pub fn min_distance(&self) -> Option<Num> {
        self.samples.iter().map(|s| s.distance).reduce(Num::min)
    }

    pub fn max_distance(&self) -> Option<Num> {
        self.samples.iter().map(|s| s.distance).reduce(Num::max)
    }
}
