use log::debug;

use crate::elements::OrbitalElements;
use crate::trajectory::{Boundaries, Trajectory};
use crate::{BodyId, GravitatingBody, Num, OrbitError, PropagationConfig, StateVectors, Vec2};

/// The gravitating parameters an orbit needs from its center.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Center {
    id: BodyId,
    mu: Num,
    boundaries: Boundaries,
}

impl Center {
    fn new(id: BodyId, body: &GravitatingBody) -> Self {
        Self {
            id,
            mu: body.mu(),
            boundaries: Boundaries {
                physical_radius: body.physical_radius(),
                sphere_of_influence: body.sphere_of_influence(),
            },
        }
    }
}

/// Conic orbit around a swappable center body, plus its sampled trajectory.
///
/// Elements and trajectory are replaced together by
/// [`OrbitPropagator::recalculate`], so readers never observe a trajectory
/// that belongs to other elements. Before the first successful
/// recalculation both are empty.
#[derive(Debug, Clone)]
pub struct OrbitPropagator {
    center: Center,
    config: PropagationConfig,
    trajectory: Trajectory,
}

impl OrbitPropagator {
    pub fn new(center: BodyId, body: &GravitatingBody, config: PropagationConfig) -> Self {
        Self {
            center: Center::new(center, body),
            config,
            trajectory: Trajectory::default(),
        }
    }

    /// Makes `body` the center of future recalculations. The current
    /// trajectory stays until the next [`Self::recalculate`].
    pub fn rebind(&mut self, center: BodyId, body: &GravitatingBody) {
        self.center = Center::new(center, body);
    }

    /// Derives a new orbit from position and velocity relative to the
    /// current center and samples it.
    ///
    /// On error nothing changes.
    pub fn recalculate(&mut self, position: Vec2, velocity: Vec2) -> Result<(), OrbitError> {
        let elements = StateVectors::new(position, velocity).to_elements(self.center.mu)?;
        let step = self.config.step_for(&elements);

        let trajectory = Trajectory::generate(
            elements,
            self.center.boundaries,
            step,
            self.config.max_samples,
        );

        debug!(
            "Recalculated {:?} around body {}: a = {}, e = {}, {} samples (step {step}), escape = {}, crash = {}",
            elements.conic(),
            self.center.id.0,
            elements.semi_major_axis,
            elements.eccentricity,
            trajectory.len(),
            trajectory.is_on_escape_path(),
            trajectory.is_on_crash_path(),
        );

        self.trajectory = trajectory;

        Ok(())
    }

    /// Rebinds to `body` and forgets the current trajectory and its flags.
    pub fn reset(&mut self, center: BodyId, body: &GravitatingBody) {
        self.rebind(center, body);
        self.trajectory = Trajectory::default();
    }

    pub fn center(&self) -> BodyId {
        self.center.id
    }

    pub fn center_mu(&self) -> Num {
        self.center.mu
    }

    pub fn config(&self) -> &PropagationConfig {
        &self.config
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    pub fn elements(&self) -> &OrbitalElements {
        self.trajectory.elements()
    }

    pub fn periapsis(&self) -> Vec2 {
        self.elements().periapsis()
    }

    pub fn apoapsis(&self) -> Option<Vec2> {
        self.elements().apoapsis()
    }

    pub fn eccentricity(&self) -> Num {
        self.elements().eccentricity
    }

    pub fn semi_major_axis(&self) -> Num {
        self.elements().semi_major_axis
    }

    pub fn is_on_escape_path(&self) -> bool {
        self.trajectory.is_on_escape_path()
    }

    pub fn is_on_crash_path(&self) -> bool {
        self.trajectory.is_on_crash_path()
    }
}
