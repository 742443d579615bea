use log::{debug, info, warn};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::astro::circular_speed;
use crate::elements::Rotation;
use crate::{
    BodyId, BodySet, Capabilities, Engine, GravitatingBody, Num, OrbitError, OrbitPropagator,
    Polar, PropagationConfig, SimulationContext, SpacecraftConfig, StateVectors, Vec2, HALF_PI,
    PI,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BurnDirection {
    Prograde,
    Retrograde,
    RadialIn,
    RadialOut,
}

impl BurnDirection {
    /// Thrust angle relative to the velocity vector. Radial burns depend on
    /// the rotation direction so that `RadialOut` always points away from
    /// the center.
    pub fn offset(self, rotation: Rotation) -> Num {
        match self {
            BurnDirection::Prograde => 0.0,
            BurnDirection::Retrograde => PI,
            BurnDirection::RadialOut => -rotation.signum() * HALF_PI,
            BurnDirection::RadialIn => rotation.signum() * HALF_PI,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DestructionCause {
    /// Hit the surface of the body it was orbiting
    Impact,
    /// Left the sphere of influence of the primary
    LostInSpace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FlightEvent {
    Escaped { from: BodyId, to: BodyId },
    Captured { from: BodyId, to: BodyId },
    /// Terminal. The craft stays frozen until [`Spacecraft::reset`].
    Destroyed(DestructionCause),
}

/// A body that follows a patched-conic trajectory and carries an engine.
///
/// Every tick it walks its precomputed trajectory, switches reference frame
/// at sphere of influence boundaries and applies engine burns. Anything that
/// changes its velocity re-derives the orbit and restarts at sample 0.
#[derive(Debug, Clone)]
pub struct Spacecraft {
    orbit: OrbitPropagator,
    engine: Engine,
    trajectory_index: usize,
    state: StateVectors,
    burn: Option<BurnDirection>,
    thrust_direction: Option<Num>,
    destroyed: Option<DestructionCause>,
    start_center: BodyId,
    start_state: StateVectors,
}

impl Spacecraft {
    /// Places the craft at `state` relative to `center`.
    pub fn new(
        center: BodyId,
        state: StateVectors,
        engine: Engine,
        bodies: &BodySet,
        config: PropagationConfig,
    ) -> Result<Self, OrbitError> {
        config.validate()?;
        let body = bodies.get(center)?;

        let mut orbit = OrbitPropagator::new(center, body, config);
        orbit.recalculate(state.position, state.velocity)?;

        Ok(Self {
            orbit,
            engine,
            trajectory_index: 0,
            state,
            burn: None,
            thrust_direction: None,
            destroyed: None,
            start_center: center,
            start_state: state,
        })
    }

    /// Starts on a circular orbit around the configured body.
    pub fn from_config(
        config: &SpacecraftConfig,
        bodies: &BodySet,
        propagation: PropagationConfig,
    ) -> Result<Self, OrbitError> {
        let center = bodies.find(&config.center).ok_or_else(|| {
            OrbitError::InvalidBody(format!("no body named {}", config.center))
        })?;
        let mu = bodies.get(center)?.mu();

        let speed = circular_speed(config.altitude, mu);
        let heading = config.angle + config.direction.signum() * HALF_PI;

        let state = StateVectors::new(
            Vec2::from_polar(config.altitude, config.angle),
            Vec2::from_polar(speed, heading),
        );

        let engine = Engine::new(
            config.dry_mass,
            config.fuel_mass,
            config.exhaust_velocity,
            config.max_mass_flow,
        )?;

        let mut spacecraft = Self::new(center, state, engine, bodies, propagation)?;
        spacecraft.engine.set_throttle(config.throttle);

        Ok(spacecraft)
    }

    /// Moves the craft one tick of `dt` simulated time at the context's warp.
    ///
    /// Returns the frame switch or destruction that happened during the
    /// tick, if any. Errors mean a state vector could not be turned into an
    /// orbit; the craft is left as it was before the failed switch or burn.
    pub fn advance(
        &mut self,
        dt: Num,
        ctx: &SimulationContext,
        bodies: &BodySet,
    ) -> Result<Option<FlightEvent>, OrbitError> {
        if self.destroyed.is_some() || self.orbit.trajectory().is_empty() {
            return Ok(None);
        }

        let center = self.orbit.center();
        let trajectory = self.orbit.trajectory();
        let len = trajectory.len();
        let escape = trajectory.is_on_escape_path();
        let crash = trajectory.is_on_crash_path();

        self.trajectory_index += trajectory.stride(dt) * ctx.warp.multiplier() as usize;

        // Closed orbits repeat
        if !escape && !crash && self.trajectory_index >= len {
            self.trajectory_index %= len;
        }

        // Leave at the first sample past the boundary. A burning craft
        // restarts at sample 0 every tick and never runs off the end.
        let body = bodies.get(center)?;
        let outside = self
            .orbit
            .trajectory()
            .samples()
            .get(self.trajectory_index)
            .map_or(true, |s| s.distance > body.sphere_of_influence());

        if escape && outside {
            return match body.parent() {
                Some(parent) => self.escape(center, parent, bodies).map(Some),
                None => Ok(Some(self.destroy(DestructionCause::LostInSpace))),
            };
        }

        if let Some(event) = self.try_capture(center, bodies)? {
            return Ok(Some(event));
        }

        let Some(sample) = self.orbit.trajectory().samples().get(self.trajectory_index).copied()
        else {
            let cause = if crash {
                DestructionCause::Impact
            } else {
                DestructionCause::LostInSpace
            };
            return Ok(Some(self.destroy(cause)));
        };

        if crash && sample.distance < bodies.get(center)?.physical_radius() {
            return Ok(Some(self.destroy(DestructionCause::Impact)));
        }

        if let Some(state) = self.orbit.trajectory().state_at(self.trajectory_index) {
            self.state = state;
        }

        self.apply_burn(ctx)?;

        Ok(None)
    }

    fn escape(
        &mut self,
        from: BodyId,
        to: BodyId,
        bodies: &BodySet,
    ) -> Result<FlightEvent, OrbitError> {
        let body = bodies.get(from)?;
        let last = self.orbit.trajectory().len() - 1;
        let exit = self
            .orbit
            .trajectory()
            .state_at(self.trajectory_index.min(last))
            .unwrap_or(self.state);

        let state = exit.to_parent_frame(body.state_vectors());

        self.transfer(to, bodies.get(to)?, state)?;

        info!(
            "Spacecraft is leaving the sphere of influence of {}, now orbiting {}",
            body.name(),
            bodies.get(to)?.name()
        );

        Ok(FlightEvent::Escaped { from, to })
    }

    fn try_capture(
        &mut self,
        center: BodyId,
        bodies: &BodySet,
    ) -> Result<Option<FlightEvent>, OrbitError> {
        let trajectory = self.orbit.trajectory();
        let index = self.trajectory_index.min(trajectory.len() - 1);
        let current = trajectory.state_at(index).unwrap_or(self.state);
        let fraction = self.orbit.config().capture_soi_fraction;

        for (id, body) in bodies.children(center) {
            let relative = current.relative_to(body.state_vectors());

            if relative.position.length() < fraction * body.sphere_of_influence() {
                self.transfer(id, body, relative)?;

                info!("Spacecraft is entering the sphere of influence of {}", body.name());

                return Ok(Some(FlightEvent::Captured { from: center, to: id }));
            }
        }

        Ok(None)
    }

    /// Rebinds to `body` and re-derives the orbit from `state`, restoring the
    /// old center if that fails.
    fn transfer(
        &mut self,
        id: BodyId,
        body: &GravitatingBody,
        state: StateVectors,
    ) -> Result<(), OrbitError> {
        let previous = self.orbit.clone();

        self.orbit.rebind(id, body);
        if let Err(err) = self.orbit.recalculate(state.position, state.velocity) {
            self.orbit = previous;
            return Err(err);
        }

        self.state = state;
        self.trajectory_index = 0;

        Ok(())
    }

    fn apply_burn(&mut self, ctx: &SimulationContext) -> Result<(), OrbitError> {
        let Some(direction) = self.burn else {
            return Ok(());
        };

        if !self.engine.has_fuel() {
            info!("Spacecraft is out of fuel");
            self.end_burn();
            return Ok(());
        }

        if !ctx.warp.allows_burns() {
            debug!("Burn ignored at warp {:?}", ctx.warp);
            return Ok(());
        }

        let mut engine = self.engine.clone();
        let Some(delta_v) = engine.fire() else {
            return Ok(());
        };

        let angle =
            self.state.velocity.polar_angle() + direction.offset(self.orbit.elements().direction());
        let velocity = self.state.velocity + Vec2::from_polar(delta_v, angle);

        self.orbit.recalculate(self.state.position, velocity)?;

        self.engine = engine;
        self.state.velocity = velocity;
        self.trajectory_index = 0;
        self.thrust_direction = Some(angle);

        if !self.engine.has_fuel() {
            info!("Spacecraft is out of fuel");
            self.end_burn();
        }

        Ok(())
    }

    fn destroy(&mut self, cause: DestructionCause) -> FlightEvent {
        match cause {
            DestructionCause::Impact => warn!("Spacecraft crashed into body {}", self.orbit.center().0),
            DestructionCause::LostInSpace => warn!("Spacecraft left the system"),
        }

        self.destroyed = Some(cause);
        self.end_burn();

        FlightEvent::Destroyed(cause)
    }

    /// Puts the craft back on its starting orbit with a full tank.
    pub fn reset(&mut self, bodies: &BodySet) -> Result<(), OrbitError> {
        let body = bodies.get(self.start_center)?;

        self.orbit.reset(self.start_center, body);
        self.orbit
            .recalculate(self.start_state.position, self.start_state.velocity)?;

        self.engine.reset();
        self.state = self.start_state;
        self.trajectory_index = 0;
        self.burn = None;
        self.thrust_direction = None;
        self.destroyed = None;

        info!("Spacecraft reset");

        Ok(())
    }

    fn command_burn(&mut self, direction: BurnDirection) {
        if self.engine.has_fuel() && self.destroyed.is_none() {
            self.burn = Some(direction);
        }
    }

    pub fn burn_prograde(&mut self) {
        self.command_burn(BurnDirection::Prograde);
    }

    pub fn burn_retrograde(&mut self) {
        self.command_burn(BurnDirection::Retrograde);
    }

    pub fn burn_radial_in(&mut self) {
        self.command_burn(BurnDirection::RadialIn);
    }

    pub fn burn_radial_out(&mut self) {
        self.command_burn(BurnDirection::RadialOut);
    }

    pub fn end_burn(&mut self) {
        self.burn = None;
        self.thrust_direction = None;
    }

    pub fn set_throttle(&mut self, fraction: Num) {
        self.engine.set_throttle(fraction);
    }

    pub fn throttle_up(&mut self) {
        self.engine.throttle_up();
    }

    pub fn throttle_down(&mut self) {
        self.engine.throttle_down();
    }

    /// Position relative to [`Self::center`].
    pub fn position(&self) -> Vec2 {
        self.state.position
    }

    /// Velocity relative to [`Self::center`].
    pub fn velocity(&self) -> Vec2 {
        self.state.velocity
    }

    pub fn state_vectors(&self) -> &StateVectors {
        &self.state
    }

    pub fn world_position(&self, bodies: &BodySet) -> Result<Vec2, OrbitError> {
        Ok(bodies.world_position(self.center())? + self.state.position)
    }

    /// Height above the surface of the center body.
    pub fn altitude(&self, bodies: &BodySet) -> Result<Num, OrbitError> {
        Ok(self.state.position.length() - bodies.get(self.center())?.physical_radius())
    }

    pub fn speed(&self) -> Num {
        self.state.velocity.length()
    }

    pub fn fuel_mass(&self) -> Num {
        self.engine.fuel_mass()
    }

    pub fn remaining_delta_v(&self) -> Num {
        self.engine.remaining_delta_v()
    }

    pub fn throttle(&self) -> Num {
        self.engine.throttle()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn burn(&self) -> Option<BurnDirection> {
        self.burn
    }

    /// Angle of the last applied thrust while a burn is active.
    pub fn thrust_direction(&self) -> Option<Num> {
        self.thrust_direction
    }

    pub fn center(&self) -> BodyId {
        self.orbit.center()
    }

    pub fn orbit(&self) -> &OrbitPropagator {
        &self.orbit
    }

    pub fn trajectory_index(&self) -> usize {
        self.trajectory_index
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.is_some()
    }

    pub fn destruction(&self) -> Option<DestructionCause> {
        self.destroyed
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            has_engine: true,
            has_static_orbit: false,
        }
    }
}
