use log::info;

use crate::astro::sphere_of_influence;
use crate::{
    BodyId, BodySet, FlightEvent, GravitatingBody, Num, OrbitError, SimulationCalendar,
    Spacecraft, StaticOrbit, SystemConfig, Vec2, WarpLevel,
};

/// Per-tick inputs from whatever drives the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationContext {
    pub warp: WarpLevel,
    /// Pan applied by the renderer. The physics never reads it.
    pub camera_offset: Vec2,
    pub paused: bool,
}

/// The whole simulated system: a star, its planets, one spacecraft and the
/// calendar.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    config: SystemConfig,
    bodies: BodySet,
    spacecraft: Spacecraft,
    calendar: SimulationCalendar,
    calendar_reference: Option<BodyId>,
    elapsed_time: Num,
}

impl SolarSystem {
    pub fn new(config: SystemConfig) -> Result<Self, OrbitError> {
        config.propagation.validate()?;

        let star = &config.star;
        let mut bodies = BodySet::new(GravitatingBody::new(
            star.name.clone(),
            star.mu,
            star.radius,
            star.sphere_of_influence,
        )?);

        for planet in &config.planets {
            let soi = planet.sphere_of_influence.unwrap_or_else(|| {
                sphere_of_influence(planet.semi_major_axis, planet.mu, star.mu)
            });

            let orbit = StaticOrbit::new(
                planet.semi_major_axis,
                planet.eccentricity,
                planet.argument_of_periapsis,
                planet.true_anomaly,
                star.mu,
                config.propagation.planet_max_anomaly_step,
            )?;

            let body = GravitatingBody::new(planet.name.clone(), planet.mu, planet.radius, soi)?
                .with_static_orbit(BodyId::PRIMARY, orbit);

            bodies.add(body)?;
        }

        let spacecraft =
            Spacecraft::from_config(&config.spacecraft, &bodies, config.propagation.clone())?;

        let calendar_reference = match &config.calendar.reference_planet {
            Some(name) => Some(bodies.find(name).ok_or_else(|| {
                OrbitError::InvalidBody(format!("no calendar reference planet named {name}"))
            })?),
            None => bodies.children(BodyId::PRIMARY).next().map(|(id, _)| id),
        };

        let calendar = SimulationCalendar::new(config.calendar.start);

        info!(
            "Created system around {} with {} planet(s), spacecraft orbiting {}",
            star.name,
            config.planets.len(),
            config.spacecraft.center
        );

        Ok(Self {
            config,
            bodies,
            spacecraft,
            calendar,
            calendar_reference,
            elapsed_time: 0.0,
        })
    }

    /// Advances everything by `dt` at the context's warp: planets first, so
    /// the spacecraft sees this tick's body positions, then the spacecraft,
    /// then the calendar.
    pub fn tick(
        &mut self,
        ctx: &SimulationContext,
        dt: Num,
    ) -> Result<Option<FlightEvent>, OrbitError> {
        if ctx.paused {
            return Ok(None);
        }

        let scaled = dt * ctx.warp.multiplier() as Num;

        self.bodies.advance(scaled);
        self.elapsed_time += scaled;

        let event = self.spacecraft.advance(dt, ctx, &self.bodies)?;

        if let Some(orbit) = self
            .calendar_reference
            .and_then(|id| self.bodies.get(id).ok())
            .and_then(|body| body.static_orbit())
        {
            self.calendar.update(orbit.swept_anomaly());
        }

        Ok(event)
    }

    /// One tick of the configured duration.
    pub fn step(&mut self, ctx: &SimulationContext) -> Result<Option<FlightEvent>, OrbitError> {
        self.tick(ctx, self.config.tick_duration)
    }

    pub fn reset(&mut self) -> Result<(), OrbitError> {
        self.bodies.reset();
        self.spacecraft.reset(&self.bodies)?;
        self.calendar.reset();
        self.elapsed_time = 0.0;

        info!("System reset");

        Ok(())
    }

    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    pub fn bodies(&self) -> &BodySet {
        &self.bodies
    }

    pub fn spacecraft(&self) -> &Spacecraft {
        &self.spacecraft
    }

    /// Mutable access for burn and throttle commands.
    pub fn spacecraft_mut(&mut self) -> &mut Spacecraft {
        &mut self.spacecraft
    }

    pub fn calendar(&self) -> &SimulationCalendar {
        &self.calendar
    }

    /// Simulated time since creation or the last reset, warp included.
    pub fn elapsed_time(&self) -> Num {
        self.elapsed_time
    }
}
