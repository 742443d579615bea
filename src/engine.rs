use crate::{Num, OrbitError};

/// Throttle settings per unit of throttle.
const THROTTLE_STEPS: u32 = 20;

/// Propellant tank and engine of a spacecraft.
///
/// Velocity changes follow the Tsiolkovsky rocket equation, one mass-flow
/// increment per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Engine {
    dry_mass: Num,
    fuel_mass: Num,
    initial_fuel_mass: Num,
    exhaust_velocity: Num,
    max_mass_flow: Num,
    throttle_steps: u32,
}

impl Engine {
    pub const THROTTLE_STEP: Num = 1.0 / THROTTLE_STEPS as Num;

    /// Requires `dry_mass > 0`, `fuel_mass >= 0`, `exhaust_velocity > 0` and
    /// `max_mass_flow >= 0`. A massless dry stage would make every Δv infinite.
    pub fn new(
        dry_mass: Num,
        fuel_mass: Num,
        exhaust_velocity: Num,
        max_mass_flow: Num,
    ) -> Result<Self, OrbitError> {
        let checks = [
            ("dry_mass", dry_mass, dry_mass > 0.0),
            ("fuel_mass", fuel_mass, fuel_mass >= 0.0),
            ("exhaust_velocity", exhaust_velocity, exhaust_velocity > 0.0),
            ("max_mass_flow", max_mass_flow, max_mass_flow >= 0.0),
        ];

        for (name, value, valid) in checks {
            // Comparisons with NaN are false, so NaN is rejected too
            if !valid || !value.is_finite() {
                return Err(OrbitError::InvalidConfig(format!("engine {name} = {value}")));
            }
        }

        Ok(Self {
            dry_mass,
            fuel_mass,
            initial_fuel_mass: fuel_mass,
            exhaust_velocity,
            max_mass_flow,
            throttle_steps: THROTTLE_STEPS,
        })
    }

    pub fn dry_mass(&self) -> Num {
        self.dry_mass
    }

    pub fn fuel_mass(&self) -> Num {
        self.fuel_mass
    }

    pub fn total_mass(&self) -> Num {
        self.dry_mass + self.fuel_mass
    }

    pub fn exhaust_velocity(&self) -> Num {
        self.exhaust_velocity
    }

    pub fn has_fuel(&self) -> bool {
        self.fuel_mass > 0.0
    }

    /// Δv left in the tank: `v_e · ln(m_wet / m_dry)`.
    pub fn remaining_delta_v(&self) -> Num {
        self.exhaust_velocity * (self.total_mass() / self.dry_mass).ln()
    }

    pub fn throttle(&self) -> Num {
        self.throttle_steps as Num * Self::THROTTLE_STEP
    }

    /// Snaps to the nearest throttle step inside `[0, 1]`.
    pub fn set_throttle(&mut self, fraction: Num) {
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        self.throttle_steps = (fraction * THROTTLE_STEPS as Num).round() as u32;
    }

    pub fn throttle_up(&mut self) {
        self.throttle_steps = (self.throttle_steps + 1).min(THROTTLE_STEPS);
    }

    pub fn throttle_down(&mut self) {
        self.throttle_steps = self.throttle_steps.saturating_sub(1);
    }

    /// Propellant burnt per tick at the current throttle.
    pub fn mass_flow(&self) -> Num {
        self.max_mass_flow * self.throttle()
    }

    /// Burns one tick of propellant and returns the Δv gained, or `None` when
    /// the tank is empty or the throttle closed. The last increment is
    /// limited to whatever fuel is left.
    pub fn fire(&mut self) -> Option<Num> {
        let flow = self.mass_flow().min(self.fuel_mass);
        if flow <= 0.0 {
            return None;
        }

        let mass = self.total_mass();
        let delta_v = self.exhaust_velocity * (mass / (mass - flow)).ln();

        self.fuel_mass = (self.fuel_mass - flow).max(0.0);

        Some(delta_v)
    }

    pub fn reset(&mut self) {
        self.fuel_mass = self.initial_fuel_mass;
        self.throttle_steps = THROTTLE_STEPS;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use test_case::test_case;

    use super::*;
    use crate::constants::tolerance::{LOOSE, TIGHT};

    fn engine() -> Engine {
        Engine::new(500.0, 500.0, 2.7, 1.0).unwrap()
    }

    #[test]
    fn full_tank_budget() {
        assert_relative_eq!(engine().remaining_delta_v(), 2.7 * (2.0 as Num).ln(), epsilon = TIGHT);
    }

    #[test]
    fn burning_everything_spends_the_whole_budget() {
        let mut engine = engine();
        let budget = engine.remaining_delta_v();

        let mut spent = 0.0;
        while let Some(increment) = engine.fire() {
            spent += increment;
        }

        assert_relative_eq!(spent, budget, epsilon = LOOSE);
        assert_relative_eq!(spent, 1.871, epsilon = 1e-3);
        assert_eq!(engine.fuel_mass(), 0.0);
        assert_eq!(engine.remaining_delta_v(), 0.0);
    }

    #[test]
    fn last_increment_is_limited_to_remaining_fuel() {
        let mut engine = Engine::new(10.0, 1.5, 1.0, 1.0).unwrap();

        assert!(engine.fire().is_some());
        let last = engine.fire().unwrap();

        assert_relative_eq!(last, (10.5 as Num / 10.0).ln(), epsilon = TIGHT);
        assert!(engine.fire().is_none());
    }

    #[test_case(0.0, 500.0, 2.7, 1.0 ; "massless dry stage")]
    #[test_case(-1.0, 500.0, 2.7, 1.0 ; "negative dry mass")]
    #[test_case(500.0, -1.0, 2.7, 1.0 ; "negative fuel")]
    #[test_case(500.0, 500.0, 0.0, 1.0 ; "no exhaust velocity")]
    #[test_case(500.0, 500.0, 2.7, -0.5 ; "negative mass flow")]
    #[test_case(Num::NAN, 500.0, 2.7, 1.0 ; "nan dry mass")]
    #[test_case(500.0, Num::INFINITY, 2.7, 1.0 ; "infinite fuel")]
    fn rejects_invalid_parameters(dry: Num, fuel: Num, exhaust: Num, flow: Num) {
        assert!(matches!(
            Engine::new(dry, fuel, exhaust, flow),
            Err(OrbitError::InvalidConfig(_))
        ));
    }

    #[test]
    fn empty_tank_and_zero_flow_are_valid() {
        let engine = Engine::new(500.0, 0.0, 2.7, 0.0).unwrap();

        assert!(!engine.has_fuel());
        assert_eq!(engine.remaining_delta_v(), 0.0);
    }

    #[test]
    fn closed_throttle_burns_nothing() {
        let mut engine = engine();
        engine.set_throttle(0.0);

        assert!(engine.fire().is_none());
        assert_eq!(engine.fuel_mass(), 500.0);
    }

    #[test_case(0.33, 0.35)]
    #[test_case(1.7, 1.0 ; "clamped high")]
    #[test_case(-0.2, 0.0 ; "clamped low")]
    #[test_case(Num::NAN, 0.0 ; "nan closes the throttle")]
    fn throttle_snaps_to_steps(requested: Num, expected: Num) {
        let mut engine = engine();
        engine.set_throttle(requested);

        assert_relative_eq!(engine.throttle(), expected, epsilon = TIGHT);
    }

    #[test]
    fn throttle_steps_saturate() {
        let mut engine = engine();

        engine.throttle_up();
        assert_relative_eq!(engine.throttle(), 1.0);

        for _ in 0..30 {
            engine.throttle_down();
        }
        assert_eq!(engine.throttle(), 0.0);

        engine.throttle_up();
        assert_relative_eq!(engine.throttle(), 0.05, epsilon = TIGHT);
    }

    #[test]
    fn reset_refuels() {
        let mut engine = engine();
        engine.set_throttle(0.5);
        engine.fire();

        engine.reset();

        assert_eq!(engine.fuel_mass(), 500.0);
        assert_eq!(engine.throttle(), 1.0);
    }
}
