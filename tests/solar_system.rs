use approx::assert_relative_eq;
use chrono::NaiveDate;
use patched_conics::{Num, SimulationContext, SolarSystem, SystemConfig, WarpLevel};

#[cfg(feature = "f64")]
const TOLERANCE: Num = 1e-6;
#[cfg(not(feature = "f64"))]
const TOLERANCE: Num = 1e-3;

#[test]
fn default_scenario_runs_for_centuries_at_high_warp() {
    let mut system = SolarSystem::new(SystemConfig::default()).unwrap();
    let earth = system.bodies().find("earth").unwrap();
    let ctx = SimulationContext {
        warp: WarpLevel::X1000,
        ..Default::default()
    };

    for _ in 0..2_000 {
        assert_eq!(system.step(&ctx).unwrap(), None);
    }

    let craft = system.spacecraft();
    assert_eq!(craft.center(), earth);
    assert!(!craft.is_destroyed());
    assert_relative_eq!(craft.position().length(), 0.2, epsilon = TOLERANCE);

    let world = craft.world_position(system.bodies()).unwrap();
    let earth_position = system.bodies().world_position(earth).unwrap();
    assert_relative_eq!(world.distance(earth_position), 0.2, epsilon = TOLERANCE);

    let calendar = system.calendar();
    assert!(calendar.elapsed_days() > 365 * 100);
    assert!(calendar.date() > NaiveDate::from_ymd_opt(2124, 1, 1).unwrap());
}

#[test]
fn burning_out_of_low_orbit_reaches_the_sun() {
    let mut system = SolarSystem::new(SystemConfig::default()).unwrap();
    let earth = system.bodies().find("earth").unwrap();
    let ctx = SimulationContext::default();

    system.spacecraft_mut().burn_prograde();

    let mut escaped = false;
    for _ in 0..20_000 {
        if let Some(event) = system.tick(&ctx, 0.01).unwrap() {
            assert_eq!(
                event,
                patched_conics::FlightEvent::Escaped {
                    from: earth,
                    to: patched_conics::BodyId::PRIMARY
                }
            );
            escaped = true;
            break;
        }
    }

    assert!(escaped);
    assert!(system.spacecraft().fuel_mass() < 500.0);
}
