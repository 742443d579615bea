use approx::assert_relative_eq;
use patched_conics::{
    vec2, BodyId, BodySet, BurnDirection, Engine, GravitatingBody, Num, PropagationConfig,
    SimulationContext, Spacecraft, StateVectors, WarpLevel,
};

#[cfg(feature = "f64")]
const TOLERANCE: Num = 1e-9;
#[cfg(not(feature = "f64"))]
const TOLERANCE: Num = 1e-3;

fn star() -> BodySet {
    BodySet::new(GravitatingBody::new("star", 1.0, 0.05, 100.0).unwrap())
}

fn craft(bodies: &BodySet) -> Spacecraft {
    Spacecraft::new(
        BodyId::PRIMARY,
        StateVectors::new(vec2(1.0, 0.0), vec2(0.0, 1.0)),
        Engine::new(500.0, 500.0, 2.7, 1.0).unwrap(),
        bodies,
        PropagationConfig::default(),
    )
    .unwrap()
}

#[test]
fn full_prograde_burn_delivers_the_rocket_equation_budget() {
    let bodies = star();
    let ctx = SimulationContext::default();
    let mut craft = craft(&bodies);

    let budget = craft.remaining_delta_v();
    assert_relative_eq!(budget, 1.871, epsilon = 1e-3);

    craft.burn_prograde();

    let mut delivered = 0.0;
    let mut ticks = 0;
    while craft.burn().is_some() {
        let trajectory = craft.orbit().trajectory();
        let index = craft.trajectory_index() + trajectory.stride(0.01);
        let coasting = trajectory.state_at(index).unwrap();

        assert_eq!(craft.advance(0.01, &ctx, &bodies).unwrap(), None);

        delivered += (craft.velocity() - coasting.velocity).length();
        ticks += 1;
    }

    assert_eq!(ticks, 500);
    assert_relative_eq!(delivered, budget, epsilon = TOLERANCE);
    assert_eq!(craft.fuel_mass(), 0.0);
    assert_eq!(craft.remaining_delta_v(), 0.0);
    assert!(craft.orbit().is_on_escape_path());
}

#[test]
fn half_throttle_takes_twice_as_long() {
    let bodies = star();
    let ctx = SimulationContext::default();
    let mut craft = craft(&bodies);

    craft.set_throttle(0.5);
    craft.burn_radial_out();
    assert_eq!(craft.burn(), Some(BurnDirection::RadialOut));

    for _ in 0..10 {
        craft.advance(0.01, &ctx, &bodies).unwrap();
    }

    assert_relative_eq!(craft.fuel_mass(), 495.0, epsilon = TOLERANCE);
}

#[test]
fn warp_holds_the_burn_without_spending_fuel() {
    let bodies = star();
    let mut craft = craft(&bodies);
    let mut ctx = SimulationContext {
        warp: WarpLevel::X50,
        ..Default::default()
    };

    craft.burn_prograde();
    for _ in 0..10 {
        craft.advance(0.01, &ctx, &bodies).unwrap();
    }
    assert_eq!(craft.fuel_mass(), 500.0);

    ctx.warp = WarpLevel::RealTime;
    craft.advance(0.01, &ctx, &bodies).unwrap();

    assert_eq!(craft.fuel_mass(), 499.0);
}
