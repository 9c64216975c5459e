use approx::assert_relative_eq;
use regen_brake_calculator::dynamics::{
    ConstantForce, IntegrationError, IntegratorSettings, LinearRamp, VehicleParameters,
};
use regen_brake_calculator::recovery::{EfficiencyCurve, kinetic_energy_j, trapezoid};
use regen_brake_calculator::sweep::sweep_peak_force;
use regen_brake_calculator::{EnergyResult, SimulationError, simulate, simulate_with_settings};

const MASS_KG: f64 = 1000.0;
const V0_M_S: f64 = 20.0;
const PEAK_FORCE_N: f64 = 3000.0;
const T_MAX_S: f64 = 10.0;
const POINTS: usize = 1000;

fn reference_vehicle() -> VehicleParameters {
    VehicleParameters::new(MASS_KG, 0.3, 2.2)
}

fn reference_run() -> EnergyResult {
    simulate(
        &reference_vehicle(),
        V0_M_S,
        &LinearRamp::new(PEAK_FORCE_N, T_MAX_S),
        &EfficiencyCurve::default(),
        T_MAX_S,
        POINTS,
    )
    .expect("reference scenario simulates")
}

fn parameter_of(err: SimulationError) -> &'static str {
    match err {
        SimulationError::InvalidParameter { parameter, .. } => parameter,
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[test]
fn reference_scenario_slows_the_vehicle_and_recovers_bounded_energy() {
    let result = reference_run();
    let velocity = &result.trajectory.velocity_m_s;

    assert_eq!(result.grid.len(), POINTS);
    assert_eq!(velocity.len(), POINTS);
    assert_eq!(result.trajectory.power_w.len(), POINTS);
    assert_eq!(result.trajectory.efficiency.len(), POINTS);
    assert_eq!(result.trajectory.braking_force_n.len(), POINTS);

    assert_eq!(velocity[0], V0_M_S);
    assert!(result.final_velocity_m_s() < V0_M_S);
    assert!(velocity.iter().all(|&v| v >= 0.0), "velocity went negative");

    let energy = result.total_energy_j;
    assert!(energy.is_finite() && energy > 0.0, "energy = {energy}");
    assert!(energy <= kinetic_energy_j(MASS_KG, V0_M_S), "energy = {energy}");
}

#[test]
fn reference_scenario_velocity_is_non_increasing() {
    let result = reference_run();
    for pair in result.trajectory.velocity_m_s.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "{} -> {}", pair[0], pair[1]);
    }
}

#[test]
fn power_series_is_never_negative() {
    let params = reference_vehicle().with_grade_degrees(-6.0);
    let result = simulate(
        &params,
        30.0,
        &LinearRamp::new(4500.0, 8.0),
        &EfficiencyCurve::new(0.002, -0.3, 0.1),
        8.0,
        400,
    )
    .expect("downhill run");
    assert!(result.trajectory.power_w.iter().all(|&p| p >= 0.0));
}

#[test]
fn total_energy_is_trapezoid_of_power_series() {
    let result = reference_run();
    let expected = trapezoid(result.grid.samples(), &result.trajectory.power_w);
    assert_relative_eq!(result.total_energy_j, expected, max_relative = 1e-12);
}

#[test]
fn coasting_on_flat_road_never_speeds_up() {
    let result = simulate(
        &reference_vehicle(),
        V0_M_S,
        &|_t: f64| 0.0,
        &EfficiencyCurve::default(),
        T_MAX_S,
        POINTS,
    )
    .expect("coasting run");
    for pair in result.trajectory.velocity_m_s.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-12, "{} -> {}", pair[0], pair[1]);
    }
    assert!(result.final_velocity_m_s() < V0_M_S);
}

#[test]
fn zero_braking_force_recovers_zero_energy() {
    let params = VehicleParameters::new(2200.0, 0.35, 2.8)
        .with_rolling_resistance(0.02)
        .with_grade_degrees(2.0);
    let result = simulate(
        &params,
        27.0,
        &LinearRamp::new(0.0, 12.0),
        &EfficiencyCurve::new(-0.001, 0.05, 0.5),
        12.0,
        250,
    )
    .expect("zero-force run");
    assert_eq!(result.total_energy_j, 0.0);
    assert!(result.trajectory.power_w.iter().all(|&p| p == 0.0));
}

#[test]
fn two_point_grid_still_produces_a_result() {
    let result = simulate(
        &reference_vehicle(),
        V0_M_S,
        &LinearRamp::new(PEAK_FORCE_N, T_MAX_S),
        &EfficiencyCurve::default(),
        T_MAX_S,
        2,
    )
    .expect("minimal grid");
    assert_eq!(result.grid.samples(), &[0.0, T_MAX_S]);
    assert!(result.total_energy_j.is_finite());
    // Force is zero at the horizon, so only the t = 0 sample contributes.
    let p0 = EfficiencyCurve::default().evaluate(V0_M_S) * PEAK_FORCE_N * V0_M_S;
    assert_relative_eq!(result.total_energy_j, 0.5 * p0 * T_MAX_S, max_relative = 1e-12);
}

#[test]
fn identical_inputs_give_identical_outputs() {
    assert_eq!(reference_run(), reference_run());
}

#[test]
fn invalid_parameters_are_rejected_before_integration() {
    let ramp = LinearRamp::new(PEAK_FORCE_N, T_MAX_S);
    let curve = EfficiencyCurve::default();

    let massless = VehicleParameters::new(0.0, 0.3, 2.2);
    let err = simulate(&massless, V0_M_S, &ramp, &curve, T_MAX_S, POINTS).unwrap_err();
    assert_eq!(parameter_of(err), "mass");

    let nan_mass = VehicleParameters::new(f64::NAN, 0.3, 2.2);
    let err = simulate(&nan_mass, V0_M_S, &ramp, &curve, T_MAX_S, POINTS).unwrap_err();
    assert_eq!(parameter_of(err), "mass");

    let params = reference_vehicle();
    let err = simulate(&params, V0_M_S, &ramp, &curve, 0.0, POINTS).unwrap_err();
    assert_eq!(parameter_of(err), "t_max");

    let err = simulate(&params, V0_M_S, &ramp, &curve, -3.0, POINTS).unwrap_err();
    assert_eq!(parameter_of(err), "t_max");

    let err = simulate(&params, V0_M_S, &ramp, &curve, T_MAX_S, 1).unwrap_err();
    assert_eq!(parameter_of(err), "t_points");

    let err = simulate(&params, -1.0, &ramp, &curve, T_MAX_S, POINTS).unwrap_err();
    assert_eq!(parameter_of(err), "v0");
}

#[test]
fn integrator_failure_aborts_the_run() {
    let settings = IntegratorSettings {
        max_steps: 3,
        ..IntegratorSettings::default()
    };
    let err = simulate_with_settings(
        &reference_vehicle(),
        V0_M_S,
        &LinearRamp::new(PEAK_FORCE_N, T_MAX_S),
        &EfficiencyCurve::default(),
        T_MAX_S,
        POINTS,
        &settings,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SimulationError::Integration(IntegrationError::StepLimitExceeded { .. })
    ));
}

#[test]
fn sweep_matches_individual_runs_in_input_order() {
    let params = reference_vehicle();
    let curve = EfficiencyCurve::default();
    let forces = [3000.0, 0.0, 1500.0];
    let points = sweep_peak_force(&params, V0_M_S, &forces, &curve, T_MAX_S, 200)
        .expect("sweep runs");

    assert_eq!(points.len(), forces.len());
    for (point, &force) in points.iter().zip(&forces) {
        let single = simulate(
            &params,
            V0_M_S,
            &LinearRamp::new(force, T_MAX_S),
            &curve,
            T_MAX_S,
            200,
        )
        .expect("single run");
        assert_eq!(point.peak_force_n, force);
        assert_eq!(point.total_energy_j, single.total_energy_j);
        assert_eq!(point.final_velocity_m_s, single.final_velocity_m_s());
    }
    assert_eq!(points[1].total_energy_j, 0.0);
}

#[test]
fn sweep_surfaces_validation_errors() {
    let params = VehicleParameters::new(-5.0, 0.3, 2.2);
    let err = sweep_peak_force(
        &params,
        V0_M_S,
        &[1000.0, 2000.0],
        &EfficiencyCurve::default(),
        T_MAX_S,
        100,
    )
    .unwrap_err();
    assert_eq!(parameter_of(err), "mass");
}

#[test]
fn sweep_handles_long_force_lists() {
    let params = reference_vehicle();
    let forces: Vec<f64> = (0..5_000).map(f64::from).collect();
    let points = sweep_peak_force(
        &params,
        V0_M_S,
        &forces,
        &EfficiencyCurve::default(),
        T_MAX_S,
        20,
    )
    .expect("long sweep runs");

    assert_eq!(points.len(), forces.len());
    for (point, &force) in points.iter().zip(&forces) {
        assert_eq!(point.peak_force_n, force);
        assert!(point.total_energy_j.is_finite());
    }
}

#[test]
fn over_braking_is_held_by_the_deceleration_floor() {
    // 20 kN on one tonne would stop the car from 5 m/s in about 0.25 s.
    let result = simulate(
        &reference_vehicle(),
        5.0,
        &ConstantForce { force_n: 20_000.0 },
        &EfficiencyCurve::default(),
        T_MAX_S,
        POINTS,
    )
    .expect("over-braking run simulates");

    let velocity = &result.trajectory.velocity_m_s;
    assert!(velocity.iter().all(|v| v.is_finite() && *v >= 0.0));
    assert!(velocity.windows(2).all(|w| w[1] <= w[0]));
    assert!(result.final_velocity_m_s() > 0.0);
    assert!(result.final_velocity_m_s() < 0.1);
    assert!(result.total_energy_j.is_finite());
    assert!(result.total_energy_j > 0.0);
}

#[test]
fn samples_stop_at_the_shortest_series() {
    let mut result = reference_run();
    assert_eq!(result.samples().count(), POINTS);

    result.trajectory.power_w.truncate(10);
    let samples: Vec<_> = result.samples().collect();
    assert_eq!(samples.len(), 10);
    assert_eq!(samples[9].velocity_m_s, result.trajectory.velocity_m_s[9]);
}
