use approx::assert_relative_eq;
use regen_brake_calculator::recovery::{EfficiencyCurve, accumulate, kinetic_energy_j, trapezoid};

#[test]
fn efficiency_stays_in_unit_interval_for_any_velocity() {
    let curves = [
        EfficiencyCurve::default(),
        EfficiencyCurve::new(0.01, 0.5, 0.9),
        EfficiencyCurve::new(-1.0, 0.0, -3.0),
        EfficiencyCurve::new(0.0, -0.2, 0.4),
    ];
    let mut velocities: Vec<f64> = (-2000..=2000).map(|i| i as f64 * 50.0).collect();
    velocities.extend([-1.0e6, -0.001, 0.0, 0.001, 1.0e6, 1.0e12]);

    for curve in &curves {
        for &v in &velocities {
            let eta = curve.evaluate(v);
            assert!((0.0..=1.0).contains(&eta), "η({v}) = {eta} for {curve:?}");
        }
    }
}

#[test]
fn default_curve_values_inside_calibrated_range() {
    let curve = EfficiencyCurve::default();
    assert_relative_eq!(curve.evaluate(0.0), 0.2);
    assert_relative_eq!(curve.evaluate(10.0), 0.7, max_relative = 1e-12);
    assert_relative_eq!(curve.evaluate(20.0), 0.2, max_relative = 1e-12);
    assert_eq!(curve.evaluate(40.0), 0.0);
}

#[test]
fn peak_velocity_only_for_downward_parabola() {
    assert_relative_eq!(
        EfficiencyCurve::default().peak_velocity_m_s().expect("peak"),
        10.0
    );
    assert!(EfficiencyCurve::new(0.01, 0.1, 0.2).peak_velocity_m_s().is_none());
}

#[test]
fn trapezoid_integrates_piecewise_linear_data_exactly() {
    let times = [0.0, 1.0, 3.0];
    let values = [0.0, 2.0, 2.0];
    assert_relative_eq!(trapezoid(&times, &values), 5.0);
    assert_eq!(trapezoid(&[0.0], &[7.0]), 0.0);
}

#[test]
fn power_is_product_of_efficiency_force_and_velocity() {
    let times = [0.0, 1.0, 2.0];
    let velocities = [20.0, 15.0, 10.0];
    let curve = EfficiencyCurve::default();
    let series = accumulate(&times, &velocities, &|_t: f64| 1000.0, &curve);

    for (i, &v) in velocities.iter().enumerate() {
        assert_relative_eq!(series.efficiency[i], curve.evaluate(v));
        assert_eq!(series.braking_force_n[i], 1000.0);
        assert_relative_eq!(series.power_w[i], curve.evaluate(v) * 1000.0 * v);
    }
    assert_relative_eq!(
        series.total_energy_j,
        trapezoid(&times, &series.power_w),
        max_relative = 1e-12
    );
}

#[test]
fn negative_velocity_recovers_nothing() {
    let times = [0.0, 1.0];
    let velocities = [-1.0, -2.0];
    let series = accumulate(
        &times,
        &velocities,
        &|_t: f64| 100.0,
        &EfficiencyCurve::new(0.0, 0.0, 0.5),
    );
    assert!(series.power_w.iter().all(|&p| p == 0.0));
    assert_eq!(series.total_energy_j, 0.0);
}

#[test]
fn kinetic_energy_matches_half_m_v_squared() {
    assert_relative_eq!(kinetic_energy_j(1000.0, 20.0), 200_000.0);
}
