//! Recovered power series and its time integral.

use regen_dynamics::BrakingProfile;

use crate::efficiency::EfficiencyCurve;

/// Per-sample values derived along a velocity trajectory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerSeries {
    pub braking_force_n: Vec<f64>,
    pub efficiency: Vec<f64>,
    pub power_w: Vec<f64>,
    /// Trapezoidal integral of `power_w` over the sample times (J).
    pub total_energy_j: f64,
}

/// Combine velocities, braking force, and efficiency into recovered power and energy.
///
/// Power is `η(v)·F(t)·v`, floored at zero: a recovery system cannot draw
/// power, so a negative product (only possible with negative velocity) counts
/// as nothing recovered. `times` and `velocities` are parallel slices.
pub fn accumulate<P>(
    times: &[f64],
    velocities: &[f64],
    profile: &P,
    curve: &EfficiencyCurve,
) -> PowerSeries
where
    P: BrakingProfile + ?Sized,
{
    debug_assert_eq!(times.len(), velocities.len());

    let mut series = PowerSeries {
        braking_force_n: Vec::with_capacity(times.len()),
        efficiency: Vec::with_capacity(times.len()),
        power_w: Vec::with_capacity(times.len()),
        total_energy_j: 0.0,
    };

    for (&t, &v) in times.iter().zip(velocities) {
        let eta = curve.evaluate(v);
        let force = profile.force_n(t);
        series.efficiency.push(eta);
        series.braking_force_n.push(force);
        series.power_w.push((eta * force * v).max(0.0));
    }

    series.total_energy_j = trapezoid(times, &series.power_w);
    series
}

/// Trapezoidal integral of `values` sampled at `times`.
pub fn trapezoid(times: &[f64], values: &[f64]) -> f64 {
    times
        .windows(2)
        .zip(values.windows(2))
        .map(|(t, y)| 0.5 * (y[0] + y[1]) * (t[1] - t[0]))
        .sum()
}

/// Translational kinetic energy `½·m·v²` (J).
pub fn kinetic_energy_j(mass_kg: f64, velocity_m_s: f64) -> f64 {
    0.5 * mass_kg * velocity_m_s * velocity_m_s
}
