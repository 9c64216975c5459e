//! Longitudinal force balance and the `dv/dt` right-hand side.

use regen_core::constants::{GRAVITY_M_S2, RATE_FLOOR_EPSILON_S};

use crate::braking::BrakingProfile;
use crate::vehicle::VehicleParameters;

/// Forces acting against the direction of travel at one instant (N).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBreakdown {
    pub drag_n: f64,
    pub rolling_n: f64,
    pub braking_n: f64,
    /// Along-slope gravity component; negative on a downgrade.
    pub grade_n: f64,
}

impl ForceBreakdown {
    pub fn total_n(&self) -> f64 {
        self.drag_n + self.rolling_n + self.braking_n + self.grade_n
    }
}

/// Evaluate the four opposing force terms at velocity `velocity_m_s` and time `time_s`.
pub fn resistive_forces<P>(
    velocity_m_s: f64,
    time_s: f64,
    params: &VehicleParameters,
    profile: &P,
) -> ForceBreakdown
where
    P: BrakingProfile + ?Sized,
{
    let weight_n = params.mass_kg * GRAVITY_M_S2;
    ForceBreakdown {
        drag_n: params.drag_factor() * velocity_m_s * velocity_m_s,
        rolling_n: params.rolling_resistance_coefficient * weight_n * params.grade_rad.cos(),
        braking_n: profile.force_n(time_s),
        grade_n: weight_n * params.grade_rad.sin(),
    }
}

/// Acceleration of the vehicle (m/s², negative while slowing down).
///
/// The raw value `-F_total / m` is floored at `-v / (t + ε)`, bounding the
/// rate of decrease to what would bring the velocity to zero by time `t`.
/// This is a heuristic guard against the integrator overshooting into
/// negative velocity, not a physical law. Near t = 0 the bound is very loose,
/// and for small `t` with `v` close to zero it can become stiff.
pub fn dv_dt<P>(velocity_m_s: f64, time_s: f64, params: &VehicleParameters, profile: &P) -> f64
where
    P: BrakingProfile + ?Sized,
{
    let forces = resistive_forces(velocity_m_s, time_s, params, profile);
    let raw = -forces.total_n() / params.mass_kg;
    raw.max(-velocity_m_s / (time_s + RATE_FLOOR_EPSILON_S))
}
