//! Peak-braking-force sweeps built on independent `simulate` calls.

use rayon::prelude::*;
use regen_dynamics::{LinearRamp, VehicleParameters};
use regen_recovery::EfficiencyCurve;

use crate::simulation::{SimulationError, simulate};

/// Recovered energy for one peak braking force.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    pub peak_force_n: f64,
    pub total_energy_j: f64,
    pub final_velocity_m_s: f64,
}

/// Run one linear-ramp simulation per entry of `peak_forces_n`.
///
/// Runs are independent and spread over the rayon thread pool; results come
/// back in input order. The first failing run (in input order) is returned.
pub fn sweep_peak_force(
    params: &VehicleParameters,
    v0: f64,
    peak_forces_n: &[f64],
    curve: &EfficiencyCurve,
    t_max: f64,
    t_points: usize,
) -> Result<Vec<SweepPoint>, SimulationError> {
    peak_forces_n
        .par_iter()
        .map(|&peak_force_n| -> Result<SweepPoint, SimulationError> {
            let ramp = LinearRamp::new(peak_force_n, t_max);
            let result = simulate(params, v0, &ramp, curve, t_max, t_points)?;
            Ok(SweepPoint {
                peak_force_n,
                total_energy_j: result.total_energy_j,
                final_velocity_m_s: result.final_velocity_m_s(),
            })
        })
        .collect()
}
