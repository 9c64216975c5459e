//! Plain-text run report.

use regen_core::units::{j_to_kj, ms_to_kmh, w_to_kw};
use regen_export::summary::{Coefficients, RunSummary};
use regen_recovery::kinetic_energy_j;

use crate::scenario::Scenario;
use crate::simulation::EnergyResult;

/// Render a human-readable summary of a run.
///
/// When `mass_kg` is given the report also compares the recovered energy
/// with the kinetic energy at the start of the run.
pub fn render_summary(result: &EnergyResult, mass_kg: Option<f64>) -> String {
    let v0 = result.initial_velocity_m_s();
    let v_end = result.final_velocity_m_s();

    let mut out = format!(
        "=== Regenerative Braking ===\n\
         Recovered energy : {:.2} J ({:.1} kJ)\n\
         Peak power       : {:.1} kW\n\
         Velocity         : {:.2} m/s ({:.1} km/h) -> {:.2} m/s ({:.1} km/h) over {:.1} s\n",
        result.total_energy_j,
        result.energy_kj(),
        w_to_kw(result.peak_power_w()),
        v0,
        ms_to_kmh(v0),
        v_end,
        ms_to_kmh(v_end),
        result.grid.horizon_s()
    );

    if let Some(mass) = mass_kg {
        let initial = kinetic_energy_j(mass, v0);
        if initial > 0.0 {
            out.push_str(&format!(
                "Recovery ratio   : {:.1}% of initial kinetic energy ({:.1} kJ)\n",
                100.0 * result.total_energy_j / initial,
                j_to_kj(initial)
            ));
        }
    }

    out.push_str(&format!(
        "Time grid        : {} samples, dt = {:.4} s\n\
         Integrator       : {} accepted / {} rejected steps\n",
        result.grid.len(),
        result.grid.spacing_s(),
        result.stats.accepted_steps,
        result.stats.rejected_steps
    ));
    out
}

/// Trajectory rows for the CSV exporter.
pub fn trajectory_records(
    result: &EnergyResult,
) -> impl Iterator<Item = regen_export::trajectory::Record> + '_ {
    result
        .samples()
        .map(|s| regen_export::trajectory::Record {
            time_s: s.time_s,
            velocity_m_s: s.velocity_m_s,
            braking_force_n: s.braking_force_n,
            efficiency: s.efficiency,
            power_w: s.power_w,
        })
}

/// JSON summary of a scenario run.
pub fn run_summary<'a>(result: &EnergyResult, scenario: &'a Scenario) -> RunSummary<'a> {
    let mass_kg = scenario.vehicle.mass_kg;
    let initial_kinetic_energy_j = kinetic_energy_j(mass_kg, result.initial_velocity_m_s());
    let recovery_ratio = if initial_kinetic_energy_j > 0.0 {
        result.total_energy_j / initial_kinetic_energy_j
    } else {
        0.0
    };

    RunSummary {
        scenario: scenario.name.as_deref(),
        mass_kg,
        initial_velocity_m_s: result.initial_velocity_m_s(),
        final_velocity_m_s: result.final_velocity_m_s(),
        horizon_s: result.grid.horizon_s(),
        points: result.grid.len(),
        total_energy_j: result.total_energy_j,
        total_energy_kj: result.energy_kj(),
        peak_power_w: result.peak_power_w(),
        initial_kinetic_energy_j,
        recovery_ratio,
        efficiency: Coefficients {
            a: scenario.efficiency.a,
            b: scenario.efficiency.b,
            c: scenario.efficiency.c,
        },
        accepted_steps: result.stats.accepted_steps,
        rejected_steps: result.stats.rejected_steps,
    }
}
