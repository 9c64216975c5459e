//! The `simulate` pipeline: validate inputs, integrate the braking ODE, aggregate recovered energy.

use regen_core::grid::{GridError, TimeGrid};
use regen_core::units::j_to_kj;
use regen_dynamics::{
    BrakingProfile, IntegrationError, IntegrationStats, IntegratorSettings, VehicleParameters,
    dv_dt, integrate, resistive_forces,
};
use regen_recovery::{EfficiencyCurve, accumulate};
use thiserror::Error;
use tracing::{Level, debug, info};

/// Series derived along the time grid, all of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub velocity_m_s: Vec<f64>,
    pub braking_force_n: Vec<f64>,
    pub efficiency: Vec<f64>,
    pub power_w: Vec<f64>,
}

/// One row of a [`Trajectory`] paired with its sample time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySample {
    pub time_s: f64,
    pub velocity_m_s: f64,
    pub braking_force_n: f64,
    pub efficiency: f64,
    pub power_w: f64,
}

/// Output of a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyResult {
    pub grid: TimeGrid,
    pub trajectory: Trajectory,
    /// Recovered energy over the horizon (J).
    pub total_energy_j: f64,
    pub stats: IntegrationStats,
}

impl EnergyResult {
    pub fn energy_kj(&self) -> f64 {
        j_to_kj(self.total_energy_j)
    }

    pub fn peak_power_w(&self) -> f64 {
        self.trajectory.power_w.iter().copied().fold(0.0, f64::max)
    }

    pub fn initial_velocity_m_s(&self) -> f64 {
        self.trajectory.velocity_m_s.first().copied().unwrap_or_default()
    }

    pub fn final_velocity_m_s(&self) -> f64 {
        self.trajectory.velocity_m_s.last().copied().unwrap_or_default()
    }

    /// Iterate over grid samples together with their derived values.
    ///
    /// Stops at the shortest series if the trajectory has been edited to
    /// uneven lengths.
    pub fn samples(&self) -> impl Iterator<Item = TrajectorySample> + '_ {
        let tr = &self.trajectory;
        self.grid
            .samples()
            .iter()
            .zip(&tr.velocity_m_s)
            .zip(&tr.braking_force_n)
            .zip(&tr.efficiency)
            .zip(&tr.power_w)
            .map(
                |((((&time_s, &velocity_m_s), &braking_force_n), &efficiency), &power_w)| {
                    TrajectorySample {
                        time_s,
                        velocity_m_s,
                        braking_force_n,
                        efficiency,
                        power_w,
                    }
                },
            )
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
    #[error("velocity integration failed: {0}")]
    Integration(#[from] IntegrationError),
}

impl From<GridError> for SimulationError {
    fn from(err: GridError) -> Self {
        let parameter = match err {
            GridError::InvalidHorizon(_) => "t_max",
            GridError::TooFewPoints(_) => "t_points",
        };
        SimulationError::InvalidParameter {
            parameter,
            reason: err.to_string(),
        }
    }
}

/// Simulate a braking run with default integrator settings.
pub fn simulate<P>(
    params: &VehicleParameters,
    v0: f64,
    braking_profile: &P,
    efficiency_curve: &EfficiencyCurve,
    t_max: f64,
    t_points: usize,
) -> Result<EnergyResult, SimulationError>
where
    P: BrakingProfile + ?Sized,
{
    simulate_with_settings(
        params,
        v0,
        braking_profile,
        efficiency_curve,
        t_max,
        t_points,
        &IntegratorSettings::default(),
    )
}

/// Simulate a braking run and estimate the energy recovered over `[0, t_max]`.
///
/// Inputs are validated before any integration starts. An integrator
/// failure aborts the run; there is no partial result.
pub fn simulate_with_settings<P>(
    params: &VehicleParameters,
    v0: f64,
    braking_profile: &P,
    efficiency_curve: &EfficiencyCurve,
    t_max: f64,
    t_points: usize,
    settings: &IntegratorSettings,
) -> Result<EnergyResult, SimulationError>
where
    P: BrakingProfile + ?Sized,
{
    if !params.mass_kg.is_finite() || params.mass_kg <= 0.0 {
        return Err(SimulationError::InvalidParameter {
            parameter: "mass",
            reason: format!("must be positive and finite (got {})", params.mass_kg),
        });
    }
    if !v0.is_finite() || v0 < 0.0 {
        return Err(SimulationError::InvalidParameter {
            parameter: "v0",
            reason: format!("must be non-negative and finite (got {v0})"),
        });
    }
    let grid = TimeGrid::linspace(t_max, t_points)?;

    debug!(forces = ?resistive_forces(v0, 0.0, params, braking_profile), "initial force balance");

    let velocity = integrate(
        |v, t| dv_dt(v, t, params, braking_profile),
        v0,
        grid.samples(),
        settings,
    )?;

    if tracing::enabled!(Level::DEBUG) {
        let floored = grid
            .samples()
            .iter()
            .zip(&velocity.values)
            .filter(|&(&t, &v)| {
                let raw =
                    -resistive_forces(v, t, params, braking_profile).total_n() / params.mass_kg;
                dv_dt(v, t, params, braking_profile) > raw
            })
            .count();
        debug!(samples = floored, "grid samples with the deceleration floor active");
    }

    let power = accumulate(
        grid.samples(),
        &velocity.values,
        braking_profile,
        efficiency_curve,
    );

    info!(
        total_energy_j = power.total_energy_j,
        final_velocity_m_s = velocity.values.last().copied().unwrap_or_default(),
        steps = velocity.stats.accepted_steps,
        "braking simulation complete"
    );

    Ok(EnergyResult {
        grid,
        trajectory: Trajectory {
            velocity_m_s: velocity.values,
            braking_force_n: power.braking_force_n,
            efficiency: power.efficiency,
            power_w: power.power_w,
        },
        total_energy_j: power.total_energy_j,
        stats: velocity.stats,
    })
}
