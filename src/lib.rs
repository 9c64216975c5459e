//! Regenerative braking energy estimation.
//!
//! The pure pipeline lives in [`simulation::simulate`]: it integrates the
//! longitudinal braking ODE over a time grid and turns the velocity
//! trajectory into recovered power and energy. Scenario loading, reports,
//! exports, and charts sit around it and only exchange [`EnergyResult`]s.

pub mod logging;
pub mod plot;
pub mod report;
pub mod scenario;
pub mod simulation;
pub mod sweep;

pub use regen_config as config;
pub use regen_core as common;
pub use regen_dynamics as dynamics;
pub use regen_export as export;
pub use regen_recovery as recovery;

pub use simulation::{
    EnergyResult, SimulationError, Trajectory, TrajectorySample, simulate, simulate_with_settings,
};
