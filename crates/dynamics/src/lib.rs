//! Longitudinal braking dynamics.
//!
//! The force model turns vehicle parameters and a braking profile into the
//! right-hand side of `dv/dt`, and the integrator advances it over a time grid.

pub mod braking;
pub mod force;
pub mod integrator;
pub mod vehicle;

pub use braking::{BrakingProfile, BrakingSchedule, ConstantForce, LinearRamp};
pub use force::{ForceBreakdown, dv_dt, resistive_forces};
pub use integrator::{Integration, IntegrationError, IntegrationStats, IntegratorSettings, integrate};
pub use vehicle::VehicleParameters;
