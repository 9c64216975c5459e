//! Velocity-dependent recovery efficiency and recovered power/energy aggregation.

pub mod efficiency;
pub mod energy;

pub use efficiency::EfficiencyCurve;
pub use energy::{PowerSeries, accumulate, kinetic_energy_j, trapezoid};
