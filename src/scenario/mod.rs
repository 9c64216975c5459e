use std::path::Path;

use regen_config::{BrakingConfig, ConfigError, ScenarioConfig, VehicleConfig, load_scenario};
use regen_dynamics::{BrakingSchedule, ConstantForce, LinearRamp, VehicleParameters};
use regen_recovery::EfficiencyCurve;
use thiserror::Error;

use crate::simulation::{EnergyResult, SimulationError, simulate};

/// Runtime form of a scenario file, ready to simulate.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: Option<String>,
    pub vehicle: VehicleParameters,
    pub initial_velocity_m_s: f64,
    pub braking: BrakingSchedule,
    pub efficiency: EfficiencyCurve,
    pub t_max_s: f64,
    pub points: usize,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to load scenario: {0}")]
    Config(#[from] ConfigError),
    #[error("vehicle '{0}' not found in catalog")]
    VehicleNotFound(String),
    #[error("vehicle catalog is empty")]
    EmptyCatalog,
}

impl Scenario {
    pub fn from_config(config: &ScenarioConfig) -> Self {
        let braking = match config.braking {
            BrakingConfig::LinearRamp { peak_force_n } => BrakingSchedule::LinearRamp(
                LinearRamp::new(peak_force_n, config.horizon.t_max_s),
            ),
            BrakingConfig::Constant { force_n } => {
                BrakingSchedule::Constant(ConstantForce { force_n })
            }
        };

        Scenario {
            name: config.name.clone(),
            vehicle: vehicle::from_config(&config.vehicle),
            initial_velocity_m_s: config.initial_velocity_m_s,
            braking,
            efficiency: EfficiencyCurve::new(
                config.efficiency.a,
                config.efficiency.b,
                config.efficiency.c,
            ),
            t_max_s: config.horizon.t_max_s,
            points: config.horizon.points,
        }
    }

    /// Load and convert a YAML or TOML scenario file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let config = load_scenario(path)?;
        Ok(Self::from_config(&config))
    }

    pub fn run(&self) -> Result<EnergyResult, SimulationError> {
        simulate(
            &self.vehicle,
            self.initial_velocity_m_s,
            &self.braking,
            &self.efficiency,
            self.t_max_s,
            self.points,
        )
    }
}

pub mod vehicle {
    use super::*;

    /// Convert a `VehicleConfig` into runtime `VehicleParameters`.
    pub fn from_config(config: &VehicleConfig) -> VehicleParameters {
        VehicleParameters::new(
            config.mass_kg,
            config.drag_coefficient,
            config.frontal_area_m2,
        )
        .with_rolling_resistance(config.rolling_resistance_coefficient)
        .with_grade_degrees(config.grade_deg)
        .with_air_density(config.air_density_kg_m3)
    }

    /// Select a vehicle from the catalog by optional name (case-insensitive), defaulting to the first entry.
    pub fn select<'a>(
        configs: &'a [VehicleConfig],
        requested: Option<&str>,
    ) -> Result<&'a VehicleConfig, ScenarioError> {
        let first = configs.first().ok_or(ScenarioError::EmptyCatalog)?;
        match requested {
            Some(name) => {
                let upper = name.to_uppercase();
                configs
                    .iter()
                    .find(|cfg| cfg.name.to_uppercase() == upper)
                    .ok_or_else(|| ScenarioError::VehicleNotFound(name.to_string()))
            }
            None => Ok(first),
        }
    }
}
