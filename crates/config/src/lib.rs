//! Configuration models and loaders for the regenerative braking calculator.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Vehicle description parsed from scenario files and vehicle catalogs.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VehicleConfig {
    pub name: String,
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub frontal_area_m2: f64,
    #[serde(default = "default_rolling_resistance")]
    pub rolling_resistance_coefficient: f64,
    /// Road grade in degrees; negative for a downgrade.
    #[serde(default)]
    pub grade_deg: f64,
    #[serde(default = "default_air_density")]
    pub air_density_kg_m3: f64,
}

/// Braking schedule selection.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum BrakingConfig {
    /// Linear ramp from `peak_force_n` down to zero at the scenario horizon.
    #[serde(rename = "linear_ramp")]
    LinearRamp { peak_force_n: f64 },
    #[serde(rename = "constant")]
    Constant { force_n: f64 },
}

/// Quadratic efficiency coefficients `a·v² + b·v + c`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct EfficiencyConfig {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            a: -0.005,
            b: 0.1,
            c: 0.2,
        }
    }
}

/// Simulation horizon and sampling density.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HorizonConfig {
    #[serde(default = "default_t_max")]
    pub t_max_s: f64,
    #[serde(default = "default_points")]
    pub points: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            t_max_s: default_t_max(),
            points: default_points(),
        }
    }
}

/// A complete braking scenario.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub vehicle: VehicleConfig,
    pub initial_velocity_m_s: f64,
    pub braking: BrakingConfig,
    #[serde(default)]
    pub efficiency: EfficiencyConfig,
    #[serde(default)]
    pub horizon: HorizonConfig,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("vehicle '{0}' appears more than once in the catalog")]
    DuplicateVehicle(String),
}

fn default_rolling_resistance() -> f64 {
    0.015
}

fn default_air_density() -> f64 {
    1.225
}

fn default_t_max() -> f64 {
    10.0
}

fn default_points() -> usize {
    1000
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn of(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(Format::Toml),
            Some("yaml" | "yml") => Some(Format::Yaml),
            _ => None,
        }
    }
}

fn parse_file<T: DeserializeOwned>(path: &Path, format: Format) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(match format {
        Format::Toml => toml::from_str(&contents)?,
        Format::Yaml => serde_yaml::from_str(&contents)?,
    })
}

/// Load a single scenario from a TOML file, or YAML for any other extension.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ConfigError> {
    let path = path.as_ref();
    parse_file(path, Format::of(path).unwrap_or(Format::Yaml))
}

/// Load the vehicle catalog.
///
/// A directory holds one vehicle per `.toml`/`.yaml`/`.yml` file, read in file
/// name order. A TOML file holds one vehicle and any other file a YAML list.
/// Names must be unique, ignoring case, since vehicles are selected by name.
pub fn load_vehicle_configs<P: AsRef<Path>>(path: P) -> Result<Vec<VehicleConfig>, ConfigError> {
    let path = path.as_ref();
    let vehicles = if path.is_dir() {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let file: PathBuf = entry?.path();
            if let Some(format) = Format::of(&file) {
                files.push((file, format));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));
        files
            .iter()
            .map(|(file, format)| parse_file::<VehicleConfig>(file, *format))
            .collect::<Result<Vec<_>, _>>()?
    } else if Format::of(path) == Some(Format::Toml) {
        vec![parse_file(path, Format::Toml)?]
    } else {
        parse_file(path, Format::Yaml)?
    };

    let mut seen = HashSet::new();
    for vehicle in &vehicles {
        if !seen.insert(vehicle.name.to_uppercase()) {
            return Err(ConfigError::DuplicateVehicle(vehicle.name.clone()));
        }
    }
    Ok(vehicles)
}
