//! Physical parameters of the braking vehicle.

use regen_core::constants::{AIR_DENSITY_KG_M3, DEFAULT_ROLLING_RESISTANCE};
use regen_core::units::deg_to_rad;

/// Mass, aerodynamic, and road properties feeding the force model.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleParameters {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub frontal_area_m2: f64,
    pub rolling_resistance_coefficient: f64,
    /// Road grade in radians. Negative values describe a downgrade.
    pub grade_rad: f64,
    pub air_density_kg_m3: f64,
}

impl VehicleParameters {
    /// Flat road, sea-level air, and asphalt rolling resistance.
    pub fn new(mass_kg: f64, drag_coefficient: f64, frontal_area_m2: f64) -> Self {
        Self {
            mass_kg,
            drag_coefficient,
            frontal_area_m2,
            rolling_resistance_coefficient: DEFAULT_ROLLING_RESISTANCE,
            grade_rad: 0.0,
            air_density_kg_m3: AIR_DENSITY_KG_M3,
        }
    }

    pub fn with_rolling_resistance(mut self, coefficient: f64) -> Self {
        self.rolling_resistance_coefficient = coefficient;
        self
    }

    pub fn with_grade_rad(mut self, grade_rad: f64) -> Self {
        self.grade_rad = grade_rad;
        self
    }

    pub fn with_grade_degrees(self, grade_deg: f64) -> Self {
        self.with_grade_rad(deg_to_rad(grade_deg))
    }

    pub fn with_air_density(mut self, density_kg_m3: f64) -> Self {
        self.air_density_kg_m3 = density_kg_m3;
        self
    }

    /// Product `ρ·C_d·A / 2`, the coefficient of v² in the drag force.
    pub fn drag_factor(&self) -> f64 {
        0.5 * self.air_density_kg_m3 * self.drag_coefficient * self.frontal_area_m2
    }
}
