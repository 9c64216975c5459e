//! Core units, constants, and shared primitives for the regenerative braking workspace.

pub mod grid;

/// Physical constants expressed in SI units.
pub mod constants {
    /// Gravitational acceleration used by the longitudinal force model (m/s²).
    pub const GRAVITY_M_S2: f64 = 9.81;
    /// Sea-level air density (kg/m³).
    pub const AIR_DENSITY_KG_M3: f64 = 1.225;
    /// Typical rolling-resistance coefficient for passenger tyres on asphalt.
    pub const DEFAULT_ROLLING_RESISTANCE: f64 = 0.015;
    /// Offset added to elapsed time in the deceleration floor to avoid dividing by zero at t = 0 (s).
    pub const RATE_FLOOR_EPSILON_S: f64 = 1.0e-6;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert joules to kilojoules.
    #[inline]
    pub fn j_to_kj(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert watts to kilowatts.
    #[inline]
    pub fn w_to_kw(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert metres per second to kilometres per hour.
    #[inline]
    pub fn ms_to_kmh(v: f64) -> f64 {
        v * 3.6
    }

}
