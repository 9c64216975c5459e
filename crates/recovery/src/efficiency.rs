//! Quadratic recovery-efficiency curve.

/// `η(v) = a·v² + b·v + c`, clamped to `[0, 1]`.
///
/// The quadratic is only calibrated over a limited velocity range; outside
/// it the raw value can leave `[0, 1]`, so every evaluation is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyCurve {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for EfficiencyCurve {
    fn default() -> Self {
        Self {
            a: -0.005,
            b: 0.1,
            c: 0.2,
        }
    }
}

impl EfficiencyCurve {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    /// Recovery fraction at `velocity_m_s`.
    pub fn evaluate(&self, velocity_m_s: f64) -> f64 {
        let raw = self.a * velocity_m_s * velocity_m_s + self.b * velocity_m_s + self.c;
        raw.clamp(0.0, 1.0)
    }

    /// Velocity of maximum efficiency, when the parabola opens downward.
    pub fn peak_velocity_m_s(&self) -> Option<f64> {
        (self.a < 0.0).then(|| -self.b / (2.0 * self.a))
    }
}
