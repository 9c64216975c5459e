//! Commanded braking force schedules.

/// Time to braking-force mapping consumed by the force model and energy aggregation.
///
/// Implementations must return a non-negative force magnitude in newtons.
/// Any closure `Fn(f64) -> f64` taking elapsed seconds is a profile.
pub trait BrakingProfile {
    fn force_n(&self, time_s: f64) -> f64;
}

impl<F> BrakingProfile for F
where
    F: Fn(f64) -> f64,
{
    fn force_n(&self, time_s: f64) -> f64 {
        self(time_s)
    }
}

/// Linear decay from `peak_force_n` at t = 0 to zero at `horizon_s`, floored at zero afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRamp {
    pub peak_force_n: f64,
    pub horizon_s: f64,
}

impl LinearRamp {
    pub fn new(peak_force_n: f64, horizon_s: f64) -> Self {
        Self {
            peak_force_n,
            horizon_s,
        }
    }
}

impl BrakingProfile for LinearRamp {
    fn force_n(&self, time_s: f64) -> f64 {
        (self.peak_force_n * (1.0 - time_s / self.horizon_s)).max(0.0)
    }
}

/// Constant braking force held for the whole horizon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantForce {
    pub force_n: f64,
}

impl BrakingProfile for ConstantForce {
    fn force_n(&self, _time_s: f64) -> f64 {
        self.force_n.max(0.0)
    }
}

/// Schedules that can be described in scenario files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrakingSchedule {
    LinearRamp(LinearRamp),
    Constant(ConstantForce),
}

impl BrakingProfile for BrakingSchedule {
    fn force_n(&self, time_s: f64) -> f64 {
        match self {
            BrakingSchedule::LinearRamp(ramp) => ramp.force_n(time_s),
            BrakingSchedule::Constant(constant) => constant.force_n(time_s),
        }
    }
}
