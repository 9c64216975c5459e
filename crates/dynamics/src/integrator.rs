//! Adaptive Dormand–Prince 5(4) integrator for scalar ODEs sampled on a fixed grid.

use thiserror::Error;
use tracing::debug;

// Dormand–Prince tableau. The 5th-order weights double as the last stage row.
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Difference between the 5th- and 4th-order weights.
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

const SAFETY: f64 = 0.9;
const MIN_SHRINK: f64 = 0.2;
const MAX_GROWTH: f64 = 5.0;

/// Tolerances and limits for the step-size controller.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegratorSettings {
    pub relative_tolerance: f64,
    pub absolute_tolerance: f64,
    /// Smallest step the controller may take before giving up (s).
    pub min_step_s: f64,
    /// Total attempted steps (accepted + rejected) allowed for one run.
    pub max_steps: usize,
    /// First trial step; defaults to the first grid interval.
    pub initial_step_s: Option<f64>,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            relative_tolerance: 1.0e-8,
            absolute_tolerance: 1.0e-10,
            min_step_s: 1.0e-12,
            max_steps: 1_000_000,
            initial_step_s: None,
        }
    }
}

/// Step accounting for a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationStats {
    pub accepted_steps: usize,
    pub rejected_steps: usize,
    pub rhs_evaluations: usize,
}

/// Velocity samples aligned with the input grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Integration {
    pub values: Vec<f64>,
    pub stats: IntegrationStats,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("time grid is empty")]
    EmptyGrid,
    #[error("right-hand side is not finite at t = {time_s} s (v = {velocity_m_s} m/s)")]
    NonFiniteDerivative { time_s: f64, velocity_m_s: f64 },
    #[error("step size underflow at t = {time_s} s (step {step_s:e} s)")]
    StepSizeUnderflow { time_s: f64, step_s: f64 },
    #[error("step budget of {steps} exhausted at t = {time_s} s")]
    StepLimitExceeded { time_s: f64, steps: usize },
}

/// Solve `dv/dt = rhs(v, t)`, `v(times[0]) = v0`, returning `v` at every grid time.
///
/// The controller steps exactly onto each grid sample and carries its step
/// size across samples. `times` must be strictly increasing.
pub fn integrate<F>(
    mut rhs: F,
    v0: f64,
    times: &[f64],
    settings: &IntegratorSettings,
) -> Result<Integration, IntegrationError>
where
    F: FnMut(f64, f64) -> f64,
{
    let (&t0, rest) = times.split_first().ok_or(IntegrationError::EmptyGrid)?;

    let mut stats = IntegrationStats::default();
    let mut values = Vec::with_capacity(times.len());
    values.push(v0);

    let mut t = t0;
    let mut v = v0;
    let mut h = settings
        .initial_step_s
        .or_else(|| rest.first().map(|t1| t1 - t0))
        .unwrap_or(1.0);

    for &target in rest {
        while t < target {
            if stats.accepted_steps + stats.rejected_steps >= settings.max_steps {
                return Err(IntegrationError::StepLimitExceeded {
                    time_s: t,
                    steps: settings.max_steps,
                });
            }

            let remaining = target - t;
            let last = h >= remaining;
            let step = if last { remaining } else { h };
            if !last && step < settings.min_step_s {
                return Err(IntegrationError::StepSizeUnderflow {
                    time_s: t,
                    step_s: step,
                });
            }

            let k1 = rhs(v, t);
            if !k1.is_finite() {
                return Err(IntegrationError::NonFiniteDerivative {
                    time_s: t,
                    velocity_m_s: v,
                });
            }
            let k2 = rhs(v + step * A21 * k1, t + C2 * step);
            let k3 = rhs(v + step * (A31 * k1 + A32 * k2), t + C3 * step);
            let k4 = rhs(v + step * (A41 * k1 + A42 * k2 + A43 * k3), t + C4 * step);
            let k5 = rhs(
                v + step * (A51 * k1 + A52 * k2 + A53 * k3 + A54 * k4),
                t + C5 * step,
            );
            let k6 = rhs(
                v + step * (A61 * k1 + A62 * k2 + A63 * k3 + A64 * k4 + A65 * k5),
                t + step,
            );
            let v_next = v + step * (B1 * k1 + B3 * k3 + B4 * k4 + B5 * k5 + B6 * k6);
            let k7 = rhs(v_next, t + step);
            stats.rhs_evaluations += 7;

            let error_estimate =
                step * (E1 * k1 + E3 * k3 + E4 * k4 + E5 * k5 + E6 * k6 + E7 * k7);
            let scale = settings.absolute_tolerance
                + settings.relative_tolerance * v.abs().max(v_next.abs());
            let error_norm = (error_estimate / scale).abs();

            let accepted = v_next.is_finite() && error_norm.is_finite() && error_norm <= 1.0;
            let factor = if !error_norm.is_finite() {
                MIN_SHRINK
            } else if error_norm == 0.0 {
                MAX_GROWTH
            } else {
                (SAFETY * error_norm.powf(-0.2)).clamp(MIN_SHRINK, MAX_GROWTH)
            };

            if accepted {
                stats.accepted_steps += 1;
                t = if last { target } else { t + step };
                v = v_next;
                // A short final step onto a grid sample says nothing about the
                // step the solution can sustain, so it never shrinks `h`.
                h = if last { h.max(step * factor) } else { step * factor };
            } else {
                stats.rejected_steps += 1;
                h = step * factor;
            }
        }
        values.push(v);
    }

    debug!(
        accepted = stats.accepted_steps,
        rejected = stats.rejected_steps,
        rhs_evaluations = stats.rhs_evaluations,
        "ODE integration finished"
    );

    Ok(Integration { values, stats })
}
