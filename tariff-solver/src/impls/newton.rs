use crate::{Root, RootFinder, RootFindingError, Seed};

/// Settings for the Newton iteration
#[derive(Clone, Copy, Debug)]
pub struct NewtonSettings {
    /// Absolute residual below which the iterate is accepted as a root
    pub tolerance: f64,
    /// Maximum number of Newton steps before giving up
    pub max_iterations: u32,
    /// Relative step used for the finite-difference slope estimate
    pub relative_step: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 128,
            relative_step: 1e-6,
        }
    }
}

/// A bounded Newton iteration with a finite-difference slope
///
/// Each step is clamped into the seed's domain, so the iteration cannot
/// wander into regions where the objective is undefined. Non-convergence
/// within the iteration budget is an explicit error, never a silently
/// returned best-effort value.
pub struct NewtonRaphson(NewtonSettings);

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self(NewtonSettings::default())
    }
}

impl RootFinder for NewtonRaphson {
    type Settings = NewtonSettings;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    fn find_root(&self, f: &dyn Fn(f64) -> f64, seed: Seed) -> Result<Root, RootFindingError> {
        let NewtonSettings {
            tolerance,
            max_iterations,
            relative_step,
        } = self.0;

        let mut x = seed.clamp(seed.start);
        let mut fx = f(x);

        for iteration in 0..max_iterations {
            if !fx.is_finite() {
                return Err(RootFindingError::NonFinite { at: x });
            }
            if fx.abs() <= tolerance {
                return Ok(Root {
                    value: x,
                    residual: fx,
                    iterations: iteration,
                });
            }

            // Finite-difference slope, probing backwards when the forward
            // point would leave the domain. Capping the step at half the
            // domain width keeps the backward probe in bounds too.
            let h = (relative_step * x.abs().max(1.0)).min((seed.max - seed.min) / 2.0);
            let x1 = if x + h <= seed.max { x + h } else { x - h };
            let f1 = f(x1);
            if !f1.is_finite() {
                return Err(RootFindingError::NonFinite { at: x1 });
            }

            let slope = (f1 - fx) / (x1 - x);
            if slope == 0.0 || !slope.is_finite() {
                return Err(RootFindingError::Exhausted {
                    iterations: iteration,
                    residual: fx,
                    tolerance,
                });
            }

            x = seed.clamp(x - fx / slope);
            fx = f(x);
        }

        Err(RootFindingError::Exhausted {
            iterations: max_iterations,
            residual: fx,
            tolerance,
        })
    }
}
