use crate::{Root, RootFinder, RootFindingError, Seed};

/// Settings for the bracketing bisection
#[derive(Clone, Copy, Debug)]
pub struct BisectionSettings {
    /// Absolute residual below which the iterate is accepted as a root
    pub tolerance: f64,
    /// Maximum number of bisection steps once a bracket is found
    pub max_iterations: u32,
    /// Initial probe distance, relative to the seed's magnitude
    pub relative_step: f64,
}

impl Default for BisectionSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 128,
            relative_step: 1e-2,
        }
    }
}

/// Bracket expansion from the seed followed by plain bisection
///
/// Probes geometrically outward from the starting guess (left side first,
/// then right, doubling the distance each round) until the objective
/// changes sign, then bisects. If the whole domain is covered without a
/// sign change the failure is reported as [`RootFindingError::NoBracket`]
/// rather than returning the least-bad iterate.
pub struct Bisection(BisectionSettings);

impl Default for Bisection {
    fn default() -> Self {
        Self(BisectionSettings::default())
    }
}

impl RootFinder for Bisection {
    type Settings = BisectionSettings;

    fn new(settings: Self::Settings) -> Self {
        Self(settings)
    }

    fn find_root(&self, f: &dyn Fn(f64) -> f64, seed: Seed) -> Result<Root, RootFindingError> {
        let BisectionSettings {
            tolerance,
            max_iterations,
            relative_step,
        } = self.0;

        let start = seed.clamp(seed.start);
        let f_start = f(start);
        if !f_start.is_finite() {
            return Err(RootFindingError::NonFinite { at: start });
        }
        if f_start.abs() <= tolerance {
            return Ok(Root {
                value: start,
                residual: f_start,
                iterations: 0,
            });
        }

        // Expand outward until some probe lands on the other side of zero.
        let mut probes = 0u32;
        let mut h = relative_step * (1.0 + start.abs());
        let (mut a, mut b, mut fa) = 'bracket: loop {
            for x in [seed.clamp(start - h), seed.clamp(start + h)] {
                if x == start {
                    continue;
                }
                let fx = f(x);
                probes += 1;
                if !fx.is_finite() {
                    return Err(RootFindingError::NonFinite { at: x });
                }
                if fx.abs() <= tolerance {
                    return Ok(Root {
                        value: x,
                        residual: fx,
                        iterations: probes,
                    });
                }
                if (fx < 0.0) != (f_start < 0.0) {
                    break 'bracket if x < start {
                        (x, start, fx)
                    } else {
                        (start, x, f_start)
                    };
                }
            }
            if start - h <= seed.min && start + h >= seed.max {
                return Err(RootFindingError::NoBracket {
                    min: seed.min,
                    max: seed.max,
                    probes,
                });
            }
            h *= 2.0;
        };

        for iteration in 0..max_iterations {
            let mid = (a + b) / 2.0;
            let fm = f(mid);
            if !fm.is_finite() {
                return Err(RootFindingError::NonFinite { at: mid });
            }
            if fm.abs() <= tolerance {
                return Ok(Root {
                    value: mid,
                    residual: fm,
                    iterations: iteration,
                });
            }
            if (fm < 0.0) == (fa < 0.0) {
                a = mid;
                fa = fm;
            } else {
                b = mid;
            }
        }

        let residual = f((a + b) / 2.0);
        Err(RootFindingError::Exhausted {
            iterations: max_iterations,
            residual,
            tolerance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_sqrt_two() {
        let finder = Bisection::default();
        let root = finder
            .find_root(
                &|x| x * x - 2.0,
                Seed {
                    start: 0.0,
                    min: 0.0,
                    max: 2.0,
                },
            )
            .expect("root exists");
        assert!((root.value - std::f64::consts::SQRT_2).abs() < 1e-8);
    }

    #[test]
    fn seed_already_at_root() {
        let finder = Bisection::default();
        let root = finder
            .find_root(
                &|x| x,
                Seed {
                    start: 0.0,
                    min: 0.0,
                    max: 1.0,
                },
            )
            .expect("trivial root");
        assert_eq!(root.value, 0.0);
    }

    #[test]
    fn reports_no_bracket_when_no_root_exists() {
        let finder = Bisection::default();
        let result = finder.find_root(
            &|x| x * x + 1.0,
            Seed {
                start: 1.0,
                min: -4.0,
                max: 4.0,
            },
        );
        assert!(matches!(result, Err(RootFindingError::NoBracket { .. })));
    }

    #[test]
    fn brackets_to_the_left_of_the_seed() {
        let finder = Bisection::default();
        let root = finder
            .find_root(
                &|x| x + 3.0,
                Seed {
                    start: 0.0,
                    min: -10.0,
                    max: 10.0,
                },
            )
            .expect("root at -3");
        assert!((root.value + 3.0).abs() < 1e-8);
    }

    #[test]
    fn reports_non_finite_objective() {
        let finder = Bisection::default();
        let result = finder.find_root(
            &|_| f64::INFINITY,
            Seed {
                start: 1.0,
                min: 0.0,
                max: 2.0,
            },
        );
        assert!(matches!(result, Err(RootFindingError::NonFinite { .. })));
    }
}
