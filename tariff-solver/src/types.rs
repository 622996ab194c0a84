use thiserror::Error;

/// A domain-informed starting point for a scalar root-find
///
/// The `start` value seeds the iteration; `min` and `max` are hard bounds
/// the iteration must never leave. Callers derive the bounds from the
/// economics of the objective (price domains, markup-factor poles), which
/// keeps a non-monotonic objective from luring the iteration into regions
/// where its value is meaningless.
#[derive(Clone, Copy, Debug)]
pub struct Seed {
    /// The initial guess
    pub start: f64,
    /// The lower bound of the search domain
    pub min: f64,
    /// The upper bound of the search domain
    pub max: f64,
}

impl Seed {
    /// Clamp a candidate iterate into the search domain
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}

/// A successfully located root, with convergence diagnostics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Root {
    /// The abscissa at which the objective is within tolerance of zero
    pub value: f64,
    /// The objective value at `value`
    pub residual: f64,
    /// The number of iterations consumed
    pub iterations: u32,
}

/// The ways in which a root-find can fail
///
/// Failures are always surfaced: a finder never hands back a best-effort
/// value as if it had converged.
#[derive(Debug, Error)]
pub enum RootFindingError {
    /// The objective never changed sign within the search domain
    #[error("no sign change within [{min}, {max}] after {probes} probes")]
    NoBracket {
        /// The lower bound of the searched domain
        min: f64,
        /// The upper bound of the searched domain
        max: f64,
        /// The number of objective evaluations spent probing
        probes: u32,
    },
    /// The iteration budget ran out before the residual met tolerance
    #[error(
        "residual {residual:.6e} above tolerance {tolerance:.6e} after {iterations} iterations"
    )]
    Exhausted {
        /// The number of iterations consumed
        iterations: u32,
        /// The objective value at the final iterate
        residual: f64,
        /// The configured convergence tolerance
        tolerance: f64,
    },
    /// The objective returned NaN or an infinity
    #[error("objective returned a non-finite value at {at}")]
    NonFinite {
        /// The abscissa at which the objective misbehaved
        at: f64,
    },
}

/// The RootFinder trait defines the interface for bounded scalar solvers.
///
/// A RootFinder takes an objective `f` and a bounded seed and locates an
/// abscissa where `f` is within tolerance of zero, or reports explicitly
/// why it could not.
///
/// Implementations may use different iteration schemes with varying
/// robustness and convergence-rate characteristics.
pub trait RootFinder {
    /// The configuration type for this finder
    type Settings;

    /// Create a new instance with the provided settings
    fn new(settings: Self::Settings) -> Self;

    /// Locate a root of `f` within the seed's domain
    fn find_root(&self, f: &dyn Fn(f64) -> f64, seed: Seed) -> Result<Root, RootFindingError>;
}
