use super::{ConfigArgs, OutputArgs};
use clap::{Subcommand, ValueEnum};
use tariff_core::models::{Policy, PolicyOutcome, StudyConfig};
use tariff_solver::{Bisection, NewtonRaphson, RootFinder, SolveError, solve_ramsey, solve_uniform};

pub mod report;

#[derive(Subcommand)]
pub enum Commands {
    /// Solve both pricing policies and print the comparison report with charts
    Report {
        #[command(flatten)]
        cfg: ConfigArgs,

        /// Request a specific root-finding method
        #[arg(short, long, default_value = "newton")]
        method: Method,
    },

    /// Solve both pricing policies and emit the comparison as JSON
    Solve {
        #[command(flatten)]
        cfg: ConfigArgs,

        #[command(flatten)]
        io: OutputArgs,

        /// Request a specific root-finding method
        #[arg(short, long, default_value = "newton")]
        method: Method,
    },

    /// Render only the demand-curve charts
    Chart {
        #[command(flatten)]
        cfg: ConfigArgs,

        /// Request a specific root-finding method
        #[arg(short, long, default_value = "newton")]
        method: Method,
    },
}

// This explicitly articulates the available root-finders for each subcommand
#[derive(Clone, Copy, ValueEnum)]
pub enum Method {
    Newton,
    Bisection,
}

// Conveniently, we can use the same enum to handle the particulars of calling
// into the various finder implementations
impl Method {
    pub fn solve(&self, study: &StudyConfig, policy: Policy) -> Result<PolicyOutcome, SolveError> {
        match self {
            Method::Newton => dispatch(study, policy, &NewtonRaphson::default()),
            Method::Bisection => dispatch(study, policy, &Bisection::default()),
        }
    }
}

fn dispatch(
    study: &StudyConfig,
    policy: Policy,
    finder: &impl RootFinder,
) -> Result<PolicyOutcome, SolveError> {
    match policy {
        Policy::Uniform => solve_uniform(study, finder),
        Policy::Ramsey => solve_ramsey(study, finder),
    }
}
