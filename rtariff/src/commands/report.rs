use crate::chart;
use std::fmt::Write as _;
use tariff_core::models::{PolicyOutcome, StudyConfig};
use tariff_solver::SolveError;

/// Render the full comparison report: per-policy prices and surpluses,
/// the welfare verdict, and a chart for each scenario that solved.
///
/// A failed scenario reports which policy failed and why; the other
/// scenario still prints in full.
pub fn render(
    study: &StudyConfig,
    uniform: &Result<PolicyOutcome, SolveError>,
    ramsey: &Result<PolicyOutcome, SolveError>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Daily break-even target: ${:.2} (fixed costs ${:.0} over {} days)\n",
        study.break_even_target(),
        study.fixed_costs(),
        study.days_per_month()
    );

    for (heading, result) in [("Ramsey Pricing", ramsey), ("Uniform Pricing", uniform)] {
        let _ = writeln!(out, "{heading}:");
        match result {
            Ok(outcome) => {
                if let Some(k) = outcome.markup {
                    let _ = writeln!(out, "  markup factor k = {k:.4}");
                }
                for (name, segment) in outcome.segments.iter() {
                    let _ = writeln!(
                        out,
                        "  {name}: price ${:.2}, quantity {:.1}, consumer surplus ${:.2}",
                        segment.price, segment.quantity, segment.consumer_surplus
                    );
                }
                let _ = writeln!(
                    out,
                    "  total revenue ${:.2}, total consumer surplus ${:.2}",
                    outcome.total_revenue, outcome.total_surplus
                );
            }
            Err(error) => {
                let _ = writeln!(out, "  FAILED: {error}");
            }
        }
        let _ = writeln!(out);
    }

    if let (Ok(uniform), Ok(ramsey)) = (uniform, ramsey) {
        let _ = writeln!(
            out,
            "Surplus gap (uniform − ramsey): ${:.2}",
            uniform.total_surplus - ramsey.total_surplus
        );
        let _ = writeln!(out);
        for outcome in [uniform, ramsey] {
            let _ = writeln!(out, "{}", chart::render(study, outcome));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_solver::{NewtonRaphson, solve_ramsey, solve_uniform};

    fn feasible() -> StudyConfig {
        let segments = StudyConfig::default().segments().to_vec();
        StudyConfig::new(segments, 5.0, 165_000.0, 30, 1000.0).unwrap()
    }

    #[test]
    fn report_covers_both_policies() {
        let study = feasible();
        let finder = NewtonRaphson::default();
        let uniform = solve_uniform(&study, &finder);
        let ramsey = solve_ramsey(&study, &finder);

        let text = render(&study, &uniform, &ramsey);
        assert!(text.contains("Uniform Pricing:"));
        assert!(text.contains("Ramsey Pricing:"));
        assert!(text.contains("high-income"));
        assert!(text.contains("low-income"));
        assert!(text.contains("Surplus gap"));
    }

    #[test]
    fn failed_scenario_is_reported_not_hidden() {
        // The canonical constants are infeasible; the report must say so
        // for both policies rather than printing made-up numbers.
        let study = StudyConfig::default();
        let finder = NewtonRaphson::default();
        let uniform = solve_uniform(&study, &finder);
        let ramsey = solve_ramsey(&study, &finder);

        let text = render(&study, &uniform, &ramsey);
        assert_eq!(text.matches("FAILED:").count(), 2);
        assert!(!text.contains("Surplus gap"));
    }
}
