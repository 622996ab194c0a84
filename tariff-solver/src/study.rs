use crate::{RootFinder, RootFindingError, Seed};
use tariff_core::Map;
use tariff_core::models::{
    DemandSegment, Policy, PolicyOutcome, SegmentOutcome, StudyConfig, TariffComparison,
};
use thiserror::Error;
use tracing::{Level, event};

/// The initial guess for the Ramsey markup factor: a small negative number
/// near zero, which is where the economically interesting solutions live
/// for negative elasticities.
const MARKUP_SEED: f64 = -0.1;

/// Hard guard on the markup-factor search when no elasticity pole binds.
const MARKUP_GUARD: f64 = 1e3;

/// The ways in which a scenario solve can fail
///
/// Every failure names the policy (and, where relevant, the segment) that
/// produced it; a failed scenario is aborted outright, with no silent
/// substitution of defaults.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The root-finder could not locate a break-even solution
    #[error("{policy} pricing failed to converge: {source}")]
    Convergence {
        /// The policy whose solve failed
        policy: Policy,
        /// The underlying root-finding failure
        #[source]
        source: RootFindingError,
    },
    /// A solved price fell outside a segment's demand-curve support
    #[error(
        "{policy} price {price:.4} for segment '{segment}' falls outside [0, {choke:.4}]"
    )]
    InvalidPrice {
        /// The policy whose solve produced the price
        policy: Policy,
        /// The segment whose demand curve rejects the price
        segment: String,
        /// The offending price
        price: f64,
        /// The segment's choke price
        choke: f64,
    },
    /// The Ramsey price formula is undefined for a segment at the solved markup
    #[error(
        "{policy} price undefined for segment '{segment}': 1 − k·ε is non-positive at k = {markup:.4}"
    )]
    UndefinedPrice {
        /// The policy whose solve produced the markup
        policy: Policy,
        /// The segment whose elasticity pole was crossed
        segment: String,
        /// The offending markup factor
        markup: f64,
    },
}

/// Solve for the single price at which total revenue across all segments
/// meets the daily break-even target.
///
/// The aggregate revenue curve `p·(ΣA − ΣB·p)` peaks at `ΣA / 2ΣB`; we
/// search `[0, peak]` so the solve lands on the lower break-even root,
/// i.e. the least price that covers fixed costs. A target beyond the
/// attainable revenue has no root in that interval and fails explicitly.
pub fn solve_uniform(
    config: &StudyConfig,
    finder: &impl RootFinder,
) -> Result<PolicyOutcome, SolveError> {
    let target = config.break_even_target();
    let (sum_a, sum_b) = config
        .segments()
        .iter()
        .fold((0.0, 0.0), |(a, b), segment| {
            (a + segment.demand.intercept(), b + segment.demand.slope())
        });
    let peak = sum_a / (2.0 * sum_b);

    let objective = |price: f64| {
        config
            .segments()
            .iter()
            .map(|segment| segment.demand.revenue(price))
            .sum::<f64>()
            - target
    };

    let root = finder
        .find_root(
            &objective,
            Seed {
                start: 0.0,
                min: 0.0,
                max: peak,
            },
        )
        .map_err(|source| SolveError::Convergence {
            policy: Policy::Uniform,
            source,
        })?;

    event!(
        Level::DEBUG,
        price = root.value,
        residual = root.residual,
        iterations = root.iterations,
        "uniform break-even price accepted"
    );

    assemble(config, Policy::Uniform, None, |_| Some(root.value))
}

/// Solve for the markup factor `k` at which Ramsey prices
/// `p_i = MC / (1 − k·ε_i)` raise exactly the daily break-even target.
///
/// A zero target needs no markup at all: the solve short-circuits to
/// `k = 0` with every price at marginal cost.
pub fn solve_ramsey(
    config: &StudyConfig,
    finder: &impl RootFinder,
) -> Result<PolicyOutcome, SolveError> {
    let target = config.break_even_target();
    let mc = config.marginal_cost();

    if target == 0.0 {
        return assemble(config, Policy::Ramsey, Some(0.0), |_| Some(mc));
    }

    let (min, max) = markup_bounds(config.segments());
    let objective = |k: f64| {
        config
            .segments()
            .iter()
            .map(|segment| match segment.elasticity.ramsey_price(mc, k) {
                Some(price) => segment.demand.revenue(price),
                None => f64::NAN,
            })
            .sum::<f64>()
            - target
    };

    let root = finder
        .find_root(
            &objective,
            Seed {
                start: MARKUP_SEED.clamp(min, max),
                min,
                max,
            },
        )
        .map_err(|source| SolveError::Convergence {
            policy: Policy::Ramsey,
            source,
        })?;

    event!(
        Level::DEBUG,
        markup = root.value,
        residual = root.residual,
        iterations = root.iterations,
        "ramsey markup factor accepted"
    );

    let k = root.value;
    assemble(config, Policy::Ramsey, Some(k), |segment| {
        segment.elasticity.ramsey_price(mc, k)
    })
}

/// Run both solves and pair the outcomes for presentation.
pub fn compare(
    config: &StudyConfig,
    finder: &impl RootFinder,
) -> Result<TariffComparison, SolveError> {
    let uniform = solve_uniform(config, finder)?;
    let ramsey = solve_ramsey(config, finder)?;

    event!(
        Level::INFO,
        uniform_surplus = uniform.total_surplus,
        ramsey_surplus = ramsey.total_surplus,
        surplus_gap = uniform.total_surplus - ramsey.total_surplus,
        "tariff comparison complete"
    );

    Ok(TariffComparison { uniform, ramsey })
}

/// The search domain for the markup factor
///
/// `1 − k·ε` must stay strictly positive for every segment, so each
/// elasticity contributes a pole at `k = 1/ε`: negative elasticities bound
/// the domain from below, positive ones from above. The bounds are pulled
/// inward by a small margin so probe evaluations stay finite.
fn markup_bounds(segments: &[DemandSegment]) -> (f64, f64) {
    let mut lo = -MARKUP_GUARD;
    let mut hi = MARKUP_GUARD;
    for segment in segments {
        let pole = 1.0 / segment.elasticity.value();
        if segment.elasticity.value() < 0.0 {
            lo = lo.max(pole);
        } else {
            hi = hi.min(pole);
        }
    }
    let margin = 1e-6;
    (
        lo + margin * (1.0 + lo.abs()),
        hi - margin * (1.0 + hi.abs()),
    )
}

/// Validate the solved prices and fold them into a policy outcome.
///
/// Surpluses are only computed after every price passes the domain check
/// (a price outside `[0, choke]` would make the triangle formula report a
/// meaningless "surplus"). Economically suspect but well-defined results,
/// like prices below marginal cost or aggregate demand beyond the capacity
/// constraint, are logged rather than rejected.
fn assemble(
    config: &StudyConfig,
    policy: Policy,
    markup: Option<f64>,
    price_of: impl Fn(&DemandSegment) -> Option<f64>,
) -> Result<PolicyOutcome, SolveError> {
    let mut segments: Map<String, SegmentOutcome> = Map::default();
    let mut total_revenue = 0.0;
    let mut total_surplus = 0.0;
    let mut total_quantity = 0.0;

    for segment in config.segments() {
        let price = price_of(segment).ok_or_else(|| SolveError::UndefinedPrice {
            policy,
            segment: segment.name.clone(),
            markup: markup.unwrap_or_default(),
        })?;

        if !segment.demand.supports(price) {
            return Err(SolveError::InvalidPrice {
                policy,
                segment: segment.name.clone(),
                price,
                choke: segment.demand.choke_price(),
            });
        }
        if price < config.marginal_cost() {
            event!(
                Level::WARN,
                %policy,
                segment = %segment.name,
                price,
                marginal_cost = config.marginal_cost(),
                "solved price is below marginal cost"
            );
        }

        let quantity = segment.demand.quantity(price);
        let revenue = segment.demand.revenue(price);
        let consumer_surplus = segment.demand.consumer_surplus(price);
        total_revenue += revenue;
        total_surplus += consumer_surplus;
        total_quantity += quantity;

        segments.insert(
            segment.name.clone(),
            SegmentOutcome {
                price,
                quantity,
                revenue,
                consumer_surplus,
            },
        );
    }

    if total_quantity > config.capacity_constraint() {
        event!(
            Level::WARN,
            %policy,
            total_quantity,
            capacity = config.capacity_constraint(),
            "aggregate demand exceeds the daily capacity constraint"
        );
    }

    Ok(PolicyOutcome {
        policy,
        markup,
        segments,
        total_revenue,
        total_surplus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tariff_core::models::{Elasticity, LinearDemand};

    fn segment(name: &str, a: f64, b: f64, eps: f64) -> DemandSegment {
        DemandSegment {
            name: name.into(),
            demand: LinearDemand::new(a, b).unwrap(),
            elasticity: Elasticity::new(eps).unwrap(),
        }
    }

    #[test]
    fn markup_bounds_respect_elasticity_poles() {
        let segments = vec![
            segment("hi", 600.0, 30.0, -0.5),
            segment("lo", 800.0, 50.0, -1.5),
        ];
        let (min, max) = markup_bounds(&segments);
        // The binding pole is 1/(-1.5) = -2/3
        assert!(min > -2.0 / 3.0);
        assert!(min < -0.6);
        assert_eq!(max, MARKUP_GUARD - 1e-6 * (1.0 + MARKUP_GUARD));
    }

    #[test]
    fn markup_bounds_with_positive_elasticity() {
        let segments = vec![segment("giffen", 600.0, 30.0, 2.0)];
        let (min, max) = markup_bounds(&segments);
        assert_eq!(min, -MARKUP_GUARD + 1e-6 * (1.0 + MARKUP_GUARD));
        assert!(max < 0.5);
        assert!(max > 0.49);
    }

    #[test]
    fn zero_target_short_circuits_ramsey() {
        let config = StudyConfig::new(
            vec![segment("hi", 600.0, 30.0, -0.5)],
            5.0,
            0.0,
            30,
            1000.0,
        )
        .unwrap();
        let outcome = solve_ramsey(&config, &crate::NewtonRaphson::default()).unwrap();
        assert_eq!(outcome.markup, Some(0.0));
        assert_eq!(outcome.segments["hi"].price, 5.0);
    }

    #[test]
    fn undefined_price_is_reported() {
        // A pricing rule with no defined price for a segment aborts the
        // outcome assembly, naming the segment and the markup.
        let config = StudyConfig::new(
            vec![segment("hi", 600.0, 30.0, -0.5)],
            5.0,
            0.0,
            30,
            1000.0,
        )
        .unwrap();
        let result = assemble(&config, Policy::Ramsey, Some(-2.0), |_| None);
        assert!(matches!(
            result,
            Err(SolveError::UndefinedPrice {
                policy: Policy::Ramsey,
                ..
            })
        ));
    }

    #[test]
    fn zero_target_rejects_unaffordable_marginal_cost() {
        // Marginal cost above the choke price: even a zero markup yields a
        // price no consumer will pay, which must be reported, not fed into
        // the surplus formula.
        let config = StudyConfig::new(
            vec![segment("hi", 600.0, 30.0, -0.5)],
            50.0,
            0.0,
            30,
            1000.0,
        )
        .unwrap();
        let result = solve_ramsey(&config, &crate::NewtonRaphson::default());
        assert!(matches!(
            result,
            Err(SolveError::InvalidPrice {
                policy: Policy::Ramsey,
                ..
            })
        ));
    }
}
