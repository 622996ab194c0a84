use crate::Map;
use std::fmt;

/// The pricing policy under which an outcome was computed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Policy {
    /// A single price applied to every segment
    Uniform,
    /// Segment-specific prices derived from a shared markup factor `k`
    Ramsey,
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Uniform => write!(f, "uniform"),
            Policy::Ramsey => write!(f, "ramsey"),
        }
    }
}

/// The solved scalars for one segment under one pricing policy
///
/// Everything a presentation layer needs for a segment: the price charged,
/// the quantity transacted, the revenue raised, and the consumer surplus
/// retained.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentOutcome {
    /// The price charged to this segment
    pub price: f64,
    /// The quantity demanded at that price
    pub quantity: f64,
    /// Revenue raised from this segment
    pub revenue: f64,
    /// Consumer surplus retained by this segment
    pub consumer_surplus: f64,
}

/// A fully solved pricing scenario
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolicyOutcome {
    /// The policy this outcome was solved under
    pub policy: Policy,
    /// The solved Ramsey markup factor `k` (absent for uniform pricing)
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub markup: Option<f64>,
    /// Per-segment outcomes, in study-configuration order
    pub segments: Map<String, SegmentOutcome>,
    /// Total revenue across segments (matches the break-even target)
    pub total_revenue: f64,
    /// Total consumer surplus across segments
    pub total_surplus: f64,
}

/// The two solved scenarios, side by side
///
/// This is the data-transfer structure the solves hand to any presentation
/// layer; it carries every scalar the report and charts need, so those
/// layers have no dependency on the solver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TariffComparison {
    /// The solved uniform-pricing scenario
    pub uniform: PolicyOutcome,
    /// The solved Ramsey-pricing scenario
    pub ramsey: PolicyOutcome,
}

impl TariffComparison {
    /// Total consumer surplus under uniform pricing minus total consumer
    /// surplus under Ramsey pricing
    ///
    /// The classic price-discrimination trade-off predicts this is
    /// non-negative at a common revenue target. It is reported as an
    /// observation, not enforced as an invariant.
    pub fn surplus_gap(&self) -> f64 {
        self.uniform.total_surplus - self.ramsey.total_surplus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(policy: Policy, markup: Option<f64>, surplus: f64) -> PolicyOutcome {
        let mut segments = Map::default();
        segments.insert(
            "high-income".to_string(),
            SegmentOutcome {
                price: 10.0,
                quantity: 300.0,
                revenue: 3000.0,
                consumer_surplus: surplus,
            },
        );
        PolicyOutcome {
            policy,
            markup,
            segments,
            total_revenue: 3000.0,
            total_surplus: surplus,
        }
    }

    #[test]
    fn test_surplus_gap() {
        let comparison = TariffComparison {
            uniform: outcome(Policy::Uniform, None, 1500.0),
            ramsey: outcome(Policy::Ramsey, Some(-0.1), 1200.0),
        };
        assert_eq!(comparison.surplus_gap(), 300.0);
    }

    #[test]
    fn test_policy_display() {
        assert_eq!(Policy::Uniform.to_string(), "uniform");
        assert_eq!(Policy::Ramsey.to_string(), "ramsey");
    }

    #[test]
    fn test_serialization_shape() {
        let comparison = TariffComparison {
            uniform: outcome(Policy::Uniform, None, 1500.0),
            ramsey: outcome(Policy::Ramsey, Some(-0.1), 1200.0),
        };
        let json = serde_json::to_value(&comparison).unwrap();
        assert_eq!(json["uniform"]["policy"], "uniform");
        // Uniform outcomes omit the markup field entirely
        assert!(json["uniform"].get("markup").is_none());
        assert_eq!(json["ramsey"]["markup"], -0.1);
        assert_eq!(
            json["ramsey"]["segments"]["high-income"]["price"],
            10.0
        );
    }
}
