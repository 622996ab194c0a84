use super::{DemandSegment, Elasticity, LinearDemand};

/// The immutable study configuration, enumerated at startup
///
/// Everything the computation needs is fixed here: the consumer segments,
/// the marginal cost of supply, the monthly fixed costs to recover, the
/// number of days used to convert them into a daily revenue target, and
/// the daily capacity constraint.
///
/// Construction always validates, whether through [`StudyConfig::new`] or
/// through deserialization, so a constructed value is always usable.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawStudyConfig", into = "RawStudyConfig")
)]
pub struct StudyConfig {
    segments: Vec<DemandSegment>,
    marginal_cost: f64,
    fixed_costs: f64,
    days_per_month: u32,
    capacity_constraint: f64,
}

impl StudyConfig {
    /// Creates a new study configuration with validation
    pub fn new(
        segments: Vec<DemandSegment>,
        marginal_cost: f64,
        fixed_costs: f64,
        days_per_month: u32,
        capacity_constraint: f64,
    ) -> Result<Self, ConfigError> {
        Self::try_from(RawStudyConfig {
            segments,
            marginal_cost,
            fixed_costs,
            days_per_month,
            capacity_constraint,
        })
    }

    /// The consumer segments, in reporting order
    pub fn segments(&self) -> &[DemandSegment] {
        &self.segments
    }

    /// The marginal cost of supplying one unit of energy
    pub fn marginal_cost(&self) -> f64 {
        self.marginal_cost
    }

    /// The monthly fixed costs the tariff must recover
    pub fn fixed_costs(&self) -> f64 {
        self.fixed_costs
    }

    /// The number of days used to convert monthly fixed costs to a daily target
    pub fn days_per_month(&self) -> u32 {
        self.days_per_month
    }

    /// The maximum energy supply per day
    pub fn capacity_constraint(&self) -> f64 {
        self.capacity_constraint
    }

    /// The daily revenue a pricing policy must raise to break even:
    /// `fixed_costs / days_per_month`
    pub fn break_even_target(&self) -> f64 {
        self.fixed_costs / f64::from(self.days_per_month)
    }
}

impl Default for StudyConfig {
    /// The canonical two-segment study constants from the original tariff memo
    fn default() -> Self {
        // Valid by inspection, so we skip re-validation.
        let segments = vec![
            DemandSegment {
                name: "high-income".into(),
                demand: unsafe { LinearDemand::new_unchecked(600.0, 30.0) },
                elasticity: unsafe { Elasticity::new_unchecked(-0.5) },
            },
            DemandSegment {
                name: "low-income".into(),
                demand: unsafe { LinearDemand::new_unchecked(800.0, 50.0) },
                elasticity: unsafe { Elasticity::new_unchecked(-1.5) },
            },
        ];
        Self {
            segments,
            marginal_cost: 50.0,
            fixed_costs: 2_000_000.0,
            days_per_month: 30,
            capacity_constraint: 1000.0,
        }
    }
}

/// A DTO to ensure that we always validate when we deserialize from an untrusted source
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug)]
pub struct RawStudyConfig {
    /// The consumer segments (at least one, names unique)
    pub segments: Vec<DemandSegment>,
    /// The marginal cost of supply (finite, non-negative)
    pub marginal_cost: f64,
    /// The monthly fixed costs (finite, non-negative)
    pub fixed_costs: f64,
    /// Days per month used for the daily break-even conversion (positive)
    pub days_per_month: u32,
    /// The daily capacity constraint (finite, positive)
    pub capacity_constraint: f64,
}

impl Into<RawStudyConfig> for StudyConfig {
    fn into(self) -> RawStudyConfig {
        RawStudyConfig {
            segments: self.segments,
            marginal_cost: self.marginal_cost,
            fixed_costs: self.fixed_costs,
            days_per_month: self.days_per_month,
            capacity_constraint: self.capacity_constraint,
        }
    }
}

impl TryFrom<RawStudyConfig> for StudyConfig {
    type Error = ConfigError;

    fn try_from(value: RawStudyConfig) -> Result<Self, Self::Error> {
        let RawStudyConfig {
            segments,
            marginal_cost,
            fixed_costs,
            days_per_month,
            capacity_constraint,
        } = value;

        if segments.is_empty() {
            return Err(ConfigError::NoSegments);
        }
        // Names key the outcome maps, so collisions would drop data.
        for (i, segment) in segments.iter().enumerate() {
            if segments[..i].iter().any(|s| s.name == segment.name) {
                return Err(ConfigError::DuplicateSegment(segment.name.clone()));
            }
        }
        if !marginal_cost.is_finite() || marginal_cost < 0.0 {
            return Err(ConfigError::MarginalCost(marginal_cost));
        }
        if !fixed_costs.is_finite() || fixed_costs < 0.0 {
            return Err(ConfigError::FixedCosts(fixed_costs));
        }
        if days_per_month == 0 {
            return Err(ConfigError::ZeroDays);
        }
        if !capacity_constraint.is_finite() || capacity_constraint <= 0.0 {
            return Err(ConfigError::Capacity(capacity_constraint));
        }

        Ok(Self {
            segments,
            marginal_cost,
            fixed_costs,
            days_per_month,
            capacity_constraint,
        })
    }
}

/// The various ways in which a study configuration can be invalid
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Error when no demand segments are provided
    #[error("At least one demand segment is required")]
    NoSegments,
    /// Error when two segments share a reporting name
    #[error("Segment names must be unique: '{0}' appears more than once")]
    DuplicateSegment(String),
    /// Error when the marginal cost is negative or non-finite
    #[error("Marginal cost must be finite and non-negative, got {0}")]
    MarginalCost(f64),
    /// Error when the fixed costs are negative or non-finite
    #[error("Fixed costs must be finite and non-negative, got {0}")]
    FixedCosts(f64),
    /// Error when days per month is zero
    #[error("Days per month must be positive")]
    ZeroDays,
    /// Error when the capacity constraint is non-positive or non-finite
    #[error("Capacity constraint must be finite and positive, got {0}")]
    Capacity(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_canonical() {
        let config = StudyConfig::default();
        assert_eq!(config.segments().len(), 2);
        assert_eq!(config.segments()[0].name, "high-income");
        assert_eq!(config.segments()[0].demand.intercept(), 600.0);
        assert_eq!(config.segments()[1].demand.slope(), 50.0);
        assert_eq!(config.marginal_cost(), 50.0);
        // 2,000,000 / 30 days
        assert!((config.break_even_target() - 66_666.666_666_666_67).abs() < 1e-6);
    }

    #[test]
    fn test_no_segments() {
        assert_eq!(
            StudyConfig::new(vec![], 50.0, 0.0, 30, 1000.0).unwrap_err(),
            ConfigError::NoSegments
        );
    }

    #[test]
    fn test_duplicate_segment_names() {
        let segment = StudyConfig::default().segments()[0].clone();
        let twin = segment.clone();
        assert_eq!(
            StudyConfig::new(vec![segment, twin], 50.0, 0.0, 30, 1000.0).unwrap_err(),
            ConfigError::DuplicateSegment("high-income".into())
        );
    }

    #[test]
    fn test_scalar_validation() {
        let segments = StudyConfig::default().segments().to_vec();
        assert_eq!(
            StudyConfig::new(segments.clone(), -1.0, 0.0, 30, 1000.0).unwrap_err(),
            ConfigError::MarginalCost(-1.0)
        );
        assert!(matches!(
            StudyConfig::new(segments.clone(), 50.0, f64::NAN, 30, 1000.0).unwrap_err(),
            ConfigError::FixedCosts(_)
        ));
        assert_eq!(
            StudyConfig::new(segments.clone(), 50.0, 0.0, 0, 1000.0).unwrap_err(),
            ConfigError::ZeroDays
        );
        assert_eq!(
            StudyConfig::new(segments, 50.0, 0.0, 30, 0.0).unwrap_err(),
            ConfigError::Capacity(0.0)
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = StudyConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: StudyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let json = r#"{
            "segments": [],
            "marginal_cost": 50.0,
            "fixed_costs": 0.0,
            "days_per_month": 30,
            "capacity_constraint": 1000.0
        }"#;
        assert!(serde_json::from_str::<StudyConfig>(json).is_err());
    }
}
