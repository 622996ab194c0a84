use super::{Elasticity, LinearDemand};

/// A consumer segment: a named linear demand curve with its elasticity
///
/// The canonical study has two instances (high-income and low-income), but
/// nothing in the formulas depends on the count; the solver works over any
/// non-empty list of segments. The name keys the segment's entry in outcome
/// maps and in error reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DemandSegment {
    /// The segment's reporting name (unique within a study)
    pub name: String,
    /// The segment's linear demand curve
    pub demand: LinearDemand,
    /// The segment's demand elasticity
    pub elasticity: Elasticity,
}
