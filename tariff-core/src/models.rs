mod config;
mod demand;
mod elasticity;
mod outcome;
mod segment;

pub use config::{ConfigError, RawStudyConfig, StudyConfig};
pub use demand::{DemandError, LinearDemand, RawLinearDemand};
pub use elasticity::{Elasticity, ElasticityError};
pub use outcome::{Policy, PolicyOutcome, SegmentOutcome, TariffComparison};
pub use segment::DemandSegment;
