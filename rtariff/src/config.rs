//! Study configuration loading.
//!
//! The computational core takes a fixed, validated [`StudyConfig`]; this
//! module is the only place that decides where those constants come from.
//! Configuration is layered from default values, an optional TOML file,
//! and environment variables.

use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tariff_core::models::StudyConfig;

/// Command-line arguments shared by every subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to a TOML study configuration.
    #[arg(short, long, env = "RTARIFF_CONFIG")]
    pub config: Option<PathBuf>,
}

/// The main application configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// The tariff study parameters (segments, costs, capacity)
    #[serde(default)]
    pub study: StudyConfig,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. Config file given by the CLI
    /// 3. The canonical study constants (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `RTARIFF_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Halve the fixed-cost burden
    /// export RTARIFF_STUDY__FIXED_COSTS=1000000
    ///
    /// # Point at a different study file
    /// export RTARIFF_CONFIG=studies/two-segment.toml
    /// ```
    pub fn load(cli: &ConfigArgs) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = &cli.config {
            if path.exists() {
                config = config.add_source(config::File::from(path.as_path()))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps RTARIFF_STUDY__FIXED_COSTS to study.fixed_costs
        config = config.add_source(
            config::Environment::with_prefix("RTARIFF")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let built_config = config.build()?;
        built_config.try_deserialize().map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_canonical() {
        let cli = ConfigArgs { config: None };
        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.study, StudyConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let cli = ConfigArgs {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
        };
        assert!(AppConfig::load(&cli).is_err());
    }
}
