#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the tariff study.
///
/// This module contains the fundamental data structures that represent the
/// study's entities: linear demand curves, elasticities, the immutable
/// configuration enumerated at startup, and the solved outcome structures.
///
/// The models are primarily data with closed-form arithmetic and minimal
/// business logic; the iterative solves that produce outcomes live in the
/// `tariff-solver` crate, keeping presentation and persistence concerns
/// away from the domain entities.
pub mod models;

/// Ordered map used for per-segment outcome reporting.
///
/// We use a non-std collection here for its ordering semantics: segments
/// appear in outcome maps in study-configuration order, which keeps report
/// and serialization output stable across runs.
pub type Map<K, V> = indexmap::IndexMap<K, V, rustc_hash::FxBuildHasher>;
