/**
 * These are the root-finding implementations the tariff solves run on.
 */
mod impls;
pub use impls::*;

/**
 * These are the core types the implementations operate on.
 */
mod types;
pub use types::*;

/**
 * These are the scenario-level solves: uniform break-even price and
 * Ramsey markup factor, assembled into policy outcomes.
 */
mod study;
pub use study::*;
