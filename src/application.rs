//! Application layer module
//!
//! Orchestrates the domain services into a complete harvest run.

pub mod harvest;

pub use harvest::HarvestDriver;
