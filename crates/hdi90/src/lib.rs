//! HDI 2.0 scoring engine and the guided self-assessment session built around it.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
