//! Scoring engine and result orchestration for the Daat political compass.
//!
//! The [`compass`] module holds the questionnaire domain: the question catalog, the
//! answer collector, the scoring engine that turns Likert answers into bounded axis
//! coordinates, and the adapters (analysis providers, persistence, share links,
//! reporting) that consume those coordinates.

pub mod compass;
pub mod config;
pub mod error;
pub mod telemetry;
