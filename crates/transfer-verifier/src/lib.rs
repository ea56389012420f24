//! Transfer eligibility verification for community-college students.
//!
//! The [`eligibility`] engine is pure and reads only the reference data it was
//! constructed with. Everything else in this crate (reference-data loading,
//! transcript import, explanations, persistence and HTTP routing) is plumbing
//! around that engine.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod explainer;
pub mod reference;
pub mod telemetry;
pub mod transcript;
pub mod verification;
