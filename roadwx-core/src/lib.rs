//! Core library for the `roadwx` CLI.
//!
//! This crate defines:
//! - Interpretation of free-form road-weather advisory lines
//! - Hazard classification from observations and official alerts
//! - Configuration (thresholds, phrasing vocabulary, routing)
//! - Route acquisition with retry and straight-line fallback
//!
//! It is used by `roadwx-cli`, but can also be reused by other binaries or services.

pub mod advice;
pub mod config;
pub mod engine;
pub mod error;
pub mod geo;
pub mod hazard;
pub mod model;
pub mod route;

pub use advice::{AdviceParser, Vocabulary, VocabularyConfig};
pub use config::{Config, RoutingConfig};
pub use engine::AdviceEngine;
pub use error::{RouteError, VocabularyError};
pub use geo::GeoPoint;
pub use hazard::{CautionReason, CautionThresholds, HazardClassifier};
pub use model::{AdviceBatch, Alert, ClassifiedAdvice, Observation, ParsedAdvice, Severity, Station};
pub use route::{RetryPolicy, RouteProvider, RouteProviderId};
