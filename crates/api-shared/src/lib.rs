//! # API Shared
//!
//! Shared utilities and definitions for the symptom analysis HTTP APIs.
//!
//! Contains:
//! - Wire request/response bodies (`types` module)
//! - The CORS policy every front end applies
//! - Shared services like `HealthService`

pub mod cors;
pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
