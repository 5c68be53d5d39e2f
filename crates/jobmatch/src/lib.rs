//! Client side of the external job-match service.
//!
//! The service scores how well a job description (PDF and/or pasted text)
//! matches the portfolio owner's background. This crate owns the request
//! validation, the HTTP call and the form state shown at the UI boundary;
//! the scoring itself happens remotely.

pub mod client;
pub mod error;
pub mod form;
pub mod types;

pub use client::{ClientConfig, HttpJobMatchClient, JobMatchService};
pub use error::{JobMatchError, ValidationError};
pub use form::{JobMatchForm, SkillBar};
pub use types::{HealthStatus, JobMatchRequest, MatchResult, PdfDocument, MAX_UPLOAD_BYTES};
