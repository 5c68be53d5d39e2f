//! Request and response types for the job-match service.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{JobMatchError, ValidationError};

/// Upload limit enforced by the service (30 MB).
pub const MAX_UPLOAD_BYTES: usize = 30 * 1024 * 1024;

/// A job description PDF selected by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl PdfDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read a document from disk, keeping only the file name for the upload.
    pub fn from_path(path: &Path) -> Result<Self, JobMatchError> {
        let bytes = std::fs::read(path).map_err(|source| JobMatchError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document.pdf".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ValidationError::NotPdf {
                file_name: self.file_name.clone(),
            });
        }
        if self.bytes.is_empty() {
            return Err(ValidationError::EmptyFile {
                file_name: self.file_name.clone(),
            });
        }
        if self.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ValidationError::TooLarge {
                size: self.bytes.len(),
                limit_mb: MAX_UPLOAD_BYTES / (1024 * 1024),
            });
        }
        Ok(())
    }
}

/// One analysis request: a PDF, free text, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobMatchRequest {
    pub document: Option<PdfDocument>,
    pub text: Option<String>,
}

impl JobMatchRequest {
    pub fn new(document: Option<PdfDocument>, text: Option<String>) -> Self {
        Self { document, text }
    }

    /// Pasted text with surrounding whitespace removed; `None` when blank.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }

    /// Check the request before it goes on the wire.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match (&self.document, self.trimmed_text()) {
            (None, None) => Err(ValidationError::Empty),
            (Some(doc), _) => doc.validate(),
            (None, Some(_)) => Ok(()),
        }
    }
}

/// Structured analysis returned by the service.
///
/// The service has shipped two field names for the score; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(alias = "match_score")]
    pub score: f32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default = "default_summary")]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub skills_match: BTreeMap<String, f32>,
    #[serde(default)]
    pub processing_time_ms: Option<f64>,
}

fn default_summary() -> String {
    "No analysis available.".to_string()
}

impl MatchResult {
    /// Clamp the score into 0..=100 (NaN becomes 0).
    pub fn normalized(mut self) -> Self {
        self.score = if self.score.is_nan() {
            0.0
        } else {
            self.score.clamp(0.0, 100.0)
        };
        self
    }

    /// Score rounded for display, e.g. `87`.
    pub fn score_percent(&self) -> u8 {
        self.score.round().clamp(0.0, 100.0) as u8
    }
}

/// Reply from the service's health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}
