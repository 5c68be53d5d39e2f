//! Blocking HTTP client for the job-match service.

use reqwest::blocking::{multipart, Client};
use std::time::Duration;

use crate::error::JobMatchError;
use crate::types::{HealthStatus, JobMatchRequest, MatchResult};

const MATCH_PATH: &str = "/api/match-job-pdf";
const HEALTH_PATH: &str = "/api/health";
const FALLBACK_MESSAGE: &str = "Failed to analyze job match";

/// Anything that can turn a job description into a match result.
pub trait JobMatchService {
    fn analyze(&self, request: &JobMatchRequest) -> Result<MatchResult, JobMatchError>;
}

/// Connection settings for [`HttpJobMatchClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Service root, e.g. `http://localhost:4000`.
    pub base_url: String,
    /// Whole-request timeout. The service runs an LLM call, so this is generous.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Talks to the service over multipart HTTP.
#[derive(Debug, Clone)]
pub struct HttpJobMatchClient {
    client: Client,
    base_url: String,
}

impl HttpJobMatchClient {
    pub fn new(config: &ClientConfig) -> Result<Self, JobMatchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(JobMatchError::Client)?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn build_form(request: &JobMatchRequest) -> Result<multipart::Form, JobMatchError> {
        let mut form = multipart::Form::new();
        if let Some(doc) = &request.document {
            let part = multipart::Part::bytes(doc.bytes.clone())
                .file_name(doc.file_name.clone())
                .mime_str("application/pdf")
                .map_err(JobMatchError::Client)?;
            form = form.part("file", part);
        }
        if let Some(text) = request.trimmed_text() {
            form = form.text("job_description", text.to_string());
        }
        Ok(form)
    }

    /// Query the service's health endpoint.
    pub fn health(&self) -> Result<HealthStatus, JobMatchError> {
        let response = self
            .client
            .get(self.url(HEALTH_PATH))
            .send()
            .map_err(JobMatchError::Network)?;
        let body = read_success_body(response)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl JobMatchService for HttpJobMatchClient {
    fn analyze(&self, request: &JobMatchRequest) -> Result<MatchResult, JobMatchError> {
        request.validate()?;
        let form = Self::build_form(request)?;
        log::info!(
            "Submitting job match (pdf: {}, text chars: {})",
            request.document.as_ref().map_or("none", |d| d.file_name.as_str()),
            request.trimmed_text().map_or(0, |t| t.chars().count())
        );
        let response = self
            .client
            .post(self.url(MATCH_PATH))
            .multipart(form)
            .send()
            .map_err(JobMatchError::Network)?;
        let body = read_success_body(response)?;
        let result: MatchResult = serde_json::from_str(&body)?;
        let result = result.normalized();
        log::info!("Job match scored {}%", result.score_percent());
        Ok(result)
    }
}

/// Return the body of a 2xx response, or turn anything else into a `Status` error.
fn read_success_body(response: reqwest::blocking::Response) -> Result<String, JobMatchError> {
    let status = response.status();
    if status.is_success() {
        return response.text().map_err(JobMatchError::Network);
    }
    let body = response.text().unwrap_or_default();
    let message = error_message(&body);
    log::warn!("Job match service returned {}: {}", status, message);
    Err(JobMatchError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Pull a human-readable message out of an error body.
///
/// The service answers with `{"detail": "..."}` or, for request validation,
/// `{"detail": [{"msg": "..."}, ...]}`. Anything else is shown verbatim.
pub(crate) fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return trimmed.to_string();
    };
    match value.get("detail") {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if msgs.is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                msgs.join("; ")
            }
        }
        _ => trimmed.to_string(),
    }
}
