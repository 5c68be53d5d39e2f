//! Form state for the job-match section of the resume page.

use crate::client::JobMatchService;
use crate::error::JobMatchError;
use crate::types::{JobMatchRequest, MatchResult, PdfDocument};

/// One labelled bar in the strengths/gaps charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillBar {
    pub label: String,
    /// Bar fill in percent.
    pub value: u8,
}

/// Bars descend from 90% in steps of 12, never below 35%.
fn bars(items: &[String]) -> Vec<SkillBar> {
    items
        .iter()
        .enumerate()
        .map(|(i, label)| SkillBar {
            label: label.clone(),
            value: 90usize.saturating_sub(i * 12).max(35) as u8,
        })
        .collect()
}

/// Inputs, last result and last error of the job-match form.
///
/// A failed submission leaves the inputs exactly as they were so the user can
/// retry, and never leaves a stale result on screen.
#[derive(Debug, Default)]
pub struct JobMatchForm {
    file: Option<PdfDocument>,
    text: String,
    result: Option<MatchResult>,
    error: Option<String>,
    pending: bool,
}

impl JobMatchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file(&mut self, file: Option<PdfDocument>) {
        self.file = file;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn file(&self) -> Option<&PdfDocument> {
        self.file.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True between `begin_submit` and `finish_submit`; the analyze button is disabled.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Label for the analyze button.
    pub fn button_label(&self) -> &'static str {
        if self.pending {
            "Analyzing..."
        } else {
            "Analyze Match"
        }
    }

    /// Start a submission: clears the previous outcome, validates the inputs and
    /// builds the request. Returns `None` when nothing should be sent.
    pub fn begin_submit(&mut self) -> Option<JobMatchRequest> {
        if self.pending {
            log::debug!("Job match already in flight, ignoring submit");
            return None;
        }
        self.result = None;
        self.error = None;
        let text = (!self.text.trim().is_empty()).then(|| self.text.clone());
        let request = JobMatchRequest::new(self.file.clone(), text);
        if let Err(e) = request.validate() {
            self.error = Some(e.to_string());
            return None;
        }
        self.pending = true;
        Some(request)
    }

    /// Record the outcome of a submission started with `begin_submit`.
    pub fn finish_submit(&mut self, outcome: Result<MatchResult, JobMatchError>) {
        self.pending = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                log::warn!("Job match failed: {e}");
                self.result = None;
                self.error = Some(e.to_string());
            }
        }
    }

    /// Validate, call the service and record the outcome in one step.
    pub fn submit(&mut self, service: &dyn JobMatchService) {
        if let Some(request) = self.begin_submit() {
            let outcome = service.analyze(&request);
            self.finish_submit(outcome);
        }
    }

    pub fn strength_bars(&self) -> Vec<SkillBar> {
        self.result.as_ref().map(|r| bars(&r.strengths)).unwrap_or_default()
    }

    pub fn gap_bars(&self) -> Vec<SkillBar> {
        self.result.as_ref().map(|r| bars(&r.gaps)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::client::{ClientConfig, HttpJobMatchClient};
    use std::cell::Cell;
    use std::net::TcpListener;
    use std::time::Duration;

    struct Canned {
        outcome: fn() -> Result<MatchResult, JobMatchError>,
        calls: Cell<u32>,
    }

    impl JobMatchService for Canned {
        fn analyze(&self, _request: &JobMatchRequest) -> Result<MatchResult, JobMatchError> {
            self.calls.set(self.calls.get() + 1);
            (self.outcome)()
        }
    }

    fn good() -> Result<MatchResult, JobMatchError> {
        Ok(MatchResult {
            score: 64.0,
            strengths: (0..7).map(|i| format!("s{i}")).collect(),
            gaps: vec!["Kubernetes".to_string()],
            summary: "Decent".to_string(),
            recommendations: Vec::new(),
            skills_match: Default::default(),
            processing_time_ms: None,
        })
    }

    fn unreachable_service() -> Result<MatchResult, JobMatchError> {
        Err(JobMatchError::Status {
            status: 503,
            message: "AI analysis service is not available".to_string(),
        })
    }

    #[test]
    fn empty_form_shows_validation_message_without_calling() {
        let service = Canned { outcome: good, calls: Cell::new(0) };
        let mut form = JobMatchForm::new();
        form.set_text("   ");
        form.submit(&service);
        assert_eq!(service.calls.get(), 0);
        assert_eq!(form.error(), Some(ValidationError::Empty.to_string().as_str()));
        assert!(form.result().is_none());
    }

    #[test]
    fn failure_keeps_inputs_and_clears_result() {
        let mut form = JobMatchForm::new();
        let pdf = PdfDocument::new("jd.pdf", b"%PDF".to_vec());
        form.set_file(Some(pdf.clone()));
        form.set_text("Senior frontend");

        form.submit(&Canned { outcome: good, calls: Cell::new(0) });
        assert!(form.result().is_some());

        form.submit(&Canned { outcome: unreachable_service, calls: Cell::new(0) });
        assert!(form.result().is_none());
        assert_eq!(form.error(), Some("AI analysis service is not available"));
        assert_eq!(form.file(), Some(&pdf));
        assert_eq!(form.text(), "Senior frontend");
        assert!(!form.is_pending());
    }

    #[test]
    fn unreachable_server_sets_one_error_and_keeps_text() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = HttpJobMatchClient::new(&ClientConfig {
            base_url: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
        })
        .unwrap();

        let mut form = JobMatchForm::new();
        form.set_text("Role");
        form.submit(&client);
        let error = form.error().unwrap();
        assert!(error.starts_with("Could not reach the job-match service: "), "{error}");
        assert_eq!(error.matches("Could not reach").count(), 1);
        assert!(form.result().is_none());
        assert_eq!(form.text(), "Role");
        assert!(!form.is_pending());
    }

    #[test]
    fn success_clears_previous_error() {
        let mut form = JobMatchForm::new();
        form.set_text("Role");
        form.submit(&Canned { outcome: unreachable_service, calls: Cell::new(0) });
        assert!(form.error().is_some());
        form.submit(&Canned { outcome: good, calls: Cell::new(0) });
        assert!(form.error().is_none());
        assert_eq!(form.result().map(|r| r.score), Some(64.0));
    }

    #[test]
    fn pending_blocks_second_submit() {
        let mut form = JobMatchForm::new();
        form.set_text("Role");
        assert!(form.begin_submit().is_some());
        assert!(form.is_pending());
        assert_eq!(form.button_label(), "Analyzing...");
        assert!(form.begin_submit().is_none());
        form.finish_submit(good());
        assert!(!form.is_pending());
    }

    #[test]
    fn bars_descend_with_floor() {
        let mut form = JobMatchForm::new();
        form.set_text("Role");
        form.submit(&Canned { outcome: good, calls: Cell::new(0) });
        let values: Vec<u8> = form.strength_bars().iter().map(|b| b.value).collect();
        assert_eq!(values, vec![90, 78, 66, 54, 42, 35, 35]);
        assert_eq!(form.gap_bars()[0].label, "Kubernetes");
    }
}
