use thiserror::Error;

/// Problems with the user's input, caught before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PDF or paste the job description (or both).")]
    Empty,

    #[error("File type not allowed for {file_name:?}. Allowed: .pdf")]
    NotPdf { file_name: String },

    #[error("File too large ({size} bytes). Max size: {limit_mb}MB")]
    TooLarge { size: usize, limit_mb: usize },

    #[error("The selected file {file_name:?} is empty")]
    EmptyFile { file_name: String },
}

/// Everything that can go wrong talking to the job-match service.
///
/// `Display` is the single message shown to the user.
#[derive(Debug, Error)]
pub enum JobMatchError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Could not reach the job-match service: {0}")]
    Network(#[source] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from the job-match service: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl JobMatchError {
    /// HTTP status for server-side failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            JobMatchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            JobMatchError::Network(_) => true,
            JobMatchError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
