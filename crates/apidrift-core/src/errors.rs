use thiserror::Error;

/// Result type alias using SummaryError
pub type Result<T> = std::result::Result<T, SummaryError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable code usable by scripts wrapping the CLI and by
/// hosts that surface errors over an API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// Raw diff payload could not be deserialized into the raw diff tree
    MalformedDiff,
    /// An API description could not be parsed
    InvalidDocument,

    // Lookup
    /// A changed operation is missing from the old or new API description
    OperationNotFound,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MalformedDiff => "ERR_MALFORMED_DIFF",
            ExErrorKind::InvalidDocument => "ERR_INVALID_DOCUMENT",
            ExErrorKind::OperationNotFound => "ERR_OPERATION_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the operation context (HTTP method and path)
/// when the failure concerns one endpoint.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    method: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            method: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context (the apidrift function that failed)
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add HTTP method context
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Add endpoint path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        match (&self.method, &self.path) {
            (Some(method), Some(path)) => write!(f, " ({} {})", method, path)?,
            (None, Some(path)) => write!(f, " ({})", path)?,
            _ => {}
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Which API description a lookup ran against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSide {
    Old,
    New,
}

impl std::fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentSide::Old => f.write_str("old"),
            DocumentSide::New => f.write_str("new"),
        }
    }
}

/// The part of the `(method, path)` key that could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPart {
    Path,
    Method,
}

/// Error taxonomy for summarization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// The raw diff payload is not the shape the comparison engine emits
    #[error("Malformed diff payload: {message}")]
    MalformedDiff { message: String },

    /// A changed operation is absent from one of the API descriptions
    #[error("Operation {method} {path} not found in {side} document (missing {missing:?})")]
    OperationNotFound {
        method: String,
        path: String,
        side: DocumentSide,
        missing: MissingPart,
    },

    /// An API description could not be parsed as JSON or YAML
    #[error("Invalid API description: {message}")]
    InvalidDocument { message: String },

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SummaryError> for ExError {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::MalformedDiff { message } => ExError::new(ExErrorKind::MalformedDiff)
                .with_op("parse_raw_diff")
                .with_message(message),

            SummaryError::OperationNotFound {
                method,
                path,
                side,
                missing,
            } => {
                let what = match missing {
                    MissingPart::Path => "path",
                    MissingPart::Method => "method",
                };
                ExError::new(ExErrorKind::OperationNotFound)
                    .with_op("lookup_operation")
                    .with_method(method)
                    .with_path(path)
                    .with_message(format!("{} not present in {} document", what, side))
            }

            SummaryError::InvalidDocument { message } => {
                ExError::new(ExErrorKind::InvalidDocument)
                    .with_op("parse_document")
                    .with_message(message)
            }

            SummaryError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),

            SummaryError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SummaryError {
    fn from(err: serde_json::Error) -> Self {
        SummaryError::Serialization {
            message: err.to_string(),
        }
    }
}
