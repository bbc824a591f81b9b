use fsreview_core_types::SessionId;
use thiserror::Error;

/// Result type alias using the canonical ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the engine maps to exactly one kind. Callers
/// branch on the kind (never on message text): a `NotFound` baseline can be
/// turned into a first-run comparison by the front end, a `Tamper` never can.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Missing or invalid Policy / ReportConfig, or conflicting operating modes
    ConfigError,
    /// No baseline Review for a host, or no snapshot artifact matched a search
    NotFound,
    /// A stored Review no longer matches the artifact it references
    Tamper,
    /// Snapshot or config bytes failed to parse into the data model
    Decode,
    /// A rule matcher could not be compiled
    RuleConfig,

    /// Structurally invalid input (e.g. duplicate paths in one Walk)
    InvalidInput,
    /// A session step was invoked out of order
    InvalidState,
    /// The produced diff failed its determinism self-check
    DeterminismViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::ConfigError => "ERR_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Tamper => "ERR_TAMPER",
            ExErrorKind::Decode => "ERR_DECODE",
            ExErrorKind::RuleConfig => "ERR_RULE_CONFIG",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidState => "ERR_INVALID_STATE",
            ExErrorKind::DeterminismViolation => "ERR_DETERMINISM_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind for programmatic handling plus optional context
/// (operation, path, hostname, rule) for humans reading the log.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    hostname: Option<String>,
    rule: Option<String>,
    session_id: Option<SessionId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            hostname: None,
            rule: None,
            session_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file or artifact path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add hostname context
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Add rule name context
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    /// Add session correlation context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the hostname context, if any
    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// Get the rule context, if any
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    /// Get the session context, if any
    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    /// Get the error message
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
        if let Some(hostname) = &self.hostname {
            write!(f, " (hostname: {})", hostname)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(rule) = &self.rule {
            write!(f, " (rule: {})", rule)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for fsreview operations
///
/// Variants name the concrete condition; conversion into [`ExError`]
/// assigns the stable kind.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FsReviewError {
    // ===== Baseline / Review =====
    /// No Review recorded for the host
    #[error("No last known good review for host {hostname}")]
    ReviewNotFound { hostname: String },

    /// Stored fingerprint does not match the referenced artifact
    #[error("Baseline for host {hostname} was modified outside of a review update: {reference} has {method} {actual}, review recorded {expected}")]
    FingerprintMismatch {
        hostname: String,
        reference: String,
        method: String,
        expected: String,
        actual: String,
    },

    /// Referenced baseline artifact no longer exists
    #[error("Baseline artifact {reference} for host {hostname} is missing")]
    BaselineArtifactMissing { hostname: String, reference: String },

    /// Baseline artifact holds a different Walk than the Review names
    #[error("Baseline artifact {reference} holds walk {actual}, review recorded {expected}")]
    WalkIdMismatch {
        reference: String,
        expected: String,
        actual: String,
    },

    // ===== Snapshot artifacts =====
    /// No artifact matched a search pattern
    #[error("No walk found matching {pattern} in {search_path}")]
    WalkNotFound {
        pattern: String,
        search_path: String,
    },

    /// Two files in one Walk normalize to the same path
    #[error("Walk {walk_id} lists path {path} more than once")]
    DuplicatePath { walk_id: String, path: String },

    // ===== Configuration =====
    /// Unsupported config or snapshot version
    #[error("Unsupported {what} version {version}, expected {expected}")]
    UnsupportedVersion {
        what: String,
        version: u32,
        expected: u32,
    },

    /// A configured prefix is not an absolute path
    #[error("{field} prefix {prefix:?} must be an absolute path")]
    RelativePrefix { field: String, prefix: String },

    /// A Policy that includes nothing
    #[error("Policy include list is empty")]
    EmptyInclude,

    /// Artifact extension does not map to a codec
    #[error("No codec for artifact {path}")]
    UnknownEncoding { path: String },

    /// Both baseline-mode and file-mode inputs supplied
    #[error("[hostname review-file walk-path] and [[before-file] after-file] are mutually exclusive")]
    ConflictingModes,

    /// Neither mode has its required inputs
    #[error("either [hostname review-file walk-path] OR [[before-file] after-file] need to be specified")]
    MissingModeInputs,

    // ===== Session =====
    /// Session step invoked from the wrong state
    #[error("Cannot {step} while session is {state}")]
    SessionOrder { step: String, state: String },
}

/// Conversion from FsReviewError to ExError
impl From<FsReviewError> for ExError {
    fn from(err: FsReviewError) -> Self {
        let message = err.to_string();
        match err {
            FsReviewError::ReviewNotFound { hostname } => ExError::new(ExErrorKind::NotFound)
                .with_op("read_last_good")
                .with_hostname(hostname)
                .with_message(message),

            FsReviewError::FingerprintMismatch {
                hostname, reference, ..
            } => ExError::new(ExErrorKind::Tamper)
                .with_op("verify_baseline")
                .with_hostname(hostname)
                .with_path(reference)
                .with_message(message),

            FsReviewError::BaselineArtifactMissing {
                hostname,
                reference,
            } => ExError::new(ExErrorKind::Tamper)
                .with_op("verify_baseline")
                .with_hostname(hostname)
                .with_path(reference)
                .with_message(message),

            FsReviewError::WalkIdMismatch { reference, .. } => {
                ExError::new(ExErrorKind::Tamper)
                    .with_op("verify_baseline")
                    .with_path(reference)
                    .with_message(message)
            }

            FsReviewError::WalkNotFound { search_path, .. } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("read_latest_walk")
                    .with_path(search_path)
                    .with_message(message)
            }

            FsReviewError::DuplicatePath { path, .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("index_walk")
                .with_path(path)
                .with_message(message),

            FsReviewError::UnsupportedVersion { .. }
            | FsReviewError::EmptyInclude
            | FsReviewError::ConflictingModes
            | FsReviewError::MissingModeInputs => {
                ExError::new(ExErrorKind::ConfigError).with_message(message)
            }

            FsReviewError::RelativePrefix { prefix, .. } => {
                ExError::new(ExErrorKind::ConfigError)
                    .with_path(prefix)
                    .with_message(message)
            }

            FsReviewError::UnknownEncoding { path } => ExError::new(ExErrorKind::ConfigError)
                .with_op("select_codec")
                .with_path(path)
                .with_message(message),

            FsReviewError::SessionOrder { step, .. } => ExError::new(ExErrorKind::InvalidState)
                .with_op(step)
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::ConfigError,
            ExErrorKind::NotFound,
            ExErrorKind::Tamper,
            ExErrorKind::Decode,
            ExErrorKind::RuleConfig,
            ExErrorKind::InvalidInput,
            ExErrorKind::InvalidState,
            ExErrorKind::DeterminismViolation,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::Tamper)
            .with_op("verify_baseline")
            .with_hostname("web-01")
            .with_message("digest changed");
        let text = err.to_string();
        assert!(text.starts_with("[ERR_TAMPER]"));
        assert!(text.contains("verify_baseline"));
        assert!(text.contains("web-01"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Decode).with_source(inner);
        let source = std::error::Error::source(&outer).unwrap();
        assert!(source.to_string().starts_with("[ERR_IO]"));
    }
}
