//! Errors from the remote rating directory.

/// Kinds of rating-directory errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum DirectoryErrorKind {
    /// The directory has no entry for this tag
    #[display("No rating found for tag: {}", _0)]
    NotFound(String),
    /// The directory was unreachable or rate-limited
    #[display("Transient directory failure: {}", _0)]
    Transient(String),
    /// The tag is not a well-formed directory identifier
    #[display("Invalid tag: {}", _0)]
    InvalidTag(String),
}

/// Rating-directory error with location tracking.
///
/// # Examples
///
/// ```
/// use ladder_error::{DirectoryError, DirectoryErrorKind};
///
/// let err = DirectoryError::new(DirectoryErrorKind::NotFound("Player#1234".to_string()));
/// assert!(format!("{}", err).contains("No rating found"));
/// assert!(err.is_not_found());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Directory Error: {} at line {} in {}", kind, line, file)]
pub struct DirectoryError {
    /// The kind of error that occurred
    pub kind: DirectoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl DirectoryError {
    /// Create a new directory error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: DirectoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the directory simply has no entry for the tag.
    ///
    /// Not-found is recorded as an absent rating, never counted as a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, DirectoryErrorKind::NotFound(_))
    }

    /// True when the failure is transient and worth retrying on a later sweep.
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, DirectoryErrorKind::Transient(_))
    }
}
