//! Record-store error types.

/// Kinds of store errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StoreErrorKind {
    /// Failed to open a transaction
    #[display("Failed to begin transaction: {}", _0)]
    Transaction(String),
    /// Record not found
    #[display("Record not found: {}", _0)]
    NotFound(String),
    /// Commit failed
    #[display("Commit failed: {}", _0)]
    Commit(String),
    /// The store backend reported an error
    #[display("Store backend error: {}", _0)]
    Backend(String),
}

/// Store error with location tracking.
///
/// # Examples
///
/// ```
/// use ladder_error::{StoreError, StoreErrorKind};
///
/// let err = StoreError::new(StoreErrorKind::NotFound("account 7".to_string()));
/// assert!(format!("{}", err).contains("not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Store Error: {} at line {} in {}", kind, line, file)]
pub struct StoreError {
    /// The kind of error that occurred
    pub kind: StoreErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StoreError {
    /// Create a new store error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StoreErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
