//! Nickname-format error types.

/// Kinds of nickname-format errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FormatErrorKind {
    /// The format string references a placeholder that is not defined
    #[display("Unknown placeholder: {}", _0)]
    UnknownPlaceholder(String),
    /// A `$` is not followed by a valid placeholder name
    #[display("Malformed placeholder in format string")]
    MalformedPlaceholder,
    /// The rendered nickname exceeds the 32-character display limit
    #[display("Nickname '{}' is longer than 32 characters", _0)]
    NicknameTooLong(String),
}

/// Nickname-format error with location tracking.
///
/// # Examples
///
/// ```
/// use ladder_error::{FormatError, FormatErrorKind};
///
/// let err = FormatError::new(FormatErrorKind::UnknownPlaceholder("srr".to_string()));
/// assert!(format!("{}", err).contains("Unknown placeholder"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Format Error: {} at line {} in {}", kind, line, file)]
pub struct FormatError {
    /// The kind of error that occurred
    pub kind: FormatErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl FormatError {
    /// Create a new format error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FormatErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
