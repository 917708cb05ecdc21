//! Errors from the remote voice-channel service.

/// Kinds of channel-service errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ChannelErrorKind {
    /// A create or delete was issued but its confirmation never arrived
    #[display("Timed out waiting for confirmation of {}", _0)]
    ConfirmationTimeout(String),
    /// The remote service refused the operation for permission reasons
    #[display("Permission denied: {}", _0)]
    PermissionDenied(String),
    /// The remote service was unreachable or rate-limited
    #[display("Transient channel-service failure: {}", _0)]
    Transient(String),
    /// The referenced channel no longer exists
    #[display("Unknown channel: {}", _0)]
    UnknownChannel(String),
}

/// Channel-service error with location tracking.
///
/// A [`ChannelErrorKind::ConfirmationTimeout`] is fatal to the current
/// reconciliation pass: later steps assume the mutation is visible, so the
/// pass aborts and the next trigger re-observes remote state from scratch.
///
/// # Examples
///
/// ```
/// use ladder_error::{ChannelError, ChannelErrorKind};
///
/// let err = ChannelError::new(ChannelErrorKind::ConfirmationTimeout("Comp #2".to_string()));
/// assert!(err.is_confirmation_timeout());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Channel Error: {} at line {} in {}", kind, line, file)]
pub struct ChannelError {
    /// The kind of error that occurred
    pub kind: ChannelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ChannelError {
    /// Create a new channel error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChannelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when an issued create/delete never confirmed.
    pub fn is_confirmation_timeout(&self) -> bool {
        matches!(self.kind, ChannelErrorKind::ConfirmationTimeout(_))
    }
}
