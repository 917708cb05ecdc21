//! Errors from guild-member display updates.

/// Kinds of member-display errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MemberErrorKind {
    /// The bot's role sits below the member's in the guild hierarchy
    #[display("Role hierarchy forbids updating member {}", _0)]
    Hierarchy(String),
    /// The member is not present in the guild
    #[display("Member not found: {}", _0)]
    NotFound(String),
    /// The remote service was unreachable or rate-limited
    #[display("Transient member-service failure: {}", _0)]
    Transient(String),
}

/// Member-display error with location tracking.
///
/// Hierarchy refusals are policy violations, never retried automatically;
/// the sync pipeline suppresses them on its best-effort nickname pass.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Member Error: {} at line {} in {}", kind, line, file)]
pub struct MemberError {
    /// The kind of error that occurred
    pub kind: MemberErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MemberError {
    /// Create a new member error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MemberErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the refusal came from role hierarchy.
    pub fn is_hierarchy(&self) -> bool {
        matches!(self.kind, MemberErrorKind::Hierarchy(_))
    }
}
