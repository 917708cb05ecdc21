//! Top-level error wrapper types.

use crate::{ChannelError, ConfigError, DirectoryError, FormatError, MemberError, StoreError};

/// Union of every error domain in the engine.
///
/// # Examples
///
/// ```
/// use ladder_error::{LadderError, StoreError, StoreErrorKind};
///
/// let store_err = StoreError::new(StoreErrorKind::Commit("connection reset".to_string()));
/// let err: LadderError = store_err.into();
/// assert!(format!("{}", err).contains("Commit failed"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LadderErrorKind {
    /// Remote rating-directory error
    #[from(DirectoryError)]
    Directory(DirectoryError),
    /// Record-store error
    #[from(StoreError)]
    Store(StoreError),
    /// Remote channel-service error
    #[from(ChannelError)]
    Channel(ChannelError),
    /// Guild-member display error
    #[from(MemberError)]
    Member(MemberError),
    /// Nickname-format error
    #[from(FormatError)]
    Format(FormatError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Ladder error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Ladder Error: {}", _0)]
pub struct LadderError(Box<LadderErrorKind>);

impl LadderError {
    /// Create a new error from a kind.
    pub fn new(kind: LadderErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LadderErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to LadderErrorKind
impl<T> From<T> for LadderError
where
    T: Into<LadderErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Ladder operations.
///
/// # Examples
///
/// ```
/// use ladder_error::{LadderResult, DirectoryError, DirectoryErrorKind};
///
/// fn fetch_rating() -> LadderResult<i32> {
///     Err(DirectoryError::new(DirectoryErrorKind::Transient("503".to_string())))?
/// }
/// ```
pub type LadderResult<T> = std::result::Result<T, LadderError>;
