//! Error types for the Ladder sync and reconciliation engine.
//!
//! Each external collaborator gets its own error domain with a kind enum and
//! a location-carrying wrapper struct. The top-level [`LadderError`] collects
//! all domains behind a single `From`-friendly type.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod channel;
mod config;
mod directory;
mod error;
mod format;
mod member;
mod store;

pub use channel::{ChannelError, ChannelErrorKind};
pub use config::{ConfigError, ConfigErrorKind};
pub use directory::{DirectoryError, DirectoryErrorKind};
pub use error::{LadderError, LadderErrorKind, LadderResult};
pub use format::{FormatError, FormatErrorKind};
pub use member::{MemberError, MemberErrorKind};
pub use store::{StoreError, StoreErrorKind};
