//! Collaborator trait seams for the Ladder sync and reconciliation engine.
//!
//! The engine owns no transport and no persistence. Everything it talks to
//! lives behind the traits defined here: the rating directory, the record
//! store, the remote channel service, member display updates, and the
//! notification sink.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    MemberDisplay, NotificationSink, RemoteChannelService, RemoteDirectory, Store,
    StoreTransaction,
};
pub use types::{GuildMemberState, IconRef, RatingLookup, WarningKind};
