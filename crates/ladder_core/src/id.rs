//! Identifier newtypes.

use serde::{Deserialize, Serialize};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident, $inner:ty) => {
        $(#[$doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        pub struct $name(pub $inner);
    };
}

id_type!(
    /// Identifies a user (the chat-service member a set of accounts belongs to).
    UserId,
    u64
);
id_type!(
    /// Identifies a tracked account.
    AccountId,
    i64
);
id_type!(
    /// Identifies a single rating sample in an account's history.
    SampleId,
    i64
);
id_type!(
    /// Identifies a guild.
    GuildId,
    u64
);
id_type!(
    /// Identifies a channel or channel category on the remote service.
    ChannelId,
    u64
);
