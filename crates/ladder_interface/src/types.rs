//! Value types crossing the collaborator seams.

use ladder_core::{GuildId, Presence, VoiceState};
use serde::{Deserialize, Serialize};

/// Reference to a rank icon image, delivered alongside promotions.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display, derive_more::From,
)]
pub struct IconRef(pub String);

/// A successful rating lookup from the remote directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLookup {
    /// The current skill rating
    pub rating: i32,
    /// Icon for the corresponding rank tier
    pub rank_icon: IconRef,
}

/// A member's observable state in one guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildMemberState {
    /// The guild this state belongs to
    pub guild: GuildId,
    /// Current display name in the guild
    pub nickname: String,
    /// Presence status
    pub presence: Presence,
    /// Voice connection state
    pub voice: VoiceState,
}

/// Categories of user-facing warnings emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum WarningKind {
    /// A rendered nickname exceeds the 32-character display limit
    NicknameTooLong,
}
