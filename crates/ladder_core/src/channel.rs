//! Observed remote voice channels.

use crate::{ChannelId, UserId};
use serde::{Deserialize, Serialize};

/// A voice channel as observed on the remote service.
///
/// The reconciler treats the remote channel set as the single source of
/// truth on each pass; channel state is never cached across passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChannel {
    /// Remote channel id
    pub id: ChannelId,
    /// Current channel name
    pub name: String,
    /// Position within the parent category
    pub position: u32,
    /// The parent category channel
    pub parent_id: ChannelId,
    /// Members currently connected to the channel
    pub members: Vec<UserId>,
}

impl VoiceChannel {
    /// True when nobody is connected.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
