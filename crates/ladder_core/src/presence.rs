//! Member presence and voice-state shapes.

use crate::ChannelId;
use serde::{Deserialize, Serialize};

/// A member's presence status on the chat service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Presence {
    /// Actively online
    Online,
    /// Online but idle
    Idle,
    /// Online with notifications muted
    DoNotDisturb,
    /// Not connected
    Offline,
}

/// Whether a member currently sits in a voice channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoiceState {
    /// Connected to a voice channel under the given parent category
    InVoice {
        /// Parent category of the occupied channel
        parent: ChannelId,
    },
    /// Not connected to voice
    NotInVoice,
}

impl VoiceState {
    /// The occupied parent category, if any.
    pub fn parent(&self) -> Option<ChannelId> {
        match self {
            VoiceState::InVoice { parent } => Some(*parent),
            VoiceState::NotInVoice => None,
        }
    }
}
