//! Declarative per-guild configuration.

use crate::{ChannelId, GuildId, User, VoiceState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// One managed channel prefix with its member limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    /// Channel-name prefix, e.g. `"Comp"`
    pub name: String,
    /// Member limit applied to channels created under this prefix
    pub member_limit: u32,
}

/// Declarative configuration for one managed voice-channel category.
///
/// The reconciler brings the remote channel set under `category_id` into
/// agreement with this description on every pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildVoiceCategory {
    /// The parent category channel
    pub category_id: ChannelId,
    /// Managed prefixes in declaration order
    pub prefixes: Vec<PrefixRule>,
    /// Maximum number of channels per prefix
    pub channel_limit: usize,
    /// Delete empty channels whose prefix is no longer configured
    pub remove_unknown: bool,
    /// Append the `[min–max]` rating suffix to managed channel names, and
    /// show ratings in nicknames of members inside this category
    pub show_rating_suffix: bool,
}

impl GuildVoiceCategory {
    /// Look up the rule for a prefix, if it is configured.
    pub fn rule(&self, prefix: &str) -> Option<&PrefixRule> {
        self.prefixes.iter().find(|p| p.name == prefix)
    }
}

/// Per-guild configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuildConfig {
    /// Channel receiving promotion congratulations, if any
    pub congrats_channel_id: Option<ChannelId>,
    /// Show the rating tag in every member's nickname by default
    pub show_rating_in_nicks_by_default: bool,
    /// Managed voice-channel categories
    pub voice_categories: Vec<GuildVoiceCategory>,
}

impl GuildConfig {
    /// The category configuration for a parent channel, if it is managed.
    pub fn managed_category(&self, parent: ChannelId) -> Option<&GuildVoiceCategory> {
        self.voice_categories
            .iter()
            .find(|c| c.category_id == parent)
    }

    /// Decide whether a member's nickname should carry the rating tag.
    ///
    /// True when the guild shows ratings by default, when the user opted in,
    /// or when the member currently sits in a managed category that shows
    /// ratings.
    pub fn show_rating_for(&self, user: &User, voice: &VoiceState) -> bool {
        if self.show_rating_in_nicks_by_default || user.always_show_rating {
            return true;
        }
        match voice {
            VoiceState::InVoice { parent } => self
                .managed_category(*parent)
                .is_some_and(|cat| cat.show_rating_suffix),
            VoiceState::NotInVoice => false,
        }
    }
}

/// The engine's explicit guild-configuration map.
///
/// Owned by the engine instance and shared between the sync pipeline and the
/// channel reconciler; there is no ambient global lookup.
#[derive(Debug, Default)]
pub struct GuildSettings {
    guilds: RwLock<HashMap<GuildId, GuildConfig>>,
}

impl GuildSettings {
    /// Create an empty configuration map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the configuration for one guild.
    pub fn get(&self, guild: GuildId) -> Option<GuildConfig> {
        self.guilds
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&guild)
            .cloned()
    }

    /// Insert or replace the configuration for one guild.
    pub fn insert(&self, guild: GuildId, config: GuildConfig) {
        self.guilds
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(guild, config);
    }

    /// Remove a guild's configuration, e.g. on guild departure.
    pub fn remove(&self, guild: GuildId) -> Option<GuildConfig> {
        self.guilds
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(&guild)
    }

    /// Ids of all configured guilds.
    pub fn guild_ids(&self) -> Vec<GuildId> {
        self.guilds
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .copied()
            .collect()
    }
}
