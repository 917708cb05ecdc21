//! Core data types for the Ladder sync and reconciliation engine.
//!
//! This crate provides the model shared by every other Ladder crate: tracked
//! accounts and their rating history, the rank bucket table, declarative
//! guild voice-channel configuration, and the pure nickname formatter.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod account;
mod channel;
mod guild;
mod id;
mod nick;
mod presence;
mod rank;
mod sample;
mod user;
mod watermark;

pub use account::Account;
pub use channel::VoiceChannel;
pub use guild::{GuildConfig, GuildSettings, GuildVoiceCategory, PrefixRule};
pub use id::{AccountId, ChannelId, GuildId, SampleId, UserId};
pub use nick::{
    MAX_NICKNAME_LEN, RatingFacts, SYMBOL_DPS, SYMBOL_FLEX, SYMBOL_SUPPORT, SYMBOL_TANK,
    render_nickname,
};
pub use presence::{Presence, VoiceState};
pub use rank::Rank;
pub use sample::RatingSample;
pub use user::User;
pub use watermark::SyncWatermark;
