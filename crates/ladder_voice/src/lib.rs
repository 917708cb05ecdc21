//! Voice-channel reconciliation for the Ladder engine.
//!
//! The [`ChannelReconciler`] brings a guild's voice channels into agreement
//! with the declarative per-category configuration: one observe-diff-act
//! pass at a time, using only state observable on that pass. Channel create
//! and delete are acknowledged asynchronously by the remote service; the
//! [`ConfirmationRouter`] correlates those acknowledgements with bounded
//! waits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod confirm;
mod name;
mod reconciler;

pub use confirm::{ConfirmationKey, ConfirmationRouter};
pub use name::{base_name, channel_name, rating_suffix, split_managed};
pub use reconciler::{ChannelReconciler, PassReport, ReconcileOptions};
