//! Correlated confirmation of asynchronous channel mutations.

use ladder_core::{ChannelId, VoiceChannel};
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

/// What a waiter is waiting for.
///
/// Creations are matched by the new channel's name, deletions by channel id;
/// both match exactly one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationKey {
    /// A channel with this name was created
    Created(String),
    /// This channel was deleted
    Deleted(ChannelId),
}

impl ConfirmationKey {
    fn matches(&self, channel: &VoiceChannel, deleted: bool) -> bool {
        match self {
            ConfirmationKey::Created(name) => !deleted && channel.name == *name,
            ConfirmationKey::Deleted(id) => deleted && channel.id == *id,
        }
    }
}

struct Waiter {
    key: ConfirmationKey,
    tx: oneshot::Sender<VoiceChannel>,
}

/// Routes channel lifecycle events to registered waiters.
///
/// The reconciler registers a waiter before issuing a create or delete and
/// awaits it under a timeout; the surrounding bot feeds remote channel
/// events in through [`channel_created`](Self::channel_created) and
/// [`channel_deleted`](Self::channel_deleted). Each event resolves at most
/// one waiter; events nobody waits for are dropped.
#[derive(Default)]
pub struct ConfirmationRouter {
    waiters: Mutex<Vec<Waiter>>,
}

impl ConfirmationRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in a confirmation before issuing the mutation.
    pub fn expect(&self, key: ConfirmationKey) -> oneshot::Receiver<VoiceChannel> {
        let (tx, rx) = oneshot::channel();
        self.waiters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Waiter { key, tx });
        rx
    }

    /// Feed a channel-created event.
    pub fn channel_created(&self, channel: VoiceChannel) {
        self.resolve(channel, false);
    }

    /// Feed a channel-deleted event.
    pub fn channel_deleted(&self, channel: VoiceChannel) {
        self.resolve(channel, true);
    }

    fn resolve(&self, channel: VoiceChannel, deleted: bool) {
        let mut waiters = self
            .waiters
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        // A waiter whose receiver timed out would otherwise swallow the
        // event meant for a later waiter on the same key.
        waiters.retain(|w| !w.tx.is_closed());
        let Some(position) = waiters
            .iter()
            .position(|w| w.key.matches(&channel, deleted))
        else {
            debug!(channel = %channel.id, deleted, "channel event without waiter");
            return;
        };
        let waiter = waiters.swap_remove(position);
        // The receiver may have timed out already; that is its problem.
        let _ = waiter.tx.send(channel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::UserId;

    fn channel(id: u64, name: &str) -> VoiceChannel {
        VoiceChannel {
            id: ChannelId(id),
            name: name.to_string(),
            position: 0,
            parent_id: ChannelId(1),
            members: Vec::<UserId>::new(),
        }
    }

    #[tokio::test]
    async fn test_created_matches_by_name() {
        let router = ConfirmationRouter::new();
        let rx = router.expect(ConfirmationKey::Created("Comp #1".to_string()));
        router.channel_created(channel(5, "Comp #1"));
        assert_eq!(rx.await.unwrap().id, ChannelId(5));
    }

    #[tokio::test]
    async fn test_deleted_matches_by_id() {
        let router = ConfirmationRouter::new();
        let rx = router.expect(ConfirmationKey::Deleted(ChannelId(5)));
        router.channel_deleted(channel(5, "Comp #2"));
        assert!(rx.await.is_ok());
    }

    #[tokio::test]
    async fn test_abandoned_waiter_does_not_consume_event() {
        let router = ConfirmationRouter::new();
        // First attempt timed out and dropped its receiver.
        let stale = router.expect(ConfirmationKey::Created("QP #1".to_string()));
        drop(stale);
        // The retry for the same name must get the confirmation.
        let rx = router.expect(ConfirmationKey::Created("QP #1".to_string()));
        router.channel_created(channel(7, "QP #1"));
        assert_eq!(rx.await.unwrap().id, ChannelId(7));
    }

    #[tokio::test]
    async fn test_wrong_event_does_not_resolve() {
        let router = ConfirmationRouter::new();
        let rx = router.expect(ConfirmationKey::Created("Comp #1".to_string()));
        router.channel_deleted(channel(5, "Comp #1"));
        router.channel_created(channel(6, "QP #1"));
        // Waiter still pending; dropping the router drops the sender.
        drop(router);
        assert!(rx.await.is_err());
    }
}
