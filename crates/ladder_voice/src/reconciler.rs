//! The observe-diff-act reconciliation pass.

use crate::confirm::{ConfirmationKey, ConfirmationRouter};
use crate::name::{channel_name, rating_suffix, split_managed};
use ladder_core::{ChannelId, GuildId, GuildSettings, GuildVoiceCategory, VoiceChannel, VoiceState};
use ladder_error::{ChannelError, ChannelErrorKind, LadderResult};
use ladder_interface::{RemoteChannelService, Store, StoreTransaction};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Flags for one reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Provision every prefix up to its channel limit (administrative bulk mode)
    pub create_all_channels: bool,
    /// Re-apply the configured member limit to every managed channel
    pub adjust_member_limits: bool,
}

/// Remote operations issued by one pass.
///
/// A pass over an already-converged category issues none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Channels created
    pub created: usize,
    /// Channels deleted
    pub deleted: usize,
    /// Channels renamed
    pub renamed: usize,
    /// Member limits re-applied
    pub relimited: usize,
    /// Channels repositioned
    pub moved: usize,
}

impl PassReport {
    /// Total remote mutations issued.
    pub fn remote_operations(&self) -> usize {
        self.created + self.deleted + self.renamed + self.relimited + self.moved
    }
}

/// Channels under one parent, split by how the pass treats them.
struct Partition {
    /// Managed groups keyed by configured prefix, each sorted by index
    known: HashMap<String, Vec<VoiceChannel>>,
    /// Groups following the managed grammar whose prefix is not configured
    stale: Vec<Vec<VoiceChannel>>,
    /// Everything else
    unmanaged: Vec<VoiceChannel>,
}

impl Partition {
    fn of(observed: Vec<VoiceChannel>, category: &GuildVoiceCategory) -> Self {
        let mut grouped: HashMap<String, Vec<(u32, VoiceChannel)>> = HashMap::new();
        let mut unmanaged = Vec::new();

        for channel in observed {
            match split_managed(&channel.name) {
                Some((prefix, index)) => grouped.entry(prefix).or_default().push((index, channel)),
                None => unmanaged.push(channel),
            }
        }

        let mut known = HashMap::new();
        let mut stale = Vec::new();
        for (prefix, mut members) in grouped {
            members.sort_by_key(|(index, _)| *index);
            let channels: Vec<VoiceChannel> =
                members.into_iter().map(|(_, channel)| channel).collect();
            if category.rule(&prefix).is_some() {
                known.insert(prefix, channels);
            } else {
                stale.push(channels);
            }
        }
        Self {
            known,
            stale,
            unmanaged,
        }
    }

    /// Managed layout starts right after the last unmanaged channel.
    ///
    /// Stale groups are not part of the managed layout, so they count as
    /// unmanaged here.
    fn start_position(&self) -> u32 {
        self.unmanaged
            .iter()
            .chain(self.stale.iter().flatten())
            .map(|channel| channel.position)
            .max()
            .map_or(1, |position| position + 1)
    }
}

/// Brings a guild's voice channels into agreement with its configuration.
///
/// Each pass uses only state observed during that pass; a pass interrupted
/// anywhere self-corrects on the next trigger. Passes for the same parent
/// must be serialized by the caller.
pub struct ChannelReconciler<C, S> {
    channels: Arc<C>,
    store: Arc<S>,
    settings: Arc<GuildSettings>,
    router: Arc<ConfirmationRouter>,
    confirm_timeout: Duration,
}

impl<C, S> ChannelReconciler<C, S>
where
    C: RemoteChannelService,
    S: Store,
{
    /// Create a reconciler over the given collaborators.
    pub fn new(
        channels: Arc<C>,
        store: Arc<S>,
        settings: Arc<GuildSettings>,
        router: Arc<ConfirmationRouter>,
        confirm_timeout: Duration,
    ) -> Self {
        Self {
            channels,
            store,
            settings,
            router,
            confirm_timeout,
        }
    }

    /// The router through which the surrounding bot feeds channel events.
    pub fn router(&self) -> &Arc<ConfirmationRouter> {
        &self.router
    }

    /// Run one pass for a parent category.
    ///
    /// A no-op when the parent is not a managed category of the guild.
    #[instrument(skip(self), fields(guild = %guild, parent = %parent))]
    pub async fn reconcile(
        &self,
        guild: GuildId,
        parent: ChannelId,
        opts: ReconcileOptions,
    ) -> LadderResult<PassReport> {
        let Some(config) = self.settings.get(guild) else {
            debug!("guild is not configured");
            return Ok(PassReport::default());
        };
        let Some(category) = config.managed_category(parent) else {
            debug!("channel is not managed");
            return Ok(PassReport::default());
        };
        self.reconcile_category(parent, category, opts).await
    }

    /// Run a pass for every managed category of a guild.
    pub async fn reconcile_all(
        &self,
        guild: GuildId,
        opts: ReconcileOptions,
    ) -> LadderResult<PassReport> {
        let Some(config) = self.settings.get(guild) else {
            debug!(guild = %guild, "guild is not configured");
            return Ok(PassReport::default());
        };
        let mut total = PassReport::default();
        for category in &config.voice_categories {
            let report = self
                .reconcile_category(category.category_id, category, opts)
                .await?;
            total.created += report.created;
            total.deleted += report.deleted;
            total.renamed += report.renamed;
            total.relimited += report.relimited;
            total.moved += report.moved;
        }
        Ok(total)
    }

    /// React to a member joining, leaving, or moving between voice channels.
    pub async fn handle_voice_state(
        &self,
        guild: GuildId,
        old: VoiceState,
        new: VoiceState,
    ) -> LadderResult<()> {
        let mut parents = Vec::new();
        if let Some(parent) = old.parent() {
            parents.push(parent);
        }
        if let Some(parent) = new.parent() {
            if !parents.contains(&parent) {
                parents.push(parent);
            }
        }
        for parent in parents {
            self.reconcile(guild, parent, ReconcileOptions::default())
                .await?;
        }
        Ok(())
    }

    async fn reconcile_category(
        &self,
        parent: ChannelId,
        category: &GuildVoiceCategory,
        opts: ReconcileOptions,
    ) -> LadderResult<PassReport> {
        let mut report = PassReport::default();

        // Observe and group.
        let partition = Partition::of(self.channels.list_channels(parent).await?, category);

        // Stale groups: rules removed from the configuration. Never delete
        // an occupied channel.
        if category.remove_unknown {
            for group in &partition.stale {
                for channel in group {
                    if channel.is_empty() {
                        self.delete_confirmed(channel, &mut report).await?;
                    }
                }
            }
        }

        // Per-prefix create/delete decisions, in declaration order.
        for rule in &category.prefixes {
            let group = partition.known.get(&rule.name).cloned().unwrap_or_default();
            let empty: Vec<&VoiceChannel> =
                group.iter().filter(|channel| channel.is_empty()).collect();
            debug!(
                prefix = %rule.name,
                channels = group.len(),
                empty = empty.len(),
                "working on prefix"
            );

            if opts.create_all_channels {
                let mut count = group.len();
                while count < category.channel_limit {
                    count += 1;
                    self.create_confirmed(parent, &channel_name(&rule.name, count), rule, &mut report)
                        .await?;
                }
            } else if empty.is_empty() {
                if group.len() < category.channel_limit {
                    self.create_confirmed(
                        parent,
                        &channel_name(&rule.name, group.len() + 1),
                        rule,
                        &mut report,
                    )
                    .await?;
                }
            } else if empty.len() > 1 {
                // Keep the lowest-indexed spare, delete the rest.
                for channel in &empty[1..] {
                    self.delete_confirmed(channel, &mut report).await?;
                }
            }
        }

        // Re-observe: creates and deletes above are confirmed visible.
        let partition = Partition::of(self.channels.list_channels(parent).await?, category);

        // Rename/limit pass, building the managed layout in prefix order.
        let mut txn = self.store.begin().await?;
        let mut layout = Vec::new();
        for rule in &category.prefixes {
            let group = partition.known.get(&rule.name).cloned().unwrap_or_default();
            for (i, channel) in group.iter().enumerate() {
                let mut wanted = channel_name(&rule.name, i + 1);
                if category.show_rating_suffix {
                    if let Some((min, max)) = txn.min_max_rating(&channel.members).await? {
                        wanted.push_str(&rating_suffix(min, max));
                    }
                }
                if wanted != channel.name {
                    self.channels.rename_channel(channel.id, &wanted).await?;
                    report.renamed += 1;
                }
                if opts.adjust_member_limits {
                    self.channels
                        .set_member_limit(channel.id, rule.member_limit)
                        .await?;
                    report.relimited += 1;
                }
            }
            layout.extend(group);
        }
        txn.commit().await?;

        // Reposition pass: consecutive positions after the unmanaged block.
        let start_position = partition.start_position();
        for (i, channel) in layout.iter().enumerate() {
            let position = start_position + i as u32;
            if channel.position != position {
                self.channels.move_channel(channel.id, position).await?;
                report.moved += 1;
            }
        }

        Ok(report)
    }

    /// Issue a create and wait for its correlated confirmation.
    async fn create_confirmed(
        &self,
        parent: ChannelId,
        name: &str,
        rule: &ladder_core::PrefixRule,
        report: &mut PassReport,
    ) -> LadderResult<()> {
        debug!(name, "creating a new channel");
        let rx = self.router.expect(ConfirmationKey::Created(name.to_string()));
        self.channels
            .create_channel(parent, name, rule.member_limit)
            .await?;
        match tokio::time::timeout(self.confirm_timeout, rx).await {
            Ok(Ok(_)) => {
                report.created += 1;
                Ok(())
            }
            _ => Err(ChannelError::new(ChannelErrorKind::ConfirmationTimeout(
                name.to_string(),
            ))
            .into()),
        }
    }

    /// Issue a delete and wait for its correlated confirmation.
    async fn delete_confirmed(
        &self,
        channel: &VoiceChannel,
        report: &mut PassReport,
    ) -> LadderResult<()> {
        debug!(channel = %channel.id, name = %channel.name, "deleting channel");
        let rx = self.router.expect(ConfirmationKey::Deleted(channel.id));
        self.channels.delete_channel(channel.id).await?;
        match tokio::time::timeout(self.confirm_timeout, rx).await {
            Ok(Ok(_)) => {
                report.deleted += 1;
                Ok(())
            }
            _ => Err(ChannelError::new(ChannelErrorKind::ConfirmationTimeout(
                channel.id.to_string(),
            ))
            .into()),
        }
    }
}
