//! Reconciliation passes against a mock channel service.


use ladder_core::{ChannelId, GuildId, GuildSettings, VoiceState};
use ladder_error::LadderErrorKind;
use ladder_voice::{ChannelReconciler, ConfirmationRouter, ReconcileOptions};
use std::sync::Arc;
use std::time::Duration;
use voice_test_helpers::{MockChannelService, Op, RatingStore, category, guild_config};

const GUILD: GuildId = GuildId(1);
const PARENT: u64 = 10;

struct Rig {
    service: Arc<MockChannelService>,
    store: RatingStore,
    reconciler: ChannelReconciler<MockChannelService, RatingStore>,
}

fn rig(categories: Vec<ladder_core::GuildVoiceCategory>) -> Rig {
    let router = Arc::new(ConfirmationRouter::new());
    let service = Arc::new(MockChannelService::new(router.clone()));
    let store = RatingStore::new();
    let settings = Arc::new(GuildSettings::new());
    settings.insert(GUILD, guild_config(categories));
    let reconciler = ChannelReconciler::new(
        service.clone(),
        Arc::new(store.clone()),
        settings,
        router,
        Duration::from_secs(5),
    );
    Rig {
        service,
        store,
        reconciler,
    }
}

async fn pass(rig: &Rig) -> ladder_voice::PassReport {
    rig.reconciler
        .reconcile(GUILD, ChannelId(PARENT), ReconcileOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_channel_created_for_empty_prefix() {
    let rig = rig(vec![category(PARENT, &[("QP", 3)], 3, false, false)]);

    let report = pass(&rig).await;

    assert_eq!(report.created, 1);
    assert_eq!(rig.service.names(PARENT), vec!["QP #1".to_string()]);
}

#[tokio::test]
async fn test_exactly_one_empty_spare_is_kept() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100, 101]);
    rig.service.add_channel(2, "Comp #2", 2, PARENT, &[]);
    rig.service.add_channel(3, "Comp #3", 3, PARENT, &[]);

    let report = pass(&rig).await;

    assert_eq!(report.created, 0);
    assert_eq!(report.deleted, 1);
    assert!(rig.service.ops().contains(&Op::Delete(ChannelId(3))));
    assert_eq!(
        rig.service.names(PARENT),
        vec!["Comp #1".to_string(), "Comp #2".to_string()]
    );
}

#[tokio::test]
async fn test_spare_created_when_all_channels_occupied() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100]);

    let report = pass(&rig).await;

    assert_eq!(report.created, 1);
    assert_eq!(
        rig.service.names(PARENT),
        vec!["Comp #1".to_string(), "Comp #2".to_string()]
    );
}

#[tokio::test]
async fn test_channel_limit_caps_creation() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 2, false, false)]);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100]);
    rig.service.add_channel(2, "Comp #2", 2, PARENT, &[101]);

    let report = pass(&rig).await;

    assert_eq!(report.created, 0);
}

#[tokio::test]
async fn test_create_all_provisions_up_to_limit() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 3, false, false)]);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100]);

    let report = rig
        .reconciler
        .reconcile(
            GUILD,
            ChannelId(PARENT),
            ReconcileOptions {
                create_all_channels: true,
                adjust_member_limits: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(
        rig.service.names(PARENT),
        vec![
            "Comp #1".to_string(),
            "Comp #2".to_string(),
            "Comp #3".to_string()
        ]
    );
}

#[tokio::test]
async fn test_converged_category_issues_no_operations() {
    let rig = rig(vec![category(PARENT, &[("QP", 3)], 3, false, false)]);

    pass(&rig).await;
    rig.service.clear_ops();

    let report = pass(&rig).await;

    assert_eq!(report.remote_operations(), 0);
    assert!(rig.service.ops().is_empty());
}

#[tokio::test]
async fn test_stale_group_empties_deleted_when_removal_enabled() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, true, false)]);
    rig.service.add_channel(1, "Old #1", 1, PARENT, &[]);
    rig.service.add_channel(2, "Old #2", 2, PARENT, &[100]);
    rig.service.add_channel(3, "Comp #1", 3, PARENT, &[101]);
    rig.service.add_channel(4, "Comp #2", 4, PARENT, &[]);

    let report = pass(&rig).await;

    // Only the empty stale channel goes; occupied channels are never
    // deleted, whatever their name.
    assert_eq!(report.deleted, 1);
    assert!(rig.service.ops().contains(&Op::Delete(ChannelId(1))));
    assert!(rig.service.channel(2).is_some());
}

#[tokio::test]
async fn test_stale_group_untouched_by_default() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);
    rig.service.add_channel(1, "Old #1", 1, PARENT, &[]);
    rig.service.add_channel(2, "Comp #1", 2, PARENT, &[100]);
    rig.service.add_channel(3, "Comp #2", 3, PARENT, &[]);

    let report = pass(&rig).await;

    assert_eq!(report.deleted, 0);
    assert!(rig.service.channel(1).is_some());
}

#[tokio::test]
async fn test_managed_block_positioned_after_unmanaged() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);
    rig.service.add_channel(1, "General", 5, PARENT, &[100]);
    rig.service.add_channel(2, "Comp #1", 1, PARENT, &[101]);
    rig.service.add_channel(3, "Comp #2", 2, PARENT, &[]);

    let report = pass(&rig).await;

    assert_eq!(report.moved, 2);
    assert_eq!(rig.service.channel(2).unwrap().position, 6);
    assert_eq!(rig.service.channel(3).unwrap().position, 7);
    assert_eq!(rig.service.channel(1).unwrap().position, 5);
}

#[tokio::test]
async fn test_rating_suffix_reflects_present_members() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, true)]);
    rig.store.set_rating(100, 1800);
    rig.store.set_rating(101, 2400);
    rig.store.set_rating(102, 2100);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100, 101]);
    rig.service.add_channel(2, "Comp #2", 2, PARENT, &[102]);
    rig.service.add_channel(3, "Comp #3", 3, PARENT, &[]);

    let report = pass(&rig).await;

    assert_eq!(report.renamed, 2);
    assert_eq!(
        rig.service.channel(1).unwrap().name,
        "Comp #1 [1800\u{2013}2400]"
    );
    assert_eq!(rig.service.channel(2).unwrap().name, "Comp #2 [~2100]");
    // No members, no suffix.
    assert_eq!(rig.service.channel(3).unwrap().name, "Comp #3");

    // A second pass recomputes the same names and renames nothing.
    rig.service.clear_ops();
    let report = pass(&rig).await;
    assert_eq!(report.renamed, 0);
    assert_eq!(report.remote_operations(), 0);
}

#[tokio::test]
async fn test_member_limits_reapplied_on_request() {
    let rig = rig(vec![category(PARENT, &[("Comp", 4)], 4, false, false)]);
    rig.service.add_channel(1, "Comp #1", 1, PARENT, &[100]);
    rig.service.add_channel(2, "Comp #2", 2, PARENT, &[]);

    let report = rig
        .reconciler
        .reconcile(
            GUILD,
            ChannelId(PARENT),
            ReconcileOptions {
                create_all_channels: false,
                adjust_member_limits: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(report.relimited, 2);
    assert!(rig.service.ops().contains(&Op::Limit(ChannelId(1), 4)));
    assert!(rig.service.ops().contains(&Op::Limit(ChannelId(2), 4)));
}

#[tokio::test(start_paused = true)]
async fn test_missing_confirmation_aborts_pass() {
    let router = Arc::new(ConfirmationRouter::new());
    let service = Arc::new(MockChannelService::unconfirmed(router.clone()));
    let settings = Arc::new(GuildSettings::new());
    settings.insert(
        GUILD,
        guild_config(vec![category(PARENT, &[("QP", 3)], 3, false, false)]),
    );
    let reconciler = ChannelReconciler::new(
        service.clone(),
        Arc::new(RatingStore::new()),
        settings,
        router,
        Duration::from_secs(5),
    );

    let err = reconciler
        .reconcile(GUILD, ChannelId(PARENT), ReconcileOptions::default())
        .await
        .unwrap_err();

    match err.kind() {
        LadderErrorKind::Channel(e) => assert!(e.is_confirmation_timeout()),
        other => panic!("unexpected error kind: {other}"),
    }
    // The create was issued and nothing ran after the aborted wait.
    assert_eq!(service.ops(), vec![Op::Create("QP #1".to_string())]);
}

#[tokio::test]
async fn test_unmanaged_parent_is_noop() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);

    let report = rig
        .reconciler
        .reconcile(GUILD, ChannelId(999), ReconcileOptions::default())
        .await
        .unwrap();

    assert_eq!(report.remote_operations(), 0);
    assert!(rig.service.ops().is_empty());
}

#[tokio::test]
async fn test_unconfigured_guild_is_noop() {
    let rig = rig(vec![category(PARENT, &[("Comp", 6)], 4, false, false)]);

    let report = rig
        .reconciler
        .reconcile(GuildId(42), ChannelId(PARENT), ReconcileOptions::default())
        .await
        .unwrap();

    assert_eq!(report.remote_operations(), 0);
}

#[tokio::test]
async fn test_voice_state_change_triggers_single_pass() {
    let rig = rig(vec![category(PARENT, &[("QP", 3)], 3, false, false)]);

    rig.reconciler
        .handle_voice_state(
            GUILD,
            VoiceState::NotInVoice,
            VoiceState::InVoice {
                parent: ChannelId(PARENT),
            },
        )
        .await
        .unwrap();

    assert_eq!(rig.service.ops(), vec![Op::Create("QP #1".to_string())]);
}

#[tokio::test]
async fn test_reconcile_all_covers_every_category() {
    let rig = rig(vec![
        category(PARENT, &[("Comp", 6)], 4, false, false),
        category(20, &[("QP", 3)], 3, false, false),
    ]);

    let report = rig
        .reconciler
        .reconcile_all(GUILD, ReconcileOptions::default())
        .await
        .unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(rig.service.names(PARENT), vec!["Comp #1".to_string()]);
    assert_eq!(rig.service.names(20), vec!["QP #1".to_string()]);
}
