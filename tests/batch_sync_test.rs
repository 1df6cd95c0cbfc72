//! End-to-end batch synchronization tests.
//!
//! Exercises the full flow: flat segment lists grouped per item, encoded to
//! EDL text, and synchronized against sidecar files in a temporary media
//! tree.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use assert_matches::assert_matches;
use tempfile::tempdir;

use edlsync::{
    edl_path, BatchCoordinator, EdlAction, EdlConfig, GroupStatus, ItemId, MediaLookup,
    MediaSegment, MediaSegmentType, SyncOutcome,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct MapLookup(HashMap<ItemId, PathBuf>);

impl MediaLookup for MapLookup {
    fn media_path(&self, item_id: ItemId) -> Option<PathBuf> {
        self.0.get(&item_id).cloned()
    }
}

fn segment(
    item_id: ItemId,
    segment_type: MediaSegmentType,
    start_ticks: i64,
    end_ticks: i64,
) -> MediaSegment {
    MediaSegment::new(item_id, segment_type, start_ticks, end_ticks)
}

#[tokio::test]
async fn mixed_segment_types_produce_expected_file() {
    init_tracing();
    let dir = tempdir().unwrap();
    let media = dir.path().join("show - s01e01.mkv");
    fs::write(&media, b"video").unwrap();
    let id = ItemId::new();

    let config = EdlConfig {
        intro_action: EdlAction::Cut,
        outro_action: EdlAction::Mute,
        commercial_action: EdlAction::CommercialBreak,
        ..EdlConfig::default()
    };
    let segments = vec![
        segment(id, MediaSegmentType::Intro, 0, 150_000_000),
        segment(id, MediaSegmentType::Recap, 150_000_000, 300_000_000),
        segment(id, MediaSegmentType::Commercial, 4_200_000_000, 8_220_000_000),
        segment(id, MediaSegmentType::Outro, 12_000_000_000, 12_500_000_000),
    ];

    let coordinator =
        BatchCoordinator::new(config, Arc::new(MapLookup(HashMap::from([(id, media.clone())]))));
    let summary = coordinator.run(segments, false).await;

    assert_eq!(summary.created, 1);
    assert_matches!(summary.outcomes[0].status, GroupStatus::Completed(SyncOutcome::Created));

    // The recap maps to none and contributes no line; the trailing space on
    // each line and the missing final newline are part of the wire format.
    let content = fs::read_to_string(edl_path(&media)).unwrap();
    assert_eq!(content, "0 15 0 \n420 822 3 \n1200 1250 1 ");
}

#[tokio::test]
async fn rerun_after_segment_edit_updates_the_sidecar() {
    init_tracing();
    let dir = tempdir().unwrap();
    let media = dir.path().join("movie.mp4");
    fs::write(&media, b"video").unwrap();
    let id = ItemId::new();
    let lookup = Arc::new(MapLookup(HashMap::from([(id, media.clone())])));

    let coordinator = BatchCoordinator::new(EdlConfig::default(), lookup.clone());
    let summary = coordinator
        .run(vec![segment(id, MediaSegmentType::Commercial, 0, 53_000_000)], false)
        .await;
    assert_eq!(summary.created, 1);
    assert_eq!(fs::read_to_string(edl_path(&media)).unwrap(), "0 5.3 3 ");

    // Segments changed upstream; overwrite is enabled by default, so the
    // sidecar is refreshed.
    let coordinator = BatchCoordinator::new(EdlConfig::default(), lookup);
    let summary = coordinator
        .run(vec![segment(id, MediaSegmentType::Commercial, 0, 71_000_000)], false)
        .await;
    assert_eq!(summary.updated, 1);
    assert_eq!(fs::read_to_string(edl_path(&media)).unwrap(), "0 7.1 3 ");
}

#[tokio::test]
async fn overwrite_disabled_preserves_manual_edits_unless_forced() {
    init_tracing();
    let dir = tempdir().unwrap();
    let media = dir.path().join("movie.mkv");
    fs::write(&media, b"video").unwrap();
    fs::write(edl_path(&media), "0 99 0 ").unwrap();
    let id = ItemId::new();
    let lookup = Arc::new(MapLookup(HashMap::from([(id, media.clone())])));

    let config = EdlConfig {
        overwrite_edl_files: false,
        ..EdlConfig::default()
    };
    let segments = vec![segment(id, MediaSegmentType::Commercial, 0, 53_000_000)];

    let coordinator = BatchCoordinator::new(config.clone(), lookup.clone());
    let summary = coordinator.run(segments.clone(), false).await;
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(edl_path(&media)).unwrap(), "0 99 0 ");

    // A forced run overrides the config flag.
    let coordinator = BatchCoordinator::new(config, lookup);
    let summary = coordinator.run(segments, true).await;
    assert_eq!(summary.updated, 1);
    assert_eq!(fs::read_to_string(edl_path(&media)).unwrap(), "0 5.3 3 ");
}

#[tokio::test]
async fn unknown_segments_with_default_config_write_no_file() {
    init_tracing();
    let dir = tempdir().unwrap();
    let media = dir.path().join("movie.mkv");
    fs::write(&media, b"video").unwrap();
    let id = ItemId::new();

    let coordinator = BatchCoordinator::new(
        EdlConfig::default(),
        Arc::new(MapLookup(HashMap::from([(id, media.clone())]))),
    );
    let summary = coordinator
        .run(vec![segment(id, MediaSegmentType::Unknown, 0, 100_000_000)], false)
        .await;

    assert_eq!(summary.no_content, 1);
    assert_matches!(
        summary.outcomes[0].status,
        GroupStatus::Completed(SyncOutcome::NoContent)
    );
    assert!(!edl_path(&media).exists());
}

#[tokio::test]
async fn missing_media_does_not_disturb_other_items() {
    init_tracing();
    let dir = tempdir().unwrap();
    let present = dir.path().join("present.mkv");
    fs::write(&present, b"video").unwrap();

    let present_id = ItemId::new();
    let missing_id = ItemId::new();
    let lookup = MapLookup(HashMap::from([
        (present_id, present.clone()),
        (missing_id, dir.path().join("deleted.mkv")),
    ]));

    let segments = vec![
        segment(missing_id, MediaSegmentType::Commercial, 0, 53_000_000),
        segment(present_id, MediaSegmentType::Commercial, 0, 53_000_000),
    ];

    let coordinator = BatchCoordinator::new(EdlConfig::default(), Arc::new(lookup));
    let summary = coordinator.run(segments, false).await;

    assert_eq!(summary.total, 2);
    assert_eq!(summary.created, 1);
    assert_eq!(summary.no_content, 1);
    assert_eq!(fs::read_to_string(edl_path(&present)).unwrap(), "0 5.3 3 ");
}

#[tokio::test]
async fn groups_are_encoded_independently() {
    init_tracing();
    let dir = tempdir().unwrap();
    let media_a = dir.path().join("a.mkv");
    let media_b = dir.path().join("b.mkv");
    fs::write(&media_a, b"video").unwrap();
    fs::write(&media_b, b"video").unwrap();
    let a = ItemId::new();
    let b = ItemId::new();

    // Interleaved input: grouping must untangle it without reordering the
    // segments within each item.
    let segments = vec![
        segment(a, MediaSegmentType::Commercial, 0, 53_000_000),
        segment(b, MediaSegmentType::Commercial, 100_000_000, 200_000_000),
        segment(a, MediaSegmentType::Commercial, 71_000_000, 150_000_000),
    ];

    let coordinator = BatchCoordinator::new(
        EdlConfig::default(),
        Arc::new(MapLookup(HashMap::from([
            (a, media_a.clone()),
            (b, media_b.clone()),
        ]))),
    );
    let summary = coordinator.run(segments, false).await;

    assert_eq!(summary.created, 2);
    assert_eq!(
        fs::read_to_string(edl_path(&media_a)).unwrap(),
        "0 5.3 3 \n7.1 15 3 "
    );
    assert_eq!(
        fs::read_to_string(edl_path(&media_b)).unwrap(),
        "10 20 3 "
    );
}
