//! Batch synchronization of EDL sidecars across a media collection.
//!
//! The coordinator groups a flat segment list by owning item and drives the
//! encoder and file synchronizer over all groups through a bounded worker
//! pool, with aggregate progress reporting and cooperative cancellation.
//! One item's failure never aborts the run; the batch degrades to partial
//! completion and surfaces per-item outcomes.

use std::sync::{Arc, Mutex};

use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use edlsync_core::{EdlConfig, Error, ItemId, MediaSegment, Result};

use crate::encoder::encode_document;
use crate::progress::ProgressSender;
use crate::queue::{group_by_item, MediaLookup, SegmentGroup};
use crate::sync::{sync_file, SyncOutcome};

/// How one group ended up after a batch run.
#[derive(Debug)]
pub enum GroupStatus {
    /// The group was encoded and synchronized.
    Completed(SyncOutcome),
    /// Synchronization failed; sibling groups were unaffected.
    Failed(Error),
    /// The run was cancelled before this group started.
    Abandoned,
}

/// Per-group outcome, for the caller's logging/telemetry.
#[derive(Debug)]
pub struct GroupOutcome {
    /// The media item the group belongs to.
    pub item_id: ItemId,
    /// How the group ended up.
    pub status: GroupStatus,
}

/// Aggregate counts and per-group outcomes of one batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// Number of per-item groups in the batch.
    pub total: usize,
    /// Groups that ran to completion (any [`SyncOutcome`]).
    pub completed: usize,
    /// Sidecars newly written.
    pub created: usize,
    /// Sidecars overwritten with fresh content.
    pub updated: usize,
    /// Sidecars left untouched.
    pub skipped: usize,
    /// Groups with no content to write or no materialized media file.
    pub no_content: usize,
    /// Groups whose synchronization failed.
    pub failed: usize,
    /// Groups abandoned due to cancellation.
    pub abandoned: usize,
    /// Per-group outcomes, in group completion order.
    pub outcomes: Vec<GroupOutcome>,
}

impl BatchSummary {
    fn record(&mut self, outcome: GroupOutcome) {
        match &outcome.status {
            GroupStatus::Completed(sync) => {
                self.completed += 1;
                match sync {
                    SyncOutcome::Created => self.created += 1,
                    SyncOutcome::Updated => self.updated += 1,
                    SyncOutcome::Skipped => self.skipped += 1,
                    SyncOutcome::NoContent => self.no_content += 1,
                }
            }
            GroupStatus::Failed(_) => self.failed += 1,
            GroupStatus::Abandoned => self.abandoned += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Drives EDL synchronization over all segment groups of a batch.
///
/// The configuration is snapshotted at construction time so a concurrent
/// reconfiguration cannot race with action resolution or the overwrite
/// decision mid-run.
pub struct BatchCoordinator {
    config: Arc<EdlConfig>,
    lookup: Arc<dyn MediaLookup>,
    progress: Arc<ProgressSender>,
    cancellation: CancellationToken,
}

impl BatchCoordinator {
    /// Create a coordinator over a config snapshot and item lookup.
    pub fn new(config: EdlConfig, lookup: Arc<dyn MediaLookup>) -> Self {
        Self {
            config: Arc::new(config),
            lookup,
            progress: Arc::new(ProgressSender::noop()),
            cancellation: CancellationToken::new(),
        }
    }

    /// Builder: attach a progress sender.
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    /// Builder: attach a cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Log the configuration that will be used during EDL file creation.
    fn log_configuration(&self) {
        let config = &self.config;
        tracing::debug!("Overwrite EDL files: {}", config.overwrite_edl_files);
        tracing::debug!("Intro action: {}", config.intro_action);
        tracing::debug!("Outro action: {}", config.outro_action);
        tracing::debug!("Preview action: {}", config.preview_action);
        tracing::debug!("Recap action: {}", config.recap_action);
        tracing::debug!("Commercial action: {}", config.commercial_action);
        tracing::debug!("Unknown action: {}", config.unknown_action);
        tracing::debug!("Max parallelism: {}", config.effective_parallelism());
    }

    /// Synchronize sidecars for all segments in the batch.
    ///
    /// Groups are processed by at most `max_parallelism` workers at a time.
    /// Cancellation is checked once per group at dequeue time; a group
    /// already in flight runs to completion so sidecars are never left
    /// partially written. Progress is reported as `completed * 100 / total`
    /// after each completed group; the counter increment and the report
    /// happen under one lock so percentages never regress.
    pub async fn run(&self, segments: Vec<MediaSegment>, force_overwrite: bool) -> BatchSummary {
        self.log_configuration();

        let groups = group_by_item(segments);
        let total = groups.len();
        let mut summary = BatchSummary {
            total,
            ..BatchSummary::default()
        };

        if total == 0 {
            tracing::debug!("No segment groups queued, nothing to do");
            return summary;
        }

        tracing::info!(
            "Synchronizing EDL files for {total} media items ({} workers)",
            self.config.effective_parallelism()
        );

        let semaphore = Arc::new(Semaphore::new(self.config.effective_parallelism()));
        let completed = Arc::new(Mutex::new(0usize));
        let mut handles = Vec::with_capacity(total);

        for group in groups {
            let semaphore = semaphore.clone();
            let completed = completed.clone();
            let config = self.config.clone();
            let lookup = self.lookup.clone();
            let progress = self.progress.clone();
            let cancellation = self.cancellation.clone();
            let spawned_item = group.item_id;

            let handle = tokio::spawn(async move {
                let _permit = semaphore.acquire().await.expect("semaphore closed");

                // Dequeue-time cancellation check only; no partial credit.
                if cancellation.is_cancelled() {
                    tracing::debug!("Abandoning item {}: batch cancelled", group.item_id);
                    return GroupOutcome {
                        item_id: group.item_id,
                        status: GroupStatus::Abandoned,
                    };
                }

                let item_id = group.item_id;
                let status = match sync_group(group, &config, lookup.as_ref(), force_overwrite)
                    .await
                {
                    Ok(outcome) => GroupStatus::Completed(outcome),
                    Err(e) => {
                        tracing::error!("Failed to sync EDL for item {item_id}: {e}");
                        GroupStatus::Failed(e)
                    }
                };

                // Increment and report under one lock so a slower sibling
                // cannot publish a lower percentage afterwards.
                {
                    let mut done = completed.lock().expect("progress lock poisoned");
                    *done += 1;
                    progress.send((*done * 100 / total) as u32);
                }

                GroupOutcome { item_id, status }
            });
            handles.push((spawned_item, handle));
        }

        for (item_id, handle) in handles {
            match handle.await {
                Ok(outcome) => summary.record(outcome),
                Err(e) => {
                    tracing::error!("Sync worker panicked for item {item_id}: {e}");
                    summary.record(GroupOutcome {
                        item_id,
                        status: GroupStatus::Failed(Error::internal(format!(
                            "sync worker panicked: {e}"
                        ))),
                    });
                }
            }
        }

        tracing::info!(
            "EDL sync finished: {} created, {} updated, {} skipped, {} without content, {} failed, {} abandoned",
            summary.created,
            summary.updated,
            summary.skipped,
            summary.no_content,
            summary.failed,
            summary.abandoned
        );

        summary
    }
}

/// Encode and synchronize one group.
async fn sync_group(
    group: SegmentGroup,
    config: &EdlConfig,
    lookup: &dyn MediaLookup,
    force_overwrite: bool,
) -> Result<SyncOutcome> {
    let content = encode_document(&group.segments, config);

    if content.is_empty() {
        tracing::debug!("Skip item {}: no edl data generated", group.item_id);
        return Ok(SyncOutcome::NoContent);
    }

    let Some(media_path) = lookup.media_path(group.item_id) else {
        tracing::debug!("Skip item {}: no media path known", group.item_id);
        return Ok(SyncOutcome::NoContent);
    };

    let overwrite_enabled = config.overwrite_edl_files;
    let outcome = tokio::task::spawn_blocking(move || {
        sync_file(&media_path, &content, force_overwrite, overwrite_enabled)
    })
    .await
    .map_err(|e| Error::internal(format!("sync task failed: {e}")))??;

    Ok(outcome)
}
