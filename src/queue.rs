//! Grouping and target resolution for batch runs.
//!
//! Segments arrive as a flat list tagged with their owning item. This module
//! groups them per item, resolves items to on-disk media paths through the
//! [`MediaLookup`] collaborator, and applies the user's library/show/movie
//! skip lists.

use std::collections::HashMap;
use std::path::PathBuf;

use edlsync_core::{EdlConfig, ItemId, MediaSegment};

/// Association between a media item and the file whose extension is replaced
/// to obtain the sidecar path. Resolved once per batch run, never cached
/// across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// The owning media item.
    pub item_id: ItemId,
    /// Full path to the item's media file.
    pub media_path: PathBuf,
}

/// Resolves a media item to its on-disk file path.
///
/// Implemented by the host's library layer; returns `None` when the item is
/// unknown or has no materialized file.
pub trait MediaLookup: Send + Sync {
    /// Return the media file path for the given item, if any.
    fn media_path(&self, item_id: ItemId) -> Option<PathBuf>;
}

/// All segments belonging to one media item, in presentation order.
#[derive(Debug, Clone)]
pub struct SegmentGroup {
    /// The owning media item.
    pub item_id: ItemId,
    /// The item's segments, in the order they were presented.
    pub segments: Vec<MediaSegment>,
}

/// Partition a flat segment list into per-item groups.
///
/// Groups appear in first-appearance order of their item; within a group the
/// input order of segments is preserved. Each group is encoded and
/// synchronized independently of all others.
#[must_use]
pub fn group_by_item(segments: Vec<MediaSegment>) -> Vec<SegmentGroup> {
    let mut groups: Vec<SegmentGroup> = Vec::new();
    let mut index: HashMap<ItemId, usize> = HashMap::new();

    for segment in segments {
        match index.get(&segment.item_id) {
            Some(&i) => groups[i].segments.push(segment),
            None => {
                index.insert(segment.item_id, groups.len());
                groups.push(SegmentGroup {
                    item_id: segment.item_id,
                    segments: vec![segment],
                });
            }
        }
    }

    groups
}

/// Drop targets whose media file no longer exists on disk.
///
/// Items can be deleted between enumeration and processing; this re-check
/// keeps the batch from chasing paths that have gone away.
#[must_use]
pub fn verify_targets(targets: Vec<SyncTarget>) -> Vec<SyncTarget> {
    targets
        .into_iter()
        .filter(|target| {
            let present = target.media_path.exists();
            if !present {
                tracing::debug!(
                    "Skipping {} ({}): media file no longer exists",
                    target.media_path.display(),
                    target.item_id
                );
            }
            present
        })
        .collect()
}

/// Parsed library/show/movie skip lists from the configuration.
///
/// Show entries take the form `"Name"` (skip every season) or
/// `"Name;S1;S2"` (skip the listed seasons only).
#[derive(Debug, Clone, Default)]
pub struct SkipFilter {
    selected_libraries: Vec<String>,
    skipped_shows: HashMap<String, Vec<i32>>,
    skipped_movies: Vec<String>,
}

impl SkipFilter {
    /// Parse the skip lists out of a config snapshot.
    ///
    /// Unparsable season numbers are logged and ignored; a bad entry never
    /// fails the batch.
    #[must_use]
    pub fn from_config(config: &EdlConfig) -> Self {
        let mut skipped_shows = HashMap::new();

        for entry in &config.skipped_tv_shows {
            let mut parts = entry.split(';').map(str::trim).filter(|p| !p.is_empty());
            let Some(name) = parts.next() else {
                continue;
            };

            let mut seasons = Vec::new();
            for token in parts {
                // Season tokens look like "S1"; strip the prefix.
                let digits = token.trim_start_matches(['s', 'S']);
                match digits.parse::<i32>() {
                    Ok(nr) => seasons.push(nr),
                    Err(_) => {
                        tracing::error!(
                            "Failed to parse season number '{token}' for tv show: {name}. Fix your config!"
                        );
                    }
                }
            }

            skipped_shows.insert(name.to_string(), seasons);
        }

        Self {
            selected_libraries: config.selected_libraries.clone(),
            skipped_shows,
            skipped_movies: config.skipped_movies.clone(),
        }
    }

    /// Whether a library was selected for analysis. An empty selection means
    /// every library is analyzed.
    #[must_use]
    pub fn library_selected(&self, name: &str) -> bool {
        self.selected_libraries.is_empty()
            || self.selected_libraries.iter().any(|l| l == name)
    }

    /// Whether an episode of the given series and season should be skipped.
    ///
    /// A show listed without seasons is skipped entirely.
    #[must_use]
    pub fn should_skip_show(&self, series: &str, season: Option<i32>) -> bool {
        match self.skipped_shows.get(series) {
            Some(seasons) if seasons.is_empty() => true,
            Some(seasons) => season.is_some_and(|s| seasons.contains(&s)),
            None => false,
        }
    }

    /// Whether a movie should be skipped by name.
    #[must_use]
    pub fn should_skip_movie(&self, name: &str) -> bool {
        self.skipped_movies.iter().any(|m| m == name)
    }
}
