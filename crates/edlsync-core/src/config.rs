//! EDL generation configuration.
//!
//! The top-level [`EdlConfig`] struct is deserialized from JSON and carries
//! the per-segment-type output actions plus the batch-run knobs. Every field
//! defaults sensibly so a completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::segment::MediaSegmentType;

// ---------------------------------------------------------------------------
// EdlAction
// ---------------------------------------------------------------------------

/// Output action encoded into an EDL line, or `None` to emit nothing.
///
/// The integer values are the wire codes consumed by media players and must
/// not change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdlAction {
    /// Emit no line for this segment.
    #[default]
    None,
    /// Completely cut the region out of the video stream.
    Cut,
    /// Mute audio while keeping video.
    Mute,
    /// Insert a scene marker.
    SceneMarker,
    /// Mark the region as a commercial break.
    CommercialBreak,
}

impl EdlAction {
    /// The integer code written to the EDL file, or `None` when the action
    /// suppresses the line entirely.
    #[must_use]
    pub fn code(&self) -> Option<i32> {
        match self {
            Self::None => None,
            Self::Cut => Some(0),
            Self::Mute => Some(1),
            Self::SceneMarker => Some(2),
            Self::CommercialBreak => Some(3),
        }
    }
}

impl fmt::Display for EdlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Cut => write!(f, "cut"),
            Self::Mute => write!(f, "mute"),
            Self::SceneMarker => write!(f, "scenemarker"),
            Self::CommercialBreak => write!(f, "commercialbreak"),
        }
    }
}

// ---------------------------------------------------------------------------
// EdlConfig
// ---------------------------------------------------------------------------

/// Root configuration for EDL generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EdlConfig {
    /// Action for intro segments.
    pub intro_action: EdlAction,
    /// Action for outro segments.
    pub outro_action: EdlAction,
    /// Action for preview segments.
    pub preview_action: EdlAction,
    /// Action for recap segments.
    pub recap_action: EdlAction,
    /// Action for commercial segments.
    pub commercial_action: EdlAction,
    /// Action for segments of unknown type.
    pub unknown_action: EdlAction,

    /// Overwrite existing EDL files, keeping them in sync with segment edits.
    pub overwrite_edl_files: bool,

    /// Max number of items synchronized concurrently during a batch run.
    pub max_parallelism: usize,

    /// Library names selected for analysis; empty means all libraries.
    pub selected_libraries: Vec<String>,

    /// TV shows to skip, optionally per season: `"Name"` or `"Name;S1;S2"`.
    pub skipped_tv_shows: Vec<String>,

    /// Movie names to skip.
    pub skipped_movies: Vec<String>,
}

impl Default for EdlConfig {
    fn default() -> Self {
        Self {
            intro_action: EdlAction::None,
            outro_action: EdlAction::None,
            preview_action: EdlAction::None,
            recap_action: EdlAction::None,
            commercial_action: EdlAction::CommercialBreak,
            unknown_action: EdlAction::None,
            overwrite_edl_files: true,
            max_parallelism: 2,
            selected_libraries: Vec::new(),
            skipped_tv_shows: Vec::new(),
            skipped_movies: Vec::new(),
        }
    }
}

impl EdlConfig {
    /// Resolve a segment type to its configured output action.
    ///
    /// Total function: every segment type maps to an action, falling back to
    /// [`EdlAction::None`] rather than erroring.
    #[must_use]
    pub fn action_for(&self, segment_type: MediaSegmentType) -> EdlAction {
        match segment_type {
            MediaSegmentType::Intro => self.intro_action,
            MediaSegmentType::Outro => self.outro_action,
            MediaSegmentType::Preview => self.preview_action,
            MediaSegmentType::Recap => self.recap_action,
            MediaSegmentType::Commercial => self.commercial_action,
            MediaSegmentType::Unknown => self.unknown_action,
        }
    }

    /// The worker-pool size for batch runs, clamped to at least one worker.
    #[must_use]
    pub fn effective_parallelism(&self) -> usize {
        self.max_parallelism.max(1)
    }

    /// Deserialize an `EdlConfig` from a JSON string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit (async, embedded, etc.).
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.max_parallelism == 0 {
            warnings.push("max_parallelism is 0; one worker will be used".into());
        }

        let all_none = [
            self.intro_action,
            self.outro_action,
            self.preview_action,
            self.recap_action,
            self.commercial_action,
            self.unknown_action,
        ]
        .iter()
        .all(|a| *a == EdlAction::None);

        if all_none {
            warnings.push("every segment type maps to none; no EDL files will be written".into());
        }

        warnings
    }
}
