//! edlsync-core: shared types, IDs, errors, and configuration.
//!
//! This crate is the foundational dependency for the edlsync engine,
//! providing type-safe identifiers, a unified error type, the media
//! segment data model, and the EDL generation configuration.

pub mod config;
pub mod error;
pub mod ids;
pub mod segment;

// Re-export the most commonly used items at the crate root.
pub use config::{EdlAction, EdlConfig};
pub use error::{Error, Result};
pub use ids::*;
pub use segment::{MediaSegment, MediaSegmentType, TICKS_PER_SECOND};
