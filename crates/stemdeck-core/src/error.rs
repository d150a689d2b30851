//! Deck error types

use thiserror::Error;

use crate::types::StemKind;

/// Errors that can occur during deck operations
///
/// Every error is local to one deck; nothing here ever affects the other
/// deck. An out-of-range bpm is not an error — it is clamped silently.
#[derive(Error, Debug)]
pub enum DeckError {
    /// One stem failed to become playable; the whole load is aborted
    #[error("stem '{kind}' failed to become playable: {reason}")]
    StemLoad { kind: StemKind, reason: String },

    /// The waveform display rejected the reference stem URI
    #[error("waveform display failed to load '{uri}': {reason}")]
    WaveformLoad { uri: String, reason: String },

    /// Transport operation attempted on a deck with no loaded track
    #[error("no track loaded")]
    NoTrackLoaded,

    /// Track descriptor carries no stem URIs at all
    #[error("track {id} has no stem URIs")]
    EmptyTrack { id: u64 },
}

/// Result type for deck operations
pub type DeckResult<T> = Result<T, DeckError>;
