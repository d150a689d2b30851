//! Common types for the stemdeck engine
//!
//! This module contains the fundamental identifiers used throughout the
//! engine: stem kinds, deck sides, and the transport phase machine.

use serde::{Deserialize, Serialize};

/// Number of stems per deck (Bass, Drums, Melody, Vocals)
pub const NUM_STEMS: usize = 4;

/// Number of decks in the controller
pub const NUM_DECKS: usize = 2;

/// Lowest user-selectable tempo
pub const MIN_BPM: u32 = 60;

/// Highest user-selectable tempo
pub const MAX_BPM: u32 = 180;

/// Neutral tempo shown for a deck with no track loaded
pub const DEFAULT_BPM: u32 = 120;

/// Maximum tolerated positional disagreement between stems of one deck.
/// Anything beyond this is hard-snapped back to the reference stem.
pub const DRIFT_THRESHOLD_SECS: f64 = 0.1;

/// Stem identifiers
///
/// Declaration order is lexicographic, so the derived `Ord` matches the
/// "lexicographically-first" rule used for reference stem selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(usize)]
pub enum StemKind {
    Bass = 0,
    Drums = 1,
    /// Separation pipelines commonly label this stem "other"
    #[serde(alias = "other")]
    Melody = 2,
    Vocals = 3,
}

impl StemKind {
    /// Get all stem kinds in lexicographic order
    pub const ALL: [StemKind; NUM_STEMS] = [
        StemKind::Bass,
        StemKind::Drums,
        StemKind::Melody,
        StemKind::Vocals,
    ];

    /// Convert from index (0-3) to StemKind
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(StemKind::Bass),
            1 => Some(StemKind::Drums),
            2 => Some(StemKind::Melody),
            3 => Some(StemKind::Vocals),
            _ => None,
        }
    }

    /// Get the name of this stem kind
    pub fn name(&self) -> &'static str {
        match self {
            StemKind::Bass => "bass",
            StemKind::Drums => "drums",
            StemKind::Melody => "melody",
            StemKind::Vocals => "vocals",
        }
    }
}

impl std::fmt::Display for StemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the two independent playback slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckSide {
    Left,
    Right,
}

impl DeckSide {
    /// Get the name of this side
    pub fn name(&self) -> &'static str {
        match self {
            DeckSide::Left => "left",
            DeckSide::Right => "right",
        }
    }

    /// Get the opposite side
    pub fn other(&self) -> DeckSide {
        match self {
            DeckSide::Left => DeckSide::Right,
            DeckSide::Right => DeckSide::Left,
        }
    }
}

impl std::fmt::Display for DeckSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Transport phase of a deck
///
/// ```text
/// Empty --load--> Loading --success--> Ready --play--> Playing
///                    │                   ▲ ▲             │
///                    └--failure--> Error │ └─── play ─── ▼
///                                        └──── pause ── Paused
/// ```
///
/// There is no terminal phase; a deck is reusable indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckPhase {
    #[default]
    Empty,
    Loading,
    Ready,
    Playing,
    Paused,
    Error,
}

impl DeckPhase {
    /// Whether a successfully loaded stem set is present in this phase
    pub fn is_loaded(&self) -> bool {
        matches!(self, DeckPhase::Ready | DeckPhase::Playing | DeckPhase::Paused)
    }
}
