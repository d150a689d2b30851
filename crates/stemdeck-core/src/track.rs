//! Track descriptors supplied by the song catalog
//!
//! A [`TrackDescriptor`] is immutable input: the engine reads it, never
//! writes it. Changing a deck's tempo never touches `original_bpm`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::StemKind;

/// Immutable description of one track in the catalog
///
/// `stem_uris` is a `BTreeMap` so iteration is always in lexicographic
/// stem order; the first entry is the reference stem after a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackDescriptor {
    /// Catalog identifier
    pub id: u64,
    /// Human-readable title for UI display
    #[serde(rename = "name")]
    pub display_name: String,
    /// Tempo the track was produced at; never modified by the engine
    #[serde(rename = "bpm")]
    pub original_bpm: u32,
    /// Musical key as displayed (e.g. "Am")
    pub key: String,
    /// One playable URI per available stem
    #[serde(default)]
    pub stem_uris: BTreeMap<StemKind, String>,
}

impl TrackDescriptor {
    /// Get the URI for one stem, if the track provides it
    pub fn stem_uri(&self, kind: StemKind) -> Option<&str> {
        self.stem_uris.get(&kind).map(String::as_str)
    }

    /// The lexicographically-first stem kind this track provides
    ///
    /// This is the kind that becomes the reference stem once loaded.
    pub fn first_stem(&self) -> Option<StemKind> {
        self.stem_uris.keys().next().copied()
    }
}
