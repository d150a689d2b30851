//! Track catalog parsing
//!
//! The catalog collaborator hands the engine a JSON list of tracks. Entries
//! either carry explicit `stem_uris`, or the shorthand `path` form used by
//! the stem-separation pipeline, where the four stems live next to each
//! other as `{path}/{path}_{stem}.mp3`. The melody stem is stored under the
//! separator's label "other".

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::track::TrackDescriptor;
use crate::types::StemKind;

/// Errors that can occur while reading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Malformed catalog JSON
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share one id
    #[error("duplicate track id {id} in catalog")]
    DuplicateId { id: u64 },
}

/// File name suffix for one stem in the shorthand `path` layout
fn file_label(kind: StemKind) -> &'static str {
    match kind {
        // The separation pipeline names the melody stem "other"
        StemKind::Melody => "other",
        other => other.name(),
    }
}

/// Raw catalog entry as stored on disk
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    id: u64,
    name: String,
    bpm: u32,
    #[serde(default)]
    key: String,
    /// Shorthand: directory/prefix the four separated stems live under
    #[serde(default)]
    path: Option<String>,
    /// Explicit per-stem URIs; wins over `path` when both are present
    #[serde(default)]
    stem_uris: BTreeMap<StemKind, String>,
}

impl CatalogEntry {
    fn into_descriptor(self) -> TrackDescriptor {
        let stem_uris = if !self.stem_uris.is_empty() {
            self.stem_uris
        } else if let Some(path) = &self.path {
            StemKind::ALL
                .iter()
                .map(|&kind| (kind, format!("{path}/{path}_{}.mp3", file_label(kind))))
                .collect()
        } else {
            BTreeMap::new()
        };

        TrackDescriptor {
            id: self.id,
            display_name: self.name,
            original_bpm: self.bpm,
            key: self.key,
            stem_uris,
        }
    }
}

/// An in-memory, read-only list of loadable tracks
#[derive(Debug, Default)]
pub struct TrackCatalog {
    tracks: Vec<TrackDescriptor>,
}

impl TrackCatalog {
    /// Parse a catalog from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;

        let mut tracks: Vec<TrackDescriptor> = Vec::with_capacity(entries.len());
        for entry in entries {
            if tracks.iter().any(|t| t.id == entry.id) {
                return Err(CatalogError::DuplicateId { id: entry.id });
            }
            tracks.push(entry.into_descriptor());
        }

        log::info!("[CATALOG] loaded {} tracks", tracks.len());
        Ok(Self { tracks })
    }

    /// Look a track up by catalog id
    pub fn get(&self, id: u64) -> Option<&TrackDescriptor> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// All tracks in catalog order
    pub fn tracks(&self) -> &[TrackDescriptor] {
        &self.tracks
    }

    /// Number of tracks in the catalog
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
