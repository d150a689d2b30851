//! Stem set - the synchronized stem group of one loaded track
//!
//! A [`StemSet`] owns one source per available stem and drives them as a
//! unit: transport commands, seeks, and rate changes always hit every
//! member, so the stems can only drift through their own decode clocks
//! (which the sync monitor corrects), never through the engine issuing
//! divergent commands.

use std::collections::BTreeMap;

use crate::error::{DeckError, DeckResult};
use crate::source::{StemBackend, StemSource};
use crate::track::TrackDescriptor;
use crate::types::StemKind;

/// The 1..4 stem sources belonging to one deck
pub struct StemSet<S> {
    stems: BTreeMap<StemKind, S>,
    /// Drift-measurement clock and the stem the waveform display mirrors
    reference: StemKind,
}

impl<S: StemSource> StemSet<S> {
    /// Load every stem the track provides, all-or-nothing
    ///
    /// Waits for each source's ready signal with no timeout. If any stem
    /// fails, sources already created for this call are released and the
    /// whole load is rejected — a deck never ends up half-loaded.
    ///
    /// On success every stem is unmuted at `playback_rate == 1.0`, and the
    /// reference stem is the lexicographically-first kind that loaded.
    pub async fn load<B>(backend: &B, track: &TrackDescriptor) -> DeckResult<Self>
    where
        B: StemBackend<Source = S>,
    {
        let mut stems: BTreeMap<StemKind, S> = BTreeMap::new();

        for (&kind, uri) in &track.stem_uris {
            match backend.open(kind, uri).await {
                Ok(mut source) => {
                    source.set_muted(false);
                    source.set_playback_rate(1.0);
                    stems.insert(kind, source);
                }
                Err(err) => {
                    log::warn!(
                        "[LOAD] track {} aborted after {} stems: {}",
                        track.id,
                        stems.len(),
                        err
                    );
                    for source in stems.values_mut() {
                        source.pause();
                    }
                    return Err(err);
                }
            }
        }

        let reference = match stems.keys().next().copied() {
            Some(kind) => kind,
            None => return Err(DeckError::EmptyTrack { id: track.id }),
        };

        log::info!(
            "[LOAD] track {}: {} stems ready, reference '{}'",
            track.id,
            stems.len(),
            reference
        );
        Ok(Self { stems, reference })
    }

    /// The stem whose position is authoritative for drift correction
    pub fn reference_kind(&self) -> StemKind {
        self.reference
    }

    /// Position of the reference stem in seconds
    pub fn reference_position(&self) -> f64 {
        self.stems
            .get(&self.reference)
            .map(StemSource::position)
            .unwrap_or(0.0)
    }

    /// Number of loaded stems
    pub fn len(&self) -> usize {
        self.stems.len()
    }

    /// Whether the set has been released
    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    /// Whether this set holds a source for `kind`
    pub fn contains(&self, kind: StemKind) -> bool {
        self.stems.contains_key(&kind)
    }

    /// Get a source by kind
    pub fn get(&self, kind: StemKind) -> Option<&S> {
        self.stems.get(&kind)
    }

    /// Mute state of one stem, if present
    pub fn is_muted(&self, kind: StemKind) -> Option<bool> {
        self.stems.get(&kind).map(StemSource::is_muted)
    }

    /// Mute or unmute exactly one stem; no-op if `kind` is not present
    ///
    /// Never pauses the source: a muted stem keeps advancing so it stays
    /// sample-aligned for an instant unmute.
    pub fn set_muted(&mut self, kind: StemKind, muted: bool) {
        if let Some(source) = self.stems.get_mut(&kind) {
            source.set_muted(muted);
        }
    }

    /// Unmute every stem
    pub fn unmute_all(&mut self) {
        for source in self.stems.values_mut() {
            source.set_muted(false);
        }
    }

    /// Start every source, muted ones included
    pub fn play_all(&mut self) {
        for source in self.stems.values_mut() {
            source.play();
        }
    }

    /// Pause every source; idempotent
    pub fn pause_all(&mut self) {
        for source in self.stems.values_mut() {
            source.pause();
        }
    }

    /// Hard-set every source to the same position
    pub fn seek_all(&mut self, seconds: f64) {
        for source in self.stems.values_mut() {
            source.seek(seconds);
        }
    }

    /// Apply one playback rate to every source
    ///
    /// This is the single mechanism by which tempo changes reach the audio.
    pub fn set_playback_rate(&mut self, rate: f64) {
        debug_assert!(rate > 0.0, "playback rate must be positive");
        for source in self.stems.values_mut() {
            source.set_playback_rate(rate);
        }
    }

    /// Apply one gain to every source, clamped to `0.0..=1.0`
    pub fn set_volume_all(&mut self, volume: f32) -> f32 {
        let clamped = volume.clamp(0.0, 1.0);
        for source in self.stems.values_mut() {
            source.set_volume(clamped);
        }
        clamped
    }

    /// Stop and discard every source; idempotent
    pub fn release(&mut self) {
        for source in self.stems.values_mut() {
            source.pause();
        }
        self.stems.clear();
    }

    /// Iterate over all sources mutably, in lexicographic kind order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (StemKind, &mut S)> + '_ {
        self.stems.iter_mut().map(|(&kind, source)| (kind, source))
    }
}
