//! Deck transport - per-deck state machine over one stem set
//!
//! A [`Deck`] owns one [`StemSet`] and one external waveform display and
//! arbitrates every transport operation on them: load, play/pause, seek,
//! cue, tempo, stem toggles. The waveform is the authoritative clock the
//! user scrubs; the stems are always brought to it, never the reverse.
//!
//! Loading is split into [`Deck::begin_load`] / [`Deck::commit_load`] so a
//! callback-driven host can start a newer load while an older one is still
//! settling. The policy is newest-load-wins: committing a superseded load
//! releases its sources and changes nothing. [`Deck::load_track`] composes
//! the two for sequential callers.

use crate::error::{DeckError, DeckResult};
use crate::source::{StemBackend, WaveformDisplay};
use crate::stem_set::StemSet;
use crate::sync::SyncMonitor;
use crate::track::TrackDescriptor;
use crate::types::{DeckPhase, DeckSide, StemKind, DEFAULT_BPM, MAX_BPM, MIN_BPM};

/// Handle for one in-flight load
///
/// Carries the descriptor being loaded and the load generation it belongs
/// to. A ticket whose generation is no longer current commits to nothing.
#[derive(Debug)]
pub struct LoadTicket {
    seq: u64,
    track: TrackDescriptor,
}

impl LoadTicket {
    /// The descriptor this load is for
    pub fn track(&self) -> &TrackDescriptor {
        &self.track
    }
}

/// What became of a committed load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The load was current and the deck now holds its track
    Loaded,
    /// A newer load started in the meantime; this result was released
    Superseded,
}

/// One of the two independent playback slots
pub struct Deck<B: StemBackend, W: WaveformDisplay> {
    side: DeckSide,
    backend: B,
    waveform: W,
    phase: DeckPhase,
    track: Option<TrackDescriptor>,
    bpm: u32,
    cue_point: Option<f64>,
    stem_set: Option<StemSet<B::Source>>,
    monitor: SyncMonitor,
    /// Load generation; bumped by every `begin_load` and by `release`
    load_seq: u64,
}

impl<B: StemBackend, W: WaveformDisplay> Deck<B, W> {
    /// Create an empty deck around its two collaborators
    pub fn new(side: DeckSide, backend: B, waveform: W) -> Self {
        Self {
            side,
            backend,
            waveform,
            phase: DeckPhase::Empty,
            track: None,
            bpm: DEFAULT_BPM,
            cue_point: None,
            stem_set: None,
            monitor: SyncMonitor::default(),
            load_seq: 0,
        }
    }

    // --- Loading ---

    /// Start loading a track: release the current stem set, enter `Loading`
    ///
    /// Supersedes any load already in flight on this deck — the older
    /// load's ticket goes stale and its eventual result is discarded.
    pub fn begin_load(&mut self, track: TrackDescriptor) -> DeckResult<LoadTicket> {
        if track.stem_uris.is_empty() {
            return Err(DeckError::EmptyTrack { id: track.id });
        }

        if let Some(set) = self.stem_set.as_mut() {
            set.release();
        }
        self.stem_set = None;
        self.track = None;
        self.cue_point = None;
        self.phase = DeckPhase::Loading;
        self.load_seq += 1;

        log::info!(
            "[DECK:{}] loading track {} '{}'",
            self.side,
            track.id,
            track.display_name
        );
        Ok(LoadTicket {
            seq: self.load_seq,
            track,
        })
    }

    /// Open and await every stem source for a ticket
    ///
    /// Borrows the deck only immutably, so a host may start a newer load
    /// while this future is pending.
    pub async fn fetch_stems(&self, ticket: &LoadTicket) -> DeckResult<StemSet<B::Source>> {
        StemSet::load(&self.backend, &ticket.track).await
    }

    /// Commit a settled load result
    ///
    /// A stale ticket (superseded by a newer `begin_load` or by `release`)
    /// commits nothing: its sources are released and `Superseded` is
    /// returned. A current failed load moves the deck to `Error` with no
    /// track. A current successful load resets tempo and cue, hands the
    /// reference stem's URI to the waveform display, and enters `Ready`.
    pub async fn commit_load(
        &mut self,
        ticket: LoadTicket,
        result: DeckResult<StemSet<B::Source>>,
    ) -> DeckResult<LoadOutcome> {
        if ticket.seq != self.load_seq {
            log::info!(
                "[DECK:{}] discarding superseded load of track {}",
                self.side,
                ticket.track.id
            );
            if let Ok(mut set) = result {
                set.release();
            }
            return Ok(LoadOutcome::Superseded);
        }

        let mut set = match result {
            Ok(set) => set,
            Err(err) => {
                self.phase = DeckPhase::Error;
                log::warn!("[DECK:{}] load failed: {err}", self.side);
                return Err(err);
            }
        };

        let reference_uri = match ticket.track.stem_uri(set.reference_kind()) {
            Some(uri) => uri.to_string(),
            None => {
                set.release();
                self.phase = DeckPhase::Error;
                return Err(DeckError::EmptyTrack {
                    id: ticket.track.id,
                });
            }
        };

        if let Err(reason) = self.waveform.load(&reference_uri).await {
            set.release();
            self.phase = DeckPhase::Error;
            return Err(DeckError::WaveformLoad {
                uri: reference_uri,
                reason,
            });
        }
        self.waveform.set_playback_rate(1.0);

        self.bpm = ticket.track.original_bpm;
        self.cue_point = None;
        self.track = Some(ticket.track);
        self.stem_set = Some(set);
        self.phase = DeckPhase::Ready;
        Ok(LoadOutcome::Loaded)
    }

    /// Load a track start-to-finish
    ///
    /// Convenience for sequential callers; event-driven hosts use
    /// `begin_load` / `fetch_stems` / `commit_load` directly.
    pub async fn load_track(&mut self, track: TrackDescriptor) -> DeckResult<LoadOutcome> {
        let ticket = self.begin_load(track)?;
        let result = self.fetch_stems(&ticket).await;
        self.commit_load(ticket, result).await
    }

    // --- Transport ---

    /// Toggle between `Playing` and `Paused`/`Ready`
    ///
    /// Into `Playing`: stems are first seeked to the waveform's current
    /// position, then started, then the waveform starts — the audio never
    /// runs ahead of or behind the visual cursor at the transition.
    /// Into `Paused`: waveform first, then stems.
    pub fn toggle_play_pause(&mut self) -> DeckResult<DeckPhase> {
        match self.phase {
            DeckPhase::Ready | DeckPhase::Paused => {
                let t = self.waveform.current_time();
                let set = self.stem_set.as_mut().ok_or(DeckError::NoTrackLoaded)?;
                set.seek_all(t);
                set.play_all();
                self.waveform.play();
                self.phase = DeckPhase::Playing;
            }
            DeckPhase::Playing => {
                self.waveform.pause();
                if let Some(set) = self.stem_set.as_mut() {
                    set.pause_all();
                }
                self.phase = DeckPhase::Paused;
            }
            DeckPhase::Empty | DeckPhase::Loading | DeckPhase::Error => {
                return Err(DeckError::NoTrackLoaded);
            }
        }
        Ok(self.phase)
    }

    /// Flip one stem between enabled (audible) and disabled (muted)
    ///
    /// Valid in any loaded phase, including while `Playing`; the toggled
    /// state survives pause/resume. Returns the stem's new enabled state,
    /// or `None` if this track has no such stem (a no-op).
    pub fn toggle_stem(&mut self, kind: StemKind) -> DeckResult<Option<bool>> {
        let set = self.stem_set.as_mut().ok_or(DeckError::NoTrackLoaded)?;
        let Some(was_muted) = set.is_muted(kind) else {
            return Ok(None);
        };
        set.set_muted(kind, !was_muted);
        log::info!(
            "[STEM_TOGGLE] {} deck: '{kind}' now {}",
            self.side,
            if was_muted { "enabled" } else { "muted" }
        );
        Ok(Some(was_muted))
    }

    /// Set the deck tempo, silently clamped to `[MIN_BPM, MAX_BPM]`
    ///
    /// Realized as one linear rate `bpm / original_bpm` applied to every
    /// stem and to the waveform's scrub speed. Returns the clamped value.
    pub fn set_bpm(&mut self, bpm: u32) -> DeckResult<u32> {
        let Some(track) = &self.track else {
            return Err(DeckError::NoTrackLoaded);
        };

        let clamped = bpm.clamp(MIN_BPM, MAX_BPM);
        if clamped != bpm {
            log::debug!("[DECK:{}] bpm {bpm} clamped to {clamped}", self.side);
        }

        let rate = f64::from(clamped) / f64::from(track.original_bpm);
        if let Some(set) = self.stem_set.as_mut() {
            set.set_playback_rate(rate);
        }
        self.waveform.set_playback_rate(rate);
        self.bpm = clamped;
        Ok(clamped)
    }

    /// Record the waveform's current position as the cue point
    pub fn set_cue(&mut self) -> DeckResult<f64> {
        if !self.phase.is_loaded() {
            return Err(DeckError::NoTrackLoaded);
        }
        let t = self.waveform.current_time();
        self.cue_point = Some(t);
        log::debug!("[DECK:{}] cue set at {t:.2}s", self.side);
        Ok(t)
    }

    /// Seek all stems and the waveform to the cue point, if one exists
    ///
    /// If currently `Playing`, playback continues from the new position
    /// with no implicit pause. Returns the cue position jumped to.
    pub fn jump_to_cue(&mut self) -> DeckResult<Option<f64>> {
        if !self.phase.is_loaded() {
            return Err(DeckError::NoTrackLoaded);
        }
        let Some(cue) = self.cue_point else {
            return Ok(None);
        };
        if let Some(set) = self.stem_set.as_mut() {
            set.seek_all(cue);
        }
        self.waveform.seek(cue);
        Ok(Some(cue))
    }

    /// One-button cue: jump back while playing, otherwise set
    pub fn cue_press(&mut self) -> DeckResult<f64> {
        if self.phase == DeckPhase::Playing && self.cue_point.is_some() {
            match self.jump_to_cue()? {
                Some(cue) => Ok(cue),
                None => self.set_cue(),
            }
        } else {
            self.set_cue()
        }
    }

    /// Set one gain across every stem, clamped to `0.0..=1.0`
    pub fn set_volume(&mut self, volume: f32) -> DeckResult<f32> {
        let set = self.stem_set.as_mut().ok_or(DeckError::NoTrackLoaded)?;
        Ok(set.set_volume_all(volume))
    }

    /// Position-update tick from the reference stem
    ///
    /// Runs one drift-correction pass; returns the number of snapped stems.
    pub fn on_position_tick(&mut self) -> usize {
        match self.stem_set.as_mut() {
            Some(set) => self.monitor.tick(set),
            None => 0,
        }
    }

    /// Restore the track's original tempo and re-enable every stem
    ///
    /// Does not unload the track; a no-op on a deck with none.
    pub fn reset(&mut self) -> DeckResult<()> {
        let Some(track) = &self.track else {
            return Ok(());
        };
        let original = track.original_bpm;
        self.set_bpm(original)?;
        if let Some(set) = self.stem_set.as_mut() {
            set.unmute_all();
        }
        Ok(())
    }

    /// Release everything and return to `Empty`
    ///
    /// Any load still in flight goes stale and will be discarded on commit.
    pub fn release(&mut self) {
        if let Some(set) = self.stem_set.as_mut() {
            set.release();
        }
        self.stem_set = None;
        self.track = None;
        self.cue_point = None;
        self.bpm = DEFAULT_BPM;
        self.phase = DeckPhase::Empty;
        self.load_seq += 1;
    }

    // --- Accessors ---

    /// Which slot this deck occupies
    pub fn side(&self) -> DeckSide {
        self.side
    }

    /// Current transport phase
    pub fn phase(&self) -> DeckPhase {
        self.phase
    }

    /// Current tempo
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Current cue point in seconds, if set
    pub fn cue_point(&self) -> Option<f64> {
        self.cue_point
    }

    /// The loaded track descriptor, if any
    pub fn track(&self) -> Option<&TrackDescriptor> {
        self.track.as_ref()
    }

    /// Whether the deck is currently playing
    pub fn is_playing(&self) -> bool {
        self.phase == DeckPhase::Playing
    }

    /// Enabled state of one stem; `None` when absent or nothing is loaded
    pub fn stem_enabled(&self, kind: StemKind) -> Option<bool> {
        self.stem_set
            .as_ref()
            .and_then(|set| set.is_muted(kind))
            .map(|muted| !muted)
    }

    /// The loaded stem set, if any
    pub fn stem_set(&self) -> Option<&StemSet<B::Source>> {
        self.stem_set.as_ref()
    }

    /// The waveform display collaborator
    pub fn waveform(&self) -> &W {
        &self.waveform
    }

    /// Mutable access for hosts feeding user scrubs into the display
    pub fn waveform_mut(&mut self) -> &mut W {
        &mut self.waveform
    }
}
