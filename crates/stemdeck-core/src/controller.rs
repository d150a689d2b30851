//! Dual-deck controller - owns both decks and routes global commands
//!
//! The controller is the only surface the surrounding UI talks to. It
//! enforces deck independence (the decks never share a source, a waveform
//! instance, or a clock) and maps the fixed keyboard layout onto deck
//! operations:
//!
//! ```text
//! Q W E R   left  bass/drums/melody/vocals toggle
//! U I O P   right bass/drums/melody/vocals toggle
//! T Y       cue press (set, or jump back while playing)
//! G H       play/pause
//! S         sync tempo to the left (master) deck
//! K         reset both decks
//! ```
//!
//! A binding is inert when its target deck has nothing loaded.

use crate::deck::Deck;
use crate::error::DeckError;
use crate::source::{StemBackend, WaveformDisplay};
use crate::types::{DeckSide, StemKind};

/// A global command produced by the keyboard layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    ToggleStem(DeckSide, StemKind),
    CuePress(DeckSide),
    TogglePlay(DeckSide),
    SyncTempo,
    ResetAll,
}

impl KeyAction {
    /// Map a key to its action; case-insensitive, `None` for unbound keys
    pub fn for_key(key: char) -> Option<KeyAction> {
        use DeckSide::{Left, Right};
        match key.to_ascii_lowercase() {
            'q' => Some(KeyAction::ToggleStem(Left, StemKind::Bass)),
            'w' => Some(KeyAction::ToggleStem(Left, StemKind::Drums)),
            'e' => Some(KeyAction::ToggleStem(Left, StemKind::Melody)),
            'r' => Some(KeyAction::ToggleStem(Left, StemKind::Vocals)),
            'u' => Some(KeyAction::ToggleStem(Right, StemKind::Bass)),
            'i' => Some(KeyAction::ToggleStem(Right, StemKind::Drums)),
            'o' => Some(KeyAction::ToggleStem(Right, StemKind::Melody)),
            'p' => Some(KeyAction::ToggleStem(Right, StemKind::Vocals)),
            't' => Some(KeyAction::CuePress(Left)),
            'y' => Some(KeyAction::CuePress(Right)),
            'g' => Some(KeyAction::TogglePlay(Left)),
            'h' => Some(KeyAction::TogglePlay(Right)),
            's' => Some(KeyAction::SyncTempo),
            'k' => Some(KeyAction::ResetAll),
            _ => None,
        }
    }
}

/// Exactly two independent decks plus global command routing
pub struct DualDeck<B: StemBackend, W: WaveformDisplay> {
    left: Deck<B, W>,
    right: Deck<B, W>,
}

impl<B: StemBackend, W: WaveformDisplay> DualDeck<B, W> {
    /// Build the controller; each deck gets its own backend and display
    pub fn new(
        left_backend: B,
        left_waveform: W,
        right_backend: B,
        right_waveform: W,
    ) -> Self {
        Self {
            left: Deck::new(DeckSide::Left, left_backend, left_waveform),
            right: Deck::new(DeckSide::Right, right_backend, right_waveform),
        }
    }

    /// Get a deck by side
    pub fn deck(&self, side: DeckSide) -> &Deck<B, W> {
        match side {
            DeckSide::Left => &self.left,
            DeckSide::Right => &self.right,
        }
    }

    /// Get a deck mutably by side
    pub fn deck_mut(&mut self, side: DeckSide) -> &mut Deck<B, W> {
        match side {
            DeckSide::Left => &mut self.left,
            DeckSide::Right => &mut self.right,
        }
    }

    /// The left deck
    pub fn left(&self) -> &Deck<B, W> {
        &self.left
    }

    /// The left deck, mutably
    pub fn left_mut(&mut self) -> &mut Deck<B, W> {
        &mut self.left
    }

    /// The right deck
    pub fn right(&self) -> &Deck<B, W> {
        &self.right
    }

    /// The right deck, mutably
    pub fn right_mut(&mut self) -> &mut Deck<B, W> {
        &mut self.right
    }

    /// Match both decks' tempo to the left (master) deck
    ///
    /// Only the bpm values are matched; each deck applies its own
    /// bpm-to-rate math and there is no shared playback clock, so the two
    /// decks can still drift relative to each other. Inert when the master
    /// deck has nothing loaded. Returns whether a sync was applied.
    pub fn sync_tempo(&mut self) -> bool {
        if self.left.track().is_none() {
            return false;
        }
        let master_bpm = self.left.bpm();
        log::info!("[SYNC_TEMPO] matching both decks to {master_bpm} bpm");

        let _ = self.left.set_bpm(master_bpm);
        if let Err(DeckError::NoTrackLoaded) = self.right.set_bpm(master_bpm) {
            log::debug!("[SYNC_TEMPO] right deck empty, left only");
        }
        true
    }

    /// Restore both decks to original tempo with every stem enabled
    ///
    /// Does not unload either track.
    pub fn reset_all(&mut self) {
        let _ = self.left.reset();
        let _ = self.right.reset();
    }

    /// Release both decks; the UI must call this on unmount
    pub fn teardown(&mut self) {
        self.left.release();
        self.right.release();
        log::info!("[CONTROLLER] torn down, both decks empty");
    }

    /// Route one key press; returns whether anything was acted on
    pub fn handle_key(&mut self, key: char) -> bool {
        match KeyAction::for_key(key) {
            Some(action) => self.apply(action),
            None => false,
        }
    }

    /// Apply a global command; returns whether anything was acted on
    ///
    /// Per-deck commands against an empty deck are inert, not errors.
    pub fn apply(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::ToggleStem(side, kind) => {
                self.deck_mut(side).toggle_stem(kind).is_ok()
            }
            KeyAction::CuePress(side) => self.deck_mut(side).cue_press().is_ok(),
            KeyAction::TogglePlay(side) => {
                self.deck_mut(side).toggle_play_pause().is_ok()
            }
            KeyAction::SyncTempo => self.sync_tempo(),
            KeyAction::ResetAll => {
                self.reset_all();
                true
            }
        }
    }
}
