//! Stemdeck Core - dual-deck, multi-stem transport and synchronization engine
//!
//! Two independently operable decks, each holding one track decomposed into
//! up to four stems (bass, drums, melody, vocals). The engine keeps a
//! deck's stems phase-locked to each other and to an external waveform
//! display, applies tempo changes as one uniform playback rate, and
//! manages play/pause/seek/cue transport state per deck. Audio decoding
//! and waveform drawing stay with the host via the traits in [`source`].

pub mod catalog;
pub mod controller;
pub mod deck;
pub mod error;
pub mod source;
pub mod stem_set;
pub mod sync;
pub mod track;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use controller::{DualDeck, KeyAction};
pub use deck::{Deck, LoadOutcome, LoadTicket};
pub use error::{DeckError, DeckResult};
pub use stem_set::StemSet;
pub use sync::SyncMonitor;
pub use track::TrackDescriptor;
pub use types::*;
