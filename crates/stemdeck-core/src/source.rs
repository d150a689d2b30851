//! Collaborator seams: stem audio sources and the waveform display
//!
//! The engine never decodes or renders audio itself. It drives platform
//! media handles through [`StemSource`] and mirrors transport state onto an
//! external waveform component through [`WaveformDisplay`]. Hosts implement
//! these traits over whatever media layer they use; tests implement them
//! with in-memory fakes.

use std::future::Future;

use crate::error::DeckResult;
use crate::types::StemKind;

/// One playable audio handle bound to a stem kind and URI
///
/// Mute is volume-only: a muted source keeps decoding and advancing so it
/// stays sample-aligned for an instant unmute. Playback state is shared
/// across the whole stem set and is never derived from the mute flag.
pub trait StemSource {
    /// Whether this source is muted
    fn is_muted(&self) -> bool;

    /// Mute or unmute this source without touching its playback state
    fn set_muted(&mut self, muted: bool);

    /// Current linear playback-rate multiplier (1.0 = original tempo)
    fn playback_rate(&self) -> f64;

    /// Set the linear playback-rate multiplier
    fn set_playback_rate(&mut self, rate: f64);

    /// Output gain in `0.0..=1.0`
    fn volume(&self) -> f32;

    /// Set the output gain
    fn set_volume(&mut self, volume: f32);

    /// Current playhead position in seconds
    fn position(&self) -> f64;

    /// Hard-set the playhead position in seconds
    fn seek(&mut self, seconds: f64);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback, keeping the playhead where it is
    fn pause(&mut self);

    /// Whether the source is currently advancing
    fn is_playing(&self) -> bool;
}

/// Factory for stem sources
///
/// `open` resolves once the source is ready to play (the platform's
/// `loadeddata` signal) and rejects if the source signals an error. The
/// engine imposes no timeout: network-bound loads may legitimately take
/// long, and callers that want one wrap the returned future themselves.
pub trait StemBackend {
    /// The source type this backend produces
    type Source: StemSource;

    /// Create a source for `uri` and wait until it is ready to play
    fn open(&self, kind: StemKind, uri: &str) -> impl Future<Output = DeckResult<Self::Source>>;
}

/// External waveform-rendering component
///
/// The engine treats this as the authoritative transport clock the user
/// scrubs: when playback starts, stems are first seeked to
/// [`current_time`](WaveformDisplay::current_time). It never draws or
/// decodes anything itself.
pub trait WaveformDisplay {
    /// Load and render the given URI; resolves when the display is ready
    fn load(&mut self, uri: &str) -> impl Future<Output = Result<(), String>>;

    /// Start advancing the visual cursor
    fn play(&mut self);

    /// Stop advancing the visual cursor
    fn pause(&mut self);

    /// Current cursor position in seconds
    fn current_time(&self) -> f64;

    /// Move the cursor to an absolute position in seconds
    fn seek(&mut self, seconds: f64);

    /// Set the visual scrub speed to match the decks' playback rate
    fn set_playback_rate(&mut self, rate: f64);
}
