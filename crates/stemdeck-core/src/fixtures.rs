//! In-memory fake collaborators for engine tests

use std::cell::RefCell;
use std::future::{ready, Future};

use crate::error::{DeckError, DeckResult};
use crate::source::{StemBackend, StemSource, WaveformDisplay};
use crate::types::StemKind;

/// Fake media handle with inspectable state
#[derive(Debug, Clone, PartialEq)]
pub struct FakeSource {
    pub kind: StemKind,
    pub uri: String,
    pub muted: bool,
    pub rate: f64,
    pub volume: f32,
    pub pos: f64,
    pub playing: bool,
}

impl FakeSource {
    pub fn new(kind: StemKind, uri: &str) -> Self {
        Self {
            kind,
            uri: uri.to_string(),
            muted: false,
            rate: 1.0,
            volume: 1.0,
            pos: 0.0,
            playing: false,
        }
    }
}

impl StemSource for FakeSource {
    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn position(&self) -> f64 {
        self.pos
    }

    fn seek(&mut self, seconds: f64) {
        self.pos = seconds;
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Fake backend: records every open and can be told to fail one stem kind
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub fail_kind: Option<StemKind>,
    pub opened: RefCell<Vec<(StemKind, String)>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(kind: StemKind) -> Self {
        Self {
            fail_kind: Some(kind),
            opened: RefCell::new(Vec::new()),
        }
    }

    pub fn open_count(&self) -> usize {
        self.opened.borrow().len()
    }
}

impl StemBackend for FakeBackend {
    type Source = FakeSource;

    fn open(&self, kind: StemKind, uri: &str) -> impl Future<Output = DeckResult<FakeSource>> {
        self.opened.borrow_mut().push((kind, uri.to_string()));
        let result = if self.fail_kind == Some(kind) {
            Err(DeckError::StemLoad {
                kind,
                reason: "decode error".to_string(),
            })
        } else {
            Ok(FakeSource::new(kind, uri))
        };
        ready(result)
    }
}

/// Fake waveform display with a settable clock
#[derive(Debug, Default)]
pub struct FakeWaveform {
    pub loaded_uri: Option<String>,
    pub fail_load: bool,
    pub playing: bool,
    pub time: f64,
    pub rate: f64,
}

impl FakeWaveform {
    pub fn new() -> Self {
        Self {
            rate: 1.0,
            ..Self::default()
        }
    }

    /// Simulate the user scrubbing the visual cursor
    pub fn set_time(&mut self, seconds: f64) {
        self.time = seconds;
    }
}

impl WaveformDisplay for FakeWaveform {
    fn load(&mut self, uri: &str) -> impl Future<Output = Result<(), String>> {
        let result = if self.fail_load {
            Err("render error".to_string())
        } else {
            self.loaded_uri = Some(uri.to_string());
            self.playing = false;
            self.time = 0.0;
            Ok(())
        };
        ready(result)
    }

    fn play(&mut self) {
        self.playing = true;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn seek(&mut self, seconds: f64) {
        self.time = seconds;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}

/// Three-track catalog mirroring the shipped demo library
pub fn demo_catalog_json() -> &'static str {
    r#"[
        { "id": 1, "name": "Fall to Light", "bpm": 128, "key": "Am", "path": "NCS_Fall_to_Light" },
        { "id": 2, "name": "On & On", "bpm": 120, "key": "C", "path": "NCS_OnOn" },
        { "id": 3, "name": "Chill Guy Remix", "bpm": 95, "key": "Dm", "path": "chill-guy-remix" }
    ]"#
}
