//! Seam between the signal provider and the host audio capability.
//!
//! The web frontend implements these traits over the WebAudio API; tests use
//! an in-memory double. Everything here is single-threaded: implementations
//! are free to use `Rc`/`RefCell` internally and methods take `&self`.

use crate::constants::{ANALYSER_FFT_SIZE, ANALYSER_SMOOTHING};
use crate::error::AudioError;
use instant::Instant;
use std::cell::Cell;

/// Analyser node parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalysisConfig {
    pub fft_size: u32,
    pub smoothing: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: ANALYSER_FFT_SIZE,
            smoothing: ANALYSER_SMOOTHING,
        }
    }
}

impl AnalysisConfig {
    /// Number of frequency bins the analyser yields (half the window).
    pub fn bin_count(&self) -> usize {
        (self.fft_size / 2) as usize
    }
}

/// How a buffer should be started.
///
/// - `looped`: restart at the end of the buffer
/// - `gain`: effective gain for the instance (relative volume * global gain)
/// - `analyzable`: route the instance into the analyser as well as the master bus
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayOptions {
    pub looped: bool,
    pub gain: f32,
    pub analyzable: bool,
}

/// Capability detection plus one-shot graph construction.
pub trait AudioPlatform {
    type Graph: AudioGraph;

    fn is_supported(&self) -> bool;

    /// Build context, master gain (at `master_gain`) and analyser.
    fn open(&self, config: &AnalysisConfig, master_gain: f32) -> Result<Self::Graph, AudioError>;
}

/// A constructed audio graph: decode, playback, gain and analysis.
#[allow(async_fn_in_trait)]
pub trait AudioGraph {
    type Buffer: Clone;
    type Voice;

    /// Fetch and decode one asset.
    async fn load(&self, path: &str) -> Result<Self::Buffer, AudioError>;

    fn start(&self, buffer: &Self::Buffer, options: PlayOptions) -> Result<Self::Voice, AudioError>;

    /// May fail if the voice already ended; callers treat that as a no-op.
    fn stop(&self, voice: &Self::Voice) -> Result<(), AudioError>;

    fn set_voice_gain(&self, voice: &Self::Voice, gain: f32);
    fn set_master_gain(&self, gain: f32);

    fn bin_count(&self) -> usize;
    fn read_frequency(&self, out: &mut [u8]);
    fn read_time_domain(&self, out: &mut [u8]);
}

/// Wall-clock source driving the synthetic signal.
pub trait Clock {
    fn now_sec(&self) -> f64;
}

/// Seconds elapsed since construction, backed by `instant` so it also works on wasm.
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_sec(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Manually advanced clock for deterministic tests and replays.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_sec: f64) -> Self {
        Self {
            now: Cell::new(start_sec),
        }
    }

    pub fn set(&self, sec: f64) {
        self.now.set(sec);
    }

    pub fn advance(&self, dt_sec: f64) {
        self.now.set(self.now.get() + dt_sec);
    }
}

impl Clock for ManualClock {
    fn now_sec(&self) -> f64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for std::rc::Rc<C> {
    fn now_sec(&self) -> f64 {
        (**self).now_sec()
    }
}
