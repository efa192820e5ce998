//! The audio signal provider: one per page session.
//!
//! Owns the audio graph (decode, playback, gain, analysis) and exposes cheap,
//! pull-based accessors that renderers call once per animation frame. Every
//! public operation is infallible from the caller's point of view: platform
//! failures are logged here and degrade to silence, a missing asset or the
//! synthetic signal.
//!
//! The provider is meant to be constructed once and shared by `Rc` handle
//! with each consumer. State lives behind a `RefCell` that is never held
//! across an `.await`, so snapshot reads stay valid while assets decode.

use crate::assets::{AssetTable, LoadReport};
use crate::bands::{self, BandEnergies};
use crate::constants::{AMBIENT_ID, DEFAULT_VOLUME, FALLBACK_BINS};
use crate::error::{AudioError, ErrorKind};
use crate::platform::{AnalysisConfig, AudioGraph, AudioPlatform, Clock, InstantClock, PlayOptions};
use crate::playback::{is_analyzable, ActiveVoice, PlaybackRegistry};
use crate::signal::{LiveAnalysis, SignalSource, SourceKind, SyntheticSignal};
use crate::volume::VolumeState;
use fnv::FnvHashMap;
use futures::future::join_all;
use std::cell::RefCell;
use std::rc::Rc;

/// Provider configuration.
///
/// - `analysis`: analyser window and smoothing for the live source
/// - `fallback_bins`: snapshot length while idle or synthetic
/// - `default_volume`: initial global volume (clamped to 0..1)
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub analysis: AnalysisConfig,
    pub fallback_bins: usize,
    pub default_volume: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            fallback_bins: FALLBACK_BINS,
            default_volume: DEFAULT_VOLUME,
        }
    }
}

/// Everything a renderer needs for one frame, read from a single snapshot.
///
/// The vectors are owned copies; keep them as long as you like.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSignals {
    pub frequency: Vec<u8>,
    pub time: Vec<u8>,
    pub energies: BandEnergies,
}

struct ProviderState<G: AudioGraph> {
    source: SignalSource<G>,
    buffers: FnvHashMap<String, G::Buffer>,
    failed: FnvHashMap<String, String>,
    playback: PlaybackRegistry<G::Voice>,
    volume: VolumeState,
    capability_logged: bool,
}

pub struct SignalProvider<P: AudioPlatform> {
    platform: P,
    config: ProviderConfig,
    clock: Box<dyn Clock>,
    state: RefCell<ProviderState<P::Graph>>,
}

/// Shared handle passed to every consumer.
pub type SharedProvider<P> = Rc<SignalProvider<P>>;

impl<P: AudioPlatform> SignalProvider<P> {
    pub fn new(platform: P, config: ProviderConfig) -> Self {
        Self::with_clock(platform, config, Box::new(InstantClock::new()))
    }

    /// Construct with an explicit clock driving the synthetic signal.
    pub fn with_clock(platform: P, config: ProviderConfig, clock: Box<dyn Clock>) -> Self {
        let mut state = ProviderState {
            source: SignalSource::Idle {
                bins: config.fallback_bins.max(1),
            },
            buffers: FnvHashMap::default(),
            failed: FnvHashMap::default(),
            playback: PlaybackRegistry::default(),
            volume: VolumeState::new(config.default_volume),
            capability_logged: false,
        };
        if !platform.is_supported() {
            fall_back(&mut state, &config, &AudioError::Unsupported);
        }
        Self {
            platform,
            config,
            clock,
            state: RefCell::new(state),
        }
    }

    pub fn into_shared(self) -> SharedProvider<P> {
        Rc::new(self)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn source_kind(&self) -> SourceKind {
        self.state.borrow().source.kind()
    }

    pub fn is_initialized(&self) -> bool {
        self.source_kind() == SourceKind::Live
    }

    /// Length of the snapshots currently handed out.
    pub fn bins(&self) -> usize {
        self.state.borrow().source.bins()
    }

    // ---------------- Lifecycle ----------------

    /// Build the audio graph once. Returns whether a live source is active.
    ///
    /// A failed attempt leaves the synthetic signal running; a later call may
    /// retry and, on success, replaces it.
    pub fn initialize(&self) -> bool {
        let mut st = self.state.borrow_mut();
        if matches!(st.source, SignalSource::Live(_)) {
            return true;
        }
        if !self.platform.is_supported() {
            fall_back(&mut st, &self.config, &AudioError::Unsupported);
            return false;
        }
        match self
            .platform
            .open(&self.config.analysis, st.volume.effective_gain())
        {
            Ok(graph) => {
                if st.source.kind() == SourceKind::Synthetic {
                    log::info!("[signal] live analyser available, synthetic signal stopped");
                }
                let live = LiveAnalysis::new(Rc::new(graph));
                log::info!("[audio] initialized ({} bins)", live.bins());
                st.source = SignalSource::Live(live);
                true
            }
            Err(e) => {
                log::error!("[audio] error initializing audio: {e}");
                fall_back(&mut st, &self.config, &e);
                false
            }
        }
    }

    /// Initialize, load every asset of `table`, then loop the ambient bed.
    ///
    /// Returns `None` when no live audio could be constructed.
    pub async fn start(&self, table: &AssetTable) -> Option<LoadReport> {
        if !self.initialize() {
            return None;
        }
        let report = self.load_assets(table).await;
        log::info!(
            "[assets] {} loaded, {} failed",
            report.loaded.len(),
            report.failed.len()
        );
        self.play(AMBIENT_ID, true, 1.0);
        Some(report)
    }

    // ---------------- Assets ----------------

    /// Decode one asset. A failure marks `id` unplayable for the session.
    pub async fn load_asset(&self, id: &str, path: &str) -> bool {
        self.try_load(id, path).await.is_ok()
    }

    /// Load every entry independently; one failure never blocks the rest.
    pub async fn load_assets(&self, table: &AssetTable) -> LoadReport {
        let loads = table.iter().map(|(id, path)| async move {
            let outcome = self.try_load(id, path).await;
            (id, outcome)
        });
        let mut report = LoadReport::default();
        for (id, outcome) in join_all(loads).await {
            match outcome {
                Ok(()) => report.loaded.push(id.to_string()),
                Err(e) => report.failed.push((id.to_string(), e.to_string())),
            }
        }
        report
    }

    async fn try_load(&self, id: &str, path: &str) -> Result<(), AudioError> {
        let graph = self.state.borrow().source.graph();
        let Some(graph) = graph else {
            log::warn!("[assets] cannot load {id}: audio not initialized");
            return Err(AudioError::NotInitialized);
        };
        if let Some(reason) = self.state.borrow().failed.get(id) {
            log::debug!("[assets] {id} failed earlier ({reason}), not retrying");
            return Err(AudioError::MissingAsset(id.to_string()));
        }
        // no borrow is held across this await
        match graph.load(path).await {
            Ok(buffer) => {
                self.state
                    .borrow_mut()
                    .buffers
                    .insert(id.to_string(), buffer);
                log::info!("[assets] loaded {id}");
                Ok(())
            }
            // only a bad asset is final; graph trouble leaves the id loadable
            Err(e) if e.kind() == ErrorKind::AssetLoadFailure => {
                log::error!("[assets] error loading {id}: {e}");
                self.state
                    .borrow_mut()
                    .failed
                    .insert(id.to_string(), e.to_string());
                Err(e)
            }
            Err(e) => {
                log::warn!("[assets] {id} not loaded ({:?}): {e}", e.kind());
                Err(e)
            }
        }
    }

    pub fn is_playable(&self, id: &str) -> bool {
        self.state.borrow().buffers.contains_key(id)
    }

    pub fn is_failed(&self, id: &str) -> bool {
        self.state.borrow().failed.contains_key(id)
    }

    // ---------------- Playback ----------------

    /// Start `id`, replacing any instance already playing under that id.
    ///
    /// Ignored (with a log line) when uninitialized, muted or the asset is
    /// missing.
    pub fn play(&self, id: &str, looped: bool, relative_volume: f32) {
        let mut st = self.state.borrow_mut();
        let Some(graph) = st.source.graph() else {
            log::debug!("[audio] play({id}) ignored: {}", AudioError::NotInitialized);
            return;
        };
        if st.volume.is_muted() {
            return;
        }
        let Some(buffer) = st.buffers.get(id).cloned() else {
            log::warn!("[audio] {}", AudioError::MissingAsset(id.to_string()));
            return;
        };
        if let Some(prev) = st.playback.remove(id) {
            stop_voice(&*graph, id, &prev.voice);
        }
        let relative_volume = if relative_volume.is_finite() {
            relative_volume.max(0.0)
        } else {
            1.0
        };
        let analyzable = is_analyzable(id);
        let options = PlayOptions {
            looped,
            gain: relative_volume * st.volume.effective_gain(),
            analyzable,
        };
        match graph.start(&buffer, options) {
            Ok(voice) => {
                st.playback.insert(
                    id,
                    ActiveVoice {
                        voice,
                        relative_volume,
                        analyzable,
                    },
                );
            }
            Err(e) => log::warn!("[audio] failed to start {id}: {e}"),
        }
    }

    /// One-shot UI sound at full relative volume.
    pub fn play_once(&self, id: &str) {
        self.play(id, false, 1.0);
    }

    /// Stop `id` if active. Tolerates instances that already ended.
    pub fn stop(&self, id: &str) {
        let mut st = self.state.borrow_mut();
        let Some(graph) = st.source.graph() else {
            return;
        };
        if let Some(active) = st.playback.remove(id) {
            stop_voice(&*graph, id, &active.voice);
        }
    }

    pub fn stop_all(&self) {
        let mut st = self.state.borrow_mut();
        let Some(graph) = st.source.graph() else {
            return;
        };
        for (id, active) in st.playback.drain() {
            stop_voice(&*graph, &id, &active.voice);
        }
    }

    pub fn is_playing(&self, id: &str) -> bool {
        self.state.borrow().playback.contains(id)
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().playback.len()
    }

    /// Last analyzable track started and not yet stopped.
    pub fn current_track(&self) -> Option<String> {
        self.state
            .borrow()
            .playback
            .current_track()
            .map(str::to_string)
    }

    // ---------------- Volume ----------------

    pub fn set_volume(&self, volume: f32) {
        let mut st = self.state.borrow_mut();
        st.volume.set_volume(volume);
        apply_gain(&st);
    }

    /// Flip mute, reapply gains, and return the new mute flag.
    pub fn toggle_mute(&self) -> bool {
        let mut st = self.state.borrow_mut();
        let muted = st.volume.toggle_mute();
        apply_gain(&st);
        muted
    }

    pub fn volume(&self) -> f32 {
        self.state.borrow().volume.volume()
    }

    pub fn is_muted(&self) -> bool {
        self.state.borrow().volume.is_muted()
    }

    pub fn effective_gain(&self) -> f32 {
        self.state.borrow().volume.effective_gain()
    }

    // ---------------- Signal accessors ----------------

    /// Owned copy of the current frequency magnitudes (0..=255).
    pub fn frequency_snapshot(&self) -> Vec<u8> {
        let now = self.clock.now_sec();
        self.state.borrow().source.frequency(now)
    }

    /// Owned copy of the current waveform, centered at 128.
    pub fn time_snapshot(&self) -> Vec<u8> {
        let now = self.clock.now_sec();
        self.state.borrow().source.time_domain(now)
    }

    pub fn average_energy(&self) -> f32 {
        bands::average_energy(&self.frequency_snapshot())
    }

    pub fn bass_energy(&self) -> f32 {
        bands::bass_energy(&self.frequency_snapshot())
    }

    pub fn mid_energy(&self) -> f32 {
        bands::mid_energy(&self.frequency_snapshot())
    }

    pub fn high_energy(&self) -> f32 {
        bands::high_energy(&self.frequency_snapshot())
    }

    /// Read both snapshots and all band energies at one instant.
    pub fn frame_signals(&self) -> FrameSignals {
        let now = self.clock.now_sec();
        let st = self.state.borrow();
        let frequency = st.source.frequency(now);
        let time = st.source.time_domain(now);
        let energies = BandEnergies::from_snapshot(&frequency);
        FrameSignals {
            frequency,
            time,
            energies,
        }
    }
}

fn fall_back<G: AudioGraph>(state: &mut ProviderState<G>, config: &ProviderConfig, err: &AudioError) {
    if matches!(state.source, SignalSource::Live(_)) {
        return;
    }
    if !state.capability_logged {
        log::warn!("[signal] {err} ({:?}); using synthetic signal", err.kind());
        state.capability_logged = true;
    }
    if !matches!(state.source, SignalSource::Synthetic(_)) {
        state.source = SignalSource::Synthetic(SyntheticSignal::new(config.fallback_bins));
    }
}

fn apply_gain<G: AudioGraph>(state: &ProviderState<G>) {
    let Some(graph) = state.source.graph() else {
        return;
    };
    let gain = state.volume.effective_gain();
    graph.set_master_gain(gain);
    for (_, active) in state.playback.iter() {
        graph.set_voice_gain(&active.voice, active.relative_volume * gain);
    }
}

fn stop_voice<G: AudioGraph>(graph: &G, id: &str, voice: &G::Voice) {
    if let Err(e) = graph.stop(voice) {
        log::debug!("[audio] stop({id}) ignored: {e}");
    }
}
