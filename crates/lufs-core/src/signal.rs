use crate::constants::*;
use crate::platform::AudioGraph;
use std::rc::Rc;

/// Which variant of [`SignalSource`] is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    Idle,
    Live,
    Synthetic,
}

/// Deterministic, wall-clock driven substitute for a real analyser.
///
/// Values depend only on the timestamp passed in, so skipped frames do not
/// change what a later frame sees.
#[derive(Clone, Debug)]
pub struct SyntheticSignal {
    bins: usize,
}

impl SyntheticSignal {
    pub fn new(bins: usize) -> Self {
        Self { bins: bins.max(1) }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn frequency_at(&self, t_sec: f64, out: &mut [u8]) {
        for (i, v) in out.iter_mut().enumerate() {
            let s = (t_sec * SYNTH_FREQ_RATE + i as f64 * SYNTH_FREQ_PHASE_STEP).sin() * 0.5 + 0.5;
            *v = (s * 255.0).clamp(0.0, 255.0) as u8;
        }
    }

    pub fn time_at(&self, t_sec: f64, out: &mut [u8]) {
        for (i, v) in out.iter_mut().enumerate() {
            let s = (t_sec * SYNTH_TIME_RATE + i as f64 * SYNTH_TIME_PHASE_STEP).sin();
            *v = (TIME_DOMAIN_CENTER as f64 + s * SYNTH_TIME_AMPLITUDE).clamp(0.0, 255.0) as u8;
        }
    }
}

/// A live analyser backed by a constructed graph.
pub struct LiveAnalysis<G: AudioGraph> {
    pub graph: Rc<G>,
    bins: usize,
}

impl<G: AudioGraph> LiveAnalysis<G> {
    pub fn new(graph: Rc<G>) -> Self {
        let bins = graph.bin_count();
        Self { graph, bins }
    }

    pub fn bins(&self) -> usize {
        self.bins
    }
}

/// The one active signal source of a provider.
///
/// `Idle` means the capability exists but the user has not interacted yet;
/// it reads as silence. `Live` is terminal.
pub enum SignalSource<G: AudioGraph> {
    Idle { bins: usize },
    Live(LiveAnalysis<G>),
    Synthetic(SyntheticSignal),
}

impl<G: AudioGraph> SignalSource<G> {
    pub fn kind(&self) -> SourceKind {
        match self {
            SignalSource::Idle { .. } => SourceKind::Idle,
            SignalSource::Live(_) => SourceKind::Live,
            SignalSource::Synthetic(_) => SourceKind::Synthetic,
        }
    }

    pub fn bins(&self) -> usize {
        match self {
            SignalSource::Idle { bins } => *bins,
            SignalSource::Live(live) => live.bins(),
            SignalSource::Synthetic(synth) => synth.bins(),
        }
    }

    pub fn graph(&self) -> Option<Rc<G>> {
        match self {
            SignalSource::Live(live) => Some(live.graph.clone()),
            _ => None,
        }
    }

    /// Fresh owned frequency snapshot at wall-clock time `now_sec`.
    pub fn frequency(&self, now_sec: f64) -> Vec<u8> {
        let mut out = vec![0u8; self.bins()];
        match self {
            SignalSource::Idle { .. } => {}
            SignalSource::Live(live) => live.graph.read_frequency(&mut out),
            SignalSource::Synthetic(synth) => synth.frequency_at(now_sec, &mut out),
        }
        out
    }

    /// Fresh owned time-domain snapshot at wall-clock time `now_sec`.
    pub fn time_domain(&self, now_sec: f64) -> Vec<u8> {
        let mut out = vec![TIME_DOMAIN_CENTER; self.bins()];
        match self {
            SignalSource::Idle { .. } => {}
            SignalSource::Live(live) => live.graph.read_time_domain(&mut out),
            SignalSource::Synthetic(synth) => synth.time_at(now_sec, &mut out),
        }
        out
    }
}
