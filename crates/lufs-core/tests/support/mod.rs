// In-memory audio platform used by the provider integration tests.

#![allow(dead_code)]

use lufs_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct VoiceRec {
    pub buffer: String,
    pub gain: f32,
    pub looped: bool,
    pub analyzable: bool,
    pub stopped: bool,
    pub ended: bool,
}

/// Shared view into what the provider did to the graph.
#[derive(Default)]
pub struct Probe {
    pub opens: Cell<u32>,
    pub fail_opens: Cell<u32>,
    pub fail_loads: Cell<u32>,
    pub fail_starts: Cell<u32>,
    pub master_gain: Cell<f32>,
    pub voices: RefCell<Vec<VoiceRec>>,
    pub loads: RefCell<Vec<String>>,
    pub frequency: RefCell<Vec<u8>>,
    pub time: RefCell<Vec<u8>>,
}

impl Probe {
    pub fn playing(&self, buffer: &str) -> usize {
        self.voices
            .borrow()
            .iter()
            .filter(|v| v.buffer == buffer && !v.stopped && !v.ended)
            .count()
    }

    pub fn last_voice(&self) -> Option<VoiceRec> {
        self.voices.borrow().last().cloned()
    }

    /// Simulate a one-shot reaching its end on its own.
    pub fn end_all(&self) {
        for v in self.voices.borrow_mut().iter_mut() {
            v.ended = true;
        }
    }
}

pub struct MockPlatform {
    pub supported: bool,
    pub probe: Rc<Probe>,
}

impl MockPlatform {
    pub fn supported() -> (Self, Rc<Probe>) {
        let probe = Rc::new(Probe::default());
        (
            Self {
                supported: true,
                probe: probe.clone(),
            },
            probe,
        )
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            probe: Rc::new(Probe::default()),
        }
    }
}

impl AudioPlatform for MockPlatform {
    type Graph = MockGraph;

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn open(&self, config: &AnalysisConfig, master_gain: f32) -> Result<MockGraph, AudioError> {
        if self.probe.fail_opens.get() > 0 {
            self.probe.fail_opens.set(self.probe.fail_opens.get() - 1);
            return Err(AudioError::Graph("context creation threw".into()));
        }
        self.probe.opens.set(self.probe.opens.get() + 1);
        self.probe.master_gain.set(master_gain);
        let bins = config.bin_count();
        *self.probe.frequency.borrow_mut() = vec![0; bins];
        *self.probe.time.borrow_mut() = vec![128; bins];
        Ok(MockGraph {
            probe: self.probe.clone(),
            bins,
        })
    }
}

pub struct MockGraph {
    probe: Rc<Probe>,
    bins: usize,
}

impl AudioGraph for MockGraph {
    type Buffer = String;
    type Voice = usize;

    async fn load(&self, path: &str) -> Result<String, AudioError> {
        self.probe.loads.borrow_mut().push(path.to_string());
        if self.probe.fail_loads.get() > 0 {
            self.probe.fail_loads.set(self.probe.fail_loads.get() - 1);
            return Err(AudioError::Graph("context closed".into()));
        }
        if path.contains("missing") {
            return Err(AudioError::Fetch {
                path: path.to_string(),
                reason: "404 Not Found".into(),
            });
        }
        if path.contains("corrupt") {
            return Err(AudioError::Decode {
                path: path.to_string(),
                reason: "EncodingError".into(),
            });
        }
        Ok(path.to_string())
    }

    fn start(&self, buffer: &String, options: PlayOptions) -> Result<usize, AudioError> {
        if self.probe.fail_starts.get() > 0 {
            self.probe.fail_starts.set(self.probe.fail_starts.get() - 1);
            return Err(AudioError::Playback("connect failed".into()));
        }
        let mut voices = self.probe.voices.borrow_mut();
        voices.push(VoiceRec {
            buffer: buffer.clone(),
            gain: options.gain,
            looped: options.looped,
            analyzable: options.analyzable,
            stopped: false,
            ended: false,
        });
        Ok(voices.len() - 1)
    }

    fn stop(&self, voice: &usize) -> Result<(), AudioError> {
        let mut voices = self.probe.voices.borrow_mut();
        let rec = &mut voices[*voice];
        if rec.stopped || rec.ended {
            return Err(AudioError::Playback("InvalidStateError".into()));
        }
        rec.stopped = true;
        Ok(())
    }

    fn set_voice_gain(&self, voice: &usize, gain: f32) {
        self.probe.voices.borrow_mut()[*voice].gain = gain;
    }

    fn set_master_gain(&self, gain: f32) {
        self.probe.master_gain.set(gain);
    }

    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_frequency(&self, out: &mut [u8]) {
        let src = self.probe.frequency.borrow();
        let n = out.len().min(src.len());
        out[..n].copy_from_slice(&src[..n]);
    }

    fn read_time_domain(&self, out: &mut [u8]) {
        let src = self.probe.time.borrow();
        let n = out.len().min(src.len());
        out[..n].copy_from_slice(&src[..n]);
    }
}

pub fn live_provider() -> (SignalProvider<MockPlatform>, Rc<Probe>) {
    let (platform, probe) = MockPlatform::supported();
    let provider = SignalProvider::new(platform, ProviderConfig::default());
    assert!(provider.initialize());
    (provider, probe)
}
