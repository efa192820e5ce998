use crate::audio::WebProvider;
use lufs_core::{
    light_intensities, particle_sizes, AudioUniforms, FrameSignals, VisualizerParams,
    WaveformSmoother,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Script-facing view of the shared audio provider.
///
/// Live accessors read the provider directly. The `visualizerParams`,
/// `particleSizes`, `lightIntensities` and `uniformBytes` getters read the
/// frame the loop last published, so every renderer on a page sees the
/// same frame.
#[wasm_bindgen]
#[derive(Clone)]
pub struct AudioHandle {
    provider: WebProvider,
    last: Rc<RefCell<FrameSignals>>,
}

impl AudioHandle {
    pub fn new(provider: WebProvider, last: Rc<RefCell<FrameSignals>>) -> Self {
        Self { provider, last }
    }
}

#[wasm_bindgen]
impl AudioHandle {
    #[wasm_bindgen(js_name = frequencySnapshot)]
    pub fn frequency_snapshot(&self) -> Vec<u8> {
        self.provider.frequency_snapshot()
    }

    #[wasm_bindgen(js_name = timeSnapshot)]
    pub fn time_snapshot(&self) -> Vec<u8> {
        self.provider.time_snapshot()
    }

    #[wasm_bindgen(js_name = averageEnergy)]
    pub fn average_energy(&self) -> f32 {
        self.provider.average_energy()
    }

    #[wasm_bindgen(js_name = bassEnergy)]
    pub fn bass_energy(&self) -> f32 {
        self.provider.bass_energy()
    }

    #[wasm_bindgen(js_name = midEnergy)]
    pub fn mid_energy(&self) -> f32 {
        self.provider.mid_energy()
    }

    #[wasm_bindgen(js_name = highEnergy)]
    pub fn high_energy(&self) -> f32 {
        self.provider.high_energy()
    }

    pub fn play(&self, id: &str, looped: bool, relative_volume: f32) {
        self.provider.play(id, looped, relative_volume);
    }

    pub fn stop(&self, id: &str) {
        self.provider.stop(id);
    }

    #[wasm_bindgen(js_name = stopAll)]
    pub fn stop_all(&self) {
        self.provider.stop_all();
    }

    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self, id: &str) -> bool {
        self.provider.is_playing(id)
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f32) {
        self.provider.set_volume(volume);
    }

    #[wasm_bindgen(js_name = toggleMute)]
    pub fn toggle_mute(&self) -> bool {
        self.provider.toggle_mute()
    }

    #[wasm_bindgen(js_name = isLive)]
    pub fn is_live(&self) -> bool {
        self.provider.is_initialized()
    }

    /// `[sx, sy, sz, emissive, camera_z]` for the particle scene.
    #[wasm_bindgen(js_name = visualizerParams)]
    pub fn visualizer_params(&self) -> Vec<f32> {
        let energies = self.last.borrow().energies;
        VisualizerParams::from_energies(&energies).to_array().to_vec()
    }

    #[wasm_bindgen(js_name = particleSizes)]
    pub fn particle_sizes(&self, base: f32, count: usize) -> Vec<f32> {
        particle_sizes(base, count, &self.last.borrow().frequency)
    }

    #[wasm_bindgen(js_name = lightIntensities)]
    pub fn light_intensities(&self, lights: usize) -> Vec<f32> {
        light_intensities(lights, &self.last.borrow().frequency)
    }

    /// Band energies as 16 bytes (four f32) for a uniform buffer.
    #[wasm_bindgen(js_name = uniformBytes)]
    pub fn uniform_bytes(&self) -> Vec<u8> {
        let uniforms = AudioUniforms::from(self.last.borrow().energies);
        bytemuck::bytes_of(&uniforms).to_vec()
    }
}

/// Smoothed bars for the waveform canvas. One per canvas.
#[wasm_bindgen]
pub struct WaveformBars {
    smoother: WaveformSmoother,
}

#[wasm_bindgen]
impl WaveformBars {
    #[wasm_bindgen(constructor)]
    pub fn new(bars: usize) -> WaveformBars {
        Self {
            smoother: WaveformSmoother::new(bars),
        }
    }

    pub fn resize(&mut self, bars: usize) {
        self.smoother.resize(bars);
    }

    pub fn update(&mut self, frequency: &[u8]) {
        self.smoother.update(frequency);
    }

    #[wasm_bindgen(js_name = barHeights)]
    pub fn bar_heights(&self) -> Vec<f32> {
        self.smoother.bar_heights()
    }
}
