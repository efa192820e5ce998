//! Audio-reactive parameter mapping consumed by the renderers.
//!
//! No platform APIs here. Each renderer pulls a
//! [`FrameSignals`](crate::FrameSignals) once per frame and runs it through
//! the mappings below.

use crate::bands::BandEnergies;
use crate::constants::*;
use glam::Vec3;
use rand::prelude::*;

/// Per-frame parameters of the 3D particle scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizerParams {
    pub sphere_scale: Vec3,
    pub emissive_intensity: f32,
    pub camera_z: f32,
}

impl VisualizerParams {
    pub fn from_energies(e: &BandEnergies) -> Self {
        Self {
            sphere_scale: Vec3::splat(1.0 + e.bass * SPHERE_BASS_GAIN),
            emissive_intensity: EMISSIVE_BASE + e.mid,
            camera_z: CAMERA_BASE_Z + e.high * CAMERA_HIGH_SPAN,
        }
    }

    /// Flat layout for script renderers: `[sx, sy, sz, emissive, camera_z]`.
    pub fn to_array(&self) -> [f32; 5] {
        let s = self.sphere_scale;
        [s.x, s.y, s.z, self.emissive_intensity, self.camera_z]
    }
}

/// Bin of `frequency` assigned to item `index` out of `count`.
#[inline]
pub fn bin_for_index(index: usize, count: usize, bins: usize) -> usize {
    if count == 0 || bins == 0 {
        return 0;
    }
    ((index as f64 / count as f64) * bins as f64).floor() as usize % bins
}

/// Particle size: `base` grown by up to 3x with its bin's magnitude.
pub fn particle_size(base: f32, index: usize, count: usize, frequency: &[u8]) -> f32 {
    if frequency.is_empty() {
        return base;
    }
    let v = frequency[bin_for_index(index, count, frequency.len())] as f32 / 255.0;
    base * (1.0 + v * PARTICLE_FREQ_GAIN)
}

pub fn light_intensity(index: usize, lights: usize, frequency: &[u8]) -> f32 {
    if frequency.is_empty() {
        return LIGHT_BASE_INTENSITY;
    }
    LIGHT_BASE_INTENSITY + frequency[bin_for_index(index, lights, frequency.len())] as f32 / 255.0
}

/// Sizes for `count` particles sharing one snapshot.
pub fn particle_sizes(base: f32, count: usize, frequency: &[u8]) -> Vec<f32> {
    (0..count)
        .map(|i| particle_size(base, i, count, frequency))
        .collect()
}

pub fn light_intensities(lights: usize, frequency: &[u8]) -> Vec<f32> {
    (0..lights)
        .map(|i| light_intensity(i, lights, frequency))
        .collect()
}

/// Exponentially smoothed bar levels for the waveform canvas.
#[derive(Clone, Debug)]
pub struct WaveformSmoother {
    levels: Vec<f32>,
    factor: f32,
}

impl WaveformSmoother {
    pub fn new(bars: usize) -> Self {
        Self::with_factor(bars, WAVEFORM_SMOOTHING)
    }

    pub fn with_factor(bars: usize, factor: f32) -> Self {
        Self {
            levels: vec![0.0; bars],
            factor: factor.clamp(0.0, 1.0),
        }
    }

    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    pub fn resize(&mut self, bars: usize) {
        self.levels.resize(bars, 0.0);
    }

    /// Move each bar a fixed fraction toward its bin; missing bins pull to 0.
    pub fn update(&mut self, frequency: &[u8]) {
        for (i, level) in self.levels.iter_mut().enumerate() {
            let target = frequency.get(i).map(|&v| v as f32 / 255.0).unwrap_or(0.0);
            *level += (target - *level) * self.factor;
        }
    }

    pub fn bar_height(level: f32) -> f32 {
        BAR_MIN_HEIGHT + level.clamp(0.0, 1.0) * (BAR_MAX_HEIGHT - BAR_MIN_HEIGHT)
    }

    /// Pixel heights of every bar at the current levels.
    pub fn bar_heights(&self) -> Vec<f32> {
        self.levels.iter().map(|&l| Self::bar_height(l)).collect()
    }
}

/// Tuning for [`PulseTrigger`].
///
/// - `bass_threshold`: bass energy a transient must exceed
/// - `bass_rise`: minimum jump over the previous frame's bass energy
/// - `random_probability`: chance per frame of a pulse without a transient
/// - `refractory_sec`: minimum spacing between pulses
#[derive(Clone, Debug, PartialEq)]
pub struct PulseConfig {
    pub bass_threshold: f32,
    pub bass_rise: f32,
    pub random_probability: f64,
    pub refractory_sec: f64,
    pub seed: u64,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            bass_threshold: PULSE_BASS_THRESHOLD,
            bass_rise: PULSE_BASS_RISE,
            random_probability: PULSE_RANDOM_PROBABILITY,
            refractory_sec: PULSE_REFRACTORY_SEC,
            seed: 7,
        }
    }
}

/// Why a pulse fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PulseCause {
    BassTransient,
    Random,
}

/// Decides when the cursor ring pulses.
pub struct PulseTrigger {
    config: PulseConfig,
    rng: StdRng,
    prev_bass: f32,
    last_fire_sec: Option<f64>,
}

impl PulseTrigger {
    pub fn new(config: PulseConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng,
            prev_bass: 0.0,
            last_fire_sec: None,
        }
    }

    pub fn config(&self) -> &PulseConfig {
        &self.config
    }

    pub fn set_random_probability(&mut self, p: f64) {
        self.config.random_probability = p.clamp(0.0, 1.0);
    }

    pub fn update(&mut self, bass: f32, now_sec: f64) -> Option<PulseCause> {
        let rise = bass - self.prev_bass;
        self.prev_bass = bass;
        if let Some(last) = self.last_fire_sec {
            if now_sec - last < self.config.refractory_sec {
                return None;
            }
        }
        let cause = if bass > self.config.bass_threshold && rise >= self.config.bass_rise {
            Some(PulseCause::BassTransient)
        } else if self.config.random_probability > 0.0
            && self.rng.gen::<f64>() < self.config.random_probability
        {
            Some(PulseCause::Random)
        } else {
            None
        };
        if cause.is_some() {
            self.last_fire_sec = Some(now_sec);
        }
        cause
    }
}

/// GPU-uploadable block of the four band energies.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AudioUniforms {
    pub average: f32,
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
}

impl From<BandEnergies> for AudioUniforms {
    fn from(e: BandEnergies) -> Self {
        Self {
            average: e.average,
            bass: e.bass,
            mid: e.mid,
            high: e.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visualizer_mapping() {
        let e = BandEnergies {
            average: 0.5,
            bass: 1.0,
            mid: 0.25,
            high: 0.5,
        };
        let p = VisualizerParams::from_energies(&e);
        assert_eq!(p.sphere_scale, Vec3::splat(1.5));
        assert_eq!(p.emissive_intensity, 0.75);
        assert_eq!(p.camera_z, 1050.0);
    }

    #[test]
    fn particle_size_tracks_its_bin() {
        let freq = [0u8, 255, 0, 255];
        assert_eq!(particle_size(2.0, 0, 8, &freq), 2.0);
        assert_eq!(particle_size(2.0, 2, 8, &freq), 6.0);
        assert_eq!(particle_size(2.0, 3, 8, &[]), 2.0);
        assert_eq!(light_intensity(1, 2, &freq), 0.5);
        assert_eq!(light_intensity(0, 4, &[255, 0, 0, 0]), 1.5);
    }

    #[test]
    fn visualizer_params_flatten_in_render_order() {
        let p = VisualizerParams::from_energies(&BandEnergies {
            average: 0.0,
            bass: 0.5,
            mid: 0.5,
            high: 1.0,
        });
        assert_eq!(p.to_array(), [1.25, 1.25, 1.25, 1.0, 1100.0]);
    }

    #[test]
    fn batch_sizes_match_per_item_mapping() {
        let freq = [0u8, 255, 0, 255];
        let sizes = particle_sizes(1.0, 4, &freq);
        assert_eq!(sizes, vec![1.0, 3.0, 1.0, 3.0]);
        assert_eq!(particle_sizes(1.0, 0, &freq), Vec::<f32>::new());
        assert_eq!(light_intensities(2, &freq), vec![0.5, 0.5]);
        assert_eq!(light_intensities(3, &[]), vec![0.5; 3]);
    }

    #[test]
    fn bar_heights_span_min_to_max() {
        let mut s = WaveformSmoother::with_factor(2, 1.0);
        assert_eq!(s.bar_heights(), vec![5.0, 5.0]);
        s.update(&[255, 0]);
        assert_eq!(s.bar_heights(), vec![150.0, 5.0]);
    }

    #[test]
    fn smoother_moves_fraction_toward_target() {
        let mut s = WaveformSmoother::new(3);
        s.update(&[255, 0]);
        assert!((s.levels()[0] - 0.3).abs() < 1e-6);
        assert_eq!(s.levels()[1], 0.0);
        assert_eq!(s.levels()[2], 0.0);
        s.update(&[255, 0]);
        assert!((s.levels()[0] - 0.51).abs() < 1e-6);
        assert_eq!(WaveformSmoother::bar_height(0.0), 5.0);
        assert_eq!(WaveformSmoother::bar_height(1.0), 150.0);
    }

    #[test]
    fn bass_transient_fires_and_respects_refractory() {
        let mut p = PulseTrigger::new(PulseConfig {
            random_probability: 0.0,
            ..Default::default()
        });
        assert_eq!(p.update(0.1, 0.0), None);
        assert_eq!(p.update(0.9, 0.016), Some(PulseCause::BassTransient));
        assert_eq!(p.update(0.1, 0.032), None);
        assert_eq!(p.update(0.9, 0.048), None, "inside refractory window");
        assert_eq!(p.update(0.1, 0.5), None);
        assert_eq!(p.update(0.9, 0.516), Some(PulseCause::BassTransient));
    }

    #[test]
    fn sustained_bass_does_not_retrigger() {
        let mut p = PulseTrigger::new(PulseConfig {
            random_probability: 0.0,
            ..Default::default()
        });
        p.update(0.0, 0.0);
        assert!(p.update(0.9, 1.0).is_some());
        assert!(p.update(0.9, 2.0).is_none());
        assert!(p.update(0.91, 3.0).is_none());
    }

    #[test]
    fn random_probability_is_configurable() {
        let mut always = PulseTrigger::new(PulseConfig {
            random_probability: 1.0,
            refractory_sec: 0.0,
            ..Default::default()
        });
        for i in 0..10 {
            assert_eq!(always.update(0.0, i as f64), Some(PulseCause::Random));
        }
        let mut never = PulseTrigger::new(PulseConfig::default());
        never.set_random_probability(0.0);
        for i in 0..1000 {
            assert_eq!(never.update(0.0, i as f64), None);
        }
    }

    #[test]
    fn uniforms_are_pod() {
        let u = AudioUniforms::from(BandEnergies {
            average: 0.1,
            bass: 0.2,
            mid: 0.3,
            high: 0.4,
        });
        let bytes = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), 16);
        let back: AudioUniforms = *bytemuck::from_bytes(bytes);
        assert_eq!(back, u);
    }
}
