// Shared audio/visual tuning constants used by the web frontend and tests.

// Analysis
pub const ANALYSER_FFT_SIZE: u32 = 1024; // bins = fft / 2
pub const ANALYSER_SMOOTHING: f64 = 0.8;
pub const FALLBACK_BINS: usize = 128; // snapshot length when no analyser exists
pub const TIME_DOMAIN_CENTER: u8 = 128;

// Band cut points as fractions of the snapshot length
pub const BASS_CUT: f32 = 0.2;
pub const MID_CUT: f32 = 0.6;

// Volume
pub const DEFAULT_VOLUME: f32 = 0.75;

// Playback naming
pub const AMBIENT_ID: &str = "ambient";
pub const SAMPLE_PREFIX: &str = "sample";

// Synthetic fallback waveform
pub const SYNTH_FREQ_RATE: f64 = 2.0; // radians per second
pub const SYNTH_FREQ_PHASE_STEP: f64 = 0.1; // radians per bin
pub const SYNTH_TIME_RATE: f64 = 4.0;
pub const SYNTH_TIME_PHASE_STEP: f64 = 0.2;
pub const SYNTH_TIME_AMPLITUDE: f64 = 64.0;

// Visualizer mapping
pub const SPHERE_BASS_GAIN: f32 = 0.5;
pub const EMISSIVE_BASE: f32 = 0.5;
pub const CAMERA_BASE_Z: f32 = 1000.0;
pub const CAMERA_HIGH_SPAN: f32 = 100.0;
pub const PARTICLE_FREQ_GAIN: f32 = 2.0;
pub const LIGHT_BASE_INTENSITY: f32 = 0.5;

// Waveform bars
pub const WAVEFORM_SMOOTHING: f32 = 0.3;
pub const BAR_MIN_HEIGHT: f32 = 5.0;
pub const BAR_MAX_HEIGHT: f32 = 150.0;

// Cursor pulse
pub const PULSE_BASS_THRESHOLD: f32 = 0.6;
pub const PULSE_BASS_RISE: f32 = 0.08; // minimum frame-to-frame bass jump
pub const PULSE_RANDOM_PROBABILITY: f64 = 0.02;
pub const PULSE_REFRACTORY_SEC: f64 = 0.18;
