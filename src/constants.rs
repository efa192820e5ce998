// DOM hooks and page-level tuning for the web frontend.
//
// Selectors mirror the site's markup; keep them in one place so the wiring
// code and the host-side tests agree.

// Where the sound files live, relative to the page
pub const AUDIO_BASE: &str = "audio";

// Events that count as a user gesture for autoplay policy
pub const GESTURE_EVENTS: [&str; 4] = ["click", "touchstart", "keydown", "pointerdown"];

// Audio controls
pub const AUDIO_TOGGLE_SELECTOR: &str = ".audio-toggle";
pub const VOLUME_SLIDER_SELECTOR: &str = ".volume-range";
pub const SOUND_ATTR: &str = "data-sound";
pub const SOUND_ELEMENTS_SELECTOR: &str = "[data-sound]";
pub const SAMPLE_BUTTON_SELECTOR: &str = ".play-sample";
pub const TRACK_ATTR: &str = "data-track";
pub const MUTED_CLASS: &str = "muted";

// Sound ids used by the wiring
pub const CLICK_SOUND: &str = "click";

// Sample button labels
pub const PLAY_SAMPLE_LABEL: &str = "Play Sample";
pub const STOP_SAMPLE_LABEL: &str = "Stop Sample";

// Cursor pulse
pub const CURSOR_RING_SELECTOR: &str = ".cursor-ring";
pub const PULSE_CLASS: &str = "pulse";
pub const PULSE_HOLD_SEC: f64 = 0.12; // how long the class stays on

// Volume slider range
pub const SLIDER_MAX: f32 = 100.0;
