// Pure helpers behind the audio controls; no DOM access here.

/// Map the volume slider's string value (0..=100) to a gain in 0..=1.
#[inline]
pub fn slider_to_volume(value: &str, slider_max: f32) -> Option<f32> {
    let v: f32 = value.trim().parse().ok()?;
    if !v.is_finite() || slider_max <= 0.0 {
        return None;
    }
    Some((v / slider_max).clamp(0.0, 1.0))
}

/// Inner HTML for a sample button in the given state.
#[inline]
pub fn sample_button_html(playing: bool, play_label: &str, stop_label: &str) -> String {
    let label = if playing { stop_label } else { play_label };
    format!("<span class=\"play-icon\"></span> {label}")
}

/// Links and buttons also click when activated.
#[inline]
pub fn is_clickable_tag(tag_name: &str) -> bool {
    tag_name.eq_ignore_ascii_case("a") || tag_name.eq_ignore_ascii_case("button")
}

/// What pressing a sample button should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SampleAction {
    /// The pressed track is the current one: stop it.
    Stop(String),
    /// Start the pressed track, stopping `previous` first if set.
    Switch {
        previous: Option<String>,
        next: String,
    },
}

pub fn sample_action(current: Option<&str>, pressed: &str, sample_prefix: &str) -> SampleAction {
    match current {
        Some(cur) if cur == pressed => SampleAction::Stop(pressed.to_string()),
        Some(cur) if cur.starts_with(sample_prefix) => SampleAction::Switch {
            previous: Some(cur.to_string()),
            next: pressed.to_string(),
        },
        _ => SampleAction::Switch {
            previous: None,
            next: pressed.to_string(),
        },
    }
}

/// Holds a CSS class on for a short time after a trigger.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClassPulse {
    until_sec: Option<f64>,
}

impl ClassPulse {
    pub fn trigger(&mut self, now_sec: f64, hold_sec: f64) {
        self.until_sec = Some(now_sec + hold_sec);
    }

    /// Whether the class should be present at `now_sec`.
    pub fn active(&mut self, now_sec: f64) -> bool {
        match self.until_sec {
            Some(t) if now_sec < t => true,
            Some(_) => {
                self.until_sec = None;
                false
            }
            None => false,
        }
    }
}
