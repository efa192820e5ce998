use crate::constants::DEFAULT_VOLUME;

/// Global volume plus mute flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeState {
    volume: f32,
    muted: bool,
}

impl Default for VolumeState {
    fn default() -> Self {
        Self::new(DEFAULT_VOLUME)
    }
}

impl VolumeState {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: clamp_unit(volume),
            muted: false,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_unit(volume);
    }

    /// Flip mute and return the new flag.
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn effective_gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
