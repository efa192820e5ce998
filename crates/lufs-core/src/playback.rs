use crate::constants::{AMBIENT_ID, SAMPLE_PREFIX};
use fnv::FnvHashMap;

/// Whether an identifier feeds the analyser (ambient bed or a sample track).
#[inline]
pub fn is_analyzable(id: &str) -> bool {
    id == AMBIENT_ID || id.starts_with(SAMPLE_PREFIX)
}

/// A started instance and the parameters needed to re-gain it.
#[derive(Debug)]
pub struct ActiveVoice<V> {
    pub voice: V,
    pub relative_volume: f32,
    pub analyzable: bool,
}

/// Active playback instances keyed by identifier, at most one per id.
#[derive(Debug)]
pub struct PlaybackRegistry<V> {
    active: FnvHashMap<String, ActiveVoice<V>>,
    current_track: Option<String>,
}

impl<V> Default for PlaybackRegistry<V> {
    fn default() -> Self {
        Self {
            active: FnvHashMap::default(),
            current_track: None,
        }
    }
}

impl<V> PlaybackRegistry<V> {
    /// Record a new instance. Any previous instance for `id` is returned so
    /// the caller can stop it.
    pub fn insert(&mut self, id: &str, voice: ActiveVoice<V>) -> Option<ActiveVoice<V>> {
        if voice.analyzable {
            self.current_track = Some(id.to_string());
        }
        self.active.insert(id.to_string(), voice)
    }

    pub fn remove(&mut self, id: &str) -> Option<ActiveVoice<V>> {
        let removed = self.active.remove(id);
        if removed.is_some() && self.current_track.as_deref() == Some(id) {
            self.current_track = None;
        }
        removed
    }

    pub fn drain(&mut self) -> Vec<(String, ActiveVoice<V>)> {
        self.current_track = None;
        self.active.drain().collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.active.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActiveVoice<V>)> {
        self.active.iter().map(|(k, v)| (k.as_str(), v))
    }
}
