/// Static name -> path table of sound assets, fixed at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetTable {
    entries: Vec<(String, String)>,
}

/// Identifiers of the site's sounds, loaded from `audio/<id>.mp3`.
pub const SITE_SOUNDS: &[&str] = &[
    "hover", "click", "nav", "cta", "input", "submit", "ambient", "sample1", "sample2", "sample3",
    "sample4",
];

impl AssetTable {
    pub fn new<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<String>,
    {
        let mut table: Vec<(String, String)> = Vec::new();
        for (k, p) in entries {
            let k = k.into();
            let p = p.into();
            // later entries override earlier ones for the same name
            if let Some(slot) = table.iter_mut().find(|(name, _)| *name == k) {
                slot.1 = p;
            } else {
                table.push((k, p));
            }
        }
        Self { entries: table }
    }

    /// The site's default table rooted at `base` (e.g. `"audio"`).
    pub fn site(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self::new(
            SITE_SOUNDS
                .iter()
                .map(|id| (*id, format!("{base}/{id}.mp3"))),
        )
    }

    pub fn path(&self, id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, p)| p.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AssetTable {
    fn default() -> Self {
        Self::site("audio")
    }
}

/// Outcome of a batch load. Failed ids stay unplayable for the session.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
