use thiserror::Error;

/// Failure raised at the platform seam.
///
/// None of these ever reach renderer consumers: the provider logs them and
/// falls back to silence, a missing asset or the synthetic signal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AudioError {
    #[error("audio capability unavailable")]
    Unsupported,
    #[error("audio graph construction failed: {0}")]
    Graph(String),
    #[error("failed to fetch {path}: {reason}")]
    Fetch { path: String, reason: String },
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("playback error: {0}")]
    Playback(String),
    #[error("audio not initialized")]
    NotInitialized,
    #[error("audio buffer not found: {0}")]
    MissingAsset(String),
}

/// Coarse category used when deciding how a failure degrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    CapabilityUnavailable,
    AssetLoadFailure,
    PlaybackInvocation,
}

impl AudioError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AudioError::Unsupported | AudioError::Graph(_) => ErrorKind::CapabilityUnavailable,
            AudioError::Fetch { .. } | AudioError::Decode { .. } => ErrorKind::AssetLoadFailure,
            AudioError::Playback(_) | AudioError::NotInitialized | AudioError::MissingAsset(_) => {
                ErrorKind::PlaybackInvocation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_degradation_paths() {
        assert_eq!(AudioError::Unsupported.kind(), ErrorKind::CapabilityUnavailable);
        assert_eq!(
            AudioError::Graph("no context".into()).kind(),
            ErrorKind::CapabilityUnavailable
        );
        let fetch = AudioError::Fetch {
            path: "audio/x.mp3".into(),
            reason: "404".into(),
        };
        assert_eq!(fetch.kind(), ErrorKind::AssetLoadFailure);
        assert_eq!(fetch.to_string(), "failed to fetch audio/x.mp3: 404");
        assert_eq!(
            AudioError::MissingAsset("hover".into()).kind(),
            ErrorKind::PlaybackInvocation
        );
    }
}
