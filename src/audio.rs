//! Best-effort sound effect playback.
//!
//! Domain operations cue short sounds (campaign added, trophy unlocked).
//! Audio is cosmetic: a cue that cannot load or play is logged with
//! `log::warn!` and swallowed, never surfaced to the caller. The player
//! caches one loaded handle per distinct asset for its whole lifetime.
//!
//! The actual audio device sits behind [`AudioBackend`] so the core stays
//! testable and headless builds stay dependency-free. The real backend
//! ([`RodioBackend`]) is gated behind the `playback` feature.

use std::collections::HashSet;
use std::path::Path;

use log::warn;
use thiserror::Error;

use crate::assets::{AssetCatalog, SoundCue};

/// Errors from loading or playing a sound asset. These never cross the
/// module boundary during playback; [`SoundPlayer::play`] logs and swallows.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio device missing or refused the stream.
    #[error("audio device unavailable: {0}")]
    Device(String),

    /// Asset bytes did not decode as audio.
    #[error("decode error: {0}")]
    Decode(String),

    /// Playback requested for an asset that was never loaded.
    #[error("sound not loaded: {0}")]
    NotLoaded(String),
}

/// Backend seam between the sound player and the host audio stack. Keys are
/// the textual form of the asset path; a backend holds at most one handle
/// per key.
pub trait AudioBackend {
    /// Load the asset at `path` and cache its handle under `key`. Loading an
    /// already-loaded key is a no-op.
    fn load(&mut self, key: &str, path: &Path) -> Result<(), PlaybackError>;

    /// Play the cached handle for `key` from the beginning, regardless of any
    /// prior playback state.
    fn play(&mut self, key: &str) -> Result<(), PlaybackError>;

    fn is_loaded(&self, key: &str) -> bool;
}

/// Backend that accepts every request and produces no sound. Used when audio
/// is disabled in config or the crate is built without `playback`.
#[derive(Debug, Default)]
pub struct SilentBackend {
    loaded: HashSet<String>,
}

impl AudioBackend for SilentBackend {
    fn load(&mut self, key: &str, _path: &Path) -> Result<(), PlaybackError> {
        self.loaded.insert(key.to_string());
        Ok(())
    }

    fn play(&mut self, key: &str) -> Result<(), PlaybackError> {
        if !self.loaded.contains(key) {
            return Err(PlaybackError::NotLoaded(key.to_string()));
        }
        Ok(())
    }

    fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains(key)
    }
}

/// What a [`RecordingBackend`] observed, shared with the test that built it.
#[derive(Debug, Default)]
pub struct BackendLog {
    pub loads: Vec<String>,
    pub plays: Vec<String>,
}

pub type SharedBackendLog = std::rc::Rc<std::cell::RefCell<BackendLog>>;

/// Backend that records load and play requests instead of touching audio
/// hardware. Intended for tests asserting cue behavior.
#[derive(Debug)]
pub struct RecordingBackend {
    log: SharedBackendLog,
    loaded: HashSet<String>,
}

impl RecordingBackend {
    pub fn new() -> (Self, SharedBackendLog) {
        let log = SharedBackendLog::default();
        (
            RecordingBackend {
                log: log.clone(),
                loaded: HashSet::new(),
            },
            log,
        )
    }
}

impl AudioBackend for RecordingBackend {
    fn load(&mut self, key: &str, _path: &Path) -> Result<(), PlaybackError> {
        self.log.borrow_mut().loads.push(key.to_string());
        self.loaded.insert(key.to_string());
        Ok(())
    }

    fn play(&mut self, key: &str) -> Result<(), PlaybackError> {
        if !self.loaded.contains(key) {
            return Err(PlaybackError::NotLoaded(key.to_string()));
        }
        self.log.borrow_mut().plays.push(key.to_string());
        Ok(())
    }

    fn is_loaded(&self, key: &str) -> bool {
        self.loaded.contains(key)
    }
}

/// Plays sound cues through an injected backend, caching one loaded handle
/// per asset. Constructed once at bootstrap and passed to the operations
/// that cue sounds; there is no ambient global.
pub struct SoundPlayer {
    backend: Box<dyn AudioBackend>,
    catalog: AssetCatalog,
}

impl SoundPlayer {
    pub fn new(backend: Box<dyn AudioBackend>, catalog: AssetCatalog) -> Self {
        SoundPlayer { backend, catalog }
    }

    /// Player that accepts cues and does nothing audible.
    pub fn silent(catalog: AssetCatalog) -> Self {
        SoundPlayer::new(Box::new(SilentBackend::default()), catalog)
    }

    fn cue_key(&self, cue: SoundCue) -> (String, std::path::PathBuf) {
        let path = self.catalog.sound_path(cue);
        (path.to_string_lossy().into_owned(), path)
    }

    /// Load the asset for `cue` if it is not cached yet. Idempotent. Load
    /// failures propagate so bootstrap can decide whether to warn.
    pub fn preload(&mut self, cue: SoundCue) -> Result<(), PlaybackError> {
        let (key, path) = self.cue_key(cue);
        if self.backend.is_loaded(&key) {
            return Ok(());
        }
        self.backend.load(&key, &path)
    }

    /// Play `cue` from the beginning, lazily loading if [`Self::preload`]
    /// was skipped. Any failure is logged and swallowed.
    pub fn play(&mut self, cue: SoundCue) {
        let (key, path) = self.cue_key(cue);
        if !self.backend.is_loaded(&key) {
            if let Err(err) = self.backend.load(&key, &path) {
                warn!("failed to load sound {:?}: {err}", cue);
                return;
            }
        }
        if let Err(err) = self.backend.play(&key) {
            warn!("failed to play sound {:?}: {err}", cue);
        }
    }
}

#[cfg(feature = "playback")]
pub use self::rodio_backend::RodioBackend;

#[cfg(feature = "playback")]
mod rodio_backend {
    use std::collections::HashMap;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::source::{Buffered, Source};
    use rodio::{Decoder, OutputStream, OutputStreamHandle};

    use super::{AudioBackend, PlaybackError};

    type CachedSound = Buffered<Decoder<BufReader<File>>>;

    /// Plays decoded sound buffers through the default host output device.
    /// Each `play` mixes a fresh copy of the buffer from its start, matching
    /// the restart-from-beginning cue semantics.
    pub struct RodioBackend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sounds: HashMap<String, CachedSound>,
    }

    impl RodioBackend {
        pub fn new() -> Result<Self, PlaybackError> {
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| PlaybackError::Device(e.to_string()))?;
            Ok(RodioBackend {
                _stream: stream,
                handle,
                sounds: HashMap::new(),
            })
        }
    }

    impl AudioBackend for RodioBackend {
        fn load(&mut self, key: &str, path: &Path) -> Result<(), PlaybackError> {
            if self.sounds.contains_key(key) {
                return Ok(());
            }
            let file = File::open(path)?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| PlaybackError::Decode(e.to_string()))?
                .buffered();
            self.sounds.insert(key.to_string(), source);
            Ok(())
        }

        fn play(&mut self, key: &str) -> Result<(), PlaybackError> {
            let source = self
                .sounds
                .get(key)
                .ok_or_else(|| PlaybackError::NotLoaded(key.to_string()))?;
            self.handle
                .play_raw(source.clone().convert_samples())
                .map_err(|e| PlaybackError::Device(e.to_string()))
        }

        fn is_loaded(&self, key: &str) -> bool {
            self.sounds.contains_key(key)
        }
    }
}
