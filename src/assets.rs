//! Static asset identities: bundled images and sound cues.
//!
//! The catalog is an explicitly constructed context object (built from the
//! configured asset directory) rather than an ambient global, so tests can
//! point it anywhere.

use std::path::{Path, PathBuf};

use crate::types::ImageRef;

/// Logical name of the themed image substituted when a campaign is created
/// without one.
pub const PLACEHOLDER_CAMPAIGN_IMAGE: &str = "campaigns_background";

/// Short sound effects cued by domain operations. Audio is cosmetic; every
/// cue is best-effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Splash,
    CampaignAdded,
    CampaignRemoved,
    WarriorAdded,
    WarriorRemoved,
    TrophyUnlocked,
}

impl SoundCue {
    /// File name of the bundled asset for this cue.
    pub fn file_name(self) -> &'static str {
        match self {
            SoundCue::Splash => "splash.mp3",
            SoundCue::CampaignAdded => "campaign.mp3",
            SoundCue::CampaignRemoved => "campaign_remove.mp3",
            SoundCue::WarriorAdded => "warrior.mp3",
            SoundCue::WarriorRemoved => "warrior_remove.mp3",
            SoundCue::TrophyUnlocked => "trophy.mp3",
        }
    }

    pub fn all() -> [SoundCue; 6] {
        [
            SoundCue::Splash,
            SoundCue::CampaignAdded,
            SoundCue::CampaignRemoved,
            SoundCue::WarriorAdded,
            SoundCue::WarriorRemoved,
            SoundCue::TrophyUnlocked,
        ]
    }
}

/// Resolves logical asset names to paths under a configured root directory.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    root: PathBuf,
}

impl AssetCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        AssetCatalog {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn sound_path(&self, cue: SoundCue) -> PathBuf {
        self.root.join("sounds").join(cue.file_name())
    }
}

/// The single place where the missing-image default is applied: a campaign
/// created without an image gets the themed placeholder.
pub fn image_or_placeholder(image: Option<ImageRef>) -> ImageRef {
    image.unwrap_or_else(|| ImageRef::bundled(PLACEHOLDER_CAMPAIGN_IMAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_image_falls_back_to_placeholder() {
        let image = image_or_placeholder(None);
        assert_eq!(image, ImageRef::bundled(PLACEHOLDER_CAMPAIGN_IMAGE));
    }

    #[test]
    fn provided_image_is_kept() {
        let picked = ImageRef::file("/tmp/orks.jpg");
        assert_eq!(image_or_placeholder(Some(picked.clone())), picked);
    }

    #[test]
    fn sound_paths_resolve_under_root() {
        let catalog = AssetCatalog::new("/opt/muster/assets");
        let path = catalog.sound_path(SoundCue::TrophyUnlocked);
        assert!(path.ends_with("sounds/trophy.mp3"));
    }
}
