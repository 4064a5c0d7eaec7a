//! Record types shared across the campaign repository and trophy ledger.
//!
//! The serialized field names match the key-value layout the mobile client
//! already writes (`campaigns`, `activeCampaign`, `trophiesAchieved`), so a
//! store produced by either side round-trips through the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to an image, either a bundled asset addressed by logical name or
/// a file picked by the user. Modeled as an explicit enum so the
/// missing-image -> placeholder substitution stays a single testable step
/// instead of an untyped dictionary convention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageRef {
    Bundled { name: String },
    File { path: String },
}

impl ImageRef {
    pub fn bundled(name: impl Into<String>) -> Self {
        ImageRef::Bundled { name: name.into() }
    }

    pub fn file(path: impl Into<String>) -> Self {
        ImageRef::File { path: path.into() }
    }
}

/// A painting campaign: a named project grouping the warriors painted for it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: ImageRef,
    #[serde(default)]
    pub warriors: Vec<Warrior>,
}

impl Campaign {
    /// Build a campaign with a freshly generated unique id and no warriors.
    /// The image must already have gone through placeholder substitution.
    pub fn new(name: impl Into<String>, description: Option<String>, image: ImageRef) -> Self {
        Campaign {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description,
            image,
            warriors: Vec::new(),
        }
    }
}

/// A single painted unit attached to a campaign. `time` is the painting time
/// spent on the unit, in minutes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warrior {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
    #[serde(rename = "time")]
    pub time_minutes: u32,
}

impl Warrior {
    pub fn new(draft: WarriorDraft) -> Self {
        Warrior {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            desc: draft.desc,
            notes: draft.notes,
            image: draft.image,
            time_minutes: draft.time_minutes,
        }
    }
}

/// Input for creating a campaign. Fields the user left blank stay `None`;
/// the repository applies defaults and validation.
#[derive(Debug, Clone, Default)]
pub struct CampaignDraft {
    pub name: String,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
}

/// Partial update for an existing campaign. `None` means "leave untouched";
/// the warrior list is never part of a patch.
#[derive(Debug, Clone, Default)]
pub struct CampaignPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<ImageRef>,
}

/// Input for attaching a warrior to a campaign.
#[derive(Debug, Clone, Default)]
pub struct WarriorDraft {
    pub name: String,
    pub desc: String,
    pub notes: String,
    pub image: Option<ImageRef>,
    pub time_minutes: u32,
}

/// One entry in the trophy ledger. `achieved` is always true for a stored
/// record; it is kept in the layout for compatibility with existing stores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrophyRecord {
    pub achieved: bool,
    pub timestamp: DateTime<Utc>,
}

impl TrophyRecord {
    pub fn achieved_now() -> Self {
        TrophyRecord {
            achieved: true,
            timestamp: Utc::now(),
        }
    }
}
