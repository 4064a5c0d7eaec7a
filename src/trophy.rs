//! Trophy ledger: which milestones the hobbyist has hit, and when.
//!
//! The ledger is append-only from the award path: once a trophy id is
//! recorded it is never overwritten, and only a full [`TrophyLedger::reset`]
//! clears it. Awards are read-modify-write over the whole mapping under the
//! single-writer assumption (see the crate docs); there is no per-trophy
//! revocation.

use std::collections::BTreeMap;

use crate::assets::SoundCue;
use crate::audio::SoundPlayer;
use crate::campaign::CampaignRepository;
use crate::errors::MusterError;
use crate::store::{MusterStore, KEY_TROPHIES};
use crate::types::TrophyRecord;

pub const TROPHY_FIRST_BLOOD: &str = "1";
pub const TROPHY_TEN_STRONG: &str = "2";
pub const TROPHY_ENDURANCE: &str = "3";
pub const TROPHY_VISIT: &str = "visit";

/// Warriors needed for the Ten Strong trophy.
pub const TEN_STRONG_COUNT: usize = 10;
/// Total painting minutes needed for the Endurance trophy.
pub const ENDURANCE_MINUTES: u64 = 60;

/// A static trophy definition. The catalog is fixed at compile time; the
/// ledger only stores which ids have been achieved.
#[derive(Debug, Clone, Copy)]
pub struct TrophyDef {
    pub id: &'static str,
    pub name: &'static str,
    pub desc: &'static str,
}

/// The full set of trophies the application knows about.
pub fn trophy_catalog() -> &'static [TrophyDef] {
    &[
        TrophyDef {
            id: TROPHY_FIRST_BLOOD,
            name: "First Blood",
            desc: "Painted your first warrior!",
        },
        TrophyDef {
            id: TROPHY_TEN_STRONG,
            name: "Ten Strong",
            desc: "10 Warriors added to your army.",
        },
        TrophyDef {
            id: TROPHY_ENDURANCE,
            name: "Endurance",
            desc: "Painted for 1+ hour total.",
        },
        TrophyDef {
            id: TROPHY_VISIT,
            name: "Welcome!",
            desc: "Visited the Trophy Room!",
        },
    ]
}

/// Persistent record of achieved trophies.
pub struct TrophyLedger {
    store: MusterStore,
}

impl TrophyLedger {
    pub fn new(store: MusterStore) -> Self {
        TrophyLedger { store }
    }

    /// The full trophy-id -> record mapping. An absent ledger key reads as
    /// an empty mapping.
    pub fn achieved(&self) -> Result<BTreeMap<String, TrophyRecord>, MusterError> {
        Ok(self.store.get(KEY_TROPHIES)?.unwrap_or_default())
    }

    /// Award `trophy_id` once. Returns `false` without touching the stored
    /// record (or its timestamp) when the id is already present; otherwise
    /// persists a record timestamped now, cues the celebratory sound, and
    /// returns `true`.
    pub fn award(&self, trophy_id: &str, sfx: &mut SoundPlayer) -> Result<bool, MusterError> {
        let mut trophies = self.achieved()?;
        if trophies.contains_key(trophy_id) {
            return Ok(false);
        }
        trophies.insert(trophy_id.to_string(), TrophyRecord::achieved_now());
        self.store.put(KEY_TROPHIES, &trophies)?;
        sfx.play(SoundCue::TrophyUnlocked);
        Ok(true)
    }

    /// Clear the entire ledger. There is no per-trophy revocation.
    pub fn reset(&self) -> Result<(), MusterError> {
        self.store.remove(KEY_TROPHIES)
    }

    /// Award every catalog trophy whose milestone the repository state
    /// satisfies. Returns the ids newly awarded by this pass.
    pub fn check_milestones(
        &self,
        repo: &CampaignRepository,
        sfx: &mut SoundPlayer,
    ) -> Result<Vec<String>, MusterError> {
        let mut awarded = Vec::new();
        let warriors = repo.warrior_count();

        if warriors >= 1 && self.award(TROPHY_FIRST_BLOOD, sfx)? {
            awarded.push(TROPHY_FIRST_BLOOD.to_string());
        }
        if warriors >= TEN_STRONG_COUNT && self.award(TROPHY_TEN_STRONG, sfx)? {
            awarded.push(TROPHY_TEN_STRONG.to_string());
        }
        if repo.total_minutes() >= ENDURANCE_MINUTES && self.award(TROPHY_ENDURANCE, sfx)? {
            awarded.push(TROPHY_ENDURANCE.to_string());
        }
        Ok(awarded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetCatalog;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TrophyLedger, SoundPlayer) {
        let dir = TempDir::new().expect("tempdir");
        let store = MusterStore::open(dir.path()).expect("store");
        let sfx = SoundPlayer::silent(AssetCatalog::new("assets"));
        (dir, TrophyLedger::new(store), sfx)
    }

    #[test]
    fn award_is_idempotent_and_keeps_first_timestamp() {
        let (_dir, ledger, mut sfx) = setup();

        assert!(ledger.award(TROPHY_VISIT, &mut sfx).expect("first award"));
        let first = ledger.achieved().expect("achieved")[TROPHY_VISIT].clone();
        assert!(first.achieved);

        assert!(!ledger.award(TROPHY_VISIT, &mut sfx).expect("second award"));
        let second = ledger.achieved().expect("achieved")[TROPHY_VISIT].clone();
        assert_eq!(second.timestamp, first.timestamp);
    }

    #[test]
    fn reset_clears_the_whole_ledger() {
        let (_dir, ledger, mut sfx) = setup();
        ledger.award(TROPHY_VISIT, &mut sfx).expect("award");
        ledger.award(TROPHY_FIRST_BLOOD, &mut sfx).expect("award");
        ledger.reset().expect("reset");
        assert!(ledger.achieved().expect("achieved").is_empty());
    }

    #[test]
    fn catalog_ids_are_distinct() {
        let mut ids: Vec<_> = trophy_catalog().iter().map(|t| t.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), trophy_catalog().len());
    }
}
