//! Campaign repository: the in-memory campaign list and its durability shadow.
//!
//! The ordered `Vec<Campaign>` held here is the source of truth; the store is
//! written after every mutation so a restart reconstructs the same state.
//! Unknown-id operations return `Ok(false)` / `Ok(None)` rather than erroring;
//! invalid input (an empty required name) is an explicit validation error so
//! callers can surface feedback.
//!
//! The active campaign is persisted by value under its own key. The reference
//! is validated lazily: deleting the active campaign leaves the stored copy in
//! place until the next [`CampaignRepository::active`] call notices the
//! referent is gone and clears it.

use log::{debug, info};

use crate::assets::{image_or_placeholder, SoundCue};
use crate::audio::SoundPlayer;
use crate::errors::MusterError;
use crate::store::{MusterStore, KEY_ACTIVE_CAMPAIGN, KEY_CAMPAIGNS};
use crate::types::{Campaign, CampaignDraft, CampaignPatch, Warrior, WarriorDraft};
use crate::validation::validate_display_name;

pub struct CampaignRepository {
    store: MusterStore,
    campaigns: Vec<Campaign>,
    active_id: Option<String>,
}

impl CampaignRepository {
    /// Load the campaign list and active reference from the store. Absent
    /// keys yield an empty repository.
    pub fn load(store: MusterStore) -> Result<Self, MusterError> {
        let campaigns: Vec<Campaign> = store.get(KEY_CAMPAIGNS)?.unwrap_or_default();
        let active_id = store
            .get::<Campaign>(KEY_ACTIVE_CAMPAIGN)?
            .map(|campaign| campaign.id);
        debug!(
            "loaded {} campaign(s), active={:?}",
            campaigns.len(),
            active_id
        );
        Ok(CampaignRepository {
            store,
            campaigns,
            active_id,
        })
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn find(&self, id: &str) -> Option<&Campaign> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    /// Create a campaign from `draft` and append it to the list. A name that
    /// trims to empty is rejected; a missing image gets the themed
    /// placeholder. Cues the "added" sound.
    pub fn create(
        &mut self,
        draft: CampaignDraft,
        sfx: &mut SoundPlayer,
    ) -> Result<Campaign, MusterError> {
        validate_display_name("campaign name", &draft.name)?;
        let campaign = Campaign::new(
            draft.name,
            draft.description,
            image_or_placeholder(draft.image),
        );
        self.campaigns.push(campaign.clone());
        self.persist()?;
        sfx.play(SoundCue::CampaignAdded);
        info!("created campaign '{}' ({})", campaign.name, campaign.id);
        Ok(campaign)
    }

    /// Apply the provided field overrides to the campaign with `id`. Returns
    /// `Ok(false)` when the id is unknown. The warrior list is untouched.
    pub fn update(&mut self, id: &str, patch: CampaignPatch) -> Result<bool, MusterError> {
        if let Some(name) = &patch.name {
            validate_display_name("campaign name", name)?;
        }
        let Some(campaign) = self.campaigns.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            campaign.name = name;
        }
        if let Some(description) = patch.description {
            campaign.description = Some(description);
        }
        if let Some(image) = patch.image {
            campaign.image = image;
        }
        self.persist()?;
        Ok(true)
    }

    /// Remove the campaign with `id`. Removing an unknown id is a no-op with
    /// no sound and no store write.
    pub fn delete(&mut self, id: &str, sfx: &mut SoundPlayer) -> Result<(), MusterError> {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| c.id != id);
        if self.campaigns.len() == before {
            return Ok(());
        }
        self.persist()?;
        sfx.play(SoundCue::CampaignRemoved);
        info!("deleted campaign {}", id);
        Ok(())
    }

    /// Designate the campaign with `id` as active and persist the reference
    /// by value. Returns `None` when the id is unknown, leaving the previous
    /// active campaign in place.
    pub fn set_active(&mut self, id: &str) -> Result<Option<Campaign>, MusterError> {
        let Some(campaign) = self.find(id).cloned() else {
            return Ok(None);
        };
        self.store.put(KEY_ACTIVE_CAMPAIGN, &campaign)?;
        self.active_id = Some(campaign.id.clone());
        Ok(Some(campaign))
    }

    /// The active campaign, if its referent still exists. A dangling
    /// reference (the campaign was deleted since) is cleared from memory and
    /// the store on access.
    pub fn active(&mut self) -> Result<Option<&Campaign>, MusterError> {
        let Some(id) = self.active_id.clone() else {
            return Ok(None);
        };
        let Some(index) = self.campaigns.iter().position(|c| c.id == id) else {
            debug!("active campaign {} no longer exists, clearing", id);
            self.active_id = None;
            self.store.remove(KEY_ACTIVE_CAMPAIGN)?;
            return Ok(None);
        };
        Ok(Some(&self.campaigns[index]))
    }

    /// Attach a warrior to the campaign with `campaign_id`. Returns
    /// `Ok(None)` when the campaign is unknown. Cues the warrior-added sound.
    pub fn add_warrior(
        &mut self,
        campaign_id: &str,
        draft: WarriorDraft,
        sfx: &mut SoundPlayer,
    ) -> Result<Option<Warrior>, MusterError> {
        validate_display_name("warrior name", &draft.name)?;
        let Some(campaign) = self.campaigns.iter_mut().find(|c| c.id == campaign_id) else {
            return Ok(None);
        };
        let warrior = Warrior::new(draft);
        campaign.warriors.push(warrior.clone());
        self.persist()?;
        sfx.play(SoundCue::WarriorAdded);
        info!(
            "added warrior '{}' to campaign {}",
            warrior.name, campaign_id
        );
        Ok(Some(warrior))
    }

    /// Remove a warrior from its campaign. Returns `Ok(false)` when either
    /// id is unknown.
    pub fn remove_warrior(
        &mut self,
        campaign_id: &str,
        warrior_id: &str,
        sfx: &mut SoundPlayer,
    ) -> Result<bool, MusterError> {
        let Some(campaign) = self.campaigns.iter_mut().find(|c| c.id == campaign_id) else {
            return Ok(false);
        };
        let before = campaign.warriors.len();
        campaign.warriors.retain(|w| w.id != warrior_id);
        if campaign.warriors.len() == before {
            return Ok(false);
        }
        self.persist()?;
        sfx.play(SoundCue::WarriorRemoved);
        Ok(true)
    }

    /// Total warriors across all campaigns.
    pub fn warrior_count(&self) -> usize {
        self.campaigns.iter().map(|c| c.warriors.len()).sum()
    }

    /// Total painting minutes across all warriors.
    pub fn total_minutes(&self) -> u64 {
        self.campaigns
            .iter()
            .flat_map(|c| &c.warriors)
            .map(|w| u64::from(w.time_minutes))
            .sum()
    }

    /// Write the full campaign list to the store, and refresh the persisted
    /// active copy when its referent is still in the list (the on-disk copy
    /// is duplicated by value and would otherwise go stale on edits).
    fn persist(&self) -> Result<(), MusterError> {
        self.store.put(KEY_CAMPAIGNS, &self.campaigns)?;
        if let Some(id) = &self.active_id {
            if let Some(campaign) = self.campaigns.iter().find(|c| &c.id == id) {
                self.store.put(KEY_ACTIVE_CAMPAIGN, campaign)?;
            }
        }
        Ok(())
    }
}
