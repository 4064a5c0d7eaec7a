//! End-to-end exercises of the campaign repository: creation defaults,
//! validation, edits, deletion, and active-campaign behavior.

use muster::assets::{AssetCatalog, PLACEHOLDER_CAMPAIGN_IMAGE};
use muster::audio::SoundPlayer;
use muster::campaign::CampaignRepository;
use muster::errors::MusterError;
use muster::store::MusterStore;
use muster::types::{CampaignDraft, CampaignPatch, ImageRef, WarriorDraft};
use tempfile::TempDir;

fn setup() -> (TempDir, CampaignRepository, SoundPlayer) {
    let dir = TempDir::new().expect("tempdir");
    let store = MusterStore::open(dir.path()).expect("store");
    let repo = CampaignRepository::load(store).expect("load");
    let sfx = SoundPlayer::silent(AssetCatalog::new("assets"));
    (dir, repo, sfx)
}

fn draft(name: &str) -> CampaignDraft {
    CampaignDraft {
        name: name.to_string(),
        ..Default::default()
    }
}

#[test]
fn whitespace_only_name_is_rejected_and_list_unchanged() {
    let (_dir, mut repo, mut sfx) = setup();
    let err = repo.create(draft("  "), &mut sfx).expect_err("reject");
    assert!(matches!(err, MusterError::Validation(_)));
    assert!(repo.campaigns().is_empty());
}

#[test]
fn create_applies_defaults_and_appends_exactly_one() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Ultramarines"), &mut sfx).expect("create");

    assert_eq!(repo.campaigns().len(), 1);
    assert_eq!(
        campaign.image,
        ImageRef::bundled(PLACEHOLDER_CAMPAIGN_IMAGE)
    );
    assert!(campaign.warriors.is_empty());
    assert!(!campaign.id.is_empty());

    let other = repo.create(draft("Orks"), &mut sfx).expect("create");
    assert_ne!(campaign.id, other.id);
    assert_eq!(repo.campaigns().len(), 2);
}

#[test]
fn create_keeps_picked_image() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo
        .create(
            CampaignDraft {
                name: "Orks".into(),
                description: Some("Waaagh".into()),
                image: Some(ImageRef::file("/tmp/orks.jpg")),
            },
            &mut sfx,
        )
        .expect("create");
    assert_eq!(campaign.image, ImageRef::file("/tmp/orks.jpg"));
    assert_eq!(campaign.description.as_deref(), Some("Waaagh"));
}

#[test]
fn update_overrides_fields_and_leaves_warriors_alone() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.add_warrior(
        &campaign.id,
        WarriorDraft {
            name: "Bruce".into(),
            ..Default::default()
        },
        &mut sfx,
    )
    .expect("add warrior");

    let updated = repo
        .update(
            &campaign.id,
            CampaignPatch {
                name: Some("Bad Moons".into()),
                description: Some("Now with yellow".into()),
                image: None,
            },
        )
        .expect("update");
    assert!(updated);

    let fetched = repo.find(&campaign.id).expect("campaign present");
    assert_eq!(fetched.name, "Bad Moons");
    assert_eq!(fetched.description.as_deref(), Some("Now with yellow"));
    assert_eq!(fetched.warriors.len(), 1, "warrior list untouched");
}

#[test]
fn update_unknown_id_returns_false() {
    let (_dir, mut repo, _sfx) = setup();
    let updated = repo
        .update("missing", CampaignPatch::default())
        .expect("update");
    assert!(!updated);
}

#[test]
fn update_with_empty_name_is_a_validation_error() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    let err = repo
        .update(
            &campaign.id,
            CampaignPatch {
                name: Some("   ".into()),
                ..Default::default()
            },
        )
        .expect_err("reject");
    assert!(matches!(err, MusterError::Validation(_)));
    assert_eq!(repo.find(&campaign.id).unwrap().name, "Orks");
}

#[test]
fn delete_unknown_id_is_a_noop() {
    let (_dir, mut repo, mut sfx) = setup();
    repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.delete("missing", &mut sfx).expect("delete");
    assert_eq!(repo.campaigns().len(), 1);
}

#[test]
fn set_active_unknown_id_leaves_previous_active() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.set_active(&campaign.id).expect("set active");

    let result = repo.set_active("missing").expect("set active unknown");
    assert!(result.is_none());
    let active = repo.active().expect("active").expect("still active");
    assert_eq!(active.id, campaign.id);
}

#[test]
fn deleting_active_campaign_self_heals_on_access() {
    let (dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.set_active(&campaign.id).expect("set active");
    repo.delete(&campaign.id, &mut sfx).expect("delete");

    assert!(repo.active().expect("active").is_none());

    // The cleared reference is durable: a fresh load sees no active campaign.
    drop(repo);
    let store = MusterStore::open(dir.path()).expect("reopen");
    let mut reloaded = CampaignRepository::load(store).expect("load");
    assert!(reloaded.active().expect("active").is_none());
}

#[test]
fn active_reference_survives_restart() {
    let (dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.set_active(&campaign.id).expect("set active");
    drop(repo);

    let store = MusterStore::open(dir.path()).expect("reopen");
    let mut reloaded = CampaignRepository::load(store).expect("load");
    let active = reloaded.active().expect("active").expect("present");
    assert_eq!(active.id, campaign.id);
}

#[test]
fn edits_refresh_the_persisted_active_copy() {
    let (dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");
    repo.set_active(&campaign.id).expect("set active");
    repo.update(
        &campaign.id,
        CampaignPatch {
            name: Some("Bad Moons".into()),
            ..Default::default()
        },
    )
    .expect("update");
    drop(repo);

    let store = MusterStore::open(dir.path()).expect("reopen");
    let mut reloaded = CampaignRepository::load(store).expect("load");
    let active = reloaded.active().expect("active").expect("present");
    assert_eq!(active.name, "Bad Moons");
}

#[test]
fn warrior_lifecycle_updates_totals() {
    let (_dir, mut repo, mut sfx) = setup();
    let campaign = repo.create(draft("Orks"), &mut sfx).expect("create");

    let warrior = repo
        .add_warrior(
            &campaign.id,
            WarriorDraft {
                name: "Bruce".into(),
                desc: "Warboss".into(),
                notes: "Needs highlights".into(),
                image: None,
                time_minutes: 45,
            },
            &mut sfx,
        )
        .expect("add")
        .expect("campaign exists");
    assert_eq!(repo.warrior_count(), 1);
    assert_eq!(repo.total_minutes(), 45);

    let removed = repo
        .remove_warrior(&campaign.id, &warrior.id, &mut sfx)
        .expect("remove");
    assert!(removed);
    assert_eq!(repo.warrior_count(), 0);
    assert_eq!(repo.total_minutes(), 0);
}

#[test]
fn add_warrior_to_unknown_campaign_returns_none() {
    let (_dir, mut repo, mut sfx) = setup();
    let result = repo
        .add_warrior(
            "missing",
            WarriorDraft {
                name: "Bruce".into(),
                ..Default::default()
            },
            &mut sfx,
        )
        .expect("add");
    assert!(result.is_none());
}
