//! # Muster - Local-First Campaign Tracker Core
//!
//! Muster is the domain and persistence core of a hobby tracker for
//! miniature painters: campaigns group the warriors painted for them, and a
//! trophy ledger records milestones. Everything lives in an embedded
//! key-value store on the local machine; there is no server and no sync.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use muster::assets::AssetCatalog;
//! use muster::audio::SoundPlayer;
//! use muster::campaign::CampaignRepository;
//! use muster::store::MusterStore;
//! use muster::types::CampaignDraft;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = MusterStore::open("./data")?;
//!     let mut sfx = SoundPlayer::silent(AssetCatalog::new("./assets"));
//!     let mut repo = CampaignRepository::load(store)?;
//!
//!     let campaign = repo.create(
//!         CampaignDraft {
//!             name: "Ultramarines".into(),
//!             ..Default::default()
//!         },
//!         &mut sfx,
//!     )?;
//!     println!("created {}", campaign.name);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`campaign`] - Campaign list, warrior lifecycle, active-campaign state
//! - [`trophy`] - Trophy catalog, ledger, and milestone checks
//! - [`store`] - JSON-over-sled key-value persistence
//! - [`audio`] - Best-effort sound cue playback behind a backend seam
//! - [`assets`] - Bundled asset identities and the image placeholder rule
//! - [`backup`] - Checksummed tar.gz backups of the data directory
//! - [`config`] - TOML configuration with defaults
//! - [`validation`] - Display-name validation shared by create/update paths
//!
//! ## Consistency Model
//!
//! The repository and ledger assume a single writer at a time: awards and
//! campaign mutations are read-modify-write over whole stored values with no
//! locking, so concurrent writers would race last-write-wins. Every mutation
//! is flushed to the store before the call returns.

pub mod assets;
pub mod audio;
pub mod backup;
pub mod campaign;
pub mod config;
pub mod errors;
pub mod store;
pub mod trophy;
pub mod types;
pub mod validation;
