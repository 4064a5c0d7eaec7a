//! Binary entrypoint for the muster CLI.
//!
//! Commands:
//! - `init` - create a starter `config.toml`
//! - `status` - print campaign, warrior, and trophy counts
//! - `campaign add|list|edit|remove|activate` - manage campaigns
//! - `warrior add|remove` - manage warriors inside a campaign
//! - `trophy list|reset` - inspect or clear the trophy ledger
//! - `backup` - write a checksummed tar.gz of the data directory
//!
//! See the library crate docs for module-level details: `muster::`.
use anyhow::Result;
use clap::{Parser, Subcommand};

use muster::assets::AssetCatalog;
use muster::audio::SoundPlayer;
use muster::backup::create_backup;
use muster::campaign::CampaignRepository;
use muster::config::Config;
use muster::store::MusterStore;
use muster::trophy::{trophy_catalog, TrophyLedger, TROPHY_VISIT};
use muster::types::{CampaignDraft, CampaignPatch, ImageRef, WarriorDraft};

#[derive(Parser)]
#[command(name = "muster")]
#[command(about = "Local-first campaign and trophy tracker for miniature painters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config.toml
    Init,
    /// Print campaign, warrior, and trophy counts
    Status,
    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        command: CampaignCommands,
    },
    /// Manage warriors inside a campaign
    Warrior {
        #[command(subcommand)]
        command: WarriorCommands,
    },
    /// Inspect or clear the trophy ledger
    Trophy {
        #[command(subcommand)]
        command: TrophyCommands,
    },
    /// Write a checksummed tar.gz backup of the data directory
    Backup,
}

#[derive(Subcommand)]
enum CampaignCommands {
    /// Create a new campaign
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// Path to a picked image; defaults to the themed placeholder
        #[arg(short, long)]
        image: Option<String>,
    },
    /// List all campaigns with their warriors
    List,
    /// Edit name, description, or image of a campaign
    Edit {
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Delete a campaign
    Remove { id: String },
    /// Mark a campaign as the active one
    Activate { id: String },
}

#[derive(Subcommand)]
enum WarriorCommands {
    /// Add a painted warrior to a campaign
    Add {
        /// Campaign id the warrior belongs to
        #[arg(long)]
        campaign: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        desc: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Painting time in minutes
        #[arg(short, long, default_value_t = 0)]
        minutes: u32,
        #[arg(short, long)]
        image: Option<String>,
    },
    /// Remove a warrior from its campaign
    Remove {
        #[arg(long)]
        campaign: String,
        id: String,
    },
}

#[derive(Subcommand)]
enum TrophyCommands {
    /// List the trophy catalog with achieved markers (counts as a trophy
    /// room visit)
    List,
    /// Clear the entire trophy ledger
    Reset,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Some(Config::load(&cli.config).unwrap_or_default()),
    };
    init_logging(config.as_ref(), cli.verbose);

    match cli.command {
        Commands::Init => {
            Config::create_default(&cli.config)?;
            println!("Wrote starter configuration to {}", cli.config);
            return Ok(());
        }
        _ => {}
    }

    let config = config.unwrap_or_default();
    let store = MusterStore::open(&config.storage.data_dir)?;
    let mut sfx = sound_player(&config);
    let mut repo = CampaignRepository::load(store.clone())?;
    let ledger = TrophyLedger::new(store);

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Status => {
            let active = repo.active()?.map(|c| c.name.clone());
            println!("Campaigns: {}", repo.campaigns().len());
            println!("Warriors:  {}", repo.warrior_count());
            println!("Painted:   {} minute(s)", repo.total_minutes());
            println!(
                "Active:    {}",
                active.as_deref().unwrap_or("(none)")
            );
            let achieved = ledger.achieved()?;
            println!(
                "Trophies:  {}/{} unlocked",
                achieved.len(),
                trophy_catalog().len()
            );
        }
        Commands::Campaign { command } => match command {
            CampaignCommands::Add {
                name,
                description,
                image,
            } => {
                let campaign = repo.create(
                    CampaignDraft {
                        name,
                        description,
                        image: image.map(ImageRef::file),
                    },
                    &mut sfx,
                )?;
                println!("Created campaign '{}' ({})", campaign.name, campaign.id);
            }
            CampaignCommands::List => {
                if repo.campaigns().is_empty() {
                    println!("No campaigns yet. Start one with 'muster campaign add'.");
                }
                for campaign in repo.campaigns() {
                    println!("{}  {}", campaign.id, campaign.name);
                    if let Some(description) = &campaign.description {
                        println!("    {}", description);
                    }
                    for warrior in &campaign.warriors {
                        println!(
                            "    - {}  {} ({} min)",
                            warrior.id, warrior.name, warrior.time_minutes
                        );
                    }
                }
            }
            CampaignCommands::Edit {
                id,
                name,
                description,
                image,
            } => {
                let patch = CampaignPatch {
                    name,
                    description,
                    image: image.map(ImageRef::file),
                };
                if repo.update(&id, patch)? {
                    println!("Updated campaign {}", id);
                } else {
                    eprintln!("No campaign with id {}", id);
                }
            }
            CampaignCommands::Remove { id } => {
                repo.delete(&id, &mut sfx)?;
                println!("Removed campaign {} (if it existed)", id);
            }
            CampaignCommands::Activate { id } => match repo.set_active(&id)? {
                Some(campaign) => println!("Active campaign is now '{}'", campaign.name),
                None => eprintln!("No campaign with id {}", id),
            },
        },
        Commands::Warrior { command } => match command {
            WarriorCommands::Add {
                campaign,
                name,
                desc,
                notes,
                minutes,
                image,
            } => {
                let draft = WarriorDraft {
                    name,
                    desc,
                    notes,
                    image: image.map(ImageRef::file),
                    time_minutes: minutes,
                };
                match repo.add_warrior(&campaign, draft, &mut sfx)? {
                    Some(warrior) => {
                        println!("Added warrior '{}' ({})", warrior.name, warrior.id);
                        let newly = ledger.check_milestones(&repo, &mut sfx)?;
                        announce_trophies(&newly);
                    }
                    None => eprintln!("No campaign with id {}", campaign),
                }
            }
            WarriorCommands::Remove { campaign, id } => {
                if repo.remove_warrior(&campaign, &id, &mut sfx)? {
                    println!("Removed warrior {}", id);
                } else {
                    eprintln!("No warrior {} in campaign {}", id, campaign);
                }
            }
        },
        Commands::Trophy { command } => match command {
            TrophyCommands::List => {
                // Listing is a trophy room visit, which is itself a trophy.
                if ledger.award(TROPHY_VISIT, &mut sfx)? {
                    announce_trophies(&[TROPHY_VISIT.to_string()]);
                }
                let newly = ledger.check_milestones(&repo, &mut sfx)?;
                announce_trophies(&newly);

                let achieved = ledger.achieved()?;
                for trophy in trophy_catalog() {
                    match achieved.get(trophy.id) {
                        Some(record) => println!(
                            "[x] {:<12} {} (unlocked {})",
                            trophy.name,
                            trophy.desc,
                            record.timestamp.format("%Y-%m-%d %H:%M")
                        ),
                        None => println!("[ ] {:<12} {}", trophy.name, trophy.desc),
                    }
                }
            }
            TrophyCommands::Reset => {
                ledger.reset()?;
                println!("Trophy ledger cleared.");
            }
        },
        Commands::Backup => {
            let info = create_backup(
                std::path::Path::new(&config.storage.data_dir),
                std::path::Path::new(&config.storage.backup_dir),
            )?;
            println!(
                "Backup written to {} ({} bytes, sha256 {})",
                info.path.display(),
                info.size_bytes,
                info.checksum
            );
        }
    }

    Ok(())
}

fn announce_trophies(ids: &[String]) {
    let catalog = trophy_catalog();
    for id in ids {
        if let Some(trophy) = catalog.iter().find(|t| t.id == *id) {
            println!("Trophy unlocked: {} - {}", trophy.name, trophy.desc);
        }
    }
}

/// Build the sound player from config: the real device-backed player when
/// audio is enabled and the `playback` feature is compiled in, otherwise a
/// silent one.
fn sound_player(config: &Config) -> SoundPlayer {
    let catalog = AssetCatalog::new(&config.assets.dir);
    if config.audio.enabled {
        #[cfg(feature = "playback")]
        {
            match muster::audio::RodioBackend::new() {
                Ok(backend) => {
                    let mut player = SoundPlayer::new(Box::new(backend), catalog);
                    for cue in muster::assets::SoundCue::all() {
                        if let Err(err) = player.preload(cue) {
                            log::warn!("failed to preload sound {:?}: {err}", cue);
                        }
                    }
                    return player;
                }
                Err(err) => {
                    log::warn!("audio device unavailable: {err} (sound cues disabled)");
                }
            }
        }
        #[cfg(not(feature = "playback"))]
        log::debug!("built without the 'playback' feature; sound cues are silent");
    }
    SoundPlayer::silent(catalog)
}

fn init_logging(config: Option<&Config>, verbose: u8) {
    let level = match verbose {
        0 => config
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}
