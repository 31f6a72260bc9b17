//! CLI entrypoint for backlog-poker
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use poker_application::{BacklogStore, SessionCoordinator};
use poker_domain::{FeatureDraft, FeatureUpdate, VotingMode};
use poker_infrastructure::{ConfigLoader, JsonBacklogRepository, StaticAllowList};
use poker_presentation::{Cli, Command, ConsoleFormatter, RoomRepl};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e.to_string()))?
    };
    for issue in config.validate() {
        warn!(field = %issue.field, "config: {}", issue.message);
    }
    let settings = config.to_room_settings();
    let backlog_path = cli
        .backlog
        .clone()
        .unwrap_or_else(|| config.room.backlog_file.clone());
    info!(path = %backlog_path.display(), "using backlog file");

    // === Dependency Injection ===
    let repository = JsonBacklogRepository::new(backlog_path);
    let backlog = BacklogStore::load(repository, settings.bounds);
    let policy = StaticAllowList::new(settings.allow_list.clone());
    let mut coordinator = SessionCoordinator::new(backlog, policy, settings.thresholds);

    match cli.command {
        None | Some(Command::Room) => {
            let mut repl = RoomRepl::new(coordinator, settings);
            repl.run()?;
        }
        Some(Command::List) => {
            print!(
                "{}",
                ConsoleFormatter::format_backlog(coordinator.backlog().list())
            );
        }
        Some(Command::Next) => match coordinator.backlog().highest_priority() {
            Some(feature) => print!("{}", ConsoleFormatter::format_feature(feature)),
            None => println!("Backlog is empty."),
        },
        Some(Command::Add {
            name,
            description,
            priority,
            difficulty,
            status,
            mode,
            participants,
        }) => {
            let mode: VotingMode = mode.parse()?;
            let mut draft = FeatureDraft::new(name, description, priority)
                .with_voting_mode(mode)
                .with_participants(participants);
            if let Some(difficulty) = difficulty {
                draft = draft.with_difficulty(difficulty);
            }
            if let Some(status) = status {
                draft = draft.with_status(status);
            }
            let feature = coordinator.backlog_mut().add(draft)?;
            print!("{}", ConsoleFormatter::format_feature(&feature));
        }
        Some(Command::Edit {
            id,
            name,
            description,
            priority,
            difficulty,
            status,
            participants,
        }) => {
            let update = FeatureUpdate {
                name,
                description,
                priority,
                difficulty,
                status,
                participants: if participants.is_empty() {
                    None
                } else {
                    Some(participants)
                },
            };
            let feature = coordinator.backlog_mut().update(id, update)?;
            print!("{}", ConsoleFormatter::format_feature(&feature));
        }
        Some(Command::Remove { id }) => {
            coordinator.backlog_mut().remove(id);
            println!("Feature {id} removed (if it existed).");
        }
    }

    Ok(())
}
