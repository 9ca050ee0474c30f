//! Scorekeeper CLI - drives one persisted game from the command line.
//!
//! Each invocation takes the state file lock, loads the game, applies one
//! operation and saves. Results go to stdout as JSON; logs go to stderr.

mod telemetry;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use scorekeeper::adapters::GameFile;
use scorekeeper::config::{GameConfig, StorageConfig};
use scorekeeper::domain::bidding::parse_whole_number;
use scorekeeper::domain::{GameState, PlayerId};
use scorekeeper::errors::{DomainError, ValidationKind};
use scorekeeper::{AppError, GameFlowService};
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Score keeper for a ten-round bidding trick-taking game")]
struct Args {
    /// State file (overrides SCOREKEEPER_STATE_FILE)
    #[arg(long, global = true)]
    state: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a fresh game, replacing any stored one
    New,

    /// Add a player to the roster
    AddPlayer { name: String },

    /// Submit a bid for the active round
    Bid {
        round: String,
        /// Player id or name
        player: String,
        bid: String,
    },

    /// Record tricks taken (and bonus points) for a player
    Tricks {
        round: String,
        /// Player id or name
        player: String,
        tricks: String,
        #[arg(long, default_value = "0")]
        bonus: String,
    },

    /// Count one played hand in the active round
    CompleteHand,

    /// Show the game status
    Status,

    /// Show one round (the active round by default)
    Round {
        #[arg(long)]
        number: Option<String>,
    },

    /// Show the scoreboard
    Scoreboard,

    /// Delete the stored game
    Reset,
}

fn main() -> ExitCode {
    let args = Args::parse();
    telemetry::init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_domain() {
                warn!(code = %e.code(), detail = %e.detail(), "Operation rejected");
            } else {
                warn!(code = %e.code(), error = %e, "Operation failed");
            }
            match serde_json::to_string_pretty(&e.body()) {
                Ok(body) => println!("{body}"),
                Err(_) => eprintln!("{}: {}", e.code(), e.detail()),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let storage = StorageConfig::resolve(args.state)?;
    let service = GameFlowService::new(GameConfig::from_env()?);
    let file = GameFile::new(storage.state_file);
    let _lock = file.lock()?;
    debug!(path = %file.path().display(), "Using state file");

    match args.command {
        Command::New => {
            let game = GameState::new();
            file.save(&game)?;
            print_json(&service.game_status(&game))
        }
        Command::Reset => {
            let removed = file.remove()?;
            print_json(&serde_json::json!({ "removed": removed }))
        }
        Command::AddPlayer { name } => {
            let mut game = load_or_new(&file)?;
            let outcome = service.add_player(&mut game, &name)?;
            file.save(&game)?;
            print_json(&outcome)
        }
        Command::Bid { round, player, bid } => {
            let mut game = load_or_new(&file)?;
            let round_no = parse_round(&round)?;
            let player_id = resolve_player(&game, &player)?;
            let bid = parse_whole_number(&bid)?;
            let outcome = service.submit_bid(&mut game, round_no, player_id, bid)?;
            file.save(&game)?;
            print_json(&outcome)
        }
        Command::Tricks {
            round,
            player,
            tricks,
            bonus,
        } => {
            let mut game = load_or_new(&file)?;
            let round_no = parse_round(&round)?;
            let player_id = resolve_player(&game, &player)?;
            let tricks = parse_whole_number(&tricks)?;
            let bonus = parse_whole_number(&bonus)?;
            let outcome =
                service.submit_tricks_taken(&mut game, round_no, player_id, tricks, bonus)?;
            file.save(&game)?;
            print_json(&outcome)
        }
        Command::CompleteHand => {
            let mut game = load_or_new(&file)?;
            let outcome = service.complete_hand(&mut game)?;
            file.save(&game)?;
            print_json(&outcome)
        }
        Command::Status => {
            let game = load_or_new(&file)?;
            print_json(&service.game_status(&game))
        }
        Command::Round { number } => {
            let game = load_or_new(&file)?;
            let round_no = number.as_deref().map(parse_round).transpose()?;
            print_json(&service.round_details(&game, round_no)?)
        }
        Command::Scoreboard => {
            let game = load_or_new(&file)?;
            print_json(&service.scoreboard(&game))
        }
    }
}

fn load_or_new(file: &GameFile) -> Result<GameState, AppError> {
    Ok(file.load()?.unwrap_or_default())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_round(raw: &str) -> Result<u8, AppError> {
    let n = parse_whole_number(raw)?;
    u8::try_from(n).map_err(|_| {
        DomainError::validation(
            ValidationKind::InvalidRoundNumber,
            format!("Round {n} does not exist"),
        )
        .into()
    })
}

/// Accept either a numeric player id or a roster name (case-insensitive).
fn resolve_player(game: &GameState, raw: &str) -> Result<PlayerId, AppError> {
    let raw = raw.trim();
    let by_id = raw
        .parse::<u32>()
        .ok()
        .map(PlayerId)
        .filter(|id| game.player(*id).is_some());
    let by_name = || {
        let lowered = raw.to_lowercase();
        game.players()
            .iter()
            .find(|p| p.name().to_lowercase() == lowered)
            .map(|p| p.id())
    };

    by_id.or_else(by_name).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::UnknownPlayer,
            format!("No player '{raw}' in this game"),
        )
        .into()
    })
}
