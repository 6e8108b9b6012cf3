//! # Roomcrawl Main Entry Point
//!
//! Loads the dungeon, then runs the read-command, print-frame loop on the
//! terminal.

use clap::Parser;
use log::{error, info, LevelFilter};
use roomcrawl::{
    config, help_text, inventory_panel, load_dungeon_data, CrawlError, CrawlResult, Direction,
    Dungeon, DungeonBuilder, InputHandler, PlayerInput, TerminalDisplay, UseAction,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Command line arguments for Roomcrawl.
#[derive(Parser, Debug)]
#[command(name = "roomcrawl")]
#[command(about = "A turn-based room-and-door dungeon crawler")]
#[command(version)]
struct Args {
    /// File-locations document naming the rooms and symbols files
    #[arg(short, long, default_value = config::DEFAULT_FILE_LOCATIONS)]
    config: PathBuf,

    /// Resume from a saved snapshot instead of the data files
    #[arg(long)]
    load: Option<PathBuf>,

    /// Player name
    #[arg(short, long, default_value = config::DEFAULT_PLAYER_NAME)]
    name: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print every room and exit
    #[arg(long)]
    show_all: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    initialize_logging(&args.log_level);
    info!("Starting Roomcrawl v{}", roomcrawl::VERSION);

    let dungeon = match open_dungeon(&args) {
        Ok(dungeon) => dungeon,
        Err(e) => {
            error!("Startup failed: {}", e);
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.show_all {
        print!("{}", dungeon.render_all());
        return ExitCode::SUCCESS;
    }

    match run_game(dungeon) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Game aborted: {}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn open_dungeon(args: &Args) -> CrawlResult<Dungeon> {
    if let Some(snapshot) = &args.load {
        info!("Resuming from snapshot {}", snapshot.display());
        return Dungeon::load_snapshot(snapshot);
    }
    info!("Loading dungeon data from {}", args.config.display());
    let data = load_dungeon_data(&args.config)?;
    DungeonBuilder::new(data)
        .with_player_name(args.name.clone())
        .build()
}

/// Builds a fresh dungeon from another file-locations document, keeping
/// the current player name.
fn reopen(path: &Path, name: &str) -> CrawlResult<Dungeon> {
    info!("Opening dungeon data from {}", path.display());
    let data = load_dungeon_data(path)?;
    DungeonBuilder::new(data).with_player_name(name).build()
}

/// Main game loop implementation.
fn run_game(mut dungeon: Dungeon) -> CrawlResult<()> {
    let input_handler = InputHandler::new();
    let mut display = TerminalDisplay::new();
    display.add_message(format!("Welcome, {}! Type ? for help.", dungeon.player().name));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "{}> ", display.compose_frame(&dungeon)?)?;
        stdout.flush()?;

        let Some(line) = lines.next() else {
            info!("Input closed; leaving");
            return Ok(());
        };
        let input = input_handler.parse(&line?);

        match input {
            PlayerInput::Quit => {
                info!("Player quit");
                return Ok(());
            }
            PlayerInput::Help => display.add_message(help_text()),
            PlayerInput::ShowInventory => {
                display.add_message(inventory_panel(dungeon.player()))
            }
            PlayerInput::Eat(index) => use_item(&mut dungeon, &mut display, UseAction::Eat, index),
            PlayerInput::Wear(index) => {
                use_item(&mut dungeon, &mut display, UseAction::Wear, index)
            }
            PlayerInput::Toss(index) => {
                use_item(&mut dungeon, &mut display, UseAction::Toss, index)
            }
            PlayerInput::Save(path) => match dungeon.save_snapshot(&path) {
                Ok(()) => display.add_message(format!("Saved to {}", path.display())),
                Err(e) => display.add_message(e.to_string()),
            },
            PlayerInput::Load(path) => match Dungeon::load_snapshot(&path) {
                Ok(loaded) => {
                    dungeon = loaded;
                    display.add_message(format!("Loaded {}", path.display()));
                }
                Err(e) => display.add_message(e.to_string()),
            },
            PlayerInput::Open(path) => match reopen(&path, &dungeon.player().name) {
                Ok(opened) => {
                    dungeon = opened;
                    display.add_message(format!("Opened {}", path.display()));
                }
                Err(e) => display.add_message(e.to_string()),
            },
            PlayerInput::Rename(name) => {
                display.add_message(format!("You are now {}", name));
                dungeon.set_player_name(name);
            }
            PlayerInput::Move(direction) => {
                step(&mut dungeon, &mut display, &mut stdout, Some(direction))?
            }
            PlayerInput::Unrecognized => step(&mut dungeon, &mut display, &mut stdout, None)?,
        }
    }
}

/// Applies one move and erases the old room if the player changed rooms.
fn step(
    dungeon: &mut Dungeon,
    display: &mut TerminalDisplay,
    out: &mut impl Write,
    direction: Option<Direction>,
) -> CrawlResult<()> {
    match dungeon.apply_input(direction) {
        Ok(outcome) => display.add_message(outcome.message()),
        Err(CrawlError::InvalidMove) => display.add_message(CrawlError::InvalidMove.to_string()),
        Err(e) => return Err(e),
    }
    if let Some(clear) = display.take_transition_clear(dungeon) {
        write!(out, "{}", clear)?;
    }
    Ok(())
}

fn use_item(dungeon: &mut Dungeon, display: &mut TerminalDisplay, action: UseAction, index: usize) {
    match dungeon.use_item(action, index) {
        Ok(message) => display.add_message(message),
        Err(CrawlError::InvalidAction(reason)) => display.add_message(reason),
        Err(e) => display.add_message(e.to_string()),
    }
}
