use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{ConfigError, GameConfig, GridSize};
use grid_snake::game::{Engine, SessionStatus, TickOutcome};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer;
use grid_snake::score::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use grid_snake::session::Session;
use grid_snake::snake::Position;
use grid_snake::terminal_runtime::TerminalSession;
use log::{LevelFilter, debug, info};
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";

/// Input poll timeout while no tick is scheduled (paused or game over).
const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

type Store = Box<dyn HighScoreStore>;

#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about = "Grid snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Logical units per cell.
    #[arg(long = "cell-size")]
    cell_size: Option<u16>,

    /// Milliseconds between ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for food placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the high score in memory only.
    #[arg(long = "no-persist")]
    no_persist: bool,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long)]
    debug: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), cli.debug);

    let config = resolve_config(&cli).map_err(invalid_input)?;
    let store: Store = if cli.no_persist {
        Box::new(MemoryHighScoreStore::default())
    } else {
        Box::new(FileHighScoreStore::at_default_location())
    };
    let engine = match cli.seed {
        Some(seed) => Engine::with_seed(config, store, seed),
        None => Engine::new(config, store),
    }
    .map_err(invalid_input)?;

    let mut session = Session::new(engine);
    let mut terminal = TerminalSession::enter()?;

    session.reset();
    session.start(config.tick_interval(), Instant::now());
    run(&mut terminal, &mut session)?;

    info!("exiting");
    Ok(())
}

fn run(terminal: &mut TerminalSession, session: &mut Session<Store>) -> io::Result<()> {
    let mut input = InputHandler::new();

    loop {
        let paused = session.is_paused();
        terminal
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &session.snapshot(), paused))?;

        let timeout = session
            .time_until_next_tick(Instant::now())
            .unwrap_or(IDLE_POLL_INTERVAL);
        if let Some(game_input) = input.poll_input(timeout)? {
            if game_input == GameInput::Quit {
                break;
            }
            handle_input(session, game_input, Instant::now());
        }

        if let Some(TickOutcome::GameOver(game_over)) = session.pump(Instant::now()) {
            debug!("game over event: {game_over:?}");
        }
    }

    Ok(())
}

fn handle_input(session: &mut Session<Store>, input: GameInput, now: Instant) {
    match input {
        GameInput::Direction(direction) => {
            session.submit(direction);
        }
        GameInput::Pause => session.toggle_pause(now),
        GameInput::Restart if session.snapshot().status == SessionStatus::Terminated => {
            session.restart(now);
        }
        GameInput::Restart | GameInput::Quit => {}
    }
}

/// Merges the optional config file with command-line overrides. Changing the
/// grid size from the command line re-centers the spawn cell.
fn resolve_config(cli: &Cli) -> Result<GameConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if cli.width.is_some() || cli.height.is_some() {
        config.grid = GridSize {
            width: cli.width.unwrap_or(config.grid.width),
            height: cli.height.unwrap_or(config.grid.height),
        };
        config.spawn = Position {
            x: i32::from(config.grid.width / 2),
            y: i32::from(config.grid.height / 2),
        };
    }
    if let Some(cell_size) = cli.cell_size {
        config.cell_size = cell_size;
    }
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_interval_ms = tick_ms;
    }

    config.validate()?;
    Ok(config)
}

/// Logs go to a file; the terminal is in raw mode while the game runs.
fn init_logging(path: Option<&Path>, debug: bool) {
    let path = path.map_or_else(default_log_path, Path::to_path_buf);
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    match File::create(&path) {
        Ok(file) => {
            if let Err(error) = WriteLogger::init(level, Config::default(), file) {
                eprintln!("Failed to initialize logger: {error}");
            }
        }
        Err(error) => eprintln!("Logging disabled, cannot open {}: {error}", path.display()),
    }
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push("grid-snake");
    base.push(LOG_FILE_NAME);
    base
}

fn invalid_input(error: ConfigError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
