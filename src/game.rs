use log::{debug, info, trace, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{ConfigError, GameConfig, GridSize};
use crate::food::Food;
use crate::input::Direction;
use crate::intent::IntentGate;
use crate::score::HighScoreStore;
use crate::snake::{Position, Snake};

/// Direction the snake travels at session start.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Whether the session is still being simulated.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    Active,
    Terminated,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TerminationReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// Terminal event reported once per session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOver {
    pub reason: TerminationReason,
    pub final_score: u32,
    /// Stored high score before this session ended.
    pub previous_high_score: u32,
    pub new_high_score: bool,
}

/// Result of one [`Engine::advance`] call.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The session is already over; nothing changed.
    Idle,
    Moved,
    Ate { score: u32 },
    GameOver(GameOver),
}

/// Complete mutable state for one session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SessionState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub score: u32,
    pub direction: Direction,
    pub status: SessionStatus,
    pub tick_count: u64,
    pub game_over: Option<GameOver>,
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a Snake,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub direction: Direction,
    pub cell_size: u16,
    pub grid: GridSize,
    pub status: SessionStatus,
    pub game_over: Option<GameOver>,
}

impl Snapshot<'_> {
    /// Snake segments in world units, head first.
    pub fn world_segments(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cell_size = self.cell_size;
        self.snake
            .segments()
            .map(move |segment| segment.to_world(cell_size))
    }

    /// Food position in world units.
    #[must_use]
    pub fn world_food(&self) -> Option<(i32, i32)> {
        self.food.map(|food| food.to_world(self.cell_size))
    }
}

/// Authoritative snake simulation.
///
/// Owns the session state, the intent gate, the food RNG, and the high-score
/// store. One call to [`Engine::advance`] is one tick.
#[derive(Debug)]
pub struct Engine<S> {
    config: GameConfig,
    session: SessionState,
    gate: IntentGate,
    rng: StdRng,
    store: S,
    high_score: u32,
}

impl<S: HighScoreStore> Engine<S> {
    /// Creates an engine with an entropy-seeded food RNG and an active session.
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::from_entropy())
    }

    /// Creates a deterministic engine for tests and reproducible runs.
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, store: S, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = load_or_zero(&store);
        let session = fresh_session(&config, &mut rng);

        Ok(Self {
            config,
            session,
            gate: IntentGate::new(),
            rng,
            store,
            high_score,
        })
    }

    /// Starts a new session: one segment at the spawn cell, heading right,
    /// score zero, fresh food.
    pub fn reset(&mut self) {
        self.session = fresh_session(&self.config, &mut self.rng);
        self.gate.clear();
        info!(
            "session reset on {}x{} grid, spawn ({}, {})",
            self.config.grid.width,
            self.config.grid.height,
            self.config.spawn.x,
            self.config.spawn.y
        );
    }

    /// Offers a direction change for the next tick. Returns `true` when the
    /// intent gate accepted it.
    pub fn submit(&mut self, direction: Direction) -> bool {
        if self.session.status != SessionStatus::Active {
            return false;
        }
        self.gate.submit(direction, self.session.direction)
    }

    /// Like [`Engine::submit`] for a textual direction symbol. Unknown
    /// symbols are ignored.
    pub fn submit_symbol(&mut self, symbol: &str) -> bool {
        match symbol.parse::<Direction>() {
            Ok(direction) => self.submit(direction),
            Err(error) => {
                trace!("ignoring input: {error}");
                false
            }
        }
    }

    /// Advances the simulation by one tick.
    pub fn advance(&mut self) -> TickOutcome {
        if self.session.status != SessionStatus::Active {
            return TickOutcome::Idle;
        }

        let direction = self.gate.consume(self.session.direction);
        self.session.direction = direction;
        let next_head = self.session.snake.head().step(direction);

        if !next_head.is_within_bounds(self.config.grid) {
            return self.terminate(TerminationReason::WallCollision);
        }
        if self
            .session
            .snake
            .occupies_from(next_head, self.config.self_collision_min_index)
        {
            return self.terminate(TerminationReason::SelfCollision);
        }

        self.session.tick_count += 1;
        let eaten = self
            .session
            .food
            .filter(|food| food.position == next_head);
        self.session.snake.advance(next_head, eaten.is_some());

        let Some(food) = eaten else {
            return TickOutcome::Moved;
        };

        self.session.score += food.points();
        debug!(
            "food eaten at ({}, {}), score {}, length {}",
            next_head.x,
            next_head.y,
            self.session.score,
            self.session.snake.len()
        );

        self.session.food = self.place_food();
        if self.session.food.is_none() {
            return self.terminate(TerminationReason::BoardFilled);
        }

        TickOutcome::Ate {
            score: self.session.score,
        }
    }

    /// Draws a new food item on a cell the snake does not occupy.
    pub fn place_food(&mut self) -> Option<Food> {
        Food::spawn(&mut self.rng, self.config.grid, &self.session.snake)
    }

    fn terminate(&mut self, reason: TerminationReason) -> TickOutcome {
        self.session.status = SessionStatus::Terminated;

        let final_score = self.session.score;
        let previous_high_score = load_or_zero(&self.store);
        let new_high_score = final_score > previous_high_score;

        if new_high_score {
            if let Err(error) = self.store.set_high_score(final_score) {
                warn!("failed to save high score {final_score}: {error}");
            }
        }
        self.high_score = previous_high_score.max(final_score);

        let game_over = GameOver {
            reason,
            final_score,
            previous_high_score,
            new_high_score,
        };
        self.session.game_over = Some(game_over);

        info!(
            "session over after {} ticks: {reason:?}, score {final_score}{}",
            self.session.tick_count,
            if new_high_score { " (new high score)" } else { "" }
        );

        TickOutcome::GameOver(game_over)
    }

    /// Returns the renderer view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            snake: &self.session.snake,
            food: self.session.food.map(|food| food.position),
            score: self.session.score,
            high_score: self.high_score,
            direction: self.session.direction,
            cell_size: self.config.cell_size,
            grid: self.config.grid,
            status: self.session.status,
            game_over: self.session.game_over,
        }
    }

    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable session access for scripted setups.
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn pending_intent(&self) -> Option<Direction> {
        self.gate.pending()
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}

fn fresh_session(config: &GameConfig, rng: &mut StdRng) -> SessionState {
    let snake = Snake::new(config.spawn);
    let food = Food::spawn(rng, config.grid, &snake);

    SessionState {
        snake,
        food,
        score: 0,
        direction: INITIAL_DIRECTION,
        status: SessionStatus::Active,
        tick_count: 0,
        game_over: None,
    }
}

fn load_or_zero<S: HighScoreStore>(store: &S) -> u32 {
    store.high_score().unwrap_or_else(|error| {
        warn!("high score unavailable, using 0: {error}");
        0
    })
}
