use std::collections::HashSet;
use std::io;

use grid_snake::config::GameConfig;
use grid_snake::food::Food;
use grid_snake::game::{Engine, SessionStatus, TerminationReason, TickOutcome};
use grid_snake::input::Direction;
use grid_snake::score::{HighScoreStore, MemoryHighScoreStore, ScoreError};
use grid_snake::snake::{Position, Snake};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Store that records every write.
#[derive(Debug, Default)]
struct RecordingStore {
    stored: u32,
    writes: Vec<u32>,
}

impl HighScoreStore for RecordingStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        Ok(self.stored)
    }

    fn set_high_score(&mut self, score: u32) -> Result<(), ScoreError> {
        self.writes.push(score);
        self.stored = score;
        Ok(())
    }
}

/// Store whose backing medium is gone.
#[derive(Debug, Default)]
struct BrokenStore;

impl HighScoreStore for BrokenStore {
    fn high_score(&self) -> Result<u32, ScoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "score file locked").into())
    }

    fn set_high_score(&mut self, _score: u32) -> Result<(), ScoreError> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "score file locked").into())
    }
}

fn engine_20x20(seed: u64) -> Engine<MemoryHighScoreStore> {
    Engine::with_seed(GameConfig::default(), MemoryHighScoreStore::default(), seed)
        .expect("default config is valid")
}

fn straight_snake(head: Position, length: i32) -> Snake {
    let segments = (0..length)
        .map(|offset| Position {
            x: head.x - offset,
            y: head.y,
        })
        .collect();
    Snake::from_segments(segments).expect("non-empty body")
}

#[test]
fn five_ticks_right_from_spawn() {
    let mut engine = engine_20x20(1);
    engine.session_mut().food = Some(Food::new(Position { x: 0, y: 0 }));

    for _ in 0..5 {
        assert_eq!(engine.advance(), TickOutcome::Moved);
    }

    assert_eq!(engine.session().snake.len(), 1);
    assert_eq!(engine.session().snake.head(), Position { x: 15, y: 10 });
}

#[test]
fn food_directly_ahead_is_eaten() {
    let mut engine = engine_20x20(2);
    engine.session_mut().food = Some(Food::new(Position { x: 11, y: 10 }));

    assert_eq!(engine.advance(), TickOutcome::Ate { score: 1 });

    let session = engine.session();
    assert_eq!(session.score, 1);
    assert_eq!(session.snake.len(), 2);
    let food = session.food.expect("food was re-placed");
    assert!(!session.snake.occupies(food.position));
}

#[test]
fn only_first_intent_between_ticks_is_honored() {
    let mut engine = engine_20x20(3);
    engine.session_mut().snake = straight_snake(Position { x: 8, y: 8 }, 5);
    engine.session_mut().food = Some(Food::new(Position { x: 0, y: 0 }));

    assert!(engine.submit(Direction::Up));
    assert!(!engine.submit(Direction::Left));
    assert!(!engine.submit(Direction::Down));
    engine.advance();

    assert_eq!(engine.session().direction, Direction::Up);
    assert_eq!(engine.session().snake.head(), Position { x: 8, y: 7 });
}

#[test]
fn leaving_the_left_edge_terminates_without_moving() {
    let mut engine = engine_20x20(4);
    let snake = Snake::from_segments(vec![
        Position { x: 0, y: 5 },
        Position { x: 1, y: 5 },
        Position { x: 2, y: 5 },
    ])
    .expect("non-empty body");
    engine.session_mut().snake = snake.clone();
    engine.session_mut().direction = Direction::Left;
    let food = engine.session().food;

    let outcome = engine.advance();

    assert!(matches!(
        outcome,
        TickOutcome::GameOver(game_over)
            if game_over.reason == TerminationReason::WallCollision
    ));
    assert_eq!(engine.session().status, SessionStatus::Terminated);
    assert_eq!(engine.session().snake, snake);
    assert_eq!(engine.session().food, food);
}

#[test]
fn beating_the_stored_high_score_saves_it() {
    let store = RecordingStore {
        stored: 5,
        writes: Vec::new(),
    };
    let mut engine =
        Engine::with_seed(GameConfig::default(), store, 5).expect("default config is valid");
    engine.session_mut().score = 7;
    engine.session_mut().snake = Snake::new(Position { x: 19, y: 0 });

    let outcome = engine.advance();

    assert!(matches!(
        outcome,
        TickOutcome::GameOver(game_over)
            if game_over.final_score == 7
                && game_over.previous_high_score == 5
                && game_over.new_high_score
    ));
    assert_eq!(engine.store().writes, vec![7]);
    assert_eq!(engine.high_score(), 7);
}

#[test]
fn matching_the_high_score_does_not_save() {
    let store = RecordingStore {
        stored: 5,
        writes: Vec::new(),
    };
    let mut engine =
        Engine::with_seed(GameConfig::default(), store, 6).expect("default config is valid");
    engine.session_mut().score = 5;
    engine.session_mut().snake = Snake::new(Position { x: 19, y: 0 });

    engine.advance();

    assert!(engine.store().writes.is_empty());
    assert_eq!(engine.high_score(), 5);
}

#[test]
fn unavailable_store_counts_as_zero() {
    let mut engine =
        Engine::with_seed(GameConfig::default(), BrokenStore, 7).expect("default config is valid");
    assert_eq!(engine.high_score(), 0);
    engine.session_mut().score = 2;
    engine.session_mut().snake = Snake::new(Position { x: 19, y: 0 });

    let outcome = engine.advance();

    assert!(matches!(
        outcome,
        TickOutcome::GameOver(game_over)
            if game_over.previous_high_score == 0 && game_over.new_high_score
    ));
}

#[test]
fn reversal_never_changes_velocity() {
    let mut engine = engine_20x20(8);
    engine.session_mut().snake = straight_snake(Position { x: 8, y: 8 }, 3);
    engine.session_mut().food = Some(Food::new(Position { x: 0, y: 0 }));

    for _ in 0..3 {
        assert!(!engine.submit(Direction::Left));
        engine.advance();
        assert_eq!(engine.session().direction, Direction::Right);
    }
    assert_eq!(engine.session().snake.head(), Position { x: 11, y: 8 });
}

#[test]
fn terminated_engine_is_frozen() {
    let mut engine = engine_20x20(9);
    engine.session_mut().snake = Snake::new(Position { x: 19, y: 3 });
    engine.advance();
    let frozen = engine.session().clone();

    for direction in [Direction::Up, Direction::Down, Direction::Left] {
        engine.submit(direction);
        assert_eq!(engine.advance(), TickOutcome::Idle);
    }

    assert_eq!(engine.session(), &frozen);
}

#[test]
fn random_play_preserves_invariants() {
    let config = GameConfig {
        cell_size: 16,
        ..GameConfig::with_grid(8, 8)
    };
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    for seed in 0..40 {
        let mut engine = Engine::with_seed(config, MemoryHighScoreStore::default(), seed)
            .expect("test config is valid");
        let mut inputs = StdRng::seed_from_u64(seed + 1_000);

        for _ in 0..400 {
            if inputs.gen_bool(0.3) {
                engine.submit(directions[inputs.gen_range(0..directions.len())]);
            }

            let length_before = engine.session().snake.len();
            let score_before = engine.session().score;

            match engine.advance() {
                TickOutcome::Moved => {
                    assert_eq!(engine.session().snake.len(), length_before);
                    assert_eq!(engine.session().score, score_before);
                }
                TickOutcome::Ate { score } => {
                    assert_eq!(engine.session().snake.len(), length_before + 1);
                    assert_eq!(score, score_before + 1);
                }
                TickOutcome::GameOver(_) | TickOutcome::Idle => break,
            }

            assert_active_invariants(&engine, config);
        }
    }
}

fn assert_active_invariants(engine: &Engine<MemoryHighScoreStore>, config: GameConfig) {
    let snapshot = engine.snapshot();
    assert_eq!(snapshot.status, SessionStatus::Active);

    let segments: Vec<Position> = snapshot.snake.segments().copied().collect();
    assert!(!segments.is_empty());

    let unique: HashSet<Position> = segments.iter().copied().collect();
    assert_eq!(unique.len(), segments.len(), "segments overlap");

    for pair in segments.windows(2) {
        let distance = (pair[0].x - pair[1].x).abs() + (pair[0].y - pair[1].y).abs();
        assert_eq!(distance, 1, "segments not adjacent: {pair:?}");
    }

    let cell = i32::from(config.cell_size);
    let extent_x = i32::from(config.grid.width) * cell;
    let extent_y = i32::from(config.grid.height) * cell;
    for (x, y) in snapshot.world_segments() {
        assert!(x >= 0 && y >= 0);
        assert!(x < extent_x && y < extent_y);
        assert_eq!(x % cell, 0);
        assert_eq!(y % cell, 0);
    }

    let food = snapshot.food.expect("active session has food");
    assert!(!unique.contains(&food), "food placed on the snake");
}
