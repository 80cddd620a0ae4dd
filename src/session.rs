use std::time::{Duration, Instant};

use log::info;

use crate::game::{Engine, SessionStatus, Snapshot, TickOutcome};
use crate::input::Direction;
use crate::scheduler::TickScheduler;
use crate::score::HighScoreStore;

/// Engine plus the scheduler that drives it.
///
/// This is the control surface a front-end talks to: `reset` then `start` to
/// begin, `submit` for input, and `pump` from the loop.
#[derive(Debug)]
pub struct Session<S> {
    engine: Engine<S>,
    scheduler: TickScheduler,
    paused: bool,
}

impl<S: HighScoreStore> Session<S> {
    /// Wraps `engine` with a stopped scheduler using the configured interval.
    #[must_use]
    pub fn new(engine: Engine<S>) -> Self {
        let scheduler = TickScheduler::new(engine.config().tick_interval());
        Self {
            engine,
            scheduler,
            paused: false,
        }
    }

    /// Starts ticking every `interval`.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.scheduler.start(interval, now);
        self.paused = false;
        info!("ticking every {} ms", self.scheduler.interval().as_millis());
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Cancels any pending tick, then resets the engine to a fresh session.
    /// The scheduler stays stopped until the next [`Session::start`].
    pub fn reset(&mut self) {
        self.scheduler.stop();
        self.paused = false;
        self.engine.reset();
    }

    /// Resets and immediately starts at the configured interval.
    pub fn restart(&mut self, now: Instant) {
        self.reset();
        self.start(self.engine.config().tick_interval(), now);
    }

    /// Suspends or resumes ticking of an active session.
    pub fn toggle_pause(&mut self, now: Instant) {
        if self.engine.session().status != SessionStatus::Active {
            return;
        }

        if self.paused {
            self.start(self.scheduler.interval(), now);
        } else if self.scheduler.is_running() {
            self.scheduler.stop();
            self.paused = true;
        }
    }

    /// Forwards a direction to the intent gate unless paused.
    pub fn submit(&mut self, direction: Direction) -> bool {
        if self.paused {
            return false;
        }
        self.engine.submit(direction)
    }

    /// Advances the engine when a tick is due. Stops the scheduler once the
    /// session terminates.
    pub fn pump(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.scheduler.poll(now) {
            return None;
        }

        let outcome = self.engine.advance();
        if matches!(outcome, TickOutcome::GameOver(_) | TickOutcome::Idle) {
            self.scheduler.stop();
        }
        Some(outcome)
    }

    #[must_use]
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        self.engine.snapshot()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<S> {
        &mut self.engine
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crate::config::GameConfig;
    use crate::game::{Engine, SessionStatus, TickOutcome};
    use crate::input::Direction;
    use crate::score::MemoryHighScoreStore;
    use crate::snake::{Position, Snake};

    use super::Session;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn session() -> Session<MemoryHighScoreStore> {
        let config = GameConfig {
            tick_interval_ms: 100,
            ..GameConfig::with_grid(10, 10)
        };
        let engine = Engine::with_seed(config, MemoryHighScoreStore::default(), 21)
            .expect("test config is valid");
        Session::new(engine)
    }

    #[test]
    fn pump_advances_only_when_due() {
        let mut session = session();
        let start = Instant::now();
        session.start(INTERVAL, start);

        assert_eq!(session.pump(start + Duration::from_millis(50)), None);
        assert!(session.pump(start + INTERVAL).is_some());
        assert_eq!(session.engine().session().tick_count, 1);
    }

    #[test]
    fn termination_stops_the_scheduler() {
        let mut session = session();
        session.engine_mut().session_mut().snake = Snake::new(Position { x: 9, y: 4 });
        let start = Instant::now();
        session.start(INTERVAL, start);

        assert!(matches!(
            session.pump(start + INTERVAL),
            Some(TickOutcome::GameOver(_))
        ));
        assert!(!session.is_running());
        assert_eq!(session.pump(start + INTERVAL * 5), None);
    }

    #[test]
    fn reset_cancels_the_stale_tick() {
        let mut session = session();
        let start = Instant::now();
        session.start(INTERVAL, start);

        session.reset();

        assert_eq!(session.pump(start + INTERVAL * 2), None);
        assert_eq!(session.engine().session().tick_count, 0);
        assert_eq!(
            session.engine().session().snake.head(),
            Position { x: 5, y: 5 }
        );
    }

    #[test]
    fn restart_begins_a_new_active_session() {
        let mut session = session();
        session.engine_mut().session_mut().snake = Snake::new(Position { x: 9, y: 4 });
        let start = Instant::now();
        session.start(INTERVAL, start);
        session.pump(start + INTERVAL);
        assert_eq!(
            session.snapshot().status,
            SessionStatus::Terminated
        );

        let later = start + INTERVAL * 3;
        session.restart(later);

        assert_eq!(session.snapshot().status, SessionStatus::Active);
        assert!(session.is_running());
        assert!(session.pump(later + INTERVAL).is_some());
    }

    #[test]
    fn pause_suspends_ticks_and_input() {
        let mut session = session();
        let start = Instant::now();
        session.start(INTERVAL, start);

        session.toggle_pause(start);
        assert!(session.is_paused());
        assert!(!session.submit(Direction::Up));
        assert_eq!(session.pump(start + INTERVAL * 4), None);

        let resume = start + INTERVAL * 4;
        session.toggle_pause(resume);
        assert!(!session.is_paused());
        assert!(session.submit(Direction::Up));
        assert!(session.pump(resume + INTERVAL).is_some());
        assert_eq!(
            session.engine().session().snake.head(),
            Position { x: 5, y: 4 }
        );
    }
}
