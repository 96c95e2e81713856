use std::time::Duration;

use crate::positions::PositionGenerator;
use crate::session::{ClickOutcome, PlayArea, Session, TICK_MS};
use crate::timer::{TickHandle, TickScheduler};
use crate::util::{parse_count, StartError};

/// Owns the current round and the one timer that drives its clock
pub struct Game {
    session: Option<Session>,
    timer: Option<Box<dyn TickHandle>>,
    generation: u64,
    scheduler: Box<dyn TickScheduler>,
    positions: Box<dyn PositionGenerator>,
}

impl Game {
    pub fn new(scheduler: Box<dyn TickScheduler>, positions: Box<dyn PositionGenerator>) -> Self {
        Self {
            session: None,
            timer: None,
            generation: 0,
            scheduler,
            positions,
        }
    }

    /// Start a new round from the raw count input.
    /// Invalid input leaves the current round and its timer untouched.
    pub fn start(&mut self, input: &str, area: PlayArea) -> Result<&Session, StartError> {
        let count = match parse_count(input) {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(input, error = %e, "rejected start count");
                return Err(e);
            }
        };

        self.stop_timer();
        self.generation += 1;

        let session = Session::new(count, area, self.positions.as_mut());
        tracing::info!(
            generation = self.generation,
            count = count.get(),
            width = area.width,
            height = area.height,
            "round started"
        );

        self.timer = Some(
            self.scheduler
                .schedule(self.generation, Duration::from_millis(TICK_MS)),
        );
        let session = self.session.insert(session);
        Ok(&*session)
    }

    pub fn click(&mut self, id: u32) -> ClickOutcome {
        let Some(session) = self.session.as_mut() else {
            return ClickOutcome::Ignored;
        };

        let outcome = session.click(id);
        tracing::debug!(id, ?outcome, "click");

        match outcome {
            ClickOutcome::Cleared => {
                self.stop_timer();
                tracing::info!(elapsed_ms = self.elapsed_ms(), "all cleared");
            }
            ClickOutcome::Missed { expected } => {
                self.stop_timer();
                tracing::info!(id, expected, elapsed_ms = self.elapsed_ms(), "game over");
            }
            ClickOutcome::Hit | ClickOutcome::Ignored => {}
        }

        outcome
    }

    /// Apply one clock firing. Returns true if the elapsed time changed.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "stale tick");
            return false;
        }
        match self.session.as_mut() {
            Some(session) => session.advance(TICK_MS),
            None => false,
        }
    }

    /// Cancel the running timer, if any. Safe to call repeatedly.
    pub fn stop_timer(&mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.cancel();
        }
    }

    pub fn timer_active(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| t.is_active())
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.session.as_ref().map_or(0, Session::elapsed_ms)
    }
}

impl Drop for Game {
    fn drop(&mut self) {
        self.stop_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::ScriptedPositions;
    use crate::session::Status;
    use crate::timer::ManualScheduler;
    use assert_matches::assert_matches;

    fn game() -> (Game, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let game = Game::new(
            Box::new(scheduler.clone()),
            Box::new(ScriptedPositions::new(vec![(0, 0).into(), (5, 2).into()])),
        );
        (game, scheduler)
    }

    fn area() -> PlayArea {
        PlayArea::new(40, 12)
    }

    #[test]
    fn start_creates_playing_session_with_one_timer() {
        let (mut game, scheduler) = game();
        let session = game.start("4", area()).unwrap();
        assert_eq!(session.count(), 4);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(scheduler.active(), 1);
        assert!(game.timer_active());
        assert_eq!(game.generation(), 1);
    }

    #[test]
    fn invalid_start_leaves_state_untouched() {
        let (mut game, scheduler) = game();
        assert_eq!(game.start("0", area()).unwrap_err(), StartError::NotPositive);
        assert!(game.session().is_none());
        assert_eq!(scheduler.scheduled(), 0);

        game.start("3", area()).unwrap();
        game.click(1);
        game.on_tick(1);
        let before = game.session().cloned();

        assert_matches!(game.start("abc", area()), Err(StartError::NotANumber));
        assert_matches!(game.start("-3", area()), Err(StartError::NotPositive));
        assert_eq!(game.session().cloned(), before);
        assert_eq!(game.generation(), 1);
        assert_eq!(scheduler.active(), 1);
        assert_eq!(scheduler.scheduled(), 1);
    }

    #[test]
    fn restart_replaces_session_and_timer() {
        let (mut game, scheduler) = game();
        game.start("3", area()).unwrap();
        game.click(1);
        game.on_tick(1);
        game.on_tick(1);
        assert_eq!(game.elapsed_ms(), 20);

        let session = game.start("5", area()).unwrap();
        assert_eq!(session.count(), 5);
        assert_eq!(session.elapsed_ms(), 0);
        assert_eq!(session.next_expected(), 1);
        assert!(session.targets().iter().all(|t| !t.clicked));
        assert_eq!(scheduler.active(), 1);
        assert_eq!(scheduler.scheduled(), 2);
    }

    #[test]
    fn stale_ticks_are_ignored() {
        let (mut game, _scheduler) = game();
        game.start("3", area()).unwrap();
        game.start("3", area()).unwrap();
        assert!(!game.on_tick(1));
        assert_eq!(game.elapsed_ms(), 0);
        assert!(game.on_tick(2));
        assert_eq!(game.elapsed_ms(), TICK_MS);
    }

    #[test]
    fn clearing_stops_the_timer() {
        let (mut game, scheduler) = game();
        game.start("2", area()).unwrap();
        assert_eq!(game.click(1), ClickOutcome::Hit);
        assert!(game.timer_active());
        assert_eq!(game.click(2), ClickOutcome::Cleared);
        assert!(!game.timer_active());
        assert_eq!(scheduler.active(), 0);

        let elapsed = game.elapsed_ms();
        assert!(!game.on_tick(1));
        assert_eq!(game.elapsed_ms(), elapsed);
    }

    #[test]
    fn wrong_click_stops_the_timer() {
        let (mut game, scheduler) = game();
        game.start("3", area()).unwrap();
        assert_eq!(game.click(2), ClickOutcome::Missed { expected: 1 });
        assert_eq!(game.session().unwrap().status(), Status::Over);
        assert_eq!(scheduler.active(), 0);
        assert!(!game.on_tick(1));
    }

    #[test]
    fn clicks_after_end_are_noops() {
        let (mut game, _scheduler) = game();
        game.start("2", area()).unwrap();
        game.click(2);
        let before = game.session().cloned();
        assert_eq!(game.click(1), ClickOutcome::Ignored);
        assert_eq!(game.session().cloned(), before);
    }

    #[test]
    fn click_without_session_is_ignored() {
        let (mut game, _scheduler) = game();
        assert_eq!(game.click(1), ClickOutcome::Ignored);
        assert!(!game.on_tick(0));
    }

    #[test]
    fn stop_timer_is_idempotent() {
        let (mut game, scheduler) = game();
        game.start("2", area()).unwrap();
        game.stop_timer();
        game.stop_timer();
        assert_eq!(scheduler.active(), 0);
        assert!(!game.timer_active());
    }

    #[test]
    fn drop_cancels_timer() {
        let (mut game, scheduler) = game();
        game.start("2", area()).unwrap();
        drop(game);
        assert_eq!(scheduler.active(), 0);
    }
}
