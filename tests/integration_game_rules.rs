use assert_matches::assert_matches;

use pointrush::controller::Game;
use pointrush::positions::RandomPositions;
use pointrush::session::{ClickOutcome, PlayArea, Status, TICK_MS};
use pointrush::timer::ManualScheduler;
use pointrush::util::{format_elapsed, StartError};

fn game() -> (Game, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let game = Game::new(
        Box::new(scheduler.clone()),
        Box::new(RandomPositions::new(Some(2024))),
    );
    (game, scheduler)
}

fn area() -> PlayArea {
    PlayArea::new(80, 24)
}

#[test]
fn start_builds_fresh_session_for_many_counts() {
    let (mut game, scheduler) = game();
    for n in [1u32, 2, 7, 50, 400] {
        let session = game.start(&n.to_string(), area()).unwrap();
        assert_eq!(session.count(), n);
        let ids: Vec<u32> = session.targets().iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=n).collect::<Vec<_>>());
        assert_eq!(session.next_expected(), 1);
        assert_eq!(session.status(), Status::Playing);
        assert_eq!(session.elapsed_ms(), 0);
        assert_eq!(scheduler.active(), 1);
    }
}

#[test]
fn rejected_counts_signal_validation_error() {
    let (mut game, scheduler) = game();
    assert_matches!(game.start("0", area()), Err(StartError::NotPositive));
    assert_matches!(game.start("-3", area()), Err(StartError::NotPositive));
    assert_matches!(game.start("abc", area()), Err(StartError::NotANumber));
    assert!(game.session().is_none());
    assert_eq!(scheduler.scheduled(), 0);
}

#[test]
fn clicking_in_order_clears_and_freezes_clock() {
    let (mut game, scheduler) = game();
    game.start("5", area()).unwrap();
    let generation = game.generation();

    for id in 1..5 {
        assert_eq!(game.click(id), ClickOutcome::Hit);
        game.on_tick(generation);
    }
    assert_eq!(game.click(5), ClickOutcome::Cleared);
    assert_eq!(game.session().unwrap().status(), Status::Cleared);
    assert_eq!(scheduler.active(), 0);

    let elapsed = game.elapsed_ms();
    assert_eq!(elapsed, 4 * TICK_MS);
    for _ in 0..10 {
        game.on_tick(generation);
    }
    assert_eq!(game.elapsed_ms(), elapsed);
}

#[test]
fn skipping_first_target_is_game_over() {
    let (mut game, scheduler) = game();
    game.start("2", area()).unwrap();
    assert_eq!(game.click(2), ClickOutcome::Missed { expected: 1 });
    assert_eq!(game.session().unwrap().status(), Status::Over);
    assert_eq!(scheduler.active(), 0);
}

#[test]
fn restart_mid_round_replaces_everything() {
    let (mut game, scheduler) = game();
    game.start("4", area()).unwrap();
    game.click(1);
    game.click(2);
    game.on_tick(game.generation());

    let session = game.start("6", area()).unwrap();
    assert_eq!(session.count(), 6);
    assert!(session.targets().iter().all(|t| !t.clicked));
    assert_eq!(session.elapsed_ms(), 0);
    assert_eq!(scheduler.active(), 1);
    assert_eq!(scheduler.scheduled(), 2);

    // Ticks from the first round no longer count
    assert!(!game.on_tick(1));
    assert_eq!(game.elapsed_ms(), 0);
}

#[test]
fn restart_after_game_over_plays_again() {
    let (mut game, scheduler) = game();
    game.start("3", area()).unwrap();
    game.click(3);
    assert_eq!(scheduler.active(), 0);

    game.start("3", area()).unwrap();
    assert_eq!(game.session().unwrap().status(), Status::Playing);
    assert_eq!(game.click(1), ClickOutcome::Hit);
    assert_eq!(scheduler.active(), 1);
}

#[test]
fn clicks_after_end_change_nothing() {
    let (mut game, _) = game();
    game.start("3", area()).unwrap();
    game.click(2);
    let over = game.session().cloned();
    for id in 1..=3 {
        assert_eq!(game.click(id), ClickOutcome::Ignored);
    }
    assert_eq!(game.session().cloned(), over);

    game.start("1", area()).unwrap();
    game.click(1);
    let cleared = game.session().cloned();
    assert_eq!(game.click(1), ClickOutcome::Ignored);
    assert_eq!(game.session().cloned(), cleared);
}

#[test]
fn elapsed_formatting_examples() {
    assert_eq!(format_elapsed(0), "00:00:00");
    assert_eq!(format_elapsed(1500), "00:01:50");
    assert_eq!(format_elapsed(61000), "01:01:00");
}
