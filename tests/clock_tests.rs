//! Cycle clock tests.
//!
//! These sleep real (short) intervals: the clock's one job is converting
//! wall-clock time into cycles, and sleeping at least one full cycle period
//! guarantees at least one pending cycle regardless of scheduler jitter.

use std::thread::sleep;
use std::time::Duration;

use gridfall::core::GameClock;

#[test]
fn single_cycle_is_consumed_exactly_once() {
    let mut clock = GameClock::new(20.0); // 50 ms per cycle
    sleep(Duration::from_millis(60));
    clock.update();
    assert!(clock.has_elapsed_cycle());
    assert!(!clock.has_elapsed_cycle()); // consumed the only cycle
}

#[test]
fn peek_does_not_consume() {
    let mut clock = GameClock::new(100.0);
    sleep(Duration::from_millis(15));
    clock.update();
    assert!(clock.peek_elapsed_cycle());
    assert!(clock.peek_elapsed_cycle());
    assert!(clock.has_elapsed_cycle());
}

#[test]
fn pause_stops_counting() {
    let mut clock = GameClock::new(50.0); // 20 ms per cycle
    clock.set_paused(true);
    sleep(Duration::from_millis(30));
    clock.update();
    assert!(!clock.peek_elapsed_cycle());
    assert!(clock.is_paused());
}

#[test]
fn resuming_owes_nothing_for_the_paused_interval() {
    let mut clock = GameClock::new(20.0); // 50 ms per cycle
    clock.set_paused(true);
    sleep(Duration::from_millis(60));
    clock.update(); // still paused
    assert!(!clock.peek_elapsed_cycle());

    clock.set_paused(false);
    clock.update(); // refreshes the sample point, paused time discarded
    assert!(!clock.peek_elapsed_cycle());

    sleep(Duration::from_millis(60));
    clock.update(); // now running
    assert!(clock.peek_elapsed_cycle());
}

#[test]
fn rate_change_applies_to_subsequent_intervals() {
    let mut clock = GameClock::new(1.0); // 1000 ms per cycle
    clock.set_cycles_per_second(100.0); // now 10 ms per cycle
    clock.reset();
    sleep(Duration::from_millis(15));
    clock.update();
    assert!(clock.has_elapsed_cycle());
}

#[test]
fn reset_clears_pending_cycles() {
    let mut clock = GameClock::new(100.0);
    sleep(Duration::from_millis(15));
    clock.update();
    assert!(clock.peek_elapsed_cycle());
    clock.reset();
    assert!(!clock.peek_elapsed_cycle());
}

#[test]
#[should_panic(expected = "cycle rate must be positive")]
fn zero_rate_is_rejected_at_construction() {
    // A zero rate would be an infinite period: a clock that never ticks.
    let _ = GameClock::new(0.0);
}

#[test]
#[should_panic(expected = "cycle rate must be positive")]
fn negative_rate_is_rejected_at_reconfiguration() {
    let mut clock = GameClock::new(1.0);
    clock.set_cycles_per_second(-1.0);
}
