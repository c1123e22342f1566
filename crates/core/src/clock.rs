//! Cycle clock: converts wall-clock time into whole simulation cycles.
//!
//! The clock decouples the simulation tick rate from the render/input loop.
//! Each [`GameClock::update`] samples the wall clock and folds the elapsed
//! milliseconds (plus the fractional remainder carried from previous calls)
//! into a pending-cycle count; the game loop then consumes pending cycles one
//! at a time through [`GameClock::has_elapsed_cycle`]. Pausing stops
//! accumulation without owing cycles for the paused interval.

use std::time::Instant;

/// A pausable logical clock ticking at a configurable rate.
#[derive(Debug, Clone)]
pub struct GameClock {
    millis_per_cycle: f32,
    last_update: Instant,
    elapsed_cycles: u32,
    /// Sub-cycle remainder in milliseconds, carried between updates so that
    /// cycle accounting is lossless across calls.
    excess_millis: f32,
    paused: bool,
}

impl GameClock {
    /// Create a clock ticking `cycles_per_second` times per second.
    ///
    /// # Panics
    ///
    /// Panics if `cycles_per_second` is not strictly positive. A rate of zero
    /// would silently produce a clock that never ticks, so it is rejected at
    /// configuration time.
    pub fn new(cycles_per_second: f32) -> Self {
        let mut clock = Self {
            millis_per_cycle: 0.0,
            last_update: Instant::now(),
            elapsed_cycles: 0,
            excess_millis: 0.0,
            paused: false,
        };
        clock.set_cycles_per_second(cycles_per_second);
        clock
    }

    /// Change the tick rate in place. Pending cycles are kept; call
    /// [`GameClock::reset`] to drop them.
    ///
    /// # Panics
    ///
    /// Panics if `cycles_per_second` is not strictly positive.
    pub fn set_cycles_per_second(&mut self, cycles_per_second: f32) {
        assert!(
            cycles_per_second > 0.0,
            "cycle rate must be positive, got {cycles_per_second}"
        );
        self.millis_per_cycle = 1000.0 / cycles_per_second;
    }

    /// Sample the wall clock and accumulate pending cycles.
    ///
    /// While paused nothing accumulates, but the sample point still advances,
    /// so resuming does not retroactively credit the paused interval.
    pub fn update(&mut self) {
        let now = Instant::now();
        if !self.paused {
            let delta =
                now.duration_since(self.last_update).as_secs_f32() * 1000.0 + self.excess_millis;
            self.elapsed_cycles += (delta / self.millis_per_cycle) as u32;
            self.excess_millis = delta % self.millis_per_cycle;
        }
        self.last_update = now;
    }

    /// Consume one pending cycle if any. Calling twice without an intervening
    /// [`GameClock::update`] returns true at most once per pending cycle.
    pub fn has_elapsed_cycle(&mut self) -> bool {
        if self.elapsed_cycles > 0 {
            self.elapsed_cycles -= 1;
            true
        } else {
            false
        }
    }

    /// Whether at least one cycle is pending, without consuming it.
    pub fn peek_elapsed_cycle(&self) -> bool {
        self.elapsed_cycles > 0
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Drop pending cycles, resynchronize to now, and unpause.
    pub fn reset(&mut self) {
        self.elapsed_cycles = 0;
        self.excess_millis = 0.0;
        self.last_update = Instant::now();
        self.paused = false;
    }
}
