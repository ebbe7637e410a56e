//! # Stepper Module
//!
//! The press-and-hold repeat state machine behind the quantity +/- controls.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Hold-to-Repeat                                       │
//! │                                                                         │
//! │            press (emits 1 step)          deadline reached               │
//! │  ┌──────┐ ─────────────────────► ┌───────┐ ──────────────► ┌─────────┐ │
//! │  │ Idle │                        │ Armed │                 │Repeating│ │
//! │  └──────┘ ◄───────────────────── └───────┘ ◄────────────── └─────────┘ │
//! │      ▲        release / leave                release / leave     │     │
//! │      └───────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  Timeline for a 1-second hold (defaults: 300ms arm, 100ms interval):   │
//! │                                                                         │
//! │  0ms      300ms  400  500  600  700  800  900  1000                    │
//! │  │ press  │ arm  │    │    │    │    │    │    │                       │
//! │  ▼        ▼      ▼    ▼    ▼    ▼    ▼    ▼    ▼                       │
//! │  step 1          r1   r2   r3   r4   r5   r6   r7   = 8 steps total    │
//! │                                                                         │
//! │  Any exit signal (release, pointer-leave, unmount) tears the machine   │
//! │  down immediately - no step fires after release.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This machine is pure: the clock is injected as `Instant` arguments, so
//! tests drive it deterministically. The async driver that owns the real
//! timer lives in `vesta-session`.

use std::time::{Duration, Instant};

// =============================================================================
// Constants
// =============================================================================

/// How long the control must stay pressed before repeats start.
pub const HOLD_ARM_DELAY: Duration = Duration::from_millis(300);

/// Interval between repeated steps while held.
pub const HOLD_REPEAT_INTERVAL: Duration = Duration::from_millis(100);

// =============================================================================
// Repeat Phase
// =============================================================================

/// Where the machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPhase {
    /// Not pressed.
    Idle,
    /// Pressed; waiting out the arm delay before repeating.
    Armed { deadline: Instant },
    /// Held past the arm delay; emitting a step every interval.
    Repeating { next: Instant },
}

// =============================================================================
// Step Repeater
// =============================================================================

/// Press-and-hold repeater for a single stepper control.
///
/// `press` emits the one immediate step; `poll` reports how many repeat
/// steps have come due since the last call; `release` tears the machine
/// down. The caller owns the clock.
#[derive(Debug, Clone)]
pub struct StepRepeater {
    arm_delay: Duration,
    interval: Duration,
    phase: RepeatPhase,
}

impl Default for StepRepeater {
    fn default() -> Self {
        StepRepeater::new(HOLD_ARM_DELAY, HOLD_REPEAT_INTERVAL)
    }
}

impl StepRepeater {
    /// Creates a repeater with explicit timings.
    pub fn new(arm_delay: Duration, interval: Duration) -> Self {
        StepRepeater {
            arm_delay,
            interval,
            phase: RepeatPhase::Idle,
        }
    }

    /// Current phase.
    #[inline]
    pub fn phase(&self) -> RepeatPhase {
        self.phase
    }

    /// Whether the control is currently pressed.
    #[inline]
    pub fn is_pressed(&self) -> bool {
        !matches!(self.phase, RepeatPhase::Idle)
    }

    /// The pointer went down. Emits exactly one immediate step and arms the
    /// repeat timer. A second press on an already-pressed machine restarts
    /// it (single pointer; the previous gesture is over).
    pub fn press(&mut self, now: Instant) -> u32 {
        self.phase = RepeatPhase::Armed {
            deadline: now + self.arm_delay,
        };
        1
    }

    /// Advances the machine to `now` and returns how many repeat steps came
    /// due. Returns 0 while idle or still inside the arm delay.
    pub fn poll(&mut self, now: Instant) -> u32 {
        // arm-delay expiry schedules the first repeat one interval later
        if let RepeatPhase::Armed { deadline } = self.phase {
            if now >= deadline {
                self.phase = RepeatPhase::Repeating {
                    next: deadline + self.interval,
                };
            }
        }

        let RepeatPhase::Repeating { mut next } = self.phase else {
            return 0;
        };

        let mut steps = 0;
        while next <= now {
            steps += 1;
            next += self.interval;
        }
        self.phase = RepeatPhase::Repeating { next };
        steps
    }

    /// The pointer went up or left the control, or the component unmounted.
    /// No further step fires.
    pub fn release(&mut self) {
        self.phase = RepeatPhase::Idle;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_press_emits_one_immediate_step() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        assert_eq!(repeater.press(t0), 1);
        assert!(repeater.is_pressed());
    }

    #[test]
    fn test_no_repeats_inside_arm_delay() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        repeater.press(t0);

        assert_eq!(repeater.poll(t0 + ms(100)), 0);
        assert_eq!(repeater.poll(t0 + ms(299)), 0);
    }

    #[test]
    fn test_one_second_hold_is_one_plus_seven() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();

        let mut steps = repeater.press(t0);
        // poll every 50ms for one second, like a UI frame loop
        for tick in 1..=20 {
            steps += repeater.poll(t0 + ms(tick * 50));
        }

        // 1 immediate + repeats at 400..=1000ms
        assert_eq!(steps, 8);
    }

    #[test]
    fn test_late_poll_catches_up_deterministically() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        repeater.press(t0);

        // a single poll at 1s accounts for every repeat due by then
        assert_eq!(repeater.poll(t0 + ms(1000)), 7);
        // and the next interval boundary still lines up
        assert_eq!(repeater.poll(t0 + ms(1099)), 0);
        assert_eq!(repeater.poll(t0 + ms(1100)), 1);
    }

    #[test]
    fn test_release_stops_immediately() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        repeater.press(t0);
        repeater.poll(t0 + ms(500));

        repeater.release();
        assert!(!repeater.is_pressed());
        assert_eq!(repeater.poll(t0 + ms(10_000)), 0);
    }

    #[test]
    fn test_release_during_arm_delay_never_repeats() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        repeater.press(t0);
        repeater.release();

        assert_eq!(repeater.poll(t0 + ms(300)), 0);
        assert_eq!(repeater.poll(t0 + ms(5000)), 0);
    }

    #[test]
    fn test_second_press_restarts_gesture() {
        let mut repeater = StepRepeater::default();
        let t0 = Instant::now();
        repeater.press(t0);
        repeater.poll(t0 + ms(600));

        // new press re-arms: no repeat until its own delay elapses
        assert_eq!(repeater.press(t0 + ms(700)), 1);
        assert_eq!(repeater.poll(t0 + ms(900)), 0);
        assert_eq!(repeater.poll(t0 + ms(1100)), 1);
    }
}
