//! # Hold-to-Repeat Driver
//!
//! The tokio timer task behind the quantity stepper controls.
//!
//! The pure state machine lives in `vesta_core::stepper`; this module owns
//! the actual timer resource, which is the one concurrency hazard in the
//! system: a dangling interval mutating state after the control unmounted.
//!
//! ## Teardown Guarantees
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repeat Task Lifecycle                                │
//! │                                                                         │
//! │  press() ──► send 1 step ──► spawn task:                               │
//! │                                sleep(300ms)                             │
//! │                                loop { sleep(100ms); send step }        │
//! │                                                                         │
//! │  release()        ──► abort task   (pointer up / pointer leave)        │
//! │  drop(repeater)   ──► abort task   (component unmount)                 │
//! │  receiver dropped ──► task exits   (session gone)                      │
//! │                                                                         │
//! │  Teardown is explicit on every exit signal, never by convention.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use vesta_core::stepper::{HOLD_ARM_DELAY, HOLD_REPEAT_INTERVAL};

use crate::config::StepperSettings;

/// One step of the held control. The receiver applies it to the cart
/// (increment or decrement of the line the control belongs to).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step;

/// Hold-to-repeat driver for a single stepper control.
///
/// `press` emits the immediate step and starts the timer task; `release`
/// aborts it. Dropping the driver aborts it too, so an unmounted control
/// can never keep stepping.
#[derive(Debug)]
pub struct HoldRepeater {
    arm_delay: Duration,
    interval: Duration,
    task: Option<JoinHandle<()>>,
}

impl HoldRepeater {
    /// Creates a driver with the default 300ms/100ms timings.
    pub fn new() -> Self {
        HoldRepeater::with_timings(HOLD_ARM_DELAY, HOLD_REPEAT_INTERVAL)
    }

    /// Creates a driver with explicit timings.
    pub fn with_timings(arm_delay: Duration, interval: Duration) -> Self {
        HoldRepeater {
            arm_delay,
            interval,
            task: None,
        }
    }

    /// Creates a driver from configuration.
    pub fn from_settings(settings: &StepperSettings) -> Self {
        HoldRepeater::with_timings(settings.arm_delay(), settings.repeat_interval())
    }

    /// The pointer went down: emits one step immediately and starts the
    /// delayed repeat task. A press while already held restarts the gesture.
    pub fn press(&mut self, steps: mpsc::UnboundedSender<Step>) {
        self.release();

        // the discrete step fires synchronously, before any timer exists
        let _ = steps.send(Step);

        let arm_delay = self.arm_delay;
        let interval = self.interval;
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(arm_delay).await;
            loop {
                tokio::time::sleep(interval).await;
                if steps.send(Step).is_err() {
                    // receiver gone; nothing left to step
                    break;
                }
            }
        }));
    }

    /// The pointer went up or left the control. No step fires after this.
    pub fn release(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("hold-to-repeat released");
            task.abort();
        }
    }

    /// Whether the control is currently held.
    pub fn is_held(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl Default for HoldRepeater {
    fn default() -> Self {
        HoldRepeater::new()
    }
}

/// Component unmount: the timer dies with the control.
impl Drop for HoldRepeater {
    fn drop(&mut self) {
        self.release();
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

    async fn advance_by(total_ms: u64) {
        // Let the paused clock auto-advance to each pending timer deadline in
        // turn. Sleeping the test task keeps the runtime idle between wakeups,
        // so every repeat timer fires at its true deadline (manual slice
        // advancing wakes the repeat task a slice late, drifting each rearm).
        tokio::time::sleep(ms(total_ms)).await;
        tokio::task::yield_now().await;
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Step>) -> u32 {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_second_hold_is_one_plus_seven() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repeater = HoldRepeater::new();

        repeater.press(tx);
        advance_by(1000).await;

        // 1 immediate + repeats at 400..=1000ms
        assert_eq!(drain(&mut rx), 8);
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_stops_further_steps() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repeater = HoldRepeater::new();

        repeater.press(tx);
        advance_by(500).await;
        repeater.release();
        let after_hold = drain(&mut rx);

        advance_by(5000).await;
        assert_eq!(drain(&mut rx), 0);
        assert_eq!(after_hold, 3); // 1 immediate + repeats at 400, 500
        assert!(!repeater.is_held());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quick_tap_emits_single_step() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repeater = HoldRepeater::new();

        repeater.press(tx);
        advance_by(100).await;
        repeater.release();
        advance_by(2000).await;

        assert_eq!(drain(&mut rx), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut repeater = HoldRepeater::new();

        repeater.press(tx);
        advance_by(450).await;
        drop(repeater);

        let before = drain(&mut rx);
        advance_by(5000).await;
        assert_eq!(drain(&mut rx), 0);
        assert_eq!(before, 2); // 1 immediate + repeat at 400
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timings() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let settings = StepperSettings {
            arm_delay_ms: 100,
            repeat_interval_ms: 50,
        };
        let mut repeater = HoldRepeater::from_settings(&settings);

        repeater.press(tx);
        advance_by(300).await;
        repeater.release();

        // 1 immediate + repeats at 150, 200, 250, 300
        assert_eq!(drain(&mut rx), 5);
    }
}
