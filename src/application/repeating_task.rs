// Repeating task - fixed-delay poll loop with an injectable timer
use async_trait::async_trait;
use std::time::Duration;

/// What a poll step wants to happen after it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Sleep the fixed delay and poll again.
    Reschedule,
    /// Stop for good.
    Halt,
}

#[async_trait]
pub trait PollStep: Send {
    /// Name used in logs.
    fn name(&self) -> &str;

    async fn poll_once(&mut self) -> PollOutcome;
}

#[async_trait]
pub trait Timer: Send + Sync {
    async fn sleep(&self, delay: Duration);
}

/// Sleeps on the tokio clock, so paused test time drives it too.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn sleep(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

/// Runs a step, then waits `delay`, forever or until the step halts.
/// The next request is only issued after the previous one completed and
/// the delay elapsed, so a single task never overlaps itself.
pub struct RepeatingTask<S, T> {
    step: S,
    timer: T,
    delay: Duration,
}

impl<S: PollStep, T: Timer> RepeatingTask<S, T> {
    pub fn new(step: S, timer: T, delay: Duration) -> Self {
        Self { step, timer, delay }
    }

    /// Returns the number of completed poll cycles once the step halts.
    pub async fn run(mut self) -> u64 {
        let mut cycles: u64 = 0;
        loop {
            let outcome = self.step.poll_once().await;
            cycles += 1;
            match outcome {
                PollOutcome::Reschedule => {
                    tracing::debug!(task = self.step.name(), cycles, "poll cycle complete");
                    self.timer.sleep(self.delay).await;
                }
                PollOutcome::Halt => {
                    tracing::error!(task = self.step.name(), cycles, "poller halted");
                    return cycles;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::Instant;

    #[derive(Clone, Default)]
    struct RecordingTimer {
        sleeps: Arc<Mutex<Vec<Duration>>>,
    }

    #[async_trait]
    impl Timer for RecordingTimer {
        async fn sleep(&self, delay: Duration) {
            self.sleeps.lock().unwrap().push(delay);
        }
    }

    struct HaltAfter {
        remaining: u32,
        polled_at: Arc<Mutex<Vec<Instant>>>,
    }

    #[async_trait]
    impl PollStep for HaltAfter {
        fn name(&self) -> &str {
            "halt-after"
        }

        async fn poll_once(&mut self) -> PollOutcome {
            self.polled_at.lock().unwrap().push(Instant::now());
            if self.remaining == 0 {
                return PollOutcome::Halt;
            }
            self.remaining -= 1;
            PollOutcome::Reschedule
        }
    }

    #[tokio::test]
    async fn test_sleeps_fixed_delay_between_cycles_and_stops_on_halt() {
        let timer = RecordingTimer::default();
        let step = HaltAfter {
            remaining: 3,
            polled_at: Arc::default(),
        };
        let task = RepeatingTask::new(step, timer.clone(), Duration::from_millis(1000));

        let cycles = task.run().await;

        assert_eq!(cycles, 4);
        assert_eq!(*timer.sleeps.lock().unwrap(), vec![Duration::from_millis(1000); 3]);
    }

    #[tokio::test]
    async fn test_halt_on_first_poll_never_sleeps() {
        let timer = RecordingTimer::default();
        let step = HaltAfter {
            remaining: 0,
            polled_at: Arc::default(),
        };

        let cycles = RepeatingTask::new(step, timer.clone(), Duration::from_millis(500))
            .run()
            .await;

        assert_eq!(cycles, 1);
        assert!(timer.sleeps.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_timer_spaces_polls_on_virtual_clock() {
        let polled_at = Arc::new(Mutex::new(Vec::new()));
        let step = HaltAfter {
            remaining: 2,
            polled_at: polled_at.clone(),
        };
        let start = Instant::now();

        RepeatingTask::new(step, TokioTimer, Duration::from_millis(500))
            .run()
            .await;

        let polled_at = polled_at.lock().unwrap().clone();
        assert_eq!(polled_at.len(), 3);
        assert!(polled_at[0].duration_since(start) < Duration::from_millis(1));
        for pair in polled_at.windows(2) {
            let gap = pair[1].duration_since(pair[0]);
            assert!(gap >= Duration::from_millis(500), "{gap:?}");
            assert!(gap < Duration::from_millis(502), "{gap:?}");
        }
    }
}
