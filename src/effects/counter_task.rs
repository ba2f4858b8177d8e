//! Frame-timer driver for [`AnimatedCounter`].

use super::TaskGuard;
use crate::counter::{AnimatedCounter, CounterPhase, CounterSpec};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

/// A counter ticking on its own timer task.
///
/// Dropping it mid-animation stops the timer; no further values are
/// published.
pub struct CounterAnimation {
    counter: Arc<Mutex<AnimatedCounter>>,
    values: Arc<watch::Sender<u64>>,
    _timer: TaskGuard,
}

impl CounterAnimation {
    /// Start counting now.
    pub fn start(spec: CounterSpec) -> Self {
        Self::spawn(spec, None)
    }

    /// Start counting the first time `revealed` reads `true`.
    ///
    /// If the reveal goes away before that, the counter stays at zero.
    pub fn when_revealed(spec: CounterSpec, revealed: watch::Receiver<bool>) -> Self {
        Self::spawn(spec, Some(revealed))
    }

    fn spawn(spec: CounterSpec, gate: Option<watch::Receiver<bool>>) -> Self {
        let frame = spec.frame();
        let counter = Arc::new(Mutex::new(AnimatedCounter::new(spec)));
        let (tx, _) = watch::channel(0);
        let values = Arc::new(tx);

        let task_counter = Arc::clone(&counter);
        let task_values = Arc::clone(&values);
        let timer = TaskGuard::spawn(async move {
            if let Some(mut revealed) = gate {
                if revealed.wait_for(|visible| *visible).await.is_err() {
                    debug!("Reveal dropped before counter started");
                    return;
                }
            }
            task_counter.lock().start();

            let mut ticker = time::interval_at(Instant::now() + frame, frame);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let (value, finished) = {
                    let mut counter = task_counter.lock();
                    let value = counter.tick();
                    (value, counter.is_finished())
                };
                task_values.send_replace(value);
                if finished {
                    debug!(value, "Counter finished");
                    break;
                }
            }
        });

        Self {
            counter,
            values,
            _timer: timer,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.values.subscribe()
    }

    pub fn value(&self) -> u64 {
        self.counter.lock().value()
    }

    pub fn phase(&self) -> CounterPhase {
        self.counter.lock().phase()
    }

    pub fn is_finished(&self) -> bool {
        self.counter.lock().is_finished()
    }

    pub fn display(&self) -> String {
        self.counter.lock().display()
    }
}
