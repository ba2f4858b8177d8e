//! Timer-driven rotation.

use super::TaskGuard;
use crate::rotator::{Cadence, Rotating, Rotator, RotatorError, RotatorGroup};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

struct Shared<R> {
    rotator: R,
    cadence: Cadence,
}

/// A rotator advanced on a fixed interval by a background task.
///
/// Every move, automatic or manual, is published on a watch channel. The
/// timer task stops when this value is dropped.
pub struct AutoRotator<R: Rotating> {
    shared: Arc<Mutex<Shared<R>>>,
    updates: Arc<watch::Sender<R::Snapshot>>,
    _timer: TaskGuard,
}

impl<R: Rotating> AutoRotator<R> {
    /// Spawn the timer. Must be called inside a tokio runtime.
    ///
    /// The first automatic advance happens one interval after start.
    pub fn start(rotator: R, cadence: Cadence) -> Self {
        let interval = cadence.interval();
        let (tx, _) = watch::channel(rotator.snapshot());
        let updates = Arc::new(tx);
        let shared = Arc::new(Mutex::new(Shared { rotator, cadence }));

        let task_shared = Arc::clone(&shared);
        let task_updates = Arc::clone(&updates);
        let timer = TaskGuard::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let snapshot = {
                    let mut state = task_shared.lock();
                    if !state.cadence.should_advance(Instant::now()) {
                        continue;
                    }
                    state.rotator.advance();
                    state.rotator.snapshot()
                };
                debug!("Rotator advanced");
                task_updates.send_replace(snapshot);
            }
        });

        Self {
            shared,
            updates,
            _timer: timer,
        }
    }

    /// Apply a manual move and publish the result.
    pub fn navigate<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        let (out, snapshot) = {
            let mut state = self.shared.lock();
            let out = f(&mut state.rotator);
            state.cadence.note_manual(Instant::now());
            (out, state.rotator.snapshot())
        };
        self.updates.send_replace(snapshot);
        out
    }

    /// Apply a fallible manual move.
    ///
    /// Only a move that succeeds and lands somewhere new counts as manual
    /// navigation: errors and no-op jumps neither publish nor start a
    /// cooldown.
    pub fn try_navigate<T, E>(&self, f: impl FnOnce(&mut R) -> Result<T, E>) -> Result<T, E> {
        let (out, snapshot) = {
            let mut state = self.shared.lock();
            let before = state.rotator.snapshot();
            let out = f(&mut state.rotator)?;
            let after = state.rotator.snapshot();
            if after == before {
                return Ok(out);
            }
            state.cadence.note_manual(Instant::now());
            (out, after)
        };
        self.updates.send_replace(snapshot);
        Ok(out)
    }

    /// Read the rotator under the lock.
    pub fn read<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&self.shared.lock().rotator)
    }

    /// Current position.
    pub fn snapshot(&self) -> R::Snapshot {
        self.shared.lock().rotator.snapshot()
    }

    /// Receiver that sees every move.
    pub fn subscribe(&self) -> watch::Receiver<R::Snapshot> {
        self.updates.subscribe()
    }

    /// Pause auto-advance, e.g. while the pointer hovers the carousel.
    pub fn hold(&self) {
        self.shared.lock().cadence.hold();
    }

    /// Undo [`hold`](Self::hold).
    pub fn release(&self) {
        self.shared.lock().cadence.release();
    }

    /// Whether the next tick would be skipped.
    pub fn is_paused(&self) -> bool {
        self.shared.lock().cadence.is_paused(Instant::now())
    }
}

impl<T: Send + 'static> AutoRotator<Rotator<T>> {
    /// Manual step forward.
    pub fn next(&self) -> usize {
        self.navigate(Rotator::next)
    }

    /// Manual step back.
    pub fn previous(&self) -> usize {
        self.navigate(Rotator::previous)
    }

    /// Out-of-range indexes are reported. Neither a rejected jump nor a
    /// jump to the current slide publishes or pauses the timer.
    pub fn go_to(&self, index: usize) -> Result<usize, RotatorError> {
        self.try_navigate(|r| r.go_to(index))
    }

    pub fn current_index(&self) -> usize {
        self.read(Rotator::current_index)
    }
}

impl<T: Send + 'static> AutoRotator<RotatorGroup<T>> {
    /// Jump one member of the group; the others keep their place.
    pub fn go_to_member(&self, key: &str, index: usize) -> Result<usize, RotatorError> {
        self.try_navigate(|group| group.go_to(key, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotator::ResumePolicy;
    use std::time::Duration;

    fn every(ms: u64) -> Cadence {
        Cadence::new(Duration::from_millis(ms)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn advances_once_per_interval() {
        let hero = AutoRotator::start(Rotator::new(vec!["a", "b", "c"]).unwrap(), every(5000));

        time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(hero.current_index(), 0);

        time::sleep(Duration::from_millis(2)).await;
        assert_eq!(hero.current_index(), 1);

        time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(hero.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_moves_publish_immediately() {
        let hero = AutoRotator::start(Rotator::new(vec![1, 2, 3]).unwrap(), every(5000));
        let mut rx = hero.subscribe();

        assert_eq!(hero.previous(), 2);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_jump_changes_nothing() {
        let hero = AutoRotator::start(Rotator::new(vec![1, 2, 3]).unwrap(), every(5000));
        let rx = hero.subscribe();

        assert!(hero.go_to(7).is_err());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn hold_suspends_advancing() {
        let hero = AutoRotator::start(Rotator::new(vec![1, 2, 3]).unwrap(), every(1000));
        hero.hold();
        time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(hero.current_index(), 0);

        hero.release();
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(hero.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cooldown_skips_ticks_after_manual_move() {
        let cadence = every(1000).with_policy(ResumePolicy::Cooldown(Duration::from_millis(2500)));
        let hero = AutoRotator::start(Rotator::new(vec![0, 1, 2, 3, 4]).unwrap(), cadence);

        time::sleep(Duration::from_millis(500)).await;
        hero.go_to(3).unwrap();
        assert!(hero.is_paused());

        // Ticks at 1s, 2s fall inside the cooldown; 3s is the first one after.
        time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(hero.current_index(), 3);
        time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(hero.current_index(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn group_members_advance_together() {
        let mut group = RotatorGroup::new();
        group.insert("coimbatore", vec![1, 2, 3]).unwrap();
        group.insert("tirupur", vec![1, 2]).unwrap();
        let branches = AutoRotator::start(group, every(4000));

        branches.go_to_member("coimbatore", 2).unwrap();
        time::sleep(Duration::from_millis(4001)).await;
        assert_eq!(branches.snapshot(), vec![0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_member_jump_keeps_timer_running() {
        let mut group = RotatorGroup::new();
        group.insert("coimbatore", vec![1, 2, 3]).unwrap();
        let cadence = every(1000).with_policy(ResumePolicy::Cooldown(Duration::from_secs(5)));
        let branches = AutoRotator::start(group, cadence);
        let rx = branches.subscribe();

        assert_eq!(
            branches.go_to_member("palladam", 0),
            Err(RotatorError::UnknownMember("palladam".to_string()))
        );
        assert!(branches.go_to_member("coimbatore", 9).is_err());
        assert!(!rx.has_changed().unwrap());
        assert!(!branches.is_paused());

        time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(branches.snapshot(), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn jump_to_current_slide_is_not_a_manual_move() {
        let cadence = every(1000).with_policy(ResumePolicy::Cooldown(Duration::from_secs(5)));
        let hero = AutoRotator::start(Rotator::new(vec![1, 2, 3]).unwrap(), cadence);
        let rx = hero.subscribe();

        assert_eq!(hero.go_to(0), Ok(0));
        assert!(!rx.has_changed().unwrap());
        assert!(!hero.is_paused());

        time::sleep(Duration::from_millis(1001)).await;
        assert_eq!(hero.current_index(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_jump_does_not_pause() {
        let cadence = every(1000).with_policy(ResumePolicy::Cooldown(Duration::from_secs(5)));
        let hero = AutoRotator::start(Rotator::new(vec![1, 2, 3]).unwrap(), cadence);

        assert!(hero.go_to(9).is_err());
        assert!(!hero.is_paused());
    }
}
