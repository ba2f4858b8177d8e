//! Guard predicates deciding whether a transition may start.

use super::state::State;

/// Pure predicate over a state.
///
/// Guards are checked before a widget commits to a transition, for
/// instance "a submission may only begin from `Idle` or `Error`".
///
/// # Example
///
/// ```rust
/// use choreo::core::Guard;
/// use choreo::form::FormStatus;
///
/// let may_submit = Guard::one_of(vec![FormStatus::Idle, FormStatus::Error]);
///
/// assert!(may_submit.check(&FormStatus::Idle));
/// assert!(may_submit.check(&FormStatus::Error));
/// assert!(!may_submit.check(&FormStatus::Submitting));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
}

impl<S: State + 'static> Guard<S> {
    /// Create a guard from a pure predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Guard that passes for any of the listed states.
    pub fn one_of(allowed: Vec<S>) -> Self {
        Self::new(move |state| allowed.contains(state))
    }

    /// Evaluate the guard.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> std::fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
