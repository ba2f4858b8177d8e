//! Bounded log of status changes, kept for developer diagnostics.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Default number of changes a [`StatusLog`] keeps.
pub const DEFAULT_LOG_CAPACITY: usize = 32;

/// One recorded status change.
///
/// # Example
///
/// ```rust
/// use choreo::core::StatusChange;
/// use choreo::form::FormStatus;
/// use chrono::Utc;
///
/// let change = StatusChange {
///     from: FormStatus::Idle,
///     to: FormStatus::Submitting,
///     at: Utc::now(),
///     attempt: 1,
/// };
/// assert_eq!(change.attempt, 1);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusChange<S: State> {
    pub from: S,
    pub to: S,
    pub at: DateTime<Utc>,
    /// Submission attempt this change belongs to (1-based, 0 when not tied
    /// to an attempt).
    pub attempt: usize,
}

/// Ordered, bounded history of status changes.
///
/// Widgets live as long as the page that hosts them, so the log evicts its
/// oldest entries instead of growing without bound.
///
/// # Example
///
/// ```rust
/// use choreo::core::{StatusChange, StatusLog};
/// use choreo::form::FormStatus;
/// use chrono::Utc;
///
/// let mut log = StatusLog::new();
/// log.record(StatusChange {
///     from: FormStatus::Idle,
///     to: FormStatus::Submitting,
///     at: Utc::now(),
///     attempt: 1,
/// });
/// log.record(StatusChange {
///     from: FormStatus::Submitting,
///     to: FormStatus::Success,
///     at: Utc::now(),
///     attempt: 1,
/// });
///
/// let path = log.path();
/// assert_eq!(path, vec![&FormStatus::Idle, &FormStatus::Submitting, &FormStatus::Success]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StatusLog<S: State> {
    changes: VecDeque<StatusChange<S>>,
    capacity: usize,
}

impl<S: State> Default for StatusLog<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StatusLog<S> {
    /// Empty log with [`DEFAULT_LOG_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    /// Empty log keeping at most `capacity` changes (minimum 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            changes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a change, evicting the oldest one when full.
    pub fn record(&mut self, change: StatusChange<S>) {
        if self.changes.len() == self.capacity {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    pub fn changes(&self) -> impl Iterator<Item = &StatusChange<S>> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn last(&self) -> Option<&StatusChange<S>> {
        self.changes.back()
    }

    /// States traversed: the `from` of the oldest kept change, then every `to`.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.changes.len() + 1);
        if let Some(first) = self.changes.front() {
            path.push(&first.from);
        }
        path.extend(self.changes.iter().map(|c| &c.to));
        path
    }

    /// Time between the oldest and newest kept change.
    ///
    /// `None` when the log is empty or the clock went backwards.
    pub fn span(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.at.signed_duration_since(first.at).to_std().ok()
    }
}
