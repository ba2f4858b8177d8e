//! Several named rotators that advance together on one timer.

use super::{Rotating, Rotator, RotatorError};

/// Named rotators stepped in lock-step, e.g. one photo carousel per branch.
///
/// ```rust
/// use choreo::rotator::RotatorGroup;
///
/// let mut branches = RotatorGroup::new();
/// branches.insert("coimbatore", vec!["cv1", "cv2", "cv3"]).unwrap();
/// branches.insert("tirupur", vec!["tpr2", "tpr3"]).unwrap();
///
/// branches.advance_all();
/// branches.advance_all();
/// assert_eq!(branches.indexes(), vec![2, 0]);
/// ```
#[derive(Debug, Clone)]
pub struct RotatorGroup<T> {
    members: Vec<(String, Rotator<T>)>,
}

impl<T> Default for RotatorGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RotatorGroup<T> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member, or replace the one already under `key`.
    pub fn insert(&mut self, key: impl Into<String>, items: Vec<T>) -> Result<(), RotatorError> {
        let key = key.into();
        let rotator = Rotator::new(items)?;
        match self.members.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = rotator,
            None => self.members.push((key, rotator)),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Rotator<T>> {
        self.members
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rotator<T>)> {
        self.members.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn advance_all(&mut self) {
        for (_, rotator) in &mut self.members {
            rotator.next();
        }
    }

    /// Jump one member to `index`; the others are untouched.
    pub fn go_to(&mut self, key: &str, index: usize) -> Result<usize, RotatorError> {
        let (_, rotator) = self
            .members
            .iter_mut()
            .find(|(k, _)| k == key)
            .ok_or_else(|| RotatorError::UnknownMember(key.to_string()))?;
        rotator.go_to(index)
    }

    /// Current index of every member, in insertion order.
    pub fn indexes(&self) -> Vec<usize> {
        self.members.iter().map(|(_, r)| r.current_index()).collect()
    }
}

impl<T: Send + 'static> Rotating for RotatorGroup<T> {
    type Snapshot = Vec<usize>;

    fn advance(&mut self) {
        self.advance_all();
    }

    fn snapshot(&self) -> Vec<usize> {
        self.indexes()
    }
}
