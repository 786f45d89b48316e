//! Eagerly recorded step logs.

use std::fmt::Debug;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A self-describing visual instant.
///
/// Rendering one snapshot must never need its neighbours, so implementors own
/// deep copies of everything they show.
pub trait Snapshot: Clone + Debug {
    /// Human-readable explanation of this step.
    fn description(&self) -> &str;
}

/// Ordered, append-only sequence of snapshots.
///
/// Steps keep their recording order: no reordering, no deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLog<S> {
    steps: Vec<S>,
}

impl<S> Default for StepLog<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S> StepLog<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next snapshot.
    pub fn push(&mut self, step: S) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&S> {
        self.steps.get(index)
    }

    pub fn first(&self) -> Option<&S> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&S> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.steps.iter()
    }

    pub fn as_slice(&self) -> &[S] {
        &self.steps
    }

    pub fn into_vec(self) -> Vec<S> {
        self.steps
    }
}

impl<S: Snapshot> StepLog<S> {
    /// Descriptions in order, handy for logging and assertions.
    pub fn descriptions(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.description()).collect()
    }
}

impl<S> Index<usize> for StepLog<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.steps[index]
    }
}

impl<S> FromIterator<S> for StepLog<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}

impl<'a, S> IntoIterator for &'a StepLog<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Output of a step-log generator: the log plus data needed after playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated<S, A> {
    pub steps: StepLog<S>,
    pub aux: A,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note(String);

    impl Snapshot for Note {
        fn description(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn keeps_recording_order() {
        let mut log = StepLog::new();
        log.push(Note("init".into()));
        log.push(Note("same".into()));
        log.push(Note("same".into()));
        assert_eq!(log.len(), 3);
        assert_eq!(log.descriptions(), vec!["init", "same", "same"]);
        assert_eq!(log[0], Note("init".into()));
        assert_eq!(log.last(), Some(&Note("same".into())));
    }

    #[test]
    fn collects_from_iterator() {
        let log: StepLog<Note> = ["a", "b"].iter().map(|s| Note(s.to_string())).collect();
        assert_eq!(log.iter().count(), 2);
        assert!(!log.is_empty());
    }

    #[test]
    fn serializes_round_trip() {
        let log: StepLog<Note> = vec![Note("x".into())].into_iter().collect();
        let json = serde_json::to_string(&log).unwrap();
        let back: StepLog<Note> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
