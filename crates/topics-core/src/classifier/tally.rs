//! Per-topic counts for reporting.

use serde::{Deserialize, Serialize};

/// Number of comments assigned to one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub label: String,
    pub count: u64,
}

/// Label counts over a batch of classified comments.
///
/// Labels keep the order they were declared in, so reports list topics in
/// rule priority order with zero counts included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicTally {
    total: u64,
    topics: Vec<TopicCount>,
}

impl TopicTally {
    /// Creates an empty tally over the given labels.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tally = Self::default();
        for label in labels {
            let label = label.into();
            if tally.position(&label).is_none() {
                tally.topics.push(TopicCount { label, count: 0 });
            }
        }
        tally
    }

    /// Counts one comment under `label`.
    ///
    /// Unknown labels get their own entry at the end.
    pub fn record(&mut self, label: &str) {
        self.total += 1;
        match self.position(label) {
            Some(index) => self.topics[index].count += 1,
            None => self.topics.push(TopicCount {
                label: label.to_string(),
                count: 1,
            }),
        }
    }

    /// Total number of recorded comments.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for a label (zero if never seen).
    pub fn count(&self, label: &str) -> u64 {
        self.position(label)
            .map(|index| self.topics[index].count)
            .unwrap_or(0)
    }

    /// All counts in declaration order.
    pub fn topics(&self) -> &[TopicCount] {
        &self.topics
    }

    /// Share of comments under `label`, as a percentage.
    pub fn percentage(&self, label: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 * 100.0 / self.total as f64
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.topics.iter().position(|t| t.label == label)
    }
}
