//! Classification diff: position gain/loss and the top climber.
//!
//! Gain/loss is always recomputed from `start_pos - predicted_rank`. When the
//! service also reports a value, the two are compared and a disagreement is
//! logged, but the local value is the one kept. Computing it locally is what
//! makes the sum over a full field come out at exactly zero.

use std::cmp::Ordering;

use tracing::warn;

use crate::types::ClassificationEntry;

/// Direction a driver moved between grid and predicted finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Gained(u32),
    Lost(u32),
    Held,
}

/// A classification entry with its locally computed gain/loss.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedEntry {
    pub entry: ClassificationEntry,
    /// Positive when the driver finished ahead of where they started
    pub gain_loss: i64,
}

impl AnnotatedEntry {
    fn new(entry: ClassificationEntry) -> Self {
        let gain_loss = i64::from(entry.start_pos) - i64::from(entry.predicted_rank);
        if let Some(reported) = entry.gain_loss {
            if i64::from(reported) != gain_loss {
                warn!(
                    "Discarding reported gain/loss {} for {} (computed {})",
                    reported, entry.code, gain_loss
                );
            }
        }
        Self { entry, gain_loss }
    }

    pub fn code(&self) -> &str {
        &self.entry.code
    }

    pub fn movement(&self) -> Movement {
        match self.gain_loss.cmp(&0) {
            Ordering::Greater => Movement::Gained(self.gain_loss.unsigned_abs() as u32),
            Ordering::Less => Movement::Lost(self.gain_loss.unsigned_abs() as u32),
            Ordering::Equal => Movement::Held,
        }
    }
}

/// Classification in service order, plus the highlighted climber.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotatedClassification {
    pub entries: Vec<AnnotatedEntry>,
    climber: Option<usize>,
}

impl AnnotatedClassification {
    /// The driver with the largest positive gain, if anyone gained at all.
    pub fn climber(&self) -> Option<&AnnotatedEntry> {
        self.climber.and_then(|index| self.entries.get(index))
    }

    /// Look up an entry by driver code.
    pub fn get(&self, code: &str) -> Option<&AnnotatedEntry> {
        self.entries.iter().find(|entry| entry.code() == code)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Sum of gain/loss over every entry.
    pub fn net_gain(&self) -> i64 {
        self.entries.iter().map(|entry| entry.gain_loss).sum()
    }
}

/// Annotate a classification without reordering it.
///
/// Ties on gain/loss go to the better predicted rank. No climber is selected when
/// nobody gained a position.
pub fn annotate(classification: &[ClassificationEntry]) -> AnnotatedClassification {
    let entries: Vec<AnnotatedEntry> =
        classification.iter().cloned().map(AnnotatedEntry::new).collect();

    let climber = entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.gain_loss > 0)
        .max_by(|(_, a), (_, b)| {
            a.gain_loss
                .cmp(&b.gain_loss)
                .then_with(|| b.entry.predicted_rank.cmp(&a.entry.predicted_rank))
        })
        .map(|(index, _)| index);

    AnnotatedClassification { entries, climber }
}
