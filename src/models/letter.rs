//! Letter model representing one row of the correspondence table.

use serde::{Deserialize, Serialize};

/// A single letter of the correspondence.
///
/// Source rows are never mutated; every filter produces new collections.
/// Columns beyond these six are ignored when the table is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Letter {
    /// Sender.
    pub subject_name: String,
    /// Receiver.
    pub object_name: String,
    /// Communicative-act classification (request, report, ...).
    pub illocution: String,
    /// Date as written in the table. Compared lexicographically.
    pub letter_date: String,
    /// Place the letter was sent from.
    pub dispatch: String,
    /// Place the letter was received at.
    pub receipt: String,
}

impl Letter {
    /// Whether the letter was sent and received at the same place.
    pub fn is_same_place(&self) -> bool {
        self.dispatch == self.receipt
    }

    /// Whether either correspondent is one of `names`.
    pub fn involves_any(&self, names: &[String]) -> bool {
        names
            .iter()
            .any(|n| *n == self.subject_name || *n == self.object_name)
    }
}
