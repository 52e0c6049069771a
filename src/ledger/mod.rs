mod entry;

pub use entry::{Entry, EntryKind};

use uuid::Uuid;

/// Ordered collection of ledger entries. Insertion order is display order;
/// ids are unique by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    entries: Vec<Entry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Appends an entry. Invalid entries and duplicate ids are dropped
    /// without error; the presentation layer validates before dispatching,
    /// this is the last line of defense.
    pub fn add(&mut self, entry: Entry) -> bool {
        if entry.validate().is_err() || self.entry(entry.id).is_some() {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Replaces the entry with a matching id. No-op when the id is absent
    /// or the replacement is invalid.
    pub fn update(&mut self, entry: Entry) -> bool {
        if entry.validate().is_err() {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }

    /// Removes the entry with a matching id. No-op when the id is absent.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn total_income(&self) -> f64 {
        self.sum_kind(EntryKind::Income)
    }

    pub fn total_expense(&self) -> f64 {
        self.sum_kind(EntryKind::Expense)
    }

    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expense()
    }

    fn sum_kind(&self, kind: EntryKind) -> f64 {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.amount)
            .sum()
    }
}
