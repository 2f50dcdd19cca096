use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Outcome of feeding one chunk into the reassembly engine, consumed by
/// progress reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// New part stored; transfer still incomplete.
    Accepted { received: usize, expected: u32 },
    /// Part index already held. The stored data stays untouched.
    DuplicateIgnored {
        part_index: u32,
        received: usize,
        expected: u32,
    },
    /// Declared total disagrees with the session's recorded total. The
    /// chunk is dropped; the recorded total stays authoritative.
    TotalMismatch { declared: u32, expected: u32 },
    /// Part index outside `1..=expected`. Unreachable for chunks that came
    /// through payload parsing, which bounds the index by the total.
    IndexOutOfRange { part_index: u32, expected: u32 },
    /// Last missing part arrived; `assembled` holds the concatenated text.
    Completed { assembled: String },
}

/// What `ReassemblySession::store` did with a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOutcome {
    Stored,
    Duplicate,
    OutOfRange,
}

/// Parts collected so far for one transfer id.
///
/// The total declared by the first chunk is fixed for the session's
/// lifetime. Parts are keyed by index, so assembly order follows the
/// indexes no matter how frames arrived.
#[derive(Debug)]
pub struct ReassemblySession {
    expected_total: u32,
    received: BTreeMap<u32, String>,
}

impl ReassemblySession {
    pub fn new(expected_total: u32) -> Self {
        Self {
            expected_total,
            received: BTreeMap::new(),
        }
    }

    pub fn expected_total(&self) -> u32 {
        self.expected_total
    }

    pub fn received_count(&self) -> usize {
        self.received.len()
    }

    /// Every index from 1 to the expected total is present. Indexes are
    /// range-checked on store, so holding `expected_total` distinct keys
    /// means none are missing.
    pub fn is_complete(&self) -> bool {
        self.received.len() == self.expected_total as usize
    }

    /// First write wins: a rescanned frame never overwrites stored data.
    pub fn store(&mut self, part_index: u32, data: String) -> StoreOutcome {
        if part_index < 1 || part_index > self.expected_total {
            return StoreOutcome::OutOfRange;
        }

        match self.received.entry(part_index) {
            Entry::Occupied(_) => StoreOutcome::Duplicate,
            Entry::Vacant(slot) => {
                slot.insert(data);
                StoreOutcome::Stored
            }
        }
    }

    /// Concatenate stored parts in strict index order.
    pub fn assemble(&self) -> String {
        self.received.values().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_in_index_order_not_arrival_order() {
        let mut session = ReassemblySession::new(3);

        assert_eq!(session.store(3, "GH".to_owned()), StoreOutcome::Stored);
        assert_eq!(session.store(1, "AB".to_owned()), StoreOutcome::Stored);
        assert_eq!(session.store(2, "CD".to_owned()), StoreOutcome::Stored);

        assert_eq!(session.assemble(), "ABCDGH");
    }

    #[test]
    fn first_write_wins_on_duplicates() {
        let mut session = ReassemblySession::new(2);

        assert_eq!(session.store(1, "original".to_owned()), StoreOutcome::Stored);
        assert_eq!(session.store(1, "rescan".to_owned()), StoreOutcome::Duplicate);

        assert_eq!(session.received_count(), 1);
        assert_eq!(session.assemble(), "original");
    }

    #[test]
    fn rejects_indexes_outside_declared_range() {
        let mut session = ReassemblySession::new(2);

        assert_eq!(session.store(0, "x".to_owned()), StoreOutcome::OutOfRange);
        assert_eq!(session.store(3, "x".to_owned()), StoreOutcome::OutOfRange);
        assert_eq!(session.received_count(), 0);
    }

    #[test]
    fn complete_only_when_every_index_is_held() {
        let mut session = ReassemblySession::new(2);
        assert!(!session.is_complete());

        session.store(2, "CD".to_owned());
        assert!(!session.is_complete());

        session.store(1, "AB".to_owned());
        assert!(session.is_complete());
    }
}
