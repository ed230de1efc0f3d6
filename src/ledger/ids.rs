//! Sequential operation id generator
//!
//! The generator holds the next id to issue. Its state is read from storage
//! when the ledger starts and written back on every save, so ids keep
//! increasing across restarts up to the last explicit save.

use crate::models::OperationId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Resume from a persisted state (the next id to issue)
    pub fn from_state(next: u64) -> Self {
        Self { next }
    }

    /// The id the next call to [`IdGenerator::next_id`] returns
    pub fn peek(&self) -> OperationId {
        OperationId::new(self.next)
    }

    /// Issue an id and advance
    pub fn next_id(&mut self) -> OperationId {
        let id = OperationId::new(self.next);
        self.next += 1;
        id
    }

    /// Value to persist
    pub fn state(&self) -> u64 {
        self.next
    }

    /// Take back the most recently issued id; any other id is left alone
    pub fn reclaim(&mut self, issued: OperationId) {
        if issued.value() + 1 == self.next {
            self.next = issued.value();
        }
    }

    /// Never hand out an id at or below one already in use
    pub fn ensure_after(&mut self, issued: OperationId) {
        if issued.value() >= self.next {
            self.next = issued.value() + 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_state(0)
    }
}
