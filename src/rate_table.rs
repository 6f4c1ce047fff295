use std::collections::HashMap;

use crate::error::RateTableError;
use crate::error::RateTableResult;
use crate::Fingerprint;
use crate::Rate;
use crate::MAX_SIZE;
use crate::N_TABLES;

/// Bounded, generational cache mapping an opaque environment fingerprint to
/// a previously computed rate. Eviction is by whole generation: when the
/// current bucket fills up, the table rotates to the next one and clears it,
/// rather than tracking per-entry recency.
pub struct RateTable {
    tables: Vec<HashMap<Fingerprint, Rate>>,
    current_table: usize,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RateTable {
    pub fn new() -> Self {
        Self {
            tables: (0..N_TABLES).map(|_| HashMap::new()).collect(),
            current_table: 0,
        }
    }

    /// The bucket index holding `key`, scanning in index order, or `None`.
    pub fn stored(&self, key: Fingerprint) -> Option<usize> {
        self.tables.iter().position(|table| table.contains_key(&key))
    }

    /// Write `(key, value)` into the current generation. If that generation
    /// reaches `MAX_SIZE` as a result, rotate to and clear the next one.
    pub fn store(&mut self, key: Fingerprint, value: Rate) {
        self.tables[self.current_table].insert(key, value);
        if self.tables[self.current_table].len() == MAX_SIZE {
            log::debug!("rate table generation {} full, rotating", self.current_table);
            self.current_table = (self.current_table + 1) % N_TABLES;
            self.tables[self.current_table].clear();
        }
    }

    pub fn retrieve(&self, key: Fingerprint) -> RateTableResult<Rate> {
        let index = self.stored(key).ok_or(RateTableError::KeyNotFound(key))?;
        Ok(self.tables[index][&key])
    }
}
