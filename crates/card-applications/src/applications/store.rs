use std::collections::VecDeque;

use tracing::debug;

use super::domain::{ApplicationDetails, ApplicationId, ApplicationRecord, KeyField};

/// Ordered storage for pending applications: FIFO at the ends, keyed scans in between.
///
/// Keyed operations always act on the first record, head to tail, whose field exactly
/// equals the given value.
pub trait ApplicationStore {
    /// Append a new application at the tail and return the stored record.
    fn submit(&mut self, details: ApplicationDetails) -> Result<ApplicationRecord, StoreError>;

    /// Remove the head of the queue, handing the record to the caller.
    fn process_next(&mut self) -> Result<ApplicationRecord, StoreError>;

    /// Fresh head-to-tail traversal over every pending record.
    fn records(&self) -> Box<dyn Iterator<Item = &ApplicationRecord> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn find(&self, field: KeyField, value: &str) -> Result<&ApplicationRecord, StoreError>;

    /// Replace the details of the first match, keeping its id and position.
    fn update(
        &mut self,
        field: KeyField,
        value: &str,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, StoreError>;

    /// Remove the first match, keeping every other record in order.
    fn delete(&mut self, field: KeyField, value: &str) -> Result<ApplicationRecord, StoreError>;
}

/// Error enumeration for store failures. None of them leave the store modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("unable to allocate space for another application")]
    OutOfMemory,
    #[error("no applications in the queue")]
    EmptyQueue,
    #[error("no application with {field} = '{value}'")]
    NotFound { field: KeyField, value: String },
}

impl StoreError {
    fn not_found(field: KeyField, value: &str) -> Self {
        Self::NotFound {
            field,
            value: value.to_string(),
        }
    }
}

/// In-memory queue backed by a ring buffer.
#[derive(Debug, Clone)]
pub struct ApplicationQueue {
    records: VecDeque<ApplicationRecord>,
    next_sequence: u64,
}

impl Default for ApplicationQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationQueue {
    pub fn new() -> Self {
        Self {
            records: VecDeque::new(),
            next_sequence: 1,
        }
    }

    fn position(&self, field: KeyField, value: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.details.field(field) == value)
    }
}

impl ApplicationStore for ApplicationQueue {
    fn submit(&mut self, details: ApplicationDetails) -> Result<ApplicationRecord, StoreError> {
        self.records
            .try_reserve(1)
            .map_err(|_| StoreError::OutOfMemory)?;

        let record = ApplicationRecord {
            id: ApplicationId::from_sequence(self.next_sequence),
            details,
        };
        self.next_sequence += 1;
        self.records.push_back(record.clone());
        Ok(record)
    }

    fn process_next(&mut self) -> Result<ApplicationRecord, StoreError> {
        self.records.pop_front().ok_or(StoreError::EmptyQueue)
    }

    fn records(&self) -> Box<dyn Iterator<Item = &ApplicationRecord> + '_> {
        Box::new(self.records.iter())
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn find(&self, field: KeyField, value: &str) -> Result<&ApplicationRecord, StoreError> {
        let index = self
            .position(field, value)
            .ok_or_else(|| StoreError::not_found(field, value))?;
        debug!(%field, index, "matched application");
        Ok(&self.records[index])
    }

    fn update(
        &mut self,
        field: KeyField,
        value: &str,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, StoreError> {
        let index = self
            .position(field, value)
            .ok_or_else(|| StoreError::not_found(field, value))?;
        let record = &mut self.records[index];
        record.details = details;
        Ok(record.clone())
    }

    fn delete(&mut self, field: KeyField, value: &str) -> Result<ApplicationRecord, StoreError> {
        self.position(field, value)
            .and_then(|index| self.records.remove(index))
            .ok_or_else(|| StoreError::not_found(field, value))
    }
}
