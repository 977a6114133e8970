use tracing::{debug, info, warn};

use super::domain::{ApplicationDetails, ApplicationRecord, FieldPolicy, IntakeError, KeyField};
use super::store::{ApplicationStore, StoreError};
use crate::config::QueueConfig;

/// Service composing the store with the intake policy and default key field.
pub struct ApplicationDesk<S> {
    store: S,
    policy: FieldPolicy,
    default_key: KeyField,
}

impl<S> ApplicationDesk<S>
where
    S: ApplicationStore,
{
    pub fn new(store: S, config: &QueueConfig) -> Self {
        Self::with_policy(store, config.field_policy, config.default_key)
    }

    pub fn with_policy(store: S, policy: FieldPolicy, default_key: KeyField) -> Self {
        Self {
            store,
            policy,
            default_key,
        }
    }

    pub fn policy(&self) -> FieldPolicy {
        self.policy
    }

    pub fn default_key(&self) -> KeyField {
        self.default_key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Bound the submitted details and enqueue them at the tail.
    pub fn submit(
        &mut self,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let details = self.intake(details)?;
        match self.store.submit(details) {
            Ok(record) => {
                info!(application_id = %record.id, pending = self.store.len(), "application submitted");
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, "application submission failed");
                Err(err.into())
            }
        }
    }

    /// Dequeue the oldest pending application.
    pub fn process_next(&mut self) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self.store.process_next().map_err(|err| {
            debug!(error = %err, "nothing to process");
            err
        })?;
        info!(application_id = %record.id, pending = self.store.len(), "application processed");
        Ok(record)
    }

    pub fn pending(&self) -> impl Iterator<Item = &ApplicationRecord> + '_ {
        self.store.records()
    }

    pub fn find(
        &self,
        field: KeyField,
        value: &str,
    ) -> Result<&ApplicationRecord, ApplicationServiceError> {
        match self.store.find(field, value) {
            Ok(record) => {
                debug!(application_id = %record.id, %field, "application found");
                Ok(record)
            }
            Err(err) => {
                debug!(%field, "no matching application");
                Err(err.into())
            }
        }
    }

    /// Replace the details of the first match. Intake runs first, so a rejected
    /// value never reaches the store.
    pub fn update(
        &mut self,
        field: KeyField,
        value: &str,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let details = self.intake(details)?;
        match self.store.update(field, value, details) {
            Ok(record) => {
                info!(application_id = %record.id, %field, "application updated");
                Ok(record)
            }
            Err(err) => {
                debug!(%field, "no application to update");
                Err(err.into())
            }
        }
    }

    pub fn delete(
        &mut self,
        field: KeyField,
        value: &str,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        match self.store.delete(field, value) {
            Ok(record) => {
                info!(application_id = %record.id, %field, pending = self.store.len(), "application deleted");
                Ok(record)
            }
            Err(err) => {
                debug!(%field, "no application to delete");
                Err(err.into())
            }
        }
    }

    pub fn find_by_default_key(
        &self,
        value: &str,
    ) -> Result<&ApplicationRecord, ApplicationServiceError> {
        self.find(self.default_key, value)
    }

    pub fn update_by_default_key(
        &mut self,
        value: &str,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.update(self.default_key, value, details)
    }

    pub fn delete_by_default_key(
        &mut self,
        value: &str,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.delete(self.default_key, value)
    }

    fn intake(&self, details: ApplicationDetails) -> Result<ApplicationDetails, IntakeError> {
        details.bounded(self.policy).map_err(|err| {
            warn!(policy = self.policy.label(), error = %err, "application details refused");
            err
        })
    }
}

/// Error raised by the application desk.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
