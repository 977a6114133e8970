use std::io;
use std::sync::{Arc, Mutex};

use crate::applications::domain::{ApplicationDetails, ApplicationRecord, KeyField};
use crate::applications::store::{ApplicationQueue, ApplicationStore, StoreError};
use crate::applications::{ApplicationDesk, FieldPolicy};

pub(super) fn applicant(name: &str) -> ApplicationDetails {
    ApplicationDetails {
        name: name.to_string(),
        gender: "Female".to_string(),
        address: "14 MG Road, Pune".to_string(),
        date: "12/03/2025".to_string(),
        time: "10:30".to_string(),
        ifsc: "HDFC0001234".to_string(),
        account_number: format!("5010{:0>8}", name.len()),
        balance: 25_400.5,
        service_type: "Credit Card".to_string(),
        phone: "9876543210".to_string(),
        transaction_status: "Pending".to_string(),
        pan: "ABCDE1234F".to_string(),
        aadhar: "1234 5678 9012".to_string(),
        payment_status: "Unpaid".to_string(),
    }
}

pub(super) fn queue_with(names: &[&str]) -> ApplicationQueue {
    let mut queue = ApplicationQueue::new();
    for name in names {
        queue.submit(applicant(name)).expect("submit succeeds");
    }
    queue
}

pub(super) fn names<S: ApplicationStore>(store: &S) -> Vec<String> {
    store
        .records()
        .map(|record| record.details.name.clone())
        .collect()
}

pub(super) fn build_desk(policy: FieldPolicy) -> ApplicationDesk<ApplicationQueue> {
    ApplicationDesk::with_policy(ApplicationQueue::new(), policy, KeyField::Name)
}

/// Store whose allocator is always exhausted; everything else delegates to a real queue.
#[derive(Default)]
pub(super) struct ExhaustedStore {
    pub(super) inner: ApplicationQueue,
}

impl ApplicationStore for ExhaustedStore {
    fn submit(&mut self, _details: ApplicationDetails) -> Result<ApplicationRecord, StoreError> {
        Err(StoreError::OutOfMemory)
    }

    fn process_next(&mut self) -> Result<ApplicationRecord, StoreError> {
        self.inner.process_next()
    }

    fn records(&self) -> Box<dyn Iterator<Item = &ApplicationRecord> + '_> {
        self.inner.records()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn find(&self, field: KeyField, value: &str) -> Result<&ApplicationRecord, StoreError> {
        self.inner.find(field, value)
    }

    fn update(
        &mut self,
        field: KeyField,
        value: &str,
        details: ApplicationDetails,
    ) -> Result<ApplicationRecord, StoreError> {
        self.inner.update(field, value, details)
    }

    fn delete(&mut self, field: KeyField, value: &str) -> Result<ApplicationRecord, StoreError> {
        self.inner.delete(field, value)
    }
}

/// Shared buffer the fmt subscriber writes formatted events into.
#[derive(Default, Clone)]
pub(super) struct CapturedLogs {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    pub(super) fn contents(&self) -> String {
        let guard = self.buffer.lock().expect("log buffer mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .expect("log buffer mutex poisoned")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a subscriber that keeps events at `warn` and above, the console default.
pub(super) fn warnings_during<F: FnOnce()>(f: F) -> String {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, f);
    logs.contents()
}
