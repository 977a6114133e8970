//! Credit card service applications held in a single in-memory queue.
//!
//! Records are submitted at the tail and processed from the head, but can also be
//! searched, updated, and deleted anywhere in the queue by matching one of their text
//! fields.

pub mod domain;
pub mod render;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDetails, ApplicationId, ApplicationRecord, FieldPolicy, IntakeError, KeyField,
    ParseOptionError,
};
pub use render::{render_record, render_records, render_single, OutputFormat, RenderError};
pub use service::{ApplicationDesk, ApplicationServiceError};
pub use store::{ApplicationQueue, ApplicationStore, StoreError};
