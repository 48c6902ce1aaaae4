//! Core types for talking to Salesforce.
//!
//! This crate holds the record and result shapes returned by the REST and
//! Tooling APIs, the [`SessionClient`] contract that tool handlers call through,
//! and a few SOQL builders for the fixed queries the tools issue.

mod errors;
mod metadata;
mod record;
mod session;
pub mod soql;

pub use errors::{ApiErrorDetail, SalesforceError, SalesforceResult};
pub use metadata::{CustomField, CustomFieldMetadata, ExecuteAnonymousResult, FieldType};
pub use record::{QueryResult, Record, RecordUpdate, SaveResult};
pub use session::SessionClient;
