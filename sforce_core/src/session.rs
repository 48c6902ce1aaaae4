use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SalesforceResult;
use crate::metadata::ExecuteAnonymousResult;
use crate::record::{QueryResult, Record, RecordUpdate, SaveResult};

/// An authenticated connection to a Salesforce org.
///
/// One instance is created at startup and shared by every tool call, so
/// implementations must be safe to use from concurrent tasks.
#[async_trait]
pub trait SessionClient: Send + Sync {
    /// Fetch one record by ID.
    async fn retrieve(&self, sobject: &str, id: &str) -> SalesforceResult<Record>;

    /// Update a batch of records. Returns one result per input record, in order.
    async fn update(&self, sobject: &str, records: &[RecordUpdate])
    -> SalesforceResult<Vec<SaveResult>>;

    /// Run a SOQL query and return its first page.
    async fn query(&self, soql: &str) -> SalesforceResult<QueryResult>;

    /// Compile and run an anonymous Apex body through the Tooling API.
    async fn tooling_execute_anonymous(&self, body: &str)
    -> SalesforceResult<ExecuteAnonymousResult>;

    /// Create a Tooling API object such as `CustomField`.
    ///
    /// A create the org rejects on validation is `Ok` with `success: false` and
    /// the reported errors.
    async fn tooling_create(&self, sobject: &str, metadata: &Value)
    -> SalesforceResult<SaveResult>;

    /// Find Tooling API records matching every `(field, value)` equality in `filter`.
    ///
    /// Fails with [`crate::SalesforceError::IncompleteQuery`] when the matches span more
    /// than one page.
    async fn tooling_find(
        &self,
        sobject: &str,
        filter: &[(&str, &str)],
        fields: &[&str],
    ) -> SalesforceResult<Vec<Record>>;
}
