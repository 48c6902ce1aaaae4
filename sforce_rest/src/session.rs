use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use url::Url;

use sforce_core::{
    ExecuteAnonymousResult, QueryResult, Record, RecordUpdate, SalesforceError, SalesforceResult,
    SaveResult, SessionClient, soql,
};

use crate::config::SessionConfig;
use crate::login::soap_login;

/// A logged-in Salesforce session.
///
/// Holds the session ID as a bearer token and the instance URL resolved at
/// login. Cheap to share behind an `Arc`; the inner HTTP client pools connections.
#[derive(Clone)]
pub struct RestSession {
    client: Client,
    instance_url: Url,
    api_version: String,
    access_token: String,
}

// Keeps the access token out of logs.
impl fmt::Debug for RestSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSession")
            .field("instance_url", &self.instance_url.as_str())
            .field("api_version", &self.api_version)
            .finish_non_exhaustive()
    }
}

impl RestSession {
    /// Logs in with the configured username and password.
    pub async fn login(config: &SessionConfig) -> SalesforceResult<Self> {
        let client = build_client(config.timeout)?;
        let login = soap_login(&client, config).await?;
        info!(
            "Logged in to Salesforce as {} ({})",
            config.username, login.instance_url
        );

        Ok(Self {
            client,
            instance_url: login.instance_url,
            api_version: config.api_version.clone(),
            access_token: login.session_id,
        })
    }

    /// Wraps an existing session ID for the given instance.
    pub fn from_token(
        instance_url: Url,
        access_token: impl Into<String>,
        api_version: impl Into<String>,
        timeout: Duration,
    ) -> SalesforceResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            instance_url,
            api_version: api_version.into(),
            access_token: access_token.into(),
        })
    }

    pub fn instance_url(&self) -> &Url {
        &self.instance_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// `{instance}/services/data/v{version}/{segments...}` with each segment percent-encoded.
    fn data_url(&self, segments: &[&str]) -> SalesforceResult<Url> {
        let mut url = self.instance_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SalesforceError::InvalidUrl(format!(
                    "{} cannot be used as a base URL",
                    self.instance_url
                ))
            })?;
            path.pop_if_empty()
                .extend(["services", "data"])
                .push(&format!("v{}", self.api_version))
                .extend(segments);
        }
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> SalesforceResult<T> {
        let response = request
            .bearer_auth(&self.access_token)
            .send()
            .await
            .map_err(|e| SalesforceError::Http(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SalesforceError::Http(e.to_string()))?;

        if !status.is_success() {
            debug!("Salesforce returned {}: {}", status, body);
            return Err(SalesforceError::from_response(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SessionClient for RestSession {
    async fn retrieve(&self, sobject: &str, id: &str) -> SalesforceResult<Record> {
        let url = self.data_url(&["sobjects", sobject, id])?;
        debug!("GET {}", url);
        self.send(self.client.get(url)).await
    }

    async fn update(
        &self,
        sobject: &str,
        records: &[RecordUpdate],
    ) -> SalesforceResult<Vec<SaveResult>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.data_url(&["composite", "sobjects"])?;
        let body = composite_update_body(sobject, records)?;
        debug!("PATCH {} ({} records)", url, records.len());
        self.send(self.client.patch(url).json(&body)).await
    }

    async fn query(&self, soql: &str) -> SalesforceResult<QueryResult> {
        let url = self.data_url(&["query"])?;
        debug!("GET {} q={}", url, soql);
        self.send(self.client.get(url).query(&[("q", soql)])).await
    }

    async fn tooling_execute_anonymous(
        &self,
        body: &str,
    ) -> SalesforceResult<ExecuteAnonymousResult> {
        let url = self.data_url(&["tooling", "executeAnonymous"])?;
        debug!("GET {} ({} bytes of Apex)", url, body.len());
        self.send(self.client.get(url).query(&[("anonymousBody", body)]))
            .await
    }

    async fn tooling_create(&self, sobject: &str, metadata: &Value) -> SalesforceResult<SaveResult> {
        let url = self.data_url(&["tooling", "sobjects", sobject])?;
        debug!("POST {}", url);
        match self.send(self.client.post(url).json(metadata)).await {
            // Field validation failures come back as a 400 with the error list.
            Err(SalesforceError::Api { status: 400, errors }) => Ok(SaveResult {
                id: None,
                success: false,
                errors,
            }),
            other => other,
        }
    }

    async fn tooling_find(
        &self,
        sobject: &str,
        filter: &[(&str, &str)],
        fields: &[&str],
    ) -> SalesforceResult<Vec<Record>> {
        let url = self.data_url(&["tooling", "query"])?;
        let soql = soql::find(sobject, fields, filter);
        debug!("GET {} q={}", url, soql);
        let result: QueryResult = self.send(self.client.get(url).query(&[("q", &soql)])).await?;
        if !result.done {
            return Err(SalesforceError::IncompleteQuery {
                total_size: result.total_size,
                returned: result.records.len(),
            });
        }
        Ok(result.records)
    }
}

fn build_client(timeout: Duration) -> SalesforceResult<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SalesforceError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Body for the composite sObject collection update.
///
/// `allOrNone` is off so each record succeeds or fails on its own, matching the
/// one-result-per-record contract.
fn composite_update_body(sobject: &str, records: &[RecordUpdate]) -> SalesforceResult<Value> {
    let records = records
        .iter()
        .map(|record| {
            let mut value = serde_json::to_value(record)?;
            if let Value::Object(fields) = &mut value {
                fields.insert("attributes".to_string(), json!({ "type": sobject }));
            }
            Ok(value)
        })
        .collect::<SalesforceResult<Vec<Value>>>()?;

    Ok(json!({ "allOrNone": false, "records": records }))
}
