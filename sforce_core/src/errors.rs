use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result type for session client operations.
pub type SalesforceResult<T> = Result<T, SalesforceError>;

/// Errors returned by a [`crate::SessionClient`].
#[derive(Debug, thiserror::Error)]
pub enum SalesforceError {
    /// The request never produced a response (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),

    /// Salesforce answered with a non-success status.
    #[error("API error (status {status}): {}", summarize(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorDetail>,
    },

    /// Login was rejected.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A response body did not have the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The requested record or resource does not exist.
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A query has more pages than the single one that was read.
    #[error("Query returned {returned} of {total_size} records")]
    IncompleteQuery { total_size: u64, returned: usize },
}

impl SalesforceError {
    /// Builds an error from a failed response.
    ///
    /// Salesforce reports failures as a JSON array of `{message, errorCode, fields}`
    /// objects. Bodies that don't parse that way are kept as a single message.
    pub fn from_response(status: u16, body: &str) -> Self {
        let errors = match serde_json::from_str::<Vec<ApiErrorDetail>>(body) {
            Ok(errors) if !errors.is_empty() => errors,
            _ => vec![ApiErrorDetail {
                status_code: None,
                message: body.trim().to_string(),
                fields: Vec::new(),
            }],
        };

        if status == 404 {
            return SalesforceError::NotFound(summarize(&errors));
        }

        SalesforceError::Api { status, errors }
    }
}

/// One entry of a Salesforce error list.
///
/// The REST API calls the code `errorCode`, save results call it `statusCode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default, alias = "errorCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    pub message: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

fn summarize(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(|e| match &e.status_code {
            Some(code) => format!("{}: {}", code, e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
