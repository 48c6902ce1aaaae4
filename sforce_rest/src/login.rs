//! Username/password login through the SOAP partner endpoint.

use log::debug;
use reqwest::Client;
use sforce_core::{SalesforceError, SalesforceResult};
use url::Url;

use crate::config::{SessionConfig, parse_url};

/// What a successful login hands back.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LoginSession {
    pub session_id: String,
    /// Origin of the org instance, e.g. `https://na1.salesforce.com/`.
    pub instance_url: Url,
}

pub(crate) async fn soap_login(
    client: &Client,
    config: &SessionConfig,
) -> SalesforceResult<LoginSession> {
    let mut url = config.login_url.clone();
    url.set_path(&format!("services/Soap/u/{}", config.api_version));
    debug!("Logging in as {} via {}", config.username, url);

    let response = client
        .post(url)
        .header("Content-Type", "text/xml; charset=UTF-8")
        .header("SOAPAction", "login")
        .body(login_envelope(&config.username, &config.password))
        .send()
        .await
        .map_err(|e| SalesforceError::Http(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SalesforceError::Http(e.to_string()))?;

    parse_login_response(status.is_success(), &body)
}

fn login_envelope(username: &str, password: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="utf-8" ?>"#,
            r#"<env:Envelope xmlns:xsd="http://www.w3.org/2001/XMLSchema" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" "#,
            r#"xmlns:env="http://schemas.xmlsoap.org/soap/envelope/">"#,
            r#"<env:Body><n1:login xmlns:n1="urn:partner.soap.sforce.com">"#,
            r#"<n1:username>{}</n1:username><n1:password>{}</n1:password>"#,
            r#"</n1:login></env:Body></env:Envelope>"#,
        ),
        escape_xml(username),
        escape_xml(password)
    )
}

fn parse_login_response(success: bool, body: &str) -> SalesforceResult<LoginSession> {
    if let Some(fault) = element_text(body, "faultstring") {
        return Err(SalesforceError::Auth(unescape_xml(fault)));
    }
    if !success {
        return Err(SalesforceError::Auth(format!(
            "unexpected login response: {}",
            body.trim()
        )));
    }

    let session_id = element_text(body, "sessionId")
        .ok_or_else(|| SalesforceError::Auth("login response has no sessionId".to_string()))?;
    let server_url = element_text(body, "serverUrl")
        .ok_or_else(|| SalesforceError::Auth("login response has no serverUrl".to_string()))?;

    let server_url = parse_url(&unescape_xml(server_url))?;
    let instance_url = parse_url(&server_url.origin().ascii_serialization())?;

    Ok(LoginSession {
        session_id: unescape_xml(session_id),
        instance_url,
    })
}

/// Text between the first `<tag>` and its closing tag.
fn element_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = body.find(&open)? + open.len();
    let end = body[start..].find(&close)? + start;
    Some(&body[start..end])
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_xml(value: &str) -> String {
    value
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
