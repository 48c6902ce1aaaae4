//! Salesforce session client over HTTP.
//!
//! [`RestSession`] logs in once with a username and password, then implements
//! [`sforce_core::SessionClient`] against the REST and Tooling APIs of the
//! org instance the login resolved to.

mod config;
mod login;
mod session;

pub use config::{DEFAULT_API_VERSION, DEFAULT_LOGIN_URL, SessionConfig};
pub use session::RestSession;
