//! Authentication resolution
//!
//! Picks exactly one credential form per request from the client
//! configuration. Resolution is pure so it can be checked without a server.

use std::fmt;

use reqwest::RequestBuilder;

use crate::config::ClientConfig;

/// Header Artifactory reads a bare API key from
pub const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// Credentials attached to a single request
#[derive(Clone, PartialEq, Eq)]
pub enum AuthHeader {
    /// `Authorization: Basic base64(username:secret)`
    Basic { username: String, secret: String },
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `X-JFrog-Art-Api: <key>`
    ApiKey(String),
}

impl AuthHeader {
    /// Short name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthHeader::Basic { .. } => "basic",
            AuthHeader::Bearer(_) => "bearer",
            AuthHeader::ApiKey(_) => "api-key",
        }
    }

    /// Attach these credentials to a request
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            AuthHeader::Basic { username, secret } => request.basic_auth(username, Some(secret)),
            AuthHeader::Bearer(token) => request.bearer_auth(token),
            AuthHeader::ApiKey(key) => request.header(API_KEY_HEADER, key.as_str()),
        }
    }

    fn basic(username: &str, secret: &str) -> Self {
        AuthHeader::Basic {
            username: username.to_string(),
            secret: secret.to_string(),
        }
    }
}

impl fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthHeader::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("secret", &"<redacted>")
                .finish(),
            AuthHeader::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            AuthHeader::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// Resolve which credentials to send
///
/// Precedence:
/// 1. access token: Basic `username:token` when a username is set, else Bearer
/// 2. API key: Basic `username:apiKey` when a username is set, else `X-JFrog-Art-Api`
/// 3. username and password: Basic `username:password`
/// 4. nothing
pub fn resolve_auth(config: &ClientConfig) -> Option<AuthHeader> {
    let username = config.username();

    if let Some(token) = config.access_token() {
        return Some(match username {
            Some(username) => AuthHeader::basic(username, token),
            None => AuthHeader::Bearer(token.to_string()),
        });
    }

    if let Some(api_key) = config.api_key() {
        return Some(match username {
            Some(username) => AuthHeader::basic(username, api_key),
            None => AuthHeader::ApiKey(api_key.to_string()),
        });
    }

    match (username, config.password()) {
        (Some(username), Some(password)) => Some(AuthHeader::basic(username, password)),
        _ => None,
    }
}
