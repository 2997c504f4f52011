//! Cluster credentials.

use reqwest::RequestBuilder;
use secrecy::{ExposeSecret, SecretString};

/// How requests authenticate against the cluster.
#[derive(Debug, Clone, Default)]
pub enum Credentials {
    /// No `Authorization` header.
    #[default]
    None,
    /// HTTP basic authentication.
    Basic {
        username: String,
        password: Option<SecretString>,
    },
}

impl Credentials {
    /// Build credentials from an optional username/password pair.
    pub fn from_parts(username: Option<String>, password: Option<SecretString>) -> Self {
        match username {
            Some(username) => Credentials::Basic { username, password },
            None => Credentials::None,
        }
    }

    /// Attach the credentials to an outgoing request.
    pub fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::None => builder,
            Credentials::Basic { username, password } => builder.basic_auth(
                username,
                password.as_ref().map(|p| p.expose_secret().to_string()),
            ),
        }
    }

    pub fn is_basic(&self) -> bool {
        matches!(self, Credentials::Basic { .. })
    }
}
