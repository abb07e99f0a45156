//! Configuration types for the IPNS RPC client
//!
//! This module defines the configuration shared by transports and the
//! command-line front end.

use serde::{Deserialize, Serialize};

/// Default daemon RPC address (multiaddr form)
pub const DEFAULT_API_ADDRESS: &str = "/ip4/127.0.0.1/tcp/5001";

/// RPC client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Daemon RPC address, either a multiaddr (`/ip4/127.0.0.1/tcp/5001`)
    /// or an `http(s)://` URL
    #[serde(default = "default_api_address")]
    pub api_address: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Credentials for gateways that front the RPC API
    #[serde(default)]
    pub auth: Option<RpcAuth>,
}

impl RpcConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self {
            api_address: default_api_address(),
            timeout_secs: default_timeout_secs(),
            auth: None,
        }
    }

    /// Set the API address
    pub fn with_api_address(mut self, api_address: impl Into<String>) -> Self {
        self.api_address = api_address.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the credentials
    pub fn with_auth(mut self, auth: RpcAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.api_address.trim().is_empty() {
            return Err(crate::Error::config("RPC API address cannot be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(crate::Error::config("RPC timeout must be > 0"));
        }
        if let Some(auth) = &self.auth {
            auth.validate()?;
        }
        Ok(())
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Credentials sent with every RPC request
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RpcAuth {
    /// `Authorization: Bearer <token>`
    Bearer {
        /// Token value
        token: String,
    },

    /// HTTP basic authentication
    Basic {
        /// User name
        username: String,
        /// Password
        password: String,
    },
}

impl RpcAuth {
    /// Validate the credentials
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            RpcAuth::Bearer { token } => {
                if token.is_empty() {
                    return Err(crate::Error::config("Bearer token cannot be empty"));
                }
                Ok(())
            }
            RpcAuth::Basic { username, .. } => {
                if username.is_empty() {
                    return Err(crate::Error::config("Basic auth username cannot be empty"));
                }
                Ok(())
            }
        }
    }
}

// Custom Debug implementation that hides secrets
impl std::fmt::Debug for RpcAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RpcAuth::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<REDACTED>")
                .finish(),
            RpcAuth::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<REDACTED>")
                .finish(),
        }
    }
}

fn default_api_address() -> String {
    DEFAULT_API_ADDRESS.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RpcConfig::default();
        assert_eq!(config.api_address, "/ip4/127.0.0.1/tcp/5001");
        assert_eq!(config.timeout_secs, 60);
        assert!(config.auth.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: RpcConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_address, DEFAULT_API_ADDRESS);
        assert_eq!(config.timeout_secs, 60);

        let config: RpcConfig = serde_json::from_str(
            r#"{"api_address":"http://node:5001","auth":{"type":"bearer","token":"t"}}"#,
        )
        .unwrap();
        assert_eq!(config.api_address, "http://node:5001");
        assert_eq!(
            config.auth,
            Some(RpcAuth::Bearer {
                token: "t".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(RpcConfig::new().with_api_address("  ").validate().is_err());
        assert!(RpcConfig::new().with_timeout_secs(0).validate().is_err());
        assert!(
            RpcConfig::new()
                .with_auth(RpcAuth::Bearer {
                    token: String::new()
                })
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_auth_debug_redacts_secrets() {
        let auth = RpcAuth::Basic {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
        };
        let debug_str = format!("{:?}", auth);
        assert!(debug_str.contains("admin"));
        assert!(!debug_str.contains("hunter2"));

        let bearer = RpcAuth::Bearer {
            token: "secret_token_12345".to_string(),
        };
        assert!(!format!("{:?}", bearer).contains("secret_token"));
    }
}
