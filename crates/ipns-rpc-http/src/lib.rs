// # HTTP RPC Transport
//
// This crate carries `RpcRequest`s to an IPFS daemon over its HTTP RPC API.
//
// ## Wire Format
//
// ```http
// POST /api/v0/<command>?arg=<positional 1>&arg=<positional 2>&<option>=<value>
// ```
//
// - Positional arguments are sent as repeated `arg` query parameters, in order
// - Options follow as `key=value` pairs (booleans as `true`/`false`,
//   durations as Go duration strings)
// - A 2xx response body is handed back untouched
// - A daemon-side failure comes back as a JSON body
//   `{"Message": "...", "Code": 0, "Type": "error"}`
//
// ## Constraints
//
// - One HTTP request per `execute` call
// - No retry, backoff or caching
// - Credentials never appear in logs or Debug output

use async_trait::async_trait;
use ipns_core::config::{RpcAuth, RpcConfig};
use ipns_core::{Error, Result, RpcRequest, RpcTransport};
use serde::Deserialize;
use std::time::Duration;

/// Path prefix of the daemon RPC API
const API_PREFIX: &str = "/api/v0";

/// HTTP transport for the daemon RPC API
pub struct HttpTransport {
    /// Base URL, e.g. `http://127.0.0.1:5001` (no trailing slash)
    base_url: String,

    /// Credentials attached to every request
    /// ⚠️ NEVER log this value
    auth: Option<RpcAuth>,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides credentials
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("auth", &self.auth.as_ref().map(|_| "<REDACTED>"))
            .finish()
    }
}

/// Error body returned by the daemon on failed commands
#[derive(Debug, Deserialize)]
struct DaemonErrorBody {
    #[serde(rename = "Message")]
    message: String,
    #[serde(rename = "Code", default)]
    code: i64,
}

impl HttpTransport {
    /// Create a transport from configuration
    ///
    /// Fails if the configuration is invalid or the API address cannot be
    /// turned into an HTTP URL.
    pub fn new(config: &RpcConfig) -> Result<Self> {
        config.validate()?;

        let base_url = api_base_url(&config.api_address)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!("HTTP transport targeting {}", base_url);

        Ok(Self {
            base_url,
            auth: config.auth.clone(),
            client,
        })
    }

    /// Create a transport for an address with default settings
    pub fn from_address(api_address: impl Into<String>) -> Result<Self> {
        Self::new(&RpcConfig::new().with_api_address(api_address))
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, command: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            API_PREFIX,
            command.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl RpcTransport for HttpTransport {
    async fn execute(&self, request: &RpcRequest) -> Result<Vec<u8>> {
        let command = request.command();
        let url = self.endpoint(command);

        let mut query: Vec<(&str, String)> = request
            .arguments()
            .iter()
            .map(|arg| ("arg", arg.clone()))
            .collect();
        query.extend(request.options().map(|(key, value)| (key, value.to_string())));

        let builder = self.client.post(&url).query(&query);
        let builder = match &self.auth {
            Some(RpcAuth::Bearer { token }) => builder.bearer_auth(token),
            Some(RpcAuth::Basic { username, password }) => {
                builder.basic_auth(username, Some(password))
            }
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;

        if status.is_success() {
            tracing::debug!("RPC {} returned {} byte(s)", command, body.len());
            return Ok(body.to_vec());
        }

        tracing::warn!("RPC {} failed with status {}", command, status);
        Err(error_from_response(command, status, &body))
    }

    fn transport_name(&self) -> &'static str {
        "http"
    }
}

/// Map a non-success response to an error
fn error_from_response(command: &str, status: reqwest::StatusCode, body: &[u8]) -> Error {
    let daemon_error = serde_json::from_slice::<DaemonErrorBody>(body).ok();

    match (status.as_u16(), daemon_error) {
        (401 | 403, _) => Error::auth(format!(
            "RPC API rejected credentials for {}. Status: {}",
            command, status
        )),
        (_, Some(err)) => Error::daemon(command, err.message, err.code),
        (404, None) => Error::not_found(format!("RPC command not found: {}", command)),
        (_, None) => Error::http(format!(
            "{} - {}",
            status,
            String::from_utf8_lossy(body).trim()
        )),
    }
}

/// Turn an API address into a base URL
///
/// Accepts:
/// - `http://host:port` / `https://host:port`, with or without a trailing `/api/v0`
/// - multiaddrs: `/ip4/<addr>/tcp/<port>`, `/ip6/...`, `/dns/...`,
///   `/dns4/...`, `/dns6/...`, optionally suffixed with `/http` or `/https`
/// - bare `host:port`
pub fn api_base_url(api_address: &str) -> Result<String> {
    let address = api_address.trim();

    if let Some((scheme, rest)) = address.split_once("://") {
        if scheme != "http" && scheme != "https" {
            return Err(Error::config(format!(
                "Unsupported API URL scheme: {}",
                api_address
            )));
        }

        // endpoint() appends the prefix itself
        let rest = rest.trim_end_matches('/');
        let rest = rest.strip_suffix(API_PREFIX).unwrap_or(rest);
        let rest = rest.trim_end_matches('/');

        if rest.is_empty() || rest.starts_with(['/', ':']) {
            return Err(Error::config(format!(
                "API URL has no host: {}",
                api_address
            )));
        }
        return Ok(format!("{}://{}", scheme, rest));
    }

    if !address.starts_with('/') {
        if address.is_empty() || !address.contains(':') {
            return Err(Error::config(format!(
                "Invalid API address: {:?} (expected multiaddr, URL or host:port)",
                api_address
            )));
        }
        return Ok(format!("http://{}", address));
    }

    let invalid = || Error::config(format!("Unsupported API multiaddr: {}", api_address));

    let parts: Vec<&str> = address.trim_end_matches('/').split('/').skip(1).collect();
    let (proto, host, transport, port, scheme) = match parts.as_slice() {
        [proto, host, transport, port] => (*proto, *host, *transport, *port, "http"),
        [proto, host, transport, port, scheme @ ("http" | "https")] => {
            (*proto, *host, *transport, *port, *scheme)
        }
        _ => return Err(invalid()),
    };

    if transport != "tcp" || host.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid());
    }

    let host = match proto {
        "ip4" | "dns" | "dns4" | "dns6" => host.to_string(),
        "ip6" => format!("[{}]", host),
        _ => return Err(invalid()),
    };

    Ok(format!("{}://{}:{}", scheme, host, port))
}
