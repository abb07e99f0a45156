// # IPNS Client
//
// Name-system operations on top of the generic request model:
//
// | Operation              | Command        | Positional args | Decoded as      |
// |------------------------|----------------|-----------------|-----------------|
// | `publish`              | `name/publish` | `[node?] value` | JSON            |
// | `publish_with_details` | `name/publish` | `content_hash`  | JSON            |
// | `resolve`              | `name/resolve` | `[id?]`         | JSON            |
// | `get_published`        | `dht/get`      | `ipns_key`      | raw, protobuf   |
//
// Every call builds and owns its own request. Errors from the request layer
// are returned unchanged; nothing is retried or logged here beyond debug
// traces.

use std::sync::Arc;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::entry::IpnsEntry;
use crate::request::RpcRequest;
use crate::traits::RpcTransport;

/// Result of a publish call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    /// The IPNS name the record was published under
    #[serde(alias = "Name")]
    pub name: String,

    /// The path the name now resolves to
    #[serde(alias = "Value")]
    pub value: String,
}

/// Result of a resolve call
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResolvedPath {
    #[serde(rename = "Path", alias = "path")]
    pub path: String,
}

/// Options for [`IpnsClient::publish_with_details`]
///
/// Each field is only sent when it carries a meaningful value:
///
/// - `key`: sent when present and non-empty
/// - `lifetime`: sent when non-zero (negative values are sent as-is)
/// - `ttl`: sent only when strictly positive
/// - `resolve`: always sent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Name of the key whose record is updated (daemon default when unset)
    pub key: Option<String>,

    /// How long the record stays valid
    pub lifetime: Option<TimeDelta>,

    /// Caching hint for resolvers. A zero TTL cannot be requested.
    pub ttl: Option<TimeDelta>,

    /// Ask the daemon to check that the value resolves before publishing
    pub resolve: bool,
}

impl PublishOptions {
    /// Create options with nothing set and `resolve = false`
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key name
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set the record lifetime
    pub fn with_lifetime(mut self, lifetime: TimeDelta) -> Self {
        self.lifetime = Some(lifetime);
        self
    }

    /// Set the record TTL
    pub fn with_ttl(mut self, ttl: TimeDelta) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Enable or disable pre-publish resolution
    pub fn with_resolve(mut self, resolve: bool) -> Self {
        self.resolve = resolve;
        self
    }

    /// Copy the options that pass their inclusion threshold onto `req`
    pub fn apply(&self, req: &mut RpcRequest) {
        req.option("resolve", self.resolve);

        if let Some(key) = self.key.as_deref().filter(|k| !k.is_empty()) {
            req.option("key", key);
        }
        if let Some(lifetime) = self.lifetime.filter(|l| *l != TimeDelta::zero()) {
            req.option("lifetime", lifetime);
        }
        // Strictly positive: zero and negative TTLs are treated as unset
        if let Some(ttl) = self.ttl.filter(|t| *t > TimeDelta::zero()) {
            req.option("ttl", ttl);
        }
    }
}

/// IPNS operations against a daemon's RPC API
///
/// Cheap to clone; clones share the underlying transport.
#[derive(Clone)]
pub struct IpnsClient {
    transport: Arc<dyn RpcTransport>,
}

impl std::fmt::Debug for IpnsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IpnsClient")
            .field("transport", &self.transport.transport_name())
            .finish()
    }
}

impl IpnsClient {
    /// Create a client over the given transport
    pub fn new(transport: Arc<dyn RpcTransport>) -> Self {
        Self { transport }
    }

    /// Create a client that takes ownership of a transport
    pub fn with_transport<T: RpcTransport + 'static>(transport: T) -> Self {
        Self::new(Arc::new(transport))
    }

    /// Point a name at `value`
    ///
    /// `node` picks the key to publish under. When it is `None` or empty the
    /// daemon's own identity is used and no argument is sent for it.
    /// The decoded response is discarded; use
    /// [`publish_with_details`](Self::publish_with_details) to get it.
    pub async fn publish(&self, node: Option<&str>, value: &str) -> Result<()> {
        let mut req = RpcRequest::for_command("name/publish");
        if let Some(node) = node.filter(|n| !n.is_empty()) {
            req.argument(node);
        }
        req.argument(value);

        tracing::debug!("Publishing {} (node: {})", value, node.unwrap_or("<self>"));
        req.exec_json::<PublishResponse>(self.transport.as_ref())
            .await
            .map(|_| ())
    }

    /// Publish `content_hash` with fine-grained control over the record
    pub async fn publish_with_details(
        &self,
        content_hash: &str,
        options: &PublishOptions,
    ) -> Result<PublishResponse> {
        let mut req = RpcRequest::new("name/publish", [content_hash]);
        options.apply(&mut req);

        req.exec_json(self.transport.as_ref()).await
    }

    /// Resolve a name to the path it points to
    ///
    /// With `None` or an empty id, the daemon resolves its own name.
    pub async fn resolve(&self, id: Option<&str>) -> Result<String> {
        let mut req = RpcRequest::for_command("name/resolve");
        if let Some(id) = id.filter(|i| !i.is_empty()) {
            req.argument(id);
        }

        let out: ResolvedPath = req.exec_json(self.transport.as_ref()).await?;
        Ok(out.path)
    }

    /// Fetch the raw record stored in the DHT for `ipns_key`
    ///
    /// The body is read as bytes and decoded as an [`IpnsEntry`]; a
    /// transport failure and a malformed record both end up as `Err`.
    pub async fn get_published(&self, ipns_key: &str) -> Result<IpnsEntry> {
        let req = RpcRequest::new("dht/get", [ipns_key]);
        let value = req.exec_raw(self.transport.as_ref()).await?;

        IpnsEntry::from_bytes(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::OptionValue;

    fn applied(options: &PublishOptions) -> RpcRequest {
        let mut req = RpcRequest::for_command("name/publish");
        options.apply(&mut req);
        req
    }

    #[test]
    fn test_resolve_option_always_present() {
        let req = applied(&PublishOptions::new());
        assert_eq!(req.option_value("resolve"), Some(&OptionValue::Bool(false)));
        assert_eq!(req.options().count(), 1);
    }

    #[test]
    fn test_empty_key_omitted() {
        let req = applied(&PublishOptions::new().with_key(""));
        assert!(req.option_value("key").is_none());
    }

    #[test]
    fn test_negative_lifetime_sent_negative_ttl_dropped() {
        let req = applied(
            &PublishOptions::new()
                .with_lifetime(TimeDelta::hours(-1))
                .with_ttl(TimeDelta::seconds(-30)),
        );
        assert_eq!(
            req.option_value("lifetime"),
            Some(&OptionValue::Duration(TimeDelta::hours(-1)))
        );
        assert!(req.option_value("ttl").is_none());
    }

    #[test]
    fn test_sub_second_ttl_is_positive() {
        let req = applied(&PublishOptions::new().with_ttl(TimeDelta::nanoseconds(1)));
        assert_eq!(
            req.option_value("ttl"),
            Some(&OptionValue::Duration(TimeDelta::nanoseconds(1)))
        );
    }

    #[test]
    fn test_publish_response_accepts_daemon_casing() {
        let resp: PublishResponse =
            serde_json::from_str(r#"{"Name":"k51","Value":"/ipfs/Qm"}"#).unwrap();
        assert_eq!(resp.name, "k51");
        assert_eq!(resp.value, "/ipfs/Qm");
    }
}
