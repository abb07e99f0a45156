// # RPC Transport Trait
//
// Defines the seam between the request model and whatever carries requests
// to the daemon.
//
// ## Implementations
//
// - HTTP (`/api/v0/<command>`): `ipns-rpc-http` crate
// - Tests: recording doubles under `tests/common`
//
// ## Usage
//
// ```rust,ignore
// use ipns_core::{RpcRequest, RpcTransport};
//
// async fn raw_resolve(transport: &dyn RpcTransport) -> ipns_core::Result<Vec<u8>> {
//     let req = RpcRequest::new("name/resolve", ["k51qzi5uqu5d..."]);
//     transport.execute(&req).await
// }
// ```

use async_trait::async_trait;

use crate::request::RpcRequest;

/// Trait for RPC transports
///
/// A transport executes exactly one request per call and hands back the
/// response body untouched. Decoding belongs to the caller.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Constraints
///
/// - No retries or backoff: failures go straight back to the caller
/// - No background tasks
/// - No caching of responses between calls
#[async_trait]
pub trait RpcTransport: Send + Sync {
    /// Execute a request and return the response body
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<u8>)`: the body of a successful response
    /// - `Err(Error)`: transport failure or daemon-side rejection
    async fn execute(&self, request: &RpcRequest) -> Result<Vec<u8>, crate::Error>;

    /// Get the transport name (for logging/debugging)
    fn transport_name(&self) -> &'static str;
}
