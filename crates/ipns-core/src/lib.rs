// # ipns-core
//
// Core library for the IPNS RPC client.
//
// ## Architecture Overview
//
// - **RpcRequest**: Command name, positional arguments and named options
// - **RpcTransport**: Trait for carrying a request to the daemon
// - **IpnsClient**: Publish, resolve and DHT-get operations over a transport
// - **IpnsEntry**: Protocol-buffer record returned by DHT lookups
//
// Transports live in their own crates (`ipns-rpc-http`) so the core has no
// HTTP dependency and can be driven by test doubles.

pub mod config;
pub mod duration;
pub mod entry;
pub mod error;
pub mod ipns;
pub mod request;
pub mod traits;

// Re-export core types for convenience
pub use config::{RpcAuth, RpcConfig};
pub use entry::{IpnsEntry, ValidityType};
pub use error::{Error, Result};
pub use ipns::{IpnsClient, PublishOptions, PublishResponse, ResolvedPath};
pub use request::{OptionValue, RpcRequest};
pub use traits::RpcTransport;
