//! Core traits for the IPNS RPC client
//!
//! - [`RpcTransport`]: Carry an RPC request to the daemon and return the body

pub mod transport;

pub use transport::RpcTransport;
