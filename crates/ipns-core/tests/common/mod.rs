//! Test doubles and common utilities for IPNS contract tests
//!
//! This module provides a scripted transport that records every request it
//! executes and replays a canned response.

#![allow(dead_code)]

use ipns_core::error::{Error, Result};
use ipns_core::{IpnsClient, RpcRequest, RpcTransport};
use std::sync::{Arc, Mutex};

/// What the transport answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// Return these bytes as the response body
    Body(Vec<u8>),
    /// Fail as the daemon would
    DaemonError(String),
    /// Fail as a dropped connection would
    TransportError(String),
}

/// A transport that records requests and replays a fixed reply
pub struct RecordingTransport {
    reply: Reply,
    requests: Arc<Mutex<Vec<RpcRequest>>>,
}

impl RecordingTransport {
    /// Create a transport that always answers with `reply`
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every call with a JSON body
    pub fn json(body: serde_json::Value) -> Self {
        Self::new(Reply::Body(body.to_string().into_bytes()))
    }

    /// Answer every call with raw bytes
    pub fn bytes(body: impl Into<Vec<u8>>) -> Self {
        Self::new(Reply::Body(body.into()))
    }

    /// Handle to the recorded requests, usable after the transport is moved
    pub fn requests(&self) -> Arc<Mutex<Vec<RpcRequest>>> {
        self.requests.clone()
    }
}

#[async_trait::async_trait]
impl RpcTransport for RecordingTransport {
    async fn execute(&self, request: &RpcRequest) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());

        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::DaemonError(message) => Err(Error::daemon(request.command(), message, 0)),
            Reply::TransportError(message) => Err(Error::http(message.clone())),
        }
    }

    fn transport_name(&self) -> &'static str {
        "recording"
    }
}

/// Build a client over a recording transport, returning the request log
pub fn client_with(transport: RecordingTransport) -> (IpnsClient, Arc<Mutex<Vec<RpcRequest>>>) {
    let log = transport.requests();
    (IpnsClient::with_transport(transport), log)
}

/// The single request a test expects to have been sent
pub fn only_request(log: &Arc<Mutex<Vec<RpcRequest>>>) -> RpcRequest {
    let requests = log.lock().unwrap();
    assert_eq!(
        requests.len(),
        1,
        "Expected exactly 1 request, got {}",
        requests.len()
    );
    requests[0].clone()
}
