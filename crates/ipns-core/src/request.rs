//! RPC request model
//!
//! An [`RpcRequest`] is a command name plus ordered positional arguments and
//! named options. It knows nothing about HTTP; an [`RpcTransport`] turns it
//! into bytes, and the `exec_*` helpers decode those bytes into the caller's
//! target type.

use std::collections::BTreeMap;
use std::fmt;

use chrono::TimeDelta;
use serde::de::DeserializeOwned;

use crate::Result;
use crate::duration::format_go_duration;
use crate::traits::RpcTransport;

/// Value of a named RPC option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Boolean flag, sent as `true`/`false`
    Bool(bool),
    /// Free-form string, sent verbatim
    Str(String),
    /// Signed duration, sent as a Go duration string
    Duration(TimeDelta),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
            OptionValue::Duration(d) => f.write_str(&format_go_duration(*d)),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Str(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Str(value)
    }
}

impl From<TimeDelta> for OptionValue {
    fn from(value: TimeDelta) -> Self {
        OptionValue::Duration(value)
    }
}

/// A single RPC call: command, positional arguments, named options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcRequest {
    command: String,
    arguments: Vec<String>,
    options: BTreeMap<String, OptionValue>,
}

impl RpcRequest {
    /// Create a request for `command` (e.g. `"name/publish"`) with initial arguments
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            command: command.into(),
            arguments: args.into_iter().map(Into::into).collect(),
            options: BTreeMap::new(),
        }
    }

    /// Create a request with no positional arguments
    pub fn for_command(command: impl Into<String>) -> Self {
        Self::new(command, Vec::<String>::new())
    }

    /// Append a positional argument
    pub fn argument(&mut self, value: impl Into<String>) -> &mut Self {
        self.arguments.push(value.into());
        self
    }

    /// Set a named option, replacing any previous value for `key`
    pub fn option(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> &mut Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The RPC command name
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Positional arguments in call order
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Named options, ordered by key
    pub fn options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a single option
    pub fn option_value(&self, key: &str) -> Option<&OptionValue> {
        self.options.get(key)
    }

    /// Execute and decode the response body as JSON into `T`
    pub async fn exec_json<T>(&self, transport: &dyn RpcTransport) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let body = self.exec_raw(transport).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Execute and return the raw response body
    pub async fn exec_raw(&self, transport: &dyn RpcTransport) -> Result<Vec<u8>> {
        tracing::debug!(
            "Executing RPC {} via {} ({} arg(s), {} option(s))",
            self.command,
            transport.transport_name(),
            self.arguments.len(),
            self.options.len()
        );
        transport.execute(self).await
    }
}
