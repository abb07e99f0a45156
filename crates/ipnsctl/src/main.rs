// # ipnsctl - IPNS command-line client
//
// A thin front end over `ipns-core` and `ipns-rpc-http`. Each subcommand maps
// to exactly one IPNS operation; no logic lives here beyond argument parsing
// and printing.
//
// ## Configuration
//
// Flags override environment variables:
//
// - `IPNS_API_ADDRESS`: Daemon RPC address (multiaddr or URL)
// - `IPNS_TIMEOUT_SECS`: Per-request timeout in seconds
// - `IPNS_API_TOKEN`: Bearer token for gated RPC endpoints (optional)
// - `IPNS_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export IPNS_API_ADDRESS=/ip4/127.0.0.1/tcp/5001
//
// ipnsctl publish /ipfs/QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG
// ipnsctl publish-details /ipfs/Qm... --key blog --lifetime 48h --ttl 5m
// ipnsctl resolve k51qzi5uqu5d...
// ipnsctl get-published /ipns/k51qzi5uqu5d...
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ipns_core::config::{DEFAULT_API_ADDRESS, RpcAuth, RpcConfig};
use ipns_core::duration::{format_go_duration, parse_go_duration};
use ipns_core::{IpnsClient, IpnsEntry, PublishOptions};
use ipns_rpc_http::HttpTransport;
use std::process::ExitCode;
use tracing::{Level, debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    /// Command completed
    Success = 0,
    /// Invalid configuration or arguments
    ConfigError = 1,
    /// The RPC call failed
    RuntimeError = 2,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Publish and resolve IPNS names through an IPFS daemon
#[derive(Parser, Debug)]
#[command(name = "ipnsctl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Daemon RPC address (multiaddr or http(s) URL)
    #[arg(long, global = true, env = "IPNS_API_ADDRESS", default_value = DEFAULT_API_ADDRESS)]
    api: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "IPNS_TIMEOUT_SECS", default_value_t = 60)]
    timeout: u64,

    /// Bearer token for gated RPC endpoints
    #[arg(long, global = true, env = "IPNS_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level
    #[arg(long, global = true, env = "IPNS_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Point a name at a path
    Publish {
        /// Path to publish (e.g. /ipfs/Qm...)
        value: String,
        /// Key to publish under (daemon identity when omitted)
        #[arg(long)]
        node: Option<String>,
    },

    /// Publish with control over key, lifetime, TTL and resolution
    PublishDetails {
        /// Path to publish (e.g. /ipfs/Qm...)
        content_hash: String,
        /// Key name whose record is updated
        #[arg(long)]
        key: Option<String>,
        /// Record lifetime, Go duration syntax (e.g. 24h)
        #[arg(long, value_parser = parse_duration_arg, allow_hyphen_values = true)]
        lifetime: Option<chrono::TimeDelta>,
        /// Cache TTL, Go duration syntax (e.g. 5m); zero or negative is ignored
        #[arg(long, value_parser = parse_duration_arg, allow_hyphen_values = true)]
        ttl: Option<chrono::TimeDelta>,
        /// Check that the value resolves before publishing
        #[arg(long)]
        resolve: bool,
    },

    /// Resolve a name to a path (own name when omitted)
    Resolve {
        /// Name to resolve
        name: Option<String>,
    },

    /// Fetch the raw record stored in the DHT for a name
    GetPublished {
        /// IPNS key (e.g. /ipns/k51...)
        key: String,
    },
}

fn parse_duration_arg(s: &str) -> std::result::Result<chrono::TimeDelta, String> {
    parse_go_duration(s).map_err(|e| e.to_string())
}

impl Cli {
    /// Build the RPC configuration from flags and environment
    fn rpc_config(&self) -> Result<RpcConfig> {
        let mut config = RpcConfig::new()
            .with_api_address(self.api.clone())
            .with_timeout_secs(self.timeout);

        if let Some(token) = self.token.as_ref().filter(|t| !t.is_empty()) {
            config = config.with_auth(RpcAuth::Bearer {
                token: token.clone(),
            });
        }

        config.validate().context("Invalid RPC configuration")?;
        Ok(config)
    }

    fn log_level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            other => anyhow::bail!(
                "IPNS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                other
            ),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.log_level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let client = match cli.rpc_config().and_then(|config| {
        let transport = HttpTransport::new(&config)?;
        Ok(IpnsClient::with_transport(transport))
    }) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    let command = cli.command;
    rt.block_on(async {
        match run(&client, command).await {
            Ok(()) => CtlExitCode::Success,
            Err(e) => {
                error!("Command failed: {:#}", e);
                eprintln!("Error: {:#}", e);
                CtlExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Run a single subcommand
async fn run(client: &IpnsClient, command: Commands) -> Result<()> {
    debug!("Running {:?}", command);

    match command {
        Commands::Publish { value, node } => {
            client
                .publish(node.as_deref(), &value)
                .await
                .context("name/publish failed")?;
            info!("Published {}", value);
            println!("Published {}", value);
        }
        Commands::PublishDetails {
            content_hash,
            key,
            lifetime,
            ttl,
            resolve,
        } => {
            let options = PublishOptions {
                key,
                lifetime,
                ttl,
                resolve,
            };
            let resp = client
                .publish_with_details(&content_hash, &options)
                .await
                .context("name/publish failed")?;
            info!("Published {} -> {}", resp.name, resp.value);
            println!("{}", serde_json::to_string_pretty(&resp)?);
        }
        Commands::Resolve { name } => {
            let path = client
                .resolve(name.as_deref())
                .await
                .context("name/resolve failed")?;
            println!("{}", path);
        }
        Commands::GetPublished { key } => {
            let entry = client
                .get_published(&key)
                .await
                .context("dht/get failed")?;
            println!("{}", serde_json::to_string_pretty(&entry_summary(&entry))?);
        }
    }

    Ok(())
}

/// Printable view of a record; binary fields are reported by length
fn entry_summary(entry: &IpnsEntry) -> serde_json::Value {
    let len = |field: &Option<Vec<u8>>| field.as_ref().map(Vec::len);

    serde_json::json!({
        "value": entry.value_str(),
        "validity_type": entry.validity_type.map(|_| format!("{:?}", entry.validity_type())),
        "validity": entry.validity_str(),
        "sequence": entry.sequence,
        "ttl": entry
            .ttl
            .and_then(|ns| i64::try_from(ns).ok())
            .map(|ns| format_go_duration(chrono::TimeDelta::nanoseconds(ns))),
        "pub_key_len": len(&entry.pub_key),
        "signature_v1_len": len(&entry.signature_v1),
        "signature_v2_len": len(&entry.signature_v2),
        "data_len": len(&entry.data),
    })
}
