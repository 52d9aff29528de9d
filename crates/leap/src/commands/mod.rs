//! CLI command handlers.

use std::time::Duration;

use anyhow::Result;
use leap_client::{CancellationToken, Error, LeapClient};

pub mod health;
pub mod info;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Node API base URL.
    pub url: String,
    /// Explicit Host header override.
    pub host: Option<String>,
    /// Request timeout in seconds; 0 disables it.
    pub timeout: u64,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build a client for the configured node.
    pub fn client(&self) -> Result<LeapClient> {
        let timeout = (self.timeout > 0).then(|| Duration::from_secs(self.timeout));
        let mut builder = LeapClient::builder().base_url(&self.url).timeout(timeout);
        if let Some(host) = &self.host {
            builder = builder.host(host);
        }
        builder.build().map_err(|err| {
            let context = match &err {
                Error::InvalidHost(host) => format!("invalid Host header override {host:?}"),
                err if err.is_parse_error() => format!("invalid node URL '{}'", self.url),
                _ => "failed to build client".to_string(),
            };
            anyhow::Error::new(err).context(context)
        })
    }

    /// A token that fires on Ctrl-C.
    pub fn cancellation(&self) -> CancellationToken {
        let token = CancellationToken::new();
        let trigger = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::debug!("interrupt received, cancelling request");
                trigger.cancel();
            }
        });
        token
    }
}
