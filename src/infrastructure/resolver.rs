//! Hostname resolution used by URL validation.

use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("lookup of {host} failed: {reason}")]
    Failed { host: String, reason: String },

    #[error("lookup of {host} returned no addresses")]
    NoAddresses { host: String },

    #[error("lookup of {host} timed out after {timeout_ms}ms")]
    TimedOut { host: String, timeout_ms: u128 },
}

/// Confirms that a hostname resolves to at least one address.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError>;
}

/// Resolver backed by the system resolver via `tokio::net::lookup_host`.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[async_trait]
impl HostResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<(), ResolveError> {
        // Port is required by lookup_host but irrelevant to the answer.
        let lookup = tokio::net::lookup_host((host, 443));

        let mut addrs = tokio::time::timeout(self.timeout, lookup)
            .await
            .map_err(|_| ResolveError::TimedOut {
                host: host.to_string(),
                timeout_ms: self.timeout.as_millis(),
            })?
            .map_err(|e| ResolveError::Failed {
                host: host.to_string(),
                reason: e.to_string(),
            })?;

        match addrs.next() {
            Some(addr) => {
                tracing::debug!(host, %addr, "Host resolved");
                Ok(())
            }
            None => Err(ResolveError::NoAddresses {
                host: host.to_string(),
            }),
        }
    }
}
