//! Runtime configuration with sensible defaults.

// Layer 1: Standard library
use std::time::Duration;

// Layer 2: Third-party
use serde::{Deserialize, Serialize};

// Layer 3: Internal
use crate::invocation::DEFAULT_INVOCATION_TIMEOUT;

/// Default local dispatcher retry budget before surfacing `unreachable`.
pub const DEFAULT_DISPATCH_RETRIES: u32 = 2;

/// Default timeout for graceful node shutdown.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default proxy retry ceiling (see [`crate::proxy::ProxyBackoff`]).
pub const DEFAULT_PROXY_MAX_RETRIES: u32 = 6;

/// Default proxy backoff base delay.
pub const DEFAULT_PROXY_BASE_DELAY: Duration = Duration::from_millis(100);

/// Default proxy backoff ceiling.
pub const DEFAULT_PROXY_MAX_DELAY: Duration = Duration::from_secs(5);

/// Node-wide configuration for the virtual actor runtime.
///
/// # Example
/// ```rust
/// use vactor::system::RuntimeConfig;
/// use std::time::Duration;
///
/// let config = RuntimeConfig::builder()
///     .with_invocation_timeout(Duration::from_secs(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.invocation_timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Default deadline attached to an invocation when the caller does not
    /// specify one.
    pub invocation_timeout: Duration,

    /// How many times the dispatcher retries `unreachable`/`timeout`
    /// locally before surfacing the failure to the caller.
    pub dispatch_retries: u32,

    /// Timeout for graceful node shutdown: how long `Node::shutdown` waits
    /// for in-flight dispatches to drain before forcing eviction.
    pub shutdown_timeout: Duration,

    /// Ceiling on proxy-side retries after a `Timeout`/`Unreachable` reply.
    pub proxy_max_retries: u32,

    /// Starting delay for the proxy's exponential backoff.
    pub proxy_base_delay: Duration,

    /// Ceiling for the proxy's exponential backoff.
    pub proxy_max_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            invocation_timeout: DEFAULT_INVOCATION_TIMEOUT,
            dispatch_retries: DEFAULT_DISPATCH_RETRIES,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            proxy_max_retries: DEFAULT_PROXY_MAX_RETRIES,
            proxy_base_delay: DEFAULT_PROXY_BASE_DELAY,
            proxy_max_delay: DEFAULT_PROXY_MAX_DELAY,
        }
    }
}

impl RuntimeConfig {
    /// Starts a fluent builder seeded with the defaults.
    pub fn builder() -> RuntimeConfigBuilder {
        RuntimeConfigBuilder::default()
    }

    /// Validates the configuration, rejecting zero-valued durations and
    /// retry budgets that would make the runtime silently never retry.
    pub fn validate(&self) -> Result<(), String> {
        if self.invocation_timeout.is_zero() {
            return Err("invocation_timeout must be > 0".to_string());
        }
        if self.shutdown_timeout.is_zero() {
            return Err("shutdown_timeout must be > 0".to_string());
        }
        if self.proxy_base_delay.is_zero() {
            return Err("proxy_base_delay must be > 0".to_string());
        }
        if self.proxy_max_delay < self.proxy_base_delay {
            return Err("proxy_max_delay must be >= proxy_base_delay".to_string());
        }
        Ok(())
    }
}

/// Fluent builder for [`RuntimeConfig`].
#[derive(Debug, Default)]
pub struct RuntimeConfigBuilder {
    config: RuntimeConfig,
}

impl RuntimeConfigBuilder {
    /// Overrides the default invocation timeout.
    pub fn with_invocation_timeout(mut self, timeout: Duration) -> Self {
        self.config.invocation_timeout = timeout;
        self
    }

    /// Overrides the dispatcher's local retry budget.
    pub fn with_dispatch_retries(mut self, retries: u32) -> Self {
        self.config.dispatch_retries = retries;
        self
    }

    /// Overrides the graceful shutdown timeout.
    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    /// Overrides the proxy's retry ceiling.
    pub fn with_proxy_max_retries(mut self, retries: u32) -> Self {
        self.config.proxy_max_retries = retries;
        self
    }

    /// Overrides the proxy's backoff base delay.
    pub fn with_proxy_base_delay(mut self, delay: Duration) -> Self {
        self.config.proxy_base_delay = delay;
        self
    }

    /// Overrides the proxy's backoff ceiling.
    pub fn with_proxy_max_delay(mut self, delay: Duration) -> Self {
        self.config.proxy_max_delay = delay;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<RuntimeConfig, String> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = RuntimeConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = RuntimeConfig::builder()
            .with_invocation_timeout(Duration::from_secs(1))
            .with_dispatch_retries(5)
            .build()
            .unwrap();
        assert_eq!(config.invocation_timeout, Duration::from_secs(1));
        assert_eq!(config.dispatch_retries, 5);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = RuntimeConfig::builder()
            .with_invocation_timeout(Duration::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_max_delay_below_base_rejected() {
        let result = RuntimeConfig::builder()
            .with_proxy_base_delay(Duration::from_secs(10))
            .with_proxy_max_delay(Duration::from_secs(1))
            .build();
        assert!(result.is_err());
    }
}
