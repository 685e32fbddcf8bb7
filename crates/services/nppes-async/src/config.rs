use std::time::Duration;

/// Default NPPES registry base URL
pub const NPPES_DEFAULT_BASE: &str = "https://npiregistry.cms.hhs.gov/api";
/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Configuration for the NPPES client
///
/// The registry needs no credentials, so the configuration only carries the
/// endpoint and the timeouts applied to each request.
#[derive(Clone, Debug)]
pub struct NppesConfig {
    api_base: String,
    request_timeout: Duration,
    connect_timeout: Duration,
}

/// Helper to read and normalize an env var (trim + filter empty).
fn env_trimmed(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Default for NppesConfig {
    fn default() -> Self {
        let api_base = env_trimmed("NPPES_BASE_URL").unwrap_or_else(|| NPPES_DEFAULT_BASE.into());

        let request_timeout = env_trimmed("NPPES_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_base,
            request_timeout: Duration::from_secs(request_timeout),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }
}

impl NppesConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `NPPES_BASE_URL` for a custom registry base URL
    ///   (defaults to `https://npiregistry.cms.hhs.gov/api`)
    /// - `NPPES_TIMEOUT_SECS` for the request timeout (defaults to 10)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the per-request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets the connect timeout used when building the HTTP client
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the NPPES client
///
/// Implement this trait to point the client at a different endpoint or to
/// change how timeouts are chosen.
pub trait Config: Send + Sync {
    /// Constructs the full URL for an API path
    fn url(&self, path: &str) -> String;

    /// Timeout applied to each request, covering connect through body read
    fn request_timeout(&self) -> Duration;

    /// Timeout for establishing the TCP/TLS connection
    fn connect_timeout(&self) -> Duration;
}

impl Config for NppesConfig {
    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _base = EnvGuard::set("NPPES_BASE_URL", "https://registry.test/api");
        let _timeout = EnvGuard::set("NPPES_TIMEOUT_SECS", "3");

        let cfg = NppesConfig::new();
        assert_eq!(cfg.api_base(), "https://registry.test/api");
        assert_eq!(cfg.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    #[serial(env)]
    fn config_defaults() {
        let _base = EnvGuard::remove("NPPES_BASE_URL");
        let _timeout = EnvGuard::remove("NPPES_TIMEOUT_SECS");

        let cfg = NppesConfig::new();
        assert_eq!(cfg.api_base(), NPPES_DEFAULT_BASE);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(
            cfg.connect_timeout(),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }

    #[test]
    #[serial(env)]
    fn config_ignores_unparseable_timeout() {
        let _timeout = EnvGuard::set("NPPES_TIMEOUT_SECS", "soon");
        let cfg = NppesConfig::new();
        assert_eq!(cfg.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let _zero = EnvGuard::set("NPPES_TIMEOUT_SECS", "0");
        let cfg = NppesConfig::new();
        assert_eq!(cfg.request_timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn url_joins_without_double_slashes() {
        let cfg = NppesConfig::new().with_api_base("https://registry.test/api/");
        assert_eq!(cfg.url("/"), "https://registry.test/api/");

        let cfg = NppesConfig::new().with_api_base("https://registry.test/api");
        assert_eq!(cfg.url(""), "https://registry.test/api/");
    }

    #[test]
    fn builder_methods() {
        let cfg = NppesConfig::new()
            .with_api_base("http://127.0.0.1:9")
            .with_request_timeout(Duration::from_millis(250))
            .with_connect_timeout(Duration::from_millis(100));

        assert_eq!(cfg.api_base(), "http://127.0.0.1:9");
        assert_eq!(cfg.request_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.connect_timeout(), Duration::from_millis(100));
    }
}
