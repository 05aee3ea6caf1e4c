use std::time::Duration;

use crate::error::TryOnError;

/// Default base URL of the try-on server for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Client-side timeout applied to every try-on request.
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
/// Timeout for downloading one garment image.
pub const DEFAULT_IMAGE_TIMEOUT_MS: u64 = 15_000;
/// Largest garment image accepted from remote storage.
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Try-on client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnConfig {
    /// Base HTTP URL, e.g. `http://host:5000` (no trailing slash).
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Return a mock result when the server is unreachable.
    pub mock_fallback: bool,
    /// Per-download timeout for remote images.
    pub image_timeout: Duration,
    /// Size cap for a single downloaded image.
    pub max_image_bytes: usize,
    /// Hosts images may be downloaded from. A leading `.` is not needed;
    /// subdomains of a listed host are accepted. Empty disables downloads.
    pub allowed_image_hosts: Vec<String>,
}

impl Default for TryOnConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            mock_fallback: false,
            image_timeout: Duration::from_millis(DEFAULT_IMAGE_TIMEOUT_MS),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            allowed_image_hosts: Vec::new(),
        }
    }
}

impl TryOnConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: normalize_base_url(&api_url.into()),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                 |
    /// |--------------------------|-------------------------|
    /// | `TRYON_API_URL`          | `http://localhost:5000` |
    /// | `TRYON_TIMEOUT_MS`       | `60000`                 |
    /// | `TRYON_MOCK_FALLBACK`    | `false`                 |
    /// | `TRYON_IMAGE_TIMEOUT_MS` | `15000`                 |
    /// | `TRYON_MAX_IMAGE_BYTES`  | `10485760`              |
    /// | `TRYON_IMAGE_HOSTS`      | (none)                  |
    pub fn from_env() -> Result<Self, TryOnError> {
        let api_url = std::env::var("TRYON_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let timeout_ms: u64 = env_number("TRYON_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        let image_timeout_ms: u64 = env_number("TRYON_IMAGE_TIMEOUT_MS", DEFAULT_IMAGE_TIMEOUT_MS)?;
        let max_image_bytes: usize = env_number("TRYON_MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)?;

        let allowed_image_hosts = std::env::var("TRYON_IMAGE_HOSTS")
            .map(|v| parse_host_list(&v))
            .unwrap_or_default();

        let mock_fallback = match std::env::var("TRYON_MOCK_FALLBACK") {
            Ok(v) => parse_bool(&v).ok_or_else(|| {
                TryOnError::Config(format!("TRYON_MOCK_FALLBACK must be true or false, got '{v}'"))
            })?,
            Err(_) => false,
        };

        Ok(Self {
            api_url: normalize_base_url(&api_url),
            timeout: Duration::from_millis(timeout_ms),
            mock_fallback,
            image_timeout: Duration::from_millis(image_timeout_ms),
            max_image_bytes,
            allowed_image_hosts,
        })
    }

    /// Longest a try-on call can take: one round of image downloads (they
    /// run concurrently) followed by generation.
    pub fn worst_case_duration(&self) -> Duration {
        self.image_timeout + self.timeout
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_mock_fallback(mut self, enabled: bool) -> Self {
        self.mock_fallback = enabled;
        self
    }

    pub fn with_allowed_image_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_image_hosts = hosts
            .into_iter()
            .map(|h| normalize_host(&h.into()))
            .filter(|h| !h.is_empty())
            .collect();
        self
    }

    pub fn with_max_image_bytes(mut self, max: usize) -> Self {
        self.max_image_bytes = max;
        self
    }
}

fn env_number<T: std::str::FromStr + ToString>(key: &str, default: T) -> Result<T, TryOnError> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| TryOnError::Config(format!("{key} must be a non-negative integer")))
}

fn parse_host_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(normalize_host)
        .filter(|h| !h.is_empty())
        .collect()
}

fn normalize_host(h: &str) -> String {
    h.trim().trim_start_matches('.').to_ascii_lowercase()
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timeout_is_sixty_seconds() {
        assert_eq!(TryOnConfig::default().timeout, Duration::from_secs(60));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(TryOnConfig::new("http://gpu:5000/").api_url, "http://gpu:5000");
    }

    #[test]
    fn host_list_is_normalized() {
        assert_eq!(
            parse_host_list(" Abc.supabase.co, .cdn.example ,,"),
            vec!["abc.supabase.co".to_string(), "cdn.example".to_string()]
        );
    }

    #[test]
    fn downloads_are_disabled_by_default() {
        assert!(TryOnConfig::default().allowed_image_hosts.is_empty());
    }

    #[test]
    fn worst_case_covers_downloads_and_generation() {
        assert_eq!(
            TryOnConfig::default().worst_case_duration(),
            Duration::from_millis(DEFAULT_IMAGE_TIMEOUT_MS + DEFAULT_TIMEOUT_MS)
        );
    }

    #[test]
    fn bool_parsing() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
