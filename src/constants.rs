//! Application constants for the Magazine Store reconciler
//!
//! Constants are grouped by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Overrides `[api] base_url` from the config file
    pub const BASE_URL: &str = "MAGSTORE_BASE_URL";

    /// Log filter directive, same syntax as `RUST_LOG`
    pub const LOG: &str = "MAGSTORE_LOG";
}

/// Remote catalog service defaults
pub mod api {
    /// Default service root
    pub const DEFAULT_BASE_URL: &str = "http://magazinestore.azurewebsites.net";

    /// Default token endpoint
    pub const TOKEN_PATH: &str = "/api/token";

    /// Default category list endpoint
    pub const CATEGORIES_PATH: &str = "/api/categories/{token}";

    /// Default per-category magazine list endpoint
    pub const CATEGORY_PATH: &str = "/api/magazines/{token}/{category}";

    /// Default subscriber list endpoint
    pub const SUBSCRIBERS_PATH: &str = "/api/subscribers/{token}";

    /// Default answer endpoint
    pub const ANSWER_PATH: &str = "/api/answer/{token}";

    /// Placeholder replaced by the session token
    pub const TOKEN_PLACEHOLDER: &str = "{token}";

    /// Placeholder replaced by the (percent-encoded) category name
    pub const CATEGORY_PLACEHOLDER: &str = "{category}";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = concat!("magazine-store/", env!("CARGO_PKG_VERSION"));

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// TCP keep-alive interval
    pub const TCP_KEEPALIVE: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 16;
}

/// Configuration file locations
pub mod config {
    /// Project-local config file names, searched in order
    pub const LOCAL_FILES: &[&str] = &["./magazine-store.toml", "./appsettings.toml"];

    /// Directory under the user config dir
    pub const APP_DIR: &str = "magazine-store";

    /// File name under the user config dir
    pub const FILE_NAME: &str = "config.toml";
}

/// Token display
pub mod token {
    /// Characters of a token shown in logs before redaction
    pub const VISIBLE_PREFIX: usize = 4;
}
