use atelier_fal::client::DEFAULT_BASE_URL as FAL_DEFAULT_BASE_URL;
use atelier_pollinations::client::DEFAULT_API_URL as POLLINATIONS_DEFAULT_URL;

/// Server configuration loaded from environment variables.
///
/// All fields except the generation API key have defaults suitable for
/// local development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `300` — generation runs
    /// can take minutes and the proxy blocks on the single upstream call).
    pub request_timeout_secs: u64,
    /// Base URL of the image generation run endpoint.
    pub fal_base_url: String,
    /// API key for the image generation endpoint. Required.
    pub fal_key: String,
    /// URL of the prompt-rewriting completion endpoint.
    pub pollinations_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `300`                            |
    /// | `FAL_BASE_URL`         | `https://fal.run`                |
    /// | `FAL_KEY`              | (required)                       |
    /// | `POLLINATIONS_URL`     | `https://text.pollinations.ai/openai` |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let fal_base_url =
            std::env::var("FAL_BASE_URL").unwrap_or_else(|_| FAL_DEFAULT_BASE_URL.into());

        let fal_key = std::env::var("FAL_KEY").expect("FAL_KEY must be set");

        let pollinations_url =
            std::env::var("POLLINATIONS_URL").unwrap_or_else(|_| POLLINATIONS_DEFAULT_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            fal_base_url,
            fal_key,
            pollinations_url,
        }
    }
}
