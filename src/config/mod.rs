use std::env;
use std::path::PathBuf;

/// Client configuration for the cajones REST backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path is joined onto (default: "http://127.0.0.1:8000/api/v1")
    pub api_base_url: String,

    /// Where the auth token and user are persisted between runs
    pub session_file: PathBuf,

    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api/v1".to_string(),
            session_file: PathBuf::from(".cajones_session.json"),
            user_agent: format!("sistema-cajones/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            api_base_url: env::var("CAJONES_API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(default.api_base_url),

            session_file: env::var("CAJONES_SESSION_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default.session_file),

            user_agent: env::var("CAJONES_USER_AGENT").unwrap_or(default.user_agent),
        }
    }

    /// Config pointing at a local development backend
    pub fn development() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            ..Self::default()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into(),
            ..Self::default()
        }
    }
}
