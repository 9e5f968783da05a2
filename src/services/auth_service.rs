use crate::api::client::ApiClient;
use crate::api::error::{AUTH_FALLBACK, ServiceError};
use crate::infrastructure::session::{Session, SessionStore};
use crate::models::{LoginResponse, User};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

pub struct AuthService {
    api: Arc<ApiClient>,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<ApiClient>, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    /// Log in and persist the returned token and user
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ServiceError> {
        let response: LoginResponse = self
            .api
            .post("/auth/login/", credentials)
            .await
            .map_err(|e| e.normalize(AUTH_FALLBACK))?;

        if let Some(token) = response.token.clone().filter(|t| !t.is_empty()) {
            let session = Session {
                token,
                user: response.user.clone(),
            };
            self.session
                .save(&session)
                .map_err(|e| ServiceError::Unexpected(e.to_string()))?;
            info!("🔓 Sesión iniciada como {}", credentials.username);
        }
        Ok(response)
    }

    /// Tell the backend, then drop the local session whatever it answered
    pub async fn logout(&self) {
        if let Err(e) = self.api.post_empty::<Value>("/auth/logout/").await {
            warn!("Ignoring logout error: {}", e);
        }
        if let Err(e) = self.session.clear() {
            warn!("Could not clear session: {}", e);
        }
        info!("🔒 Sesión cerrada");
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Value, ServiceError> {
        self.api
            .post("/auth/register/", request)
            .await
            .map_err(|e| e.normalize(AUTH_FALLBACK))
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.session.current_user()
    }

    pub fn token(&self) -> Option<String> {
        self.session.token()
    }
}
