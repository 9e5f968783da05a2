use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub const CONNECTION_ERROR: &str = "Error de conexión. Verifica tu conexión a internet.";
pub const SERVER_FALLBACK: &str = "Error al comunicarse con el servidor";
pub const AUTH_FALLBACK: &str = "Error de autenticación";

/// Raw failure of a single REST call, before it is turned into user-facing text.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("HTTP {status}")]
    Status {
        status: StatusCode,
        body: Option<Value>,
    },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Connection(err.to_string())
        }
    }
}

/// Error surfaced by the domain services. `Display` is the single
/// human-readable string shown in notifications.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("{0}")]
    Connection(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{0}")]
    Unexpected(String),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

impl ApiError {
    /// Collapse the failure into one message, using `fallback` when the
    /// server gave nothing readable.
    pub fn normalize(self, fallback: &str) -> ServiceError {
        match self {
            ApiError::Connection(e) => {
                tracing::debug!("transport failure: {}", e);
                ServiceError::Connection(CONNECTION_ERROR.to_string())
            }
            ApiError::Status { status, body } => ServiceError::Server {
                status: status.as_u16(),
                message: error_message(body.as_ref(), fallback),
            },
            ApiError::Decode(e) => {
                tracing::error!("unexpected response body: {}", e);
                ServiceError::Unexpected(fallback.to_string())
            }
            ApiError::InvalidUrl(e) => ServiceError::Unexpected(e.to_string()),
        }
    }
}

/// Extract the message from an error body: `detail`, then `message`, then
/// `error`, then every field's messages joined with ", ".
pub fn error_message(body: Option<&Value>, fallback: &str) -> String {
    let Some(body) = body else {
        return fallback.to_string();
    };

    match body {
        Value::Object(map) => {
            for key in ["detail", "message", "error"] {
                if let Some(text) = map.get(key).and_then(Value::as_str) {
                    if !text.is_empty() {
                        return text.to_string();
                    }
                }
            }

            let mut messages = Vec::new();
            for value in map.values() {
                flatten_messages(value, &mut messages);
            }
            if messages.is_empty() {
                fallback.to_string()
            } else {
                messages.join(", ")
            }
        }
        Value::String(text) if !text.trim().is_empty() => text.clone(),
        Value::Array(items) => {
            let mut messages = Vec::new();
            for item in items {
                flatten_messages(item, &mut messages);
            }
            if messages.is_empty() {
                fallback.to_string()
            } else {
                messages.join(", ")
            }
        }
        _ => fallback.to_string(),
    }
}

fn flatten_messages(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| flatten_messages(v, out)),
        Value::Object(map) => map.values().for_each(|v| flatten_messages(v, out)),
        Value::Null => {}
        other => out.push(other.to_string()),
    }
}
