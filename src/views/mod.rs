pub mod gestion_cajon;
pub mod home;
pub mod render;
pub mod router;

pub use gestion_cajon::GestionCajonView;
pub use home::HomeView;
pub use router::Route;

use crate::api::error::ServiceError;
use crate::notifications::{Confirmation, Notifier};
use std::future::Future;
use tracing::info;

/// Fetch lifecycle of a view
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

/// Whether a load ran to completion or was abandoned on unmount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Completa,
    Cancelada,
}

/// Asks first; a refusal returns `Ok(false)` without calling `delete`.
pub(crate) async fn eliminar_confirmado<F, Fut>(
    confirm: &dyn Confirmation,
    notifier: &dyn Notifier,
    prompt: &str,
    exito: &str,
    delete: F,
) -> Result<bool, ServiceError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), ServiceError>>,
{
    if !confirm.confirm(prompt) {
        info!("Eliminación cancelada por el usuario");
        return Ok(false);
    }
    match delete().await {
        Ok(()) => {
            notifier.success(exito);
            Ok(true)
        }
        Err(e) => {
            notifier.error(&e.to_string());
            Err(e)
        }
    }
}
