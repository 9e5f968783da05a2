pub mod api;
pub mod config;
pub mod forms;
pub mod infrastructure;
pub mod models;
pub mod notifications;
pub mod services;
pub mod utils;
pub mod views;
pub mod widgets;

use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::infrastructure::session::SessionStore;
use crate::models::EntityId;
use crate::notifications::Notifier;
use crate::services::{
    AuthService, CajonApi, CajonService, ObjetoApi, ObjetoService, RecomendacionApi,
    RecomendacionService,
};
use crate::views::{GestionCajonView, HomeView};
use crate::widgets::RecomendacionesWidget;
use std::sync::Arc;

/// Everything a view needs, built once and handed down explicitly
#[derive(Clone)]
pub struct AppContext {
    pub config: ClientConfig,
    pub session: Arc<dyn SessionStore>,
    pub notifier: Arc<dyn Notifier>,
    pub auth: Arc<AuthService>,
    pub cajones: Arc<dyn CajonApi>,
    pub objetos: Arc<dyn ObjetoApi>,
    pub recomendaciones: Arc<dyn RecomendacionApi>,
}

impl AppContext {
    pub fn home_view(&self) -> HomeView {
        HomeView::new(
            Arc::clone(&self.cajones),
            Arc::clone(&self.objetos),
            Arc::clone(&self.notifier),
        )
    }

    pub fn gestion_cajon_view(&self, cajon_id: EntityId) -> GestionCajonView {
        GestionCajonView::new(
            cajon_id,
            Arc::clone(&self.cajones),
            Arc::clone(&self.objetos),
            Arc::clone(&self.notifier),
        )
    }

    pub fn recomendaciones_widget(&self) -> RecomendacionesWidget {
        RecomendacionesWidget::new(
            Arc::clone(&self.recomendaciones),
            Arc::clone(&self.session),
        )
    }
}

pub fn create_context(
    config: ClientConfig,
    session: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
) -> Result<AppContext, ApiError> {
    let api = Arc::new(ApiClient::new(&config, Arc::clone(&session))?);
    Ok(AppContext {
        auth: Arc::new(AuthService::new(Arc::clone(&api), Arc::clone(&session))),
        cajones: Arc::new(CajonService::new(Arc::clone(&api))),
        objetos: Arc::new(ObjetoService::new(Arc::clone(&api))),
        recomendaciones: Arc::new(RecomendacionService::new(api)),
        config,
        session,
        notifier,
    })
}
