use crate::api::client::{ApiClient, segment};
use crate::api::error::{SERVER_FALLBACK, ServiceError};
use crate::models::{Cajon, EntityId, EstadisticasCajon, ListResponse};
use crate::utils::validation::CajonInput;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait CajonApi: Send + Sync {
    /// All containers visible to the current user
    async fn list(&self) -> Result<Vec<Cajon>, ServiceError>;

    async fn get(&self, id: &EntityId) -> Result<Cajon, ServiceError>;

    async fn create(&self, input: &CajonInput) -> Result<Cajon, ServiceError>;

    async fn update(&self, id: &EntityId, input: &CajonInput) -> Result<Cajon, ServiceError>;

    async fn delete(&self, id: &EntityId) -> Result<(), ServiceError>;

    async fn estadisticas(&self, id: &EntityId) -> Result<EstadisticasCajon, ServiceError>;

    /// Ask the backend to reorganize a container; the result shape is server-defined
    async fn optimizar(&self, id: &EntityId) -> Result<Value, ServiceError>;
}

pub struct CajonService {
    api: Arc<ApiClient>,
}

impl CajonService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn detail_path(id: &EntityId) -> String {
        format!("/cajones/{}/", segment(id.as_str()))
    }
}

#[async_trait]
impl CajonApi for CajonService {
    async fn list(&self) -> Result<Vec<Cajon>, ServiceError> {
        let cajones: ListResponse<Cajon> = self
            .api
            .get("/cajones/")
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        Ok(cajones.into_vec())
    }

    async fn get(&self, id: &EntityId) -> Result<Cajon, ServiceError> {
        self.api
            .get(&Self::detail_path(id))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))
    }

    async fn create(&self, input: &CajonInput) -> Result<Cajon, ServiceError> {
        let cajon: Cajon = self
            .api
            .post("/cajones/", input)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("📦 Cajón creado: {} ({})", cajon.nombre, cajon.id);
        Ok(cajon)
    }

    async fn update(&self, id: &EntityId, input: &CajonInput) -> Result<Cajon, ServiceError> {
        let cajon: Cajon = self
            .api
            .put(&Self::detail_path(id), input)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("📦 Cajón actualizado: {} ({})", cajon.nombre, cajon.id);
        Ok(cajon)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ServiceError> {
        self.api
            .delete(&Self::detail_path(id))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("🗑️  Cajón eliminado: {}", id);
        Ok(())
    }

    async fn estadisticas(&self, id: &EntityId) -> Result<EstadisticasCajon, ServiceError> {
        self.api
            .get(&format!("/cajones/{}/estadisticas/", segment(id.as_str())))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))
    }

    async fn optimizar(&self, id: &EntityId) -> Result<Value, ServiceError> {
        self.api
            .post_empty(&format!("/cajones/{}/optimizar/", segment(id.as_str())))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))
    }
}
