use crate::api::client::{ApiClient, segment};
use crate::api::error::{SERVER_FALLBACK, ServiceError};
use crate::models::{
    EntityId, EstadisticasGenerales, GeneracionRecomendaciones, ListResponse, Recomendacion,
};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

const BASE: &str = "/cajones_inteligentes/recomendaciones/";

#[derive(Serialize)]
struct GenerarRequest {
    /// Compared server-side against the integer user key
    #[serde(skip_serializing_if = "Option::is_none")]
    usuario_id: Option<Value>,
}

#[async_trait]
pub trait RecomendacionApi: Send + Sync {
    /// Have the backend analyse every container and produce new suggestions
    async fn generar_automaticas(
        &self,
        usuario_id: Option<&EntityId>,
    ) -> Result<GeneracionRecomendaciones, ServiceError>;

    async fn listar(&self) -> Result<Vec<Recomendacion>, ServiceError>;

    async fn pendientes(&self) -> Result<Vec<Recomendacion>, ServiceError>;

    async fn marcar_implementada(&self, id: &EntityId) -> Result<(), ServiceError>;

    async fn desmarcar_implementada(&self, id: &EntityId) -> Result<(), ServiceError>;

    async fn estadisticas_generales(&self) -> Result<EstadisticasGenerales, ServiceError>;
}

pub struct RecomendacionService {
    api: Arc<ApiClient>,
}

impl RecomendacionService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl RecomendacionApi for RecomendacionService {
    async fn generar_automaticas(
        &self,
        usuario_id: Option<&EntityId>,
    ) -> Result<GeneracionRecomendaciones, ServiceError> {
        let resultado: GeneracionRecomendaciones = self
            .api
            .post(
                &format!("{BASE}generar_automaticas/"),
                &GenerarRequest {
                    usuario_id: usuario_id.map(EntityId::to_json),
                },
            )
            .await
            .map_err(|e| e.normalize("Error al generar recomendaciones"))?;
        info!(
            "🤖 {} recomendaciones generadas (IA: {})",
            resultado.lista().len(),
            resultado.generado_con_ia
        );
        Ok(resultado)
    }

    async fn listar(&self) -> Result<Vec<Recomendacion>, ServiceError> {
        let lista: ListResponse<Recomendacion> = self
            .api
            .get(BASE)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        Ok(lista.into_vec())
    }

    async fn pendientes(&self) -> Result<Vec<Recomendacion>, ServiceError> {
        let lista: ListResponse<Recomendacion> = self
            .api
            .get(&format!("{BASE}pendientes/"))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        Ok(lista.into_vec())
    }

    async fn marcar_implementada(&self, id: &EntityId) -> Result<(), ServiceError> {
        let _: Value = self
            .api
            .post_empty(&format!("{BASE}{}/marcar_implementada/", segment(id.as_str())))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("✅ Recomendación {} implementada", id);
        Ok(())
    }

    async fn desmarcar_implementada(&self, id: &EntityId) -> Result<(), ServiceError> {
        let _: Value = self
            .api
            .post_empty(&format!(
                "{BASE}{}/desmarcar_implementada/",
                segment(id.as_str())
            ))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("↩️  Recomendación {} pendiente de nuevo", id);
        Ok(())
    }

    async fn estadisticas_generales(&self) -> Result<EstadisticasGenerales, ServiceError> {
        self.api
            .get("/estadisticas/generales/")
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))
    }
}
