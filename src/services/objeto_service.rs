use crate::api::client::{ApiClient, segment};
use crate::api::error::{SERVER_FALLBACK, ServiceError};
use crate::models::{EntityId, ListResponse, Objeto, Opcion, Tamanio, TipoObjeto};
use crate::utils::validation::ObjetoInput;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Query parameters accepted by `GET /objetos/`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjetoFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cajon: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo_objeto: Option<TipoObjeto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tamanio: Option<Tamanio>,
}

impl ObjetoFilter {
    pub fn por_cajon(cajon: EntityId) -> Self {
        Self {
            cajon: Some(cajon),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct MoverRequest<'a> {
    cajon: Option<&'a EntityId>,
}

#[async_trait]
pub trait ObjetoApi: Send + Sync {
    async fn list(&self, filter: &ObjetoFilter) -> Result<Vec<Objeto>, ServiceError>;

    async fn list_by_cajon(&self, cajon: &EntityId) -> Result<Vec<Objeto>, ServiceError> {
        self.list(&ObjetoFilter::por_cajon(cajon.clone())).await
    }

    async fn get(&self, id: &EntityId) -> Result<Objeto, ServiceError>;

    async fn create(&self, input: &ObjetoInput) -> Result<Objeto, ServiceError>;

    async fn update(&self, id: &EntityId, input: &ObjetoInput) -> Result<Objeto, ServiceError>;

    async fn delete(&self, id: &EntityId) -> Result<(), ServiceError>;

    async fn buscar(&self, query: &str) -> Result<Vec<Objeto>, ServiceError>;

    /// Reassign an item; `None` leaves it without container
    async fn mover(&self, id: &EntityId, cajon: Option<&EntityId>)
    -> Result<Objeto, ServiceError>;

    /// Never fails: falls back to the built-in list
    async fn tipos_objeto(&self) -> Vec<Opcion>;

    /// Never fails: falls back to the built-in list
    async fn tamanios(&self) -> Vec<Opcion>;
}

pub struct ObjetoService {
    api: Arc<ApiClient>,
}

impl ObjetoService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    fn detail_path(id: &EntityId) -> String {
        format!("/objetos/{}/", segment(id.as_str()))
    }
}

#[async_trait]
impl ObjetoApi for ObjetoService {
    async fn list(&self, filter: &ObjetoFilter) -> Result<Vec<Objeto>, ServiceError> {
        let objetos: ListResponse<Objeto> = self
            .api
            .get_with_query("/objetos/", filter)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        Ok(objetos.into_vec())
    }

    async fn get(&self, id: &EntityId) -> Result<Objeto, ServiceError> {
        self.api
            .get(&Self::detail_path(id))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))
    }

    async fn create(&self, input: &ObjetoInput) -> Result<Objeto, ServiceError> {
        let objeto: Objeto = self
            .api
            .post("/objetos/", input)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("🧸 Objeto creado: {} ({})", objeto.nombre, objeto.id);
        Ok(objeto)
    }

    async fn update(&self, id: &EntityId, input: &ObjetoInput) -> Result<Objeto, ServiceError> {
        let objeto: Objeto = self
            .api
            .put(&Self::detail_path(id), input)
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("🧸 Objeto actualizado: {} ({})", objeto.nombre, objeto.id);
        Ok(objeto)
    }

    async fn delete(&self, id: &EntityId) -> Result<(), ServiceError> {
        self.api
            .delete(&Self::detail_path(id))
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        info!("🗑️  Objeto eliminado: {}", id);
        Ok(())
    }

    async fn buscar(&self, query: &str) -> Result<Vec<Objeto>, ServiceError> {
        let objetos: ListResponse<Objeto> = self
            .api
            .get_with_query("/objetos/buscar/", &[("q", query)])
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        Ok(objetos.into_vec())
    }

    async fn mover(
        &self,
        id: &EntityId,
        cajon: Option<&EntityId>,
    ) -> Result<Objeto, ServiceError> {
        let objeto: Objeto = self
            .api
            .post(
                &format!("/objetos/{}/mover/", segment(id.as_str())),
                &MoverRequest { cajon },
            )
            .await
            .map_err(|e| e.normalize(SERVER_FALLBACK))?;
        match cajon {
            Some(destino) => info!("🔀 Objeto {} movido al cajón {}", id, destino),
            None => info!("🔀 Objeto {} quedó sin cajón", id),
        }
        Ok(objeto)
    }

    async fn tipos_objeto(&self) -> Vec<Opcion> {
        match self
            .api
            .get::<ListResponse<Opcion>>("/configuracion/tipos-objeto/")
            .await
        {
            Ok(opciones) => opciones.into_vec(),
            Err(e) => {
                warn!("⚠️  tipos-objeto unavailable ({}), using built-in list", e);
                TipoObjeto::opciones()
            }
        }
    }

    async fn tamanios(&self) -> Vec<Opcion> {
        match self
            .api
            .get::<ListResponse<Opcion>>("/configuracion/tamanios/")
            .await
        {
            Ok(opciones) => opciones.into_vec(),
            Err(e) => {
                warn!("⚠️  tamanios unavailable ({}), using built-in list", e);
                Tamanio::opciones()
            }
        }
    }
}
