use crate::api::error::ServiceError;
use crate::infrastructure::session::SessionStore;
use crate::models::{EntityId, GeneracionRecomendaciones, Recomendacion};
use crate::services::RecomendacionApi;
use std::sync::Arc;
use tracing::{error, warn};

/// Totals reported by the last generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumenGeneracion {
    pub total_cajones: Option<u32>,
    pub total_objetos: Option<u32>,
    pub total_recomendaciones: Option<u32>,
}

/// Self-contained recommendations panel. Holds its own list and talks to
/// the recommendation endpoints only.
pub struct RecomendacionesWidget {
    api: Arc<dyn RecomendacionApi>,
    session: Arc<dyn SessionStore>,
    recomendaciones: Vec<Recomendacion>,
    loading: bool,
    error: Option<String>,
    generado_con_ia: bool,
    resumen: Option<ResumenGeneracion>,
}

impl RecomendacionesWidget {
    pub fn new(api: Arc<dyn RecomendacionApi>, session: Arc<dyn SessionStore>) -> Self {
        Self {
            api,
            session,
            recomendaciones: Vec::new(),
            loading: false,
            error: None,
            generado_con_ia: false,
            resumen: None,
        }
    }

    pub fn recomendaciones(&self) -> &[Recomendacion] {
        &self.recomendaciones
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generado_con_ia(&self) -> bool {
        self.generado_con_ia
    }

    pub fn resumen(&self) -> Option<ResumenGeneracion> {
        self.resumen
    }

    pub fn pendientes(&self) -> usize {
        self.recomendaciones.iter().filter(|r| !r.implementada).count()
    }

    /// Load the stored list when a session token exists. Failures are only
    /// logged; the panel simply stays empty.
    pub async fn mount(&mut self) -> bool {
        if self.session.token().is_none() {
            return false;
        }
        match self.api.listar().await {
            Ok(lista) => {
                self.recomendaciones = lista;
                true
            }
            Err(e) => {
                warn!("Error cargando recomendaciones: {}", e);
                false
            }
        }
    }

    /// Ask the backend for a fresh batch and replace the local list
    pub async fn generar(
        &mut self,
        usuario_id: Option<&EntityId>,
    ) -> Result<&[Recomendacion], ServiceError> {
        self.loading = true;
        self.error = None;
        let result = self.api.generar_automaticas(usuario_id).await;
        self.loading = false;

        match result {
            Ok(generacion) => {
                self.aplicar(generacion);
                Ok(self.recomendaciones.as_slice())
            }
            Err(e) => {
                error!("Error generando recomendaciones: {}", e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn aplicar(&mut self, generacion: GeneracionRecomendaciones) {
        self.recomendaciones = generacion.lista();
        self.generado_con_ia = generacion.generado_con_ia;
        self.resumen = Some(ResumenGeneracion {
            total_cajones: generacion.total_cajones,
            total_objetos: generacion.total_objetos,
            total_recomendaciones: generacion.total_recomendaciones_generadas,
        });
    }

    fn set_implementada(&mut self, id: &EntityId, valor: bool) -> Option<bool> {
        let rec = self
            .recomendaciones
            .iter_mut()
            .find(|r| r.id.as_ref() == Some(id))?;
        let anterior = rec.implementada;
        rec.implementada = valor;
        Some(anterior)
    }

    /// Flip the flag locally, then confirm with the backend; the flag is
    /// restored if the call fails. No re-fetch either way.
    pub async fn marcar_implementada(&mut self, id: &EntityId) -> Result<(), ServiceError> {
        self.cambiar(id, true).await
    }

    pub async fn desmarcar_implementada(&mut self, id: &EntityId) -> Result<(), ServiceError> {
        self.cambiar(id, false).await
    }

    async fn cambiar(&mut self, id: &EntityId, valor: bool) -> Result<(), ServiceError> {
        let anterior = self.set_implementada(id, valor);
        let result = if valor {
            self.api.marcar_implementada(id).await
        } else {
            self.api.desmarcar_implementada(id).await
        };
        if let Err(e) = &result {
            error!("Error marcando recomendación {}: {}", id, e);
            if let Some(anterior) = anterior {
                self.set_implementada(id, anterior);
            }
        }
        result
    }
}
