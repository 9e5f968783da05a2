use super::{LoadOutcome, ViewState, eliminar_confirmado};
use crate::api::error::ServiceError;
use crate::forms::{CajonForm, FormError, ObjetoForm};
use crate::models::{Cajon, EntityId, EstadisticasCajon, Objeto};
use crate::notifications::{Confirmation, Notifier};
use crate::services::{CajonApi, ObjetoApi};
use crate::utils::occupancy::Occupancy;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const CAJON_NO_ENCONTRADO: &str = "Cajón no encontrado";

#[derive(Debug, Clone, PartialEq)]
pub struct GestionData {
    pub cajon: Cajon,
    pub objetos: Vec<Objeto>,
}

impl GestionData {
    pub fn ocupacion(&self) -> Occupancy {
        Occupancy::new(self.objetos.len(), self.cajon.capacidad_maxima)
    }

    /// Item count per type label, for the summary panel
    pub fn objetos_por_tipo(&self) -> BTreeMap<&'static str, usize> {
        let mut conteo = BTreeMap::new();
        for objeto in &self.objetos {
            *conteo.entry(objeto.tipo_objeto.label()).or_insert(0) += 1;
        }
        conteo
    }

    pub fn objeto(&self, id: &EntityId) -> Option<&Objeto> {
        self.objetos.iter().find(|o| &o.id == id)
    }
}

/// Detail page of a single container and the items it holds
pub struct GestionCajonView {
    cajon_id: EntityId,
    cajones: Arc<dyn CajonApi>,
    objetos: Arc<dyn ObjetoApi>,
    notifier: Arc<dyn Notifier>,
    state: ViewState<GestionData>,
    cancel: CancellationToken,
}

impl GestionCajonView {
    pub fn new(
        cajon_id: EntityId,
        cajones: Arc<dyn CajonApi>,
        objetos: Arc<dyn ObjetoApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cajon_id,
            cajones,
            objetos,
            notifier,
            state: ViewState::Loading,
            cancel: CancellationToken::new(),
        }
    }

    pub fn cajon_id(&self) -> &EntityId {
        &self.cajon_id
    }

    pub fn state(&self) -> &ViewState<GestionData> {
        &self.state
    }

    pub fn lifetime(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    pub async fn load(&mut self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelada;
        }
        debug!("Loading cajón {}", self.cajon_id);
        self.state = ViewState::Loading;

        let cajones = Arc::clone(&self.cajones);
        let objetos = Arc::clone(&self.objetos);
        let id = self.cajon_id.clone();
        let result = tokio::select! {
            _ = self.cancel.cancelled() => None,
            res = async { tokio::try_join!(cajones.get(&id), objetos.list_by_cajon(&id)) } => Some(res),
        };

        match result {
            None => LoadOutcome::Cancelada,
            Some(Ok((cajon, objetos))) => {
                // the backend may ignore the filter
                let objetos: Vec<Objeto> = objetos
                    .into_iter()
                    .filter(|o| o.pertenece_a(&self.cajon_id))
                    .collect();
                self.state = ViewState::Ready(GestionData { cajon, objetos });
                LoadOutcome::Completa
            }
            Some(Err(e)) if e.is_not_found() => {
                self.notifier.error(CAJON_NO_ENCONTRADO);
                self.state = ViewState::Failed(CAJON_NO_ENCONTRADO.to_string());
                LoadOutcome::Completa
            }
            Some(Err(e)) => {
                error!("Error cargando cajón {}: {}", self.cajon_id, e);
                self.notifier.error(&e.to_string());
                self.state = ViewState::Failed(e.to_string());
                LoadOutcome::Completa
            }
        }
    }

    pub fn abrir_editar_cajon(&self) -> Option<CajonForm> {
        self.state.ready().map(|data| CajonForm::editar(&data.cajon))
    }

    pub fn abrir_nuevo_objeto(&self) -> ObjetoForm {
        ObjetoForm::con_cajon(self.cajon_id.clone())
    }

    pub fn abrir_editar_objeto(&self, id: &EntityId) -> Option<ObjetoForm> {
        self.state.ready()?.objeto(id).map(ObjetoForm::editar)
    }

    pub async fn guardar_cajon(&mut self, form: &mut CajonForm) -> Result<Cajon, FormError> {
        let cajon = form.submit(self.cajones.as_ref(), self.notifier.as_ref()).await?;
        self.load().await;
        Ok(cajon)
    }

    pub async fn guardar_objeto(&mut self, form: &mut ObjetoForm) -> Result<Objeto, FormError> {
        let objeto = form.submit(self.objetos.as_ref(), self.notifier.as_ref()).await?;
        self.load().await;
        Ok(objeto)
    }

    pub async fn eliminar_objeto(
        &mut self,
        id: &EntityId,
        confirm: &dyn Confirmation,
    ) -> Result<bool, ServiceError> {
        let nombre = self
            .state
            .ready()
            .and_then(|data| data.objeto(id))
            .map(|o| o.nombre.clone())
            .unwrap_or_else(|| id.to_string());
        let prompt = format!("¿Estás seguro de que quieres eliminar el objeto \"{}\"?", nombre);

        let objetos = Arc::clone(&self.objetos);
        let borrado = eliminar_confirmado(
            confirm,
            self.notifier.as_ref(),
            &prompt,
            "Objeto eliminado exitosamente",
            || async move { objetos.delete(id).await },
        )
        .await?;
        if borrado {
            self.load().await;
        }
        Ok(borrado)
    }

    /// Move an item to another container (or none), then reload
    pub async fn mover_objeto(
        &mut self,
        objeto_id: &EntityId,
        destino: Option<&EntityId>,
    ) -> Result<Objeto, ServiceError> {
        match self.objetos.mover(objeto_id, destino).await {
            Ok(objeto) => {
                self.notifier.success("Objeto movido exitosamente");
                self.load().await;
                Ok(objeto)
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                Err(e)
            }
        }
    }

    /// Server-side statistics; does not touch the view state
    pub async fn estadisticas(&self) -> Result<EstadisticasCajon, ServiceError> {
        self.cajones.estadisticas(&self.cajon_id).await.inspect_err(|e| {
            self.notifier.error(&e.to_string());
        })
    }

    pub async fn optimizar(&mut self) -> Result<Value, ServiceError> {
        match self.cajones.optimizar(&self.cajon_id).await {
            Ok(resultado) => {
                info!("🧠 Cajón {} optimizado", self.cajon_id);
                self.notifier.success("Cajón optimizado exitosamente");
                self.load().await;
                Ok(resultado)
            }
            Err(e) => {
                self.notifier.error(&e.to_string());
                Err(e)
            }
        }
    }
}

impl Drop for GestionCajonView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
