use super::{LoadOutcome, ViewState, eliminar_confirmado};
use crate::api::error::ServiceError;
use crate::forms::{CajonForm, FormError, ObjetoForm};
use crate::models::{Cajon, EntityId, Objeto};
use crate::notifications::{Confirmation, Notifier};
use crate::services::{CajonApi, ObjetoApi, ObjetoFilter};
use crate::utils::occupancy::Occupancy;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// One dashboard card
#[derive(Debug, Clone, PartialEq)]
pub struct TarjetaCajon {
    pub cajon: Cajon,
    pub ocupacion: Occupancy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resumen {
    pub total_cajones: usize,
    pub total_objetos: usize,
    pub capacidad_total: u64,
    pub objetos_sin_cajon: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomeData {
    pub cajones: Vec<Cajon>,
    pub objetos: Vec<Objeto>,
}

impl HomeData {
    pub fn objetos_en(&self, cajon_id: &EntityId) -> usize {
        self.objetos.iter().filter(|o| o.pertenece_a(cajon_id)).count()
    }

    pub fn tarjetas(&self) -> Vec<TarjetaCajon> {
        self.cajones
            .iter()
            .map(|cajon| TarjetaCajon {
                ocupacion: Occupancy::new(self.objetos_en(&cajon.id), cajon.capacidad_maxima),
                cajon: cajon.clone(),
            })
            .collect()
    }

    pub fn resumen(&self) -> Resumen {
        Resumen {
            total_cajones: self.cajones.len(),
            total_objetos: self.objetos.len(),
            capacidad_total: self
                .cajones
                .iter()
                .map(|c| u64::from(c.capacidad_maxima))
                .sum(),
            objetos_sin_cajon: self.objetos.iter().filter(|o| o.cajon.is_none()).count(),
        }
    }

    pub fn cajon(&self, id: &EntityId) -> Option<&Cajon> {
        self.cajones.iter().find(|c| &c.id == id)
    }

    pub fn objeto(&self, id: &EntityId) -> Option<&Objeto> {
        self.objetos.iter().find(|o| &o.id == id)
    }
}

/// Dashboard: every container with its occupancy, plus all items
pub struct HomeView {
    cajones: Arc<dyn CajonApi>,
    objetos: Arc<dyn ObjetoApi>,
    notifier: Arc<dyn Notifier>,
    state: ViewState<HomeData>,
    cancel: CancellationToken,
}

impl HomeView {
    pub fn new(
        cajones: Arc<dyn CajonApi>,
        objetos: Arc<dyn ObjetoApi>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            cajones,
            objetos,
            notifier,
            state: ViewState::Loading,
            cancel: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &ViewState<HomeData> {
        &self.state
    }

    /// Token tied to this view's lifetime; cancelling it is the same as `unmount`
    pub fn lifetime(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn unmount(&self) {
        self.cancel.cancel();
    }

    /// Fetch containers and items in parallel. The state is `Loading`
    /// until the fetch settles, reloads included. After `unmount` the
    /// results are dropped.
    pub async fn load(&mut self) -> LoadOutcome {
        if self.cancel.is_cancelled() {
            return LoadOutcome::Cancelada;
        }
        debug!("Loading home view");
        self.state = ViewState::Loading;

        let cajones = Arc::clone(&self.cajones);
        let objetos = Arc::clone(&self.objetos);
        let todos = ObjetoFilter::default();
        let result = tokio::select! {
            _ = self.cancel.cancelled() => None,
            res = async { tokio::try_join!(cajones.list(), objetos.list(&todos)) } => Some(res),
        };

        match result {
            None => {
                debug!("Home view unmounted during load");
                LoadOutcome::Cancelada
            }
            Some(Ok((cajones, objetos))) => {
                info!("🏠 {} cajones, {} objetos", cajones.len(), objetos.len());
                self.state = ViewState::Ready(HomeData { cajones, objetos });
                LoadOutcome::Completa
            }
            Some(Err(e)) => {
                error!("Error cargando datos: {}", e);
                self.notifier.error(&e.to_string());
                self.state = ViewState::Failed(e.to_string());
                LoadOutcome::Completa
            }
        }
    }

    pub fn abrir_nuevo_cajon(&self) -> CajonForm {
        CajonForm::new()
    }

    /// Edit form pre-filled from the loaded list
    pub fn abrir_editar_cajon(&self, id: &EntityId) -> Option<CajonForm> {
        self.state.ready()?.cajon(id).map(CajonForm::editar)
    }

    pub fn abrir_nuevo_objeto(&self) -> ObjetoForm {
        ObjetoForm::new()
    }

    pub fn abrir_editar_objeto(&self, id: &EntityId) -> Option<ObjetoForm> {
        self.state.ready()?.objeto(id).map(ObjetoForm::editar)
    }

    /// Submit a create or edit form, then reload everything
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

    /// Returns `Ok(false)` when the user declines
    pub async fn eliminar_cajon(
        &mut self,
        id: &EntityId,
        confirm: &dyn Confirmation,
    ) -> Result<bool, ServiceError> {
        let nombre = self
            .state
            .ready()
            .and_then(|data| data.cajon(id))
            .map(|c| c.nombre.clone())
            .unwrap_or_else(|| id.to_string());
        let prompt = format!("¿Estás seguro de que quieres eliminar el cajón \"{}\"?", nombre);

        let cajones = Arc::clone(&self.cajones);
        let borrado = eliminar_confirmado(
            confirm,
            self.notifier.as_ref(),
            &prompt,
            "Cajón eliminado exitosamente",
            || async move { cajones.delete(id).await },
        )
        .await?;
        if borrado {
            self.load().await;
        }
        Ok(borrado)
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
}

impl Drop for HomeView {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
