use super::{FormError, FormState, run_validation};
use crate::api::error::ServiceError;
use crate::models::{Cajon, EntityId, Objeto, Opcion, Tamanio, TipoObjeto};
use crate::notifications::Notifier;
use crate::services::{CajonApi, ObjetoApi};
use crate::utils::validation::{FieldErrors, ObjetoInput, check};
use tracing::{debug, error};

/// Create/edit form for an item, with the select options it offers
#[derive(Debug, Clone)]
pub struct ObjetoForm {
    editando: Option<EntityId>,
    input: ObjetoInput,
    errors: FieldErrors,
    state: FormState,
    cajones: Vec<Cajon>,
    tipos: Vec<Opcion>,
    tamanios: Vec<Opcion>,
}

impl Default for ObjetoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjetoForm {
    pub fn new() -> Self {
        Self {
            editando: None,
            input: ObjetoInput::default(),
            errors: FieldErrors::new(),
            state: FormState::Idle,
            cajones: Vec::new(),
            tipos: TipoObjeto::opciones(),
            tamanios: Tamanio::opciones(),
        }
    }

    /// New item with its container already selected
    pub fn con_cajon(cajon: EntityId) -> Self {
        let mut form = Self::new();
        form.input.cajon = Some(cajon);
        form
    }

    pub fn editar(objeto: &Objeto) -> Self {
        Self {
            editando: Some(objeto.id.clone()),
            input: ObjetoInput::from(objeto),
            ..Self::new()
        }
    }

    /// Load containers and option lists in parallel. Only the container
    /// list can fail; the option lists fall back to built-in values.
    pub async fn cargar_opciones(
        &mut self,
        cajones: &dyn CajonApi,
        objetos: &dyn ObjetoApi,
        notifier: &dyn Notifier,
    ) -> Result<(), ServiceError> {
        let (lista, tipos, tamanios) =
            tokio::join!(cajones.list(), objetos.tipos_objeto(), objetos.tamanios());
        self.tipos = tipos;
        self.tamanios = tamanios;
        match lista {
            Ok(lista) => {
                self.cajones = lista;
                Ok(())
            }
            Err(e) => {
                error!("Error cargando datos iniciales: {}", e);
                notifier.error("Error al cargar los datos del formulario");
                Err(e)
            }
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editando.is_some()
    }

    pub fn input(&self) -> &ObjetoInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn cajones(&self) -> &[Cajon] {
        &self.cajones
    }

    pub fn tipos(&self) -> &[Opcion] {
        &self.tipos
    }

    pub fn tamanios(&self) -> &[Opcion] {
        &self.tamanios
    }

    fn touch(&mut self, field: &str) {
        self.errors.remove(field);
        self.state = FormState::Editing;
    }

    pub fn set_nombre(&mut self, nombre: impl Into<String>) -> &mut Self {
        self.input.nombre = nombre.into();
        self.touch("nombre");
        self
    }

    pub fn set_tipo(&mut self, tipo: Option<TipoObjeto>) -> &mut Self {
        self.input.tipo_objeto = tipo;
        self.touch("tipo_objeto");
        self
    }

    pub fn set_tamanio(&mut self, tamanio: Option<Tamanio>) -> &mut Self {
        self.input.tamanio = tamanio;
        self.touch("tamanio");
        self
    }

    /// `None` leaves the item without container
    pub fn set_cajon(&mut self, cajon: Option<EntityId>) -> &mut Self {
        self.input.cajon = cajon;
        self.touch("cajon");
        self
    }

    pub fn set_descripcion(&mut self, descripcion: impl Into<String>) -> &mut Self {
        self.input.descripcion = descripcion.into();
        self.touch("descripcion");
        self
    }

    pub async fn submit(
        &mut self,
        api: &dyn ObjetoApi,
        notifier: &dyn Notifier,
    ) -> Result<Objeto, FormError> {
        run_validation(&mut self.state, &mut self.errors, check(&self.input))?;

        self.state = FormState::Submitting;
        debug!("Submitting objeto form (edit: {})", self.is_edit());
        let result = match &self.editando {
            Some(id) => api.update(id, &self.input).await,
            None => api.create(&self.input).await,
        };

        match result {
            Ok(objeto) => {
                self.state = FormState::Success;
                notifier.success(if self.is_edit() {
                    "Objeto actualizado exitosamente"
                } else {
                    "Objeto creado exitosamente"
                });
                Ok(objeto)
            }
            Err(e) => {
                error!("Error guardando objeto: {}", e);
                let message = e.to_string();
                notifier.error(&message);
                self.state = FormState::Error(message);
                Err(FormError::Service(e))
            }
        }
    }
}
