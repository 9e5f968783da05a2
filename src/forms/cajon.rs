use super::{FormError, FormState, run_validation};
use crate::models::{Cajon, EntityId};
use crate::notifications::Notifier;
use crate::services::CajonApi;
use crate::utils::validation::{CajonInput, FieldErrors, check};
use tracing::{debug, error};

/// Create/edit form for a container
#[derive(Debug, Clone)]
pub struct CajonForm {
    editando: Option<EntityId>,
    input: CajonInput,
    errors: FieldErrors,
    state: FormState,
}

impl Default for CajonForm {
    fn default() -> Self {
        Self::new()
    }
}

impl CajonForm {
    pub fn new() -> Self {
        Self {
            editando: None,
            input: CajonInput::default(),
            errors: FieldErrors::new(),
            state: FormState::Idle,
        }
    }

    pub fn editar(cajon: &Cajon) -> Self {
        Self {
            editando: Some(cajon.id.clone()),
            input: CajonInput::from(cajon),
            errors: FieldErrors::new(),
            state: FormState::Idle,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editando.is_some()
    }

    pub fn input(&self) -> &CajonInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
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

    pub fn set_capacidad(&mut self, capacidad: i64) -> &mut Self {
        self.input.capacidad_maxima = capacidad;
        self.touch("capacidad_maxima");
        self
    }

    pub fn set_descripcion(&mut self, descripcion: impl Into<String>) -> &mut Self {
        self.input.descripcion = descripcion.into();
        self.touch("descripcion");
        self
    }

    /// Validate then create or update. Invalid input never reaches the network.
    pub async fn submit(
        &mut self,
        api: &dyn CajonApi,
        notifier: &dyn Notifier,
    ) -> Result<Cajon, FormError> {
        run_validation(&mut self.state, &mut self.errors, check(&self.input))?;

        self.state = FormState::Submitting;
        debug!("Submitting cajón form (edit: {})", self.is_edit());
        let result = match &self.editando {
            Some(id) => api.update(id, &self.input).await,
            None => api.create(&self.input).await,
        };

        match result {
            Ok(cajon) => {
                self.state = FormState::Success;
                notifier.success(if self.is_edit() {
                    "Cajón actualizado exitosamente"
                } else {
                    "Cajón creado exitosamente"
                });
                Ok(cajon)
            }
            Err(e) => {
                error!("Error guardando cajón: {}", e);
                let message = e.to_string();
                notifier.error(&message);
                self.state = FormState::Error(message);
                Err(FormError::Service(e))
            }
        }
    }
}
