pub mod cajon;
pub mod login;
pub mod objeto;

pub use cajon::CajonForm;
pub use login::LoginForm;
pub use objeto::ObjetoForm;

use crate::api::error::ServiceError;
use crate::utils::validation::FieldErrors;
use thiserror::Error;

/// Lifecycle of a create/edit form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Editing,
    Validating,
    Submitting,
    Success,
    Error(String),
}

impl FormState {
    /// Submit control is disabled while a request is outstanding
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Hay errores en el formulario")]
    Validation(FieldErrors),

    #[error("Ya hay un envío en curso")]
    Busy,

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl FormError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            FormError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Runs the synchronous validation step shared by every form.
/// Leaves the form in `Editing` with its errors filled when invalid.
pub(crate) fn run_validation(
    state: &mut FormState,
    errors: &mut FieldErrors,
    result: Result<(), FieldErrors>,
) -> Result<(), FormError> {
    if state.is_submitting() {
        return Err(FormError::Busy);
    }
    *state = FormState::Validating;
    match result {
        Ok(()) => {
            errors.clear();
            Ok(())
        }
        Err(found) => {
            *errors = found.clone();
            *state = FormState::Editing;
            Err(FormError::Validation(found))
        }
    }
}
