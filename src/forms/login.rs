use super::{FormError, FormState, run_validation};
use crate::models::LoginResponse;
use crate::notifications::Notifier;
use crate::services::AuthService;
use crate::services::auth_service::Credentials;
use crate::utils::validation::{FieldErrors, LoginInput, check};

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    input: LoginInput,
    errors: FieldErrors,
    state: FormState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.input.username = username.into();
        self.errors.remove("username");
        self.state = FormState::Editing;
        self
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.input.password = password.into();
        self.errors.remove("password");
        self.state = FormState::Editing;
        self
    }

    pub async fn submit(
        &mut self,
        auth: &AuthService,
        notifier: &dyn Notifier,
    ) -> Result<LoginResponse, FormError> {
        run_validation(&mut self.state, &mut self.errors, check(&self.input))?;

        self.state = FormState::Submitting;
        let credentials = Credentials {
            username: self.input.username.trim().to_string(),
            password: self.input.password.clone(),
        };
        match auth.login(&credentials).await {
            Ok(response) => {
                self.state = FormState::Success;
                self.input.password.clear();
                notifier.success(&format!("Bienvenido, {}", credentials.username));
                Ok(response)
            }
            Err(e) => {
                let message = e.to_string();
                notifier.error(&message);
                self.state = FormState::Error(message);
                Err(FormError::Service(e))
            }
        }
    }
}
