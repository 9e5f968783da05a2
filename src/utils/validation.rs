use crate::models::{Cajon, EntityId, Objeto, Tamanio, TipoObjeto};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

/// Maximum length of a container or item name, in characters
pub const MAX_NOMBRE: usize = 100;

pub const MIN_CAPACIDAD: i64 = 1;
pub const MAX_CAPACIDAD: i64 = 1000;

pub const DEFAULT_CAPACIDAD: i64 = 10;

/// First error message per field, keyed by field name
pub type FieldErrors = BTreeMap<String, String>;

/// Body sent to create or update a container
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CajonInput {
    #[validate(custom(function = "validate_cajon_nombre"))]
    pub nombre: String,
    #[validate(custom(function = "validate_capacidad_valor"))]
    pub capacidad_maxima: i64,
    pub descripcion: String,
}

impl Default for CajonInput {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            capacidad_maxima: DEFAULT_CAPACIDAD,
            descripcion: String::new(),
        }
    }
}

impl From<&Cajon> for CajonInput {
    fn from(cajon: &Cajon) -> Self {
        Self {
            nombre: cajon.nombre.clone(),
            capacidad_maxima: i64::from(cajon.capacidad_maxima),
            descripcion: cajon.descripcion.clone().unwrap_or_default(),
        }
    }
}

/// Body sent to create or update an item
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct ObjetoInput {
    #[validate(custom(function = "validate_objeto_nombre"))]
    pub nombre: String,
    #[validate(required(message = "Debe seleccionar un tipo de objeto"))]
    pub tipo_objeto: Option<TipoObjeto>,
    #[validate(required(message = "Debe seleccionar un tamaño"))]
    pub tamanio: Option<Tamanio>,
    pub cajon: Option<EntityId>,
    pub descripcion: String,
}

impl Default for ObjetoInput {
    fn default() -> Self {
        Self {
            nombre: String::new(),
            tipo_objeto: Some(TipoObjeto::Otros),
            tamanio: Some(Tamanio::Mediano),
            cajon: None,
            descripcion: String::new(),
        }
    }
}

impl From<&Objeto> for ObjetoInput {
    fn from(objeto: &Objeto) -> Self {
        Self {
            nombre: objeto.nombre.clone(),
            tipo_objeto: Some(objeto.tipo_objeto),
            tamanio: Some(objeto.tamanio),
            cajon: objeto.cajon_id().cloned(),
            descripcion: objeto.descripcion.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct LoginInput {
    #[validate(custom(function = "validate_required_usuario"))]
    pub username: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria"))]
    pub password: String,
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_nombre_requerido(nombre: &str) -> Result<(), ValidationError> {
    if nombre.trim().is_empty() {
        return Err(error("required", "El nombre es obligatorio"));
    }
    if nombre.chars().count() > MAX_NOMBRE {
        return Err(error(
            "too_long",
            "El nombre no puede exceder 100 caracteres",
        ));
    }
    Ok(())
}

/// Container names: required, at most 100 characters, ASCII letters,
/// digits and spaces only
pub fn validate_cajon_nombre(nombre: &str) -> Result<(), ValidationError> {
    validate_nombre_requerido(nombre)?;
    if !nombre
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ')
    {
        return Err(error(
            "charset",
            "Solo se permiten letras, números y espacios",
        ));
    }
    Ok(())
}

pub fn validate_objeto_nombre(nombre: &str) -> Result<(), ValidationError> {
    validate_nombre_requerido(nombre)
}

pub fn validate_capacidad(capacidad: &i64) -> Result<(), ValidationError> {
    if *capacidad < MIN_CAPACIDAD {
        return Err(error("range", "La capacidad debe ser al menos 1"));
    }
    if *capacidad > MAX_CAPACIDAD {
        return Err(error("range", "La capacidad no puede exceder 1000"));
    }
    Ok(())
}

// validator's derive passes Copy fields by value
fn validate_capacidad_valor(capacidad: i64) -> Result<(), ValidationError> {
    validate_capacidad(&capacidad)
}

fn validate_required_usuario(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(error("required", "El usuario es obligatorio"));
    }
    Ok(())
}

/// Flatten validator output into one message per field
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (field.to_string(), message)
            })
        })
        .collect()
}

/// Run derive-based validation and return per-field messages
pub fn check<T: Validate>(input: &T) -> Result<(), FieldErrors> {
    input.validate().map_err(|e| field_errors(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cajon(nombre: &str, capacidad: i64) -> CajonInput {
        CajonInput {
            nombre: nombre.to_string(),
            capacidad_maxima: capacidad,
            descripcion: String::new(),
        }
    }

    #[test]
    fn test_cajon_nombre_rules() {
        assert!(validate_cajon_nombre("Cajon de Oficina 2").is_ok());
        assert!(validate_cajon_nombre(&"a".repeat(100)).is_ok());

        assert!(validate_cajon_nombre("").is_err());
        assert!(validate_cajon_nombre("   ").is_err());
        assert!(validate_cajon_nombre(&"a".repeat(101)).is_err());
        assert!(validate_cajon_nombre("Cajón").is_err());
        assert!(validate_cajon_nombre("caja-1").is_err());
        assert!(validate_cajon_nombre("caja\t1").is_err());
    }

    #[test]
    fn test_capacidad_bounds() {
        assert!(validate_capacidad(&1).is_ok());
        assert!(validate_capacidad(&1000).is_ok());
        assert!(validate_capacidad(&500).is_ok());
        assert!(validate_capacidad(&0).is_err());
        assert!(validate_capacidad(&-3).is_err());
        assert!(validate_capacidad(&1001).is_err());
    }

    #[test]
    fn test_cajon_messages_per_field() {
        let errors = check(&cajon("", 0)).unwrap_err();
        assert_eq!(errors["nombre"], "El nombre es obligatorio");
        assert_eq!(errors["capacidad_maxima"], "La capacidad debe ser al menos 1");

        let errors = check(&cajon("Caja!", 2000)).unwrap_err();
        assert_eq!(errors["nombre"], "Solo se permiten letras, números y espacios");
        assert_eq!(errors["capacidad_maxima"], "La capacidad no puede exceder 1000");

        assert!(check(&cajon("Caja 1", 10)).is_ok());
    }

    #[test]
    fn test_objeto_allows_accents_but_requires_selection() {
        let mut input = ObjetoInput {
            nombre: "Cable USB-C".to_string(),
            ..ObjetoInput::default()
        };
        assert!(check(&input).is_ok());

        input.tipo_objeto = None;
        input.tamanio = None;
        input.nombre = "x".repeat(101);
        let errors = check(&input).unwrap_err();
        assert_eq!(errors["tipo_objeto"], "Debe seleccionar un tipo de objeto");
        assert_eq!(errors["tamanio"], "Debe seleccionar un tamaño");
        assert_eq!(errors["nombre"], "El nombre no puede exceder 100 caracteres");
    }

    #[test]
    fn test_defaults() {
        let cajon = CajonInput::default();
        assert_eq!(cajon.capacidad_maxima, 10);
        let objeto = ObjetoInput::default();
        assert_eq!(objeto.tipo_objeto, Some(TipoObjeto::Otros));
        assert_eq!(objeto.tamanio, Some(Tamanio::Mediano));
        assert_eq!(objeto.cajon, None);
    }

    #[test]
    fn test_login_required_fields() {
        let errors = check(&LoginInput::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
