use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Entity identifier. The backend hands out UUID strings, older
/// deployments numeric ids; both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// JSON form for fields the backend compares against integer keys:
    /// a number when the id is numeric, text otherwise.
    pub fn to_json(&self) -> Value {
        match self.0.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(self.0.as_str()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        EntityId(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        EntityId(value)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntityId(s),
            RawId::Int(n) => EntityId(n.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cajon {
    pub id: EntityId,
    pub nombre: String,
    pub capacidad_maxima: u32,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// Reference from an item to its container: either the bare id or the
/// nested summary some endpoints return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CajonRef {
    Id(EntityId),
    Detalle {
        id: EntityId,
        #[serde(default)]
        nombre: Option<String>,
    },
}

impl CajonRef {
    pub fn id(&self) -> &EntityId {
        match self {
            CajonRef::Id(id) => id,
            CajonRef::Detalle { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objeto {
    pub id: EntityId,
    pub nombre: String,
    pub tipo_objeto: TipoObjeto,
    pub tamanio: Tamanio,
    #[serde(default)]
    pub cajon: Option<CajonRef>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub fecha_ingreso: Option<DateTime<Utc>>,
}

impl Objeto {
    pub fn cajon_id(&self) -> Option<&EntityId> {
        self.cajon.as_ref().map(CajonRef::id)
    }

    pub fn pertenece_a(&self, cajon_id: &EntityId) -> bool {
        self.cajon_id() == Some(cajon_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoObjeto {
    Ropa,
    Papeleria,
    Cables,
    Electronica,
    Libros,
    Herramientas,
    Cocina,
    Otros,
}

impl TipoObjeto {
    pub const ALL: [TipoObjeto; 8] = [
        TipoObjeto::Ropa,
        TipoObjeto::Papeleria,
        TipoObjeto::Cables,
        TipoObjeto::Electronica,
        TipoObjeto::Libros,
        TipoObjeto::Herramientas,
        TipoObjeto::Cocina,
        TipoObjeto::Otros,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            TipoObjeto::Ropa => "ROPA",
            TipoObjeto::Papeleria => "PAPELERIA",
            TipoObjeto::Cables => "CABLES",
            TipoObjeto::Electronica => "ELECTRONICA",
            TipoObjeto::Libros => "LIBROS",
            TipoObjeto::Herramientas => "HERRAMIENTAS",
            TipoObjeto::Cocina => "COCINA",
            TipoObjeto::Otros => "OTROS",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TipoObjeto::Ropa => "Ropa",
            TipoObjeto::Papeleria => "Papelería",
            TipoObjeto::Cables => "Cables",
            TipoObjeto::Electronica => "Electrónica",
            TipoObjeto::Libros => "Libros",
            TipoObjeto::Herramientas => "Herramientas",
            TipoObjeto::Cocina => "Artículos de Cocina",
            TipoObjeto::Otros => "Otros",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Options used when the configuration endpoint is unreachable
    pub fn opciones() -> Vec<Opcion> {
        Self::ALL
            .iter()
            .map(|t| Opcion::new(t.code(), t.label()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tamanio {
    Pequeno,
    Mediano,
    Grande,
}

impl Tamanio {
    pub const ALL: [Tamanio; 3] = [Tamanio::Pequeno, Tamanio::Mediano, Tamanio::Grande];

    pub fn code(&self) -> &'static str {
        match self {
            Tamanio::Pequeno => "PEQUENO",
            Tamanio::Mediano => "MEDIANO",
            Tamanio::Grande => "GRANDE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tamanio::Pequeno => "Pequeño",
            Tamanio::Mediano => "Mediano",
            Tamanio::Grande => "Grande",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn opciones() -> Vec<Opcion> {
        Self::ALL
            .iter()
            .map(|t| Opcion::new(t.code(), t.label()))
            .collect()
    }
}

/// Value/label pair served by the configuration endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opcion {
    pub value: String,
    pub label: String,
}

impl Opcion {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Prioridad {
    Baja,
    Media,
    Alta,
    Critica,
    #[serde(other)]
    Otra,
}

impl Prioridad {
    pub fn label(&self) -> &'static str {
        match self {
            Prioridad::Baja => "BAJA",
            Prioridad::Media => "MEDIA",
            Prioridad::Alta => "ALTA",
            Prioridad::Critica => "CRITICA",
            Prioridad::Otra => "OTRA",
        }
    }

    /// Badge colour used by the recommendation cards
    pub fn color(&self) -> &'static str {
        match self {
            Prioridad::Baja => "#28a745",
            Prioridad::Media => "#ffc107",
            Prioridad::Alta => "#fd7e14",
            Prioridad::Critica => "#dc3545",
            Prioridad::Otra => "#6c757d",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TipoRecomendacion {
    Organizacion,
    Espacio,
    Mantenimiento,
    Seguridad,
    Eficiencia,
    #[serde(other)]
    Otro,
}

impl TipoRecomendacion {
    pub fn label(&self) -> &'static str {
        match self {
            TipoRecomendacion::Organizacion => "Organización",
            TipoRecomendacion::Espacio => "Optimización de Espacio",
            TipoRecomendacion::Mantenimiento => "Mantenimiento",
            TipoRecomendacion::Seguridad => "Seguridad",
            TipoRecomendacion::Eficiencia => "Eficiencia",
            TipoRecomendacion::Otro => "Otro",
        }
    }

    pub fn icono(&self) -> &'static str {
        match self {
            TipoRecomendacion::Organizacion => "📋",
            TipoRecomendacion::Espacio => "📦",
            TipoRecomendacion::Mantenimiento => "🔧",
            TipoRecomendacion::Seguridad => "🔒",
            TipoRecomendacion::Eficiencia => "⚡",
            TipoRecomendacion::Otro => "💡",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recomendacion {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(alias = "titulo", default)]
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(alias = "tipo", default = "default_tipo_recomendacion")]
    pub tipo_recomendacion: TipoRecomendacion,
    #[serde(default = "default_prioridad")]
    pub prioridad: Prioridad,
    #[serde(default)]
    pub razon: Option<String>,
    #[serde(default)]
    pub implementada: bool,
    #[serde(default)]
    pub fecha_creacion: Option<NaiveDate>,
}

fn default_tipo_recomendacion() -> TipoRecomendacion {
    TipoRecomendacion::Organizacion
}

fn default_prioridad() -> Prioridad {
    Prioridad::Media
}

/// Response of the bulk generation endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GeneracionRecomendaciones {
    #[serde(default)]
    pub recomendaciones: Vec<Recomendacion>,
    #[serde(default)]
    pub generado_con_ia: bool,
    #[serde(default)]
    pub total_cajones: Option<u32>,
    #[serde(default)]
    pub total_objetos: Option<u32>,
    #[serde(default)]
    pub total_recomendaciones_generadas: Option<u32>,
    /// Same suggestions as stored by the backend, carrying their ids
    #[serde(default)]
    pub recomendaciones_guardadas: Vec<Recomendacion>,
}

impl GeneracionRecomendaciones {
    /// Stored copies when the backend returned them, raw suggestions otherwise
    pub fn lista(&self) -> Vec<Recomendacion> {
        if self.recomendaciones_guardadas.is_empty() {
            self.recomendaciones.clone()
        } else {
            self.recomendaciones_guardadas.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstadisticasCajon {
    pub nombre_cajon: String,
    pub capacidad_maxima: u32,
    pub objetos_actuales: u32,
    pub capacidad_disponible: i64,
    pub porcentaje_ocupacion: f64,
    #[serde(default)]
    pub objetos_por_tipo: BTreeMap<String, u32>,
    #[serde(default)]
    pub objetos_por_tamanio: BTreeMap<String, u32>,
    #[serde(default)]
    pub esta_lleno: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstadisticasGenerales {
    pub total_cajones: u32,
    pub total_objetos: u32,
    #[serde(default)]
    pub objetos_por_tipo: BTreeMap<String, u32>,
    #[serde(default)]
    pub cajones_llenos: u32,
    #[serde(default)]
    pub capacidad_total: u32,
    #[serde(default)]
    pub capacidad_utilizada: u32,
    #[serde(default)]
    pub porcentaje_utilizacion: f64,
    #[serde(default)]
    pub recomendaciones_pendientes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<EntityId>,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// List endpoints answer either with a bare array or a paginated envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results } => results,
            ListResponse::Plain(items) => items,
        }
    }
}
