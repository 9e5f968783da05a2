pub mod auth_service;
pub mod cajon_service;
pub mod objeto_service;
pub mod recomendacion_service;

pub use auth_service::AuthService;
pub use cajon_service::{CajonApi, CajonService};
pub use objeto_service::{ObjetoApi, ObjetoFilter, ObjetoService};
pub use recomendacion_service::{RecomendacionApi, RecomendacionService};
