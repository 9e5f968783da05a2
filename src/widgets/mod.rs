pub mod chat;
pub mod recomendaciones;

pub use chat::ChatWidget;
pub use recomendaciones::RecomendacionesWidget;
