/// Floating assistant panel. Static content only, no network I/O.
#[derive(Debug, Clone, Default)]
pub struct ChatWidget {
    open: bool,
}

pub const TITULO: &str = "Chat Inteligente";
pub const SUBTITULO: &str = "Asistente virtual";

pub const MENSAJES: [&str; 3] = [
    "¡Hola! 👋 Soy tu asistente inteligente para la gestión de cajones.",
    "Puedo ayudarte con:",
    "¿En qué puedo ayudarte hoy? 🤔",
];

pub const CAPACIDADES: [&str; 4] = [
    "Organizar objetos",
    "Buscar objetos",
    "Optimizar espacio",
    "Sugerir ubicaciones",
];

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Lines shown while open; empty when closed
    pub fn lineas(&self) -> Vec<String> {
        if !self.open {
            return Vec::new();
        }
        let mut lineas = vec![format!("💬 {} - {}", TITULO, SUBTITULO), MENSAJES[0].to_string()];
        lineas.push(MENSAJES[1].to_string());
        lineas.extend(CAPACIDADES.iter().map(|c| format!("  • {}", c)));
        lineas.push(MENSAJES[2].to_string());
        lineas
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        let mut chat = ChatWidget::new();
        assert!(!chat.is_open());
        assert!(chat.lineas().is_empty());

        assert!(chat.toggle());
        assert_eq!(chat.lineas().len(), 8);
        assert!(chat.lineas()[1].starts_with("¡Hola!"));

        assert!(!chat.toggle());
        assert!(chat.lineas().is_empty());
    }
}
