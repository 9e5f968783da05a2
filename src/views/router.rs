use crate::models::EntityId;
use percent_encoding::percent_decode_str;
use std::fmt;

use crate::api::client::segment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Home,
    GestionCajon(EntityId),
}

impl Route {
    /// Map a path to its view; query strings and a trailing slash are ignored
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Login),
            "/home" => Some(Route::Home),
            _ => {
                let id = trimmed.strip_prefix("/gestion-cajon/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = percent_decode_str(id).decode_utf8().ok()?;
                Some(Route::GestionCajon(EntityId::from(id.as_ref())))
            }
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/"),
            Route::Home => f.write_str("/home"),
            Route::GestionCajon(id) => write!(f, "/gestion-cajon/{}", segment(id.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        assert_eq!(Route::parse("/"), Some(Route::Login));
        assert_eq!(Route::parse(""), Some(Route::Login));
        assert_eq!(Route::parse("/home"), Some(Route::Home));
        assert_eq!(Route::parse("/home/"), Some(Route::Home));
        assert_eq!(
            Route::parse("/gestion-cajon/42"),
            Some(Route::GestionCajon(EntityId::from("42")))
        );
        assert_eq!(
            Route::parse("/gestion-cajon/42?tab=objetos"),
            Some(Route::GestionCajon(EntityId::from("42")))
        );
    }

    #[test]
    fn test_unknown_routes() {
        assert_eq!(Route::parse("/gestion-cajon/"), None);
        assert_eq!(Route::parse("/gestion-cajon/1/2"), None);
        assert_eq!(Route::parse("/admin"), None);
    }

    #[test]
    fn test_display_matches_parse() {
        for route in [
            Route::Login,
            Route::Home,
            Route::GestionCajon(EntityId::from("a b")),
        ] {
            assert_eq!(Route::parse(&route.to_string()), Some(route));
        }
    }
}
