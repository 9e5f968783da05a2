#![allow(dead_code)]

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Value, json};
use sistema_cajones::config::ClientConfig;
use sistema_cajones::infrastructure::session::{MemorySessionStore, SessionStore};
use sistema_cajones::notifications::{Notifier, RecordingNotifier};
use sistema_cajones::{AppContext, create_context};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PREFIX: &str = "/api/v1";
pub const TOKEN: &str = "tok-123";

/// In-memory stand-in for the REST backend
#[derive(Default)]
pub struct Backend {
    pub cajones: Mutex<Vec<Value>>,
    pub objetos: Mutex<Vec<Value>>,
    pub recomendaciones: Mutex<Vec<Value>>,
    /// "METHOD /path/" of every request, prefix stripped
    pub calls: Mutex<Vec<String>>,
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub fail_config: AtomicBool,
    pub fail_marcar: AtomicBool,
    pub fail_generar: AtomicBool,
    pub fail_logout: AtomicBool,
    /// Body of the last `generar_automaticas` request
    pub generar_body: Mutex<Option<Value>>,
    /// Delay applied to `GET /cajones/`, in milliseconds
    pub list_delay_ms: AtomicU64,
}

impl Backend {
    pub fn count(&self, method: &str, path: &str) -> usize {
        let wanted = format!("{} {}", method, path);
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| **c == wanted)
            .count()
    }

    pub fn count_method(&self, method: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&format!("{} ", method)))
            .count()
    }

    pub fn last_auth(&self) -> Option<String> {
        self.auth_headers.lock().unwrap().last().cloned().flatten()
    }

    pub fn add_recomendacion(&self, id: &str, nombre: &str, implementada: bool) {
        self.recomendaciones.lock().unwrap().push(json!({
            "id": id,
            "nombre": nombre,
            "descripcion": "Agrupa objetos similares",
            "tipo_recomendacion": "ORGANIZACION",
            "prioridad": "MEDIA",
            "implementada": implementada,
            "fecha_creacion": "2024-05-01"
        }));
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn reply(status: StatusCode, body: Value) -> Response {
    (status, Json(body)).into_response()
}

fn not_found() -> Response {
    reply(StatusCode::NOT_FOUND, json!({"detail": "No encontrado."}))
}

fn query_param(uri: &Uri, key: &str) -> Option<String> {
    let query = uri.query()?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn cajon_id_of(objeto: &Value) -> Option<String> {
    match objeto.get("cajon") {
        Some(Value::String(id)) => Some(id.clone()),
        _ => None,
    }
}

async fn handle(
    State(backend): State<Arc<Backend>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix(PREFIX).unwrap_or(uri.path()).to_string();
    backend
        .calls
        .lock()
        .unwrap()
        .push(format!("{} {}", method, path));
    backend.auth_headers.lock().unwrap().push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    let body: Value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("POST", ["auth", "login"]) => {
            if body["username"] == "ana" && body["password"] == "secreto" {
                reply(
                    StatusCode::OK,
                    json!({"token": TOKEN, "user": {"id": 1, "username": "ana", "email": "ana@example.com"}}),
                )
            } else {
                reply(
                    StatusCode::BAD_REQUEST,
                    json!({"non_field_errors": ["Credenciales inválidas"]}),
                )
            }
        }
        ("POST", ["auth", "logout"]) => {
            if backend.fail_logout.load(Ordering::SeqCst) {
                reply(StatusCode::INTERNAL_SERVER_ERROR, json!({}))
            } else {
                reply(StatusCode::OK, json!({"detail": "ok"}))
            }
        }
        ("POST", ["auth", "register"]) => reply(
            StatusCode::CREATED,
            json!({"id": 2, "username": body["username"].clone()}),
        ),

        ("GET", ["cajones"]) => {
            let delay = backend.list_delay_ms.load(Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            let cajones = backend.cajones.lock().unwrap().clone();
            reply(StatusCode::OK, json!({"count": cajones.len(), "results": cajones}))
        }
        ("POST", ["cajones"]) => {
            let nombre = body["nombre"].as_str().unwrap_or_default().to_string();
            let mut cajones = backend.cajones.lock().unwrap();
            if cajones.iter().any(|c| c["nombre"] == nombre.as_str()) {
                return reply(
                    StatusCode::BAD_REQUEST,
                    json!({"nombre": ["Ya existe un cajón con este nombre."]}),
                );
            }
            let cajon = json!({
                "id": new_id(),
                "nombre": nombre,
                "capacidad_maxima": body["capacidad_maxima"].clone(),
                "descripcion": body["descripcion"].clone(),
            });
            cajones.push(cajon.clone());
            reply(StatusCode::CREATED, cajon)
        }
        ("GET", ["cajones", id]) => {
            let cajones = backend.cajones.lock().unwrap();
            match cajones.iter().find(|c| c["id"] == *id) {
                Some(c) => reply(StatusCode::OK, c.clone()),
                None => not_found(),
            }
        }
        ("PUT", ["cajones", id]) => {
            let mut cajones = backend.cajones.lock().unwrap();
            match cajones.iter_mut().find(|c| c["id"] == *id) {
                Some(c) => {
                    c["nombre"] = body["nombre"].clone();
                    c["capacidad_maxima"] = body["capacidad_maxima"].clone();
                    c["descripcion"] = body["descripcion"].clone();
                    reply(StatusCode::OK, c.clone())
                }
                None => not_found(),
            }
        }
        ("DELETE", ["cajones", id]) => {
            let mut cajones = backend.cajones.lock().unwrap();
            let before = cajones.len();
            cajones.retain(|c| c["id"] != *id);
            if cajones.len() == before {
                return not_found();
            }
            for objeto in backend.objetos.lock().unwrap().iter_mut() {
                if cajon_id_of(objeto).as_deref() == Some(*id) {
                    objeto["cajon"] = Value::Null;
                }
            }
            StatusCode::NO_CONTENT.into_response()
        }
        ("GET", ["cajones", id, "estadisticas"]) => {
            let cajones = backend.cajones.lock().unwrap();
            let Some(cajon) = cajones.iter().find(|c| c["id"] == *id) else {
                return not_found();
            };
            let capacidad = cajon["capacidad_maxima"].as_u64().unwrap_or(1);
            let actuales = backend
                .objetos
                .lock()
                .unwrap()
                .iter()
                .filter(|o| cajon_id_of(o).as_deref() == Some(*id))
                .count() as u64;
            reply(
                StatusCode::OK,
                json!({
                    "nombre_cajon": cajon["nombre"].clone(),
                    "capacidad_maxima": capacidad,
                    "objetos_actuales": actuales,
                    "capacidad_disponible": capacidad as i64 - actuales as i64,
                    "porcentaje_ocupacion": actuales as f64 * 100.0 / capacidad as f64,
                    "objetos_por_tipo": {},
                    "objetos_por_tamanio": {},
                    "esta_lleno": actuales >= capacidad
                }),
            )
        }
        ("POST", ["cajones", id, "optimizar"]) => {
            if !backend.cajones.lock().unwrap().iter().any(|c| c["id"] == *id) {
                return not_found();
            }
            reply(StatusCode::OK, json!({"optimizado": true, "movimientos": 0}))
        }

        ("GET", ["objetos"]) => {
            let filtro = query_param(&uri, "cajon");
            let objetos: Vec<Value> = backend
                .objetos
                .lock()
                .unwrap()
                .iter()
                .filter(|o| filtro.is_none() || cajon_id_of(o) == filtro)
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(objetos))
        }
        ("GET", ["objetos", "buscar"]) => {
            let q = query_param(&uri, "q").unwrap_or_default().to_lowercase();
            let objetos: Vec<Value> = backend
                .objetos
                .lock()
                .unwrap()
                .iter()
                .filter(|o| {
                    o["nombre"]
                        .as_str()
                        .is_some_and(|n| n.to_lowercase().contains(&q))
                })
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(objetos))
        }
        ("POST", ["objetos"]) => {
            let objeto = json!({
                "id": new_id(),
                "nombre": body["nombre"].clone(),
                "tipo_objeto": body["tipo_objeto"].clone(),
                "tamanio": body["tamanio"].clone(),
                "cajon": body["cajon"].clone(),
                "descripcion": body["descripcion"].clone(),
                "fecha_ingreso": "2024-05-01T10:00:00Z"
            });
            backend.objetos.lock().unwrap().push(objeto.clone());
            reply(StatusCode::CREATED, objeto)
        }
        ("GET", ["objetos", id]) => {
            let objetos = backend.objetos.lock().unwrap();
            match objetos.iter().find(|o| o["id"] == *id) {
                Some(o) => reply(StatusCode::OK, o.clone()),
                None => not_found(),
            }
        }
        ("PUT", ["objetos", id]) => {
            let mut objetos = backend.objetos.lock().unwrap();
            match objetos.iter_mut().find(|o| o["id"] == *id) {
                Some(o) => {
                    for campo in ["nombre", "tipo_objeto", "tamanio", "cajon", "descripcion"] {
                        o[campo] = body[campo].clone();
                    }
                    reply(StatusCode::OK, o.clone())
                }
                None => not_found(),
            }
        }
        ("DELETE", ["objetos", id]) => {
            let mut objetos = backend.objetos.lock().unwrap();
            let before = objetos.len();
            objetos.retain(|o| o["id"] != *id);
            if objetos.len() == before {
                not_found()
            } else {
                StatusCode::NO_CONTENT.into_response()
            }
        }
        ("POST", ["objetos", id, "mover"]) => {
            let mut objetos = backend.objetos.lock().unwrap();
            match objetos.iter_mut().find(|o| o["id"] == *id) {
                Some(o) => {
                    o["cajon"] = body["cajon"].clone();
                    reply(StatusCode::OK, o.clone())
                }
                None => not_found(),
            }
        }

        ("GET", ["configuracion", "tipos-objeto"]) => {
            if backend.fail_config.load(Ordering::SeqCst) {
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            } else {
                reply(
                    StatusCode::OK,
                    json!([{"value": "ROPA", "label": "Ropa"}, {"value": "OTROS", "label": "Otros"}]),
                )
            }
        }
        ("GET", ["configuracion", "tamanios"]) => {
            if backend.fail_config.load(Ordering::SeqCst) {
                StatusCode::SERVICE_UNAVAILABLE.into_response()
            } else {
                reply(StatusCode::OK, json!([{"value": "GRANDE", "label": "Grande"}]))
            }
        }

        ("GET", ["cajones_inteligentes", "recomendaciones"]) => {
            let recs = backend.recomendaciones.lock().unwrap().clone();
            reply(StatusCode::OK, json!({"count": recs.len(), "results": recs}))
        }
        ("GET", ["cajones_inteligentes", "recomendaciones", "pendientes"]) => {
            let recs: Vec<Value> = backend
                .recomendaciones
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r["implementada"] == false)
                .cloned()
                .collect();
            reply(StatusCode::OK, Value::Array(recs))
        }
        ("POST", ["cajones_inteligentes", "recomendaciones", "generar_automaticas"]) => {
            if backend.fail_generar.load(Ordering::SeqCst) {
                return reply(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Servicio de IA no disponible"}),
                );
            }
            *backend.generar_body.lock().unwrap() = Some(body.clone());
            // Logged-in user has integer key 1; "1" as text is someone else
            if !body["usuario_id"].is_null() && body["usuario_id"] != json!(1) {
                return reply(
                    StatusCode::FORBIDDEN,
                    json!({"error": "No tienes permisos para generar recomendaciones de otro usuario"}),
                );
            }
            let guardadas = vec![
                json!({
                    "id": "r-1",
                    "nombre": "Agrupar papelería",
                    "descripcion": "Reúne la papelería en un solo cajón",
                    "tipo_recomendacion": "ORGANIZACION",
                    "prioridad": "ALTA",
                    "implementada": false
                }),
                json!({
                    "id": "r-2",
                    "nombre": "Liberar espacio en Ropa",
                    "descripcion": "El cajón está casi lleno",
                    "tipo_recomendacion": "ESPACIO",
                    "prioridad": "CRITICA",
                    "implementada": false
                }),
            ];
            backend
                .recomendaciones
                .lock()
                .unwrap()
                .extend(guardadas.iter().cloned());
            reply(
                StatusCode::CREATED,
                json!({
                    "recomendaciones": [
                        {"titulo": "Agrupar papelería", "tipo": "ORGANIZACION", "prioridad": "ALTA",
                         "descripcion": "Reúne la papelería en un solo cajón"},
                        {"titulo": "Liberar espacio en Ropa", "tipo": "ESPACIO", "prioridad": "CRITICA",
                         "descripcion": "El cajón está casi lleno"}
                    ],
                    "generado_con_ia": false,
                    "total_cajones": backend.cajones.lock().unwrap().len(),
                    "total_objetos": backend.objetos.lock().unwrap().len(),
                    "total_recomendaciones_generadas": 2,
                    "recomendaciones_guardadas": guardadas,
                    "usuario_id": body["usuario_id"].clone()
                }),
            )
        }
        ("POST", ["cajones_inteligentes", "recomendaciones", id, accion])
            if *accion == "marcar_implementada" || *accion == "desmarcar_implementada" =>
        {
            if backend.fail_marcar.load(Ordering::SeqCst) {
                return reply(StatusCode::INTERNAL_SERVER_ERROR, json!({}));
            }
            let mut recs = backend.recomendaciones.lock().unwrap();
            match recs.iter_mut().find(|r| r["id"] == *id) {
                Some(r) => {
                    r["implementada"] = json!(*accion == "marcar_implementada");
                    reply(StatusCode::OK, json!({"status": "ok"}))
                }
                None => not_found(),
            }
        }
        ("GET", ["estadisticas", "generales"]) => {
            let cajones = backend.cajones.lock().unwrap();
            let objetos = backend.objetos.lock().unwrap();
            let capacidad: u64 = cajones
                .iter()
                .filter_map(|c| c["capacidad_maxima"].as_u64())
                .sum();
            reply(
                StatusCode::OK,
                json!({
                    "total_cajones": cajones.len(),
                    "total_objetos": objetos.len(),
                    "capacidad_total": capacidad,
                    "capacidad_utilizada": objetos.iter().filter(|o| !o["cajon"].is_null()).count(),
                    "recomendaciones_pendientes": 0
                }),
            )
        }
        _ => not_found(),
    }
}

pub async fn spawn_backend() -> (Arc<Backend>, String) {
    let backend = Arc::new(Backend::default());
    let app = Router::new()
        .fallback(handle)
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (backend, format!("http://{}{}", addr, PREFIX))
}

pub struct TestApp {
    pub backend: Arc<Backend>,
    pub ctx: AppContext,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Arc<MemorySessionStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_session(MemorySessionStore::new()).await
    }

    pub async fn logged_in() -> Self {
        Self::with_session(MemorySessionStore::with_token(TOKEN)).await
    }

    async fn with_session(session: MemorySessionStore) -> Self {
        let (backend, base_url) = spawn_backend().await;
        let session = Arc::new(session);
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = create_context(
            ClientConfig::with_base_url(base_url),
            Arc::clone(&session) as Arc<dyn SessionStore>,
            Arc::clone(&notifier) as Arc<dyn Notifier>,
        )
        .unwrap();
        Self {
            backend,
            ctx,
            notifier,
            session,
        }
    }
}
