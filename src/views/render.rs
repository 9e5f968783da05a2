//! Plain-text rendering of the views for the terminal shell.

use super::ViewState;
use super::gestion_cajon::GestionData;
use super::home::HomeData;
use crate::models::{EstadisticasCajon, EstadisticasGenerales, Objeto, Opcion, Recomendacion};
use crate::utils::occupancy::Occupancy;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

fn ocupacion_linea(ocupacion: &Occupancy) -> String {
    format!(
        "{} {} {}",
        ocupacion.nivel().emoji(),
        ocupacion.bar(BAR_WIDTH),
        ocupacion
    )
}

fn objeto_linea(objeto: &Objeto) -> String {
    let mut linea = format!(
        "  • [{}] {} ({}, {})",
        objeto.id,
        objeto.nombre,
        objeto.tipo_objeto.label(),
        objeto.tamanio.label()
    );
    if let Some(descripcion) = objeto.descripcion.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(linea, " - {}", descripcion);
    }
    linea
}

fn estado<T>(state: &ViewState<T>) -> Option<String> {
    match state {
        ViewState::Loading => Some("Cargando...".to_string()),
        ViewState::Failed(message) => Some(format!("❌ {}", message)),
        ViewState::Ready(_) => None,
    }
}

pub fn home(state: &ViewState<HomeData>) -> String {
    if let Some(texto) = estado(state) {
        return texto;
    }
    let Some(data) = state.ready() else {
        return String::new();
    };

    let resumen = data.resumen();
    let mut out = String::new();
    let _ = writeln!(out, "📦 Mis Cajones");
    let _ = writeln!(
        out,
        "Cajones: {} | Objetos: {} | Capacidad total: {} | Sin cajón: {}",
        resumen.total_cajones,
        resumen.total_objetos,
        resumen.capacidad_total,
        resumen.objetos_sin_cajon
    );
    let _ = writeln!(out);

    let tarjetas = data.tarjetas();
    if tarjetas.is_empty() {
        let _ = writeln!(out, "No hay cajones");
        let _ = writeln!(out, "Comienza creando tu primer cajón.");
        return out;
    }

    for tarjeta in tarjetas {
        let _ = writeln!(out, "[{}] {}", tarjeta.cajon.id, tarjeta.cajon.nombre);
        if let Some(descripcion) = tarjeta.cajon.descripcion.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "    {}", descripcion);
        }
        let _ = writeln!(out, "    {}", ocupacion_linea(&tarjeta.ocupacion));
    }
    out
}

pub fn gestion_cajon(state: &ViewState<GestionData>) -> String {
    if let Some(texto) = estado(state) {
        return texto;
    }
    let Some(data) = state.ready() else {
        return String::new();
    };

    let mut out = String::new();
    let _ = writeln!(out, "📦 {} [{}]", data.cajon.nombre, data.cajon.id);
    if let Some(descripcion) = data.cajon.descripcion.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{}", descripcion);
    }
    let _ = writeln!(out, "Ocupación: {}", ocupacion_linea(&data.ocupacion()));
    let _ = writeln!(out);

    if data.objetos.is_empty() {
        let _ = writeln!(out, "No hay objetos");
        return out;
    }
    for (tipo, cantidad) in data.objetos_por_tipo() {
        let _ = writeln!(out, "  {}: {}", tipo, cantidad);
    }
    let _ = writeln!(out);
    for objeto in &data.objetos {
        let _ = writeln!(out, "{}", objeto_linea(objeto));
    }
    out
}

pub fn objetos(objetos: &[Objeto]) -> String {
    if objetos.is_empty() {
        return "No hay objetos".to_string();
    }
    objetos
        .iter()
        .map(objeto_linea)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn estadisticas_cajon(stats: &EstadisticasCajon) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 {}", stats.nombre_cajon);
    let _ = writeln!(
        out,
        "Objetos: {}/{} ({:.1}%) | Disponible: {}{}",
        stats.objetos_actuales,
        stats.capacidad_maxima,
        stats.porcentaje_ocupacion,
        stats.capacidad_disponible,
        if stats.esta_lleno { " | LLENO" } else { "" }
    );
    for (tipo, cantidad) in &stats.objetos_por_tipo {
        let _ = writeln!(out, "  tipo {}: {}", tipo, cantidad);
    }
    for (tamanio, cantidad) in &stats.objetos_por_tamanio {
        let _ = writeln!(out, "  tamaño {}: {}", tamanio, cantidad);
    }
    out
}

pub fn estadisticas_generales(stats: &EstadisticasGenerales) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📊 Estadísticas generales");
    let _ = writeln!(
        out,
        "Cajones: {} ({} llenos) | Objetos: {}",
        stats.total_cajones, stats.cajones_llenos, stats.total_objetos
    );
    let _ = writeln!(
        out,
        "Capacidad: {}/{} ({:.1}%) | Recomendaciones pendientes: {}",
        stats.capacidad_utilizada,
        stats.capacidad_total,
        stats.porcentaje_utilizacion,
        stats.recomendaciones_pendientes
    );
    for (tipo, cantidad) in &stats.objetos_por_tipo {
        let _ = writeln!(out, "  {}: {}", tipo, cantidad);
    }
    out
}

pub fn opciones(titulo: &str, opciones: &[Opcion]) -> String {
    let mut out = format!("{}:\n", titulo);
    for opcion in opciones {
        let _ = writeln!(out, "  {:<14} {}", opcion.value, opcion.label);
    }
    out
}

pub fn recomendacion(rec: &Recomendacion) -> String {
    let mut out = String::new();
    let marca = if rec.implementada { "✅" } else { "⬜" };
    let id = rec
        .id
        .as_ref()
        .map(|id| format!("[{}] ", id))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "{} {}{} {} ({})",
        marca,
        id,
        rec.tipo_recomendacion.icono(),
        rec.nombre,
        rec.prioridad.label()
    );
    if !rec.descripcion.is_empty() {
        let _ = writeln!(out, "    {}", rec.descripcion);
    }
    if let Some(razon) = rec.razon.as_deref().filter(|r| !r.is_empty()) {
        let _ = writeln!(out, "    💡 ¿Por qué es importante? {}", razon);
    }
    out
}
