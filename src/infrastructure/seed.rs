use crate::models::{Cajon, Tamanio, TipoObjeto};
use crate::services::{CajonApi, ObjetoApi};
use crate::utils::validation::{CajonInput, ObjetoInput};
use rand::Rng;
use tracing::{error, info};

use Tamanio::{Grande, Mediano, Pequeno};
use TipoObjeto::{Cables, Cocina, Electronica, Herramientas, Libros, Otros, Papeleria, Ropa};

/// Outcome of a seeding run; failures are logged and skipped
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub cajones_creados: usize,
    pub objetos_creados: usize,
    pub objetos_sin_cajon: usize,
    pub errores: usize,
}

const CAJONES: [(&str, u32, &str); 6] = [
    (
        "Cajón de Oficina",
        15,
        "Cajón para organizar materiales de oficina y papelería",
    ),
    (
        "Cajón de Cocina",
        20,
        "Cajón para utensilios de cocina y artículos culinarios",
    ),
    (
        "Cajón de Herramientas",
        12,
        "Cajón para almacenar herramientas de trabajo y bricolaje",
    ),
    (
        "Cajón de Ropa",
        25,
        "Cajón para organizar prendas de vestir y accesorios",
    ),
    (
        "Cajón de Electrónicos",
        18,
        "Cajón para cables, dispositivos y componentes electrónicos",
    ),
    (
        "Cajón de Libros",
        30,
        "Cajón para almacenar libros y material de lectura",
    ),
];

const OBJETOS: [(&str, TipoObjeto, Tamanio, &str); 35] = [
    ("Grapadora roja", Papeleria, Pequeno, "Grapadora de oficina color rojo"),
    ("Resma de papel A4", Papeleria, Grande, "Paquete de 500 hojas blancas A4"),
    ("Bolígrafos azules", Papeleria, Pequeno, "Caja de 10 bolígrafos azules"),
    ("Calculadora científica", Electronica, Mediano, "Calculadora con funciones avanzadas"),
    ("Archivador verde", Papeleria, Grande, "Archivador de palanca tamaño oficio"),
    ("Juego de cuchillos", Cocina, Grande, "Set de 6 cuchillos de cocina"),
    ("Tabla de cortar", Cocina, Mediano, "Tabla de bambú para cortar alimentos"),
    ("Batidor manual", Cocina, Mediano, "Batidor de acero inoxidable"),
    ("Moldes para hornear", Cocina, Grande, "Set de 3 moldes antiadherentes"),
    ("Especieros", Cocina, Pequeno, "Frascos para especias con etiquetas"),
    ("Destornillador Phillips", Herramientas, Pequeno, "Destornillador de punta Phillips mediano"),
    ("Martillo de carpintero", Herramientas, Mediano, "Martillo con mango de madera"),
    ("Nivel de burbuja", Herramientas, Mediano, "Nivel de 60cm con 3 burbujas"),
    ("Llave inglesa", Herramientas, Mediano, "Llave ajustable de 10 pulgadas"),
    ("Caja de tornillos", Herramientas, Pequeno, "Surtido de tornillos diversos"),
    ("Camisetas de algodón", Ropa, Mediano, "Pack de 5 camisetas básicas"),
    ("Jeans azules", Ropa, Mediano, "Pantalón de mezclilla talla M"),
    ("Calcetines deportivos", Ropa, Pequeno, "Paquete de 6 pares de calcetines"),
    ("Chaqueta de invierno", Ropa, Grande, "Chaqueta impermeable con capucha"),
    ("Corbatas formales", Ropa, Pequeno, "Set de 3 corbatas de seda"),
    ("Cable USB-C", Cables, Pequeno, "Cable de carga USB-C de 2 metros"),
    ("Adaptador HDMI", Electronica, Pequeno, "Adaptador HDMI a VGA"),
    ("Disco duro externo", Electronica, Pequeno, "HDD externo de 1TB"),
    ("Router WiFi", Electronica, Mediano, "Router dual band AC1200"),
    ("Cables de red", Cables, Mediano, "Pack de 5 cables Ethernet Cat6"),
    ("Novela de ciencia ficción", Libros, Mediano, "Libro de 400 páginas de ciencia ficción"),
    ("Manual de programación", Libros, Grande, "Guía completa de Python"),
    ("Revista de tecnología", Libros, Pequeno, "Revista mensual de tecnología"),
    ("Diccionario bilingüe", Libros, Grande, "Diccionario Español-Inglés"),
    ("Comic de superhéroes", Libros, Pequeno, "Edición especial coleccionable"),
    ("Plantas artificiales", Otros, Mediano, "Decoración de plantas sintéticas"),
    ("Marco de fotos", Otros, Pequeno, "Marco de madera para foto 10x15"),
    ("Velas aromáticas", Otros, Pequeno, "Set de 3 velas de diferentes aromas"),
    ("Organizador de escritorio", Otros, Mediano, "Organizador con compartimentos"),
    ("Lámpara de mesa", Electronica, Mediano, "Lámpara LED regulable"),
];

/// Name fragment of the container that naturally holds a type
fn cajon_para(tipo: TipoObjeto) -> Option<&'static str> {
    match tipo {
        Papeleria | Electronica => Some("Oficina"),
        Cocina => Some("Cocina"),
        Herramientas => Some("Herramientas"),
        Ropa => Some("Ropa"),
        Cables => Some("Electrónicos"),
        Libros => Some("Libros"),
        Otros => None,
    }
}

/// Every 7th item stays unassigned; others go to the matching container,
/// or a random one when no container matches.
pub fn asignar_cajon<'a, R: Rng>(
    indice: usize,
    tipo: TipoObjeto,
    cajones: &'a [Cajon],
    rng: &mut R,
) -> Option<&'a Cajon> {
    if indice % 7 == 0 || cajones.is_empty() {
        return None;
    }
    cajon_para(tipo)
        .and_then(|fragmento| cajones.iter().find(|c| c.nombre.contains(fragmento)))
        .or_else(|| cajones.get(rng.gen_range(0..cajones.len())))
}

/// Load the demo inventory through the regular service layer
pub async fn seed_demo_data(
    cajones_api: &dyn CajonApi,
    objetos_api: &dyn ObjetoApi,
) -> anyhow::Result<SeedSummary> {
    info!("🌱 Seeding demo data...");
    let mut summary = SeedSummary::default();

    let mut cajones = Vec::with_capacity(CAJONES.len());
    for (nombre, capacidad, descripcion) in CAJONES {
        let input = CajonInput {
            nombre: nombre.to_string(),
            capacidad_maxima: i64::from(capacidad),
            descripcion: descripcion.to_string(),
        };
        match cajones_api.create(&input).await {
            Ok(cajon) => {
                info!("✅ Cajón creado: {} (ID: {})", cajon.nombre, cajon.id);
                cajones.push(cajon);
            }
            Err(e) => {
                error!("❌ Error creando cajón {}: {}", nombre, e);
                summary.errores += 1;
            }
        }
    }
    summary.cajones_creados = cajones.len();

    // Drawn before any await: ThreadRng is not Send
    let destinos: Vec<Option<Cajon>> = {
        let mut rng = rand::thread_rng();
        OBJETOS
            .iter()
            .enumerate()
            .map(|(i, (_, tipo, _, _))| asignar_cajon(i, *tipo, &cajones, &mut rng).cloned())
            .collect()
    };

    for ((nombre, tipo, tamanio, descripcion), destino) in OBJETOS.into_iter().zip(destinos) {
        let input = ObjetoInput {
            nombre: nombre.to_string(),
            tipo_objeto: Some(tipo),
            tamanio: Some(tamanio),
            cajon: destino.as_ref().map(|c| c.id.clone()),
            descripcion: descripcion.to_string(),
        };
        match objetos_api.create(&input).await {
            Ok(objeto) => {
                match &destino {
                    Some(cajon) => info!("✅ Objeto creado: {} → {}", objeto.nombre, cajon.nombre),
                    None => info!("✅ Objeto creado: {} (sin cajón)", objeto.nombre),
                }
                summary.objetos_creados += 1;
                if destino.is_none() {
                    summary.objetos_sin_cajon += 1;
                }
            }
            Err(e) => {
                error!("❌ Error creando objeto {}: {}", nombre, e);
                summary.errores += 1;
            }
        }
    }

    info!(
        "🎉 Seed complete: {} cajones, {} objetos ({} sin cajón), {} errores",
        summary.cajones_creados, summary.objetos_creados, summary.objetos_sin_cajon, summary.errores
    );
    Ok(summary)
}
