use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sistema_cajones::config::ClientConfig;
use sistema_cajones::forms::{FormError, LoginForm};
use sistema_cajones::infrastructure::{seed, session};
use sistema_cajones::models::{EntityId, Tamanio, TipoObjeto};
use sistema_cajones::notifications::{AutoConfirm, Confirmation, ConsoleNotifier, StdinConfirm};
use sistema_cajones::services::auth_service::RegisterRequest;
use sistema_cajones::views::{Route, render};
use sistema_cajones::widgets::ChatWidget;
use sistema_cajones::{AppContext, create_context};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sistema de Cajones: organiza tus cajones y objetos", long_about = None)]
struct Args {
    /// Override the backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Skip confirmation prompts
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a route: /, /home or /gestion-cajon/<id>
    Open {
        #[arg(default_value = "/home")]
        path: String,
    },
    Login {
        username: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    Logout,
    Register {
        username: String,
        #[arg(short, long)]
        password: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
    },
    /// Container operations
    Cajon {
        #[command(subcommand)]
        action: CajonCommand,
    },
    /// Item operations
    Objeto {
        #[command(subcommand)]
        action: ObjetoCommand,
    },
    /// List the item types and sizes offered by the backend
    Opciones,
    Recomendaciones {
        #[command(subcommand)]
        action: RecomendacionCommand,
    },
    Chat,
    /// Load demo containers and items
    Seed,
}

#[derive(Subcommand, Debug)]
enum CajonCommand {
    Create {
        nombre: String,
        #[arg(short, long, default_value_t = 10)]
        capacidad: i64,
        #[arg(short, long)]
        descripcion: Option<String>,
    },
    Edit {
        id: String,
        #[arg(short, long)]
        nombre: Option<String>,
        #[arg(short, long)]
        capacidad: Option<i64>,
        #[arg(short, long)]
        descripcion: Option<String>,
    },
    Delete {
        id: String,
    },
    Stats {
        id: String,
    },
    Optimize {
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ObjetoCommand {
    Create {
        nombre: String,
        #[arg(short, long, value_parser = parse_tipo)]
        tipo: Option<TipoObjeto>,
        #[arg(short = 's', long, value_parser = parse_tamanio)]
        tamanio: Option<Tamanio>,
        #[arg(short, long)]
        cajon: Option<String>,
        #[arg(short, long)]
        descripcion: Option<String>,
    },
    Edit {
        id: String,
        #[arg(short, long)]
        nombre: Option<String>,
        #[arg(short, long, value_parser = parse_tipo)]
        tipo: Option<TipoObjeto>,
        #[arg(short = 's', long, value_parser = parse_tamanio)]
        tamanio: Option<Tamanio>,
        #[arg(short, long, conflicts_with = "sin_cajon")]
        cajon: Option<String>,
        /// Leave the item without container
        #[arg(long)]
        sin_cajon: bool,
        #[arg(short, long)]
        descripcion: Option<String>,
    },
    Delete {
        id: String,
    },
    Search {
        query: String,
    },
    /// Move an item; without --to it is left unassigned
    Move {
        id: String,
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RecomendacionCommand {
    List,
    Generate {
        #[arg(long)]
        usuario: Option<String>,
    },
    Implement {
        id: String,
    },
    Unimplement {
        id: String,
    },
    Pending,
    Stats,
}

fn parse_tipo(value: &str) -> Result<TipoObjeto, String> {
    TipoObjeto::from_code(value).ok_or_else(|| {
        let codes: Vec<&str> = TipoObjeto::ALL.iter().map(|t| t.code()).collect();
        format!("tipo desconocido, use uno de: {}", codes.join(", "))
    })
}

fn parse_tamanio(value: &str) -> Result<Tamanio, String> {
    Tamanio::from_code(value).ok_or_else(|| {
        let codes: Vec<&str> = Tamanio::ALL.iter().map(|t| t.code()).collect();
        format!("tamaño desconocido, use uno de: {}", codes.join(", "))
    })
}

fn read_secret(prompt: &str) -> anyhow::Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;
    let mut value = String::new();
    std::io::stdin().read_line(&mut value)?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

/// Print per-field messages for a rejected form
fn report(err: FormError) -> anyhow::Error {
    if let Some(errors) = err.field_errors() {
        for (field, message) in errors {
            eprintln!("  {}: {}", field, message);
        }
    }
    anyhow::Error::new(err)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sistema_cajones=info,cajones=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = args.api_url.clone() {
        config.api_base_url = url;
    }
    info!("🚀 Sistema de Cajones → {}", config.api_base_url);

    let session_store = session::setup_session_store(&config);
    let ctx = create_context(config, session_store, Arc::new(ConsoleNotifier))
        .context("invalid backend URL")?;

    let confirm: Box<dyn Confirmation> = if args.yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(StdinConfirm)
    };

    match args.command {
        Command::Open { path } => open(&ctx, &path).await,
        Command::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Contraseña: ")?,
            };
            let mut form = LoginForm::new();
            form.set_username(username).set_password(password);
            form.submit(&ctx.auth, ctx.notifier.as_ref())
                .await
                .map_err(report)?;
            Ok(())
        }
        Command::Logout => {
            ctx.auth.logout().await;
            ctx.notifier.success("Sesión cerrada");
            Ok(())
        }
        Command::Register {
            username,
            password,
            email,
        } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("Contraseña: ")?,
            };
            let request = RegisterRequest {
                username,
                password,
                email,
            };
            match ctx.auth.register(&request).await {
                Ok(_) => {
                    ctx.notifier
                        .success(&format!("Usuario '{}' creado exitosamente", request.username));
                    Ok(())
                }
                Err(e) => {
                    ctx.notifier.error(&e.to_string());
                    Err(e.into())
                }
            }
        }
        Command::Cajon { action } => cajon(&ctx, action, confirm.as_ref()).await,
        Command::Objeto { action } => objeto(&ctx, action, confirm.as_ref()).await,
        Command::Opciones => {
            let (tipos, tamanios) = tokio::join!(ctx.objetos.tipos_objeto(), ctx.objetos.tamanios());
            println!("{}", render::opciones("Tipos de objeto", &tipos));
            println!("{}", render::opciones("Tamaños", &tamanios));
            Ok(())
        }
        Command::Recomendaciones { action } => recomendaciones(&ctx, action).await,
        Command::Chat => {
            let mut chat = ChatWidget::new();
            chat.toggle();
            for linea in chat.lineas() {
                println!("{}", linea);
            }
            Ok(())
        }
        Command::Seed => {
            let summary = seed::seed_demo_data(ctx.cajones.as_ref(), ctx.objetos.as_ref()).await?;
            println!(
                "🎉 {} cajones y {} objetos creados ({} sin cajón)",
                summary.cajones_creados, summary.objetos_creados, summary.objetos_sin_cajon
            );
            if summary.errores > 0 {
                bail!("{} elementos no pudieron crearse", summary.errores);
            }
            Ok(())
        }
    }
}

async fn open(ctx: &AppContext, path: &str) -> anyhow::Result<()> {
    let Some(route) = Route::parse(path) else {
        bail!("Ruta desconocida: {}", path);
    };
    if route.requires_session() && !ctx.auth.is_authenticated() {
        warn!("No hay sesión activa; inicia sesión con `cajones login`");
    }

    match route {
        Route::Login => {
            match ctx.auth.current_user() {
                Some(user) => println!("Sesión iniciada como {}", user.username),
                None => println!("🔐 Inicia sesión: cajones login <usuario>"),
            }
            Ok(())
        }
        Route::Home => {
            let mut view = ctx.home_view();
            let mut widget = ctx.recomendaciones_widget();
            tokio::join!(view.load(), widget.mount());
            println!("{}", render::home(view.state()));
            if widget.pendientes() > 0 {
                println!("💡 {} recomendaciones pendientes", widget.pendientes());
            }
            Ok(())
        }
        Route::GestionCajon(id) => {
            let mut view = ctx.gestion_cajon_view(id);
            view.load().await;
            println!("{}", render::gestion_cajon(view.state()));
            Ok(())
        }
    }
}

async fn cajon(
    ctx: &AppContext,
    action: CajonCommand,
    confirm: &dyn Confirmation,
) -> anyhow::Result<()> {
    let mut home = ctx.home_view();
    match action {
        CajonCommand::Create {
            nombre,
            capacidad,
            descripcion,
        } => {
            let mut form = home.abrir_nuevo_cajon();
            form.set_nombre(nombre).set_capacidad(capacidad);
            if let Some(descripcion) = descripcion {
                form.set_descripcion(descripcion);
            }
            home.guardar_cajon(&mut form).await.map_err(report)?;
            println!("{}", render::home(home.state()));
        }
        CajonCommand::Edit {
            id,
            nombre,
            capacidad,
            descripcion,
        } => {
            let id = EntityId::from(id);
            let mut view = ctx.gestion_cajon_view(id);
            view.load().await;
            let Some(mut form) = view.abrir_editar_cajon() else {
                bail!("Cajón no encontrado");
            };
            if let Some(nombre) = nombre {
                form.set_nombre(nombre);
            }
            if let Some(capacidad) = capacidad {
                form.set_capacidad(capacidad);
            }
            if let Some(descripcion) = descripcion {
                form.set_descripcion(descripcion);
            }
            view.guardar_cajon(&mut form).await.map_err(report)?;
            println!("{}", render::gestion_cajon(view.state()));
        }
        CajonCommand::Delete { id } => {
            home.load().await;
            if home.eliminar_cajon(&EntityId::from(id), confirm).await? {
                println!("{}", render::home(home.state()));
            }
        }
        CajonCommand::Stats { id } => {
            let view = ctx.gestion_cajon_view(EntityId::from(id));
            let stats = view.estadisticas().await?;
            println!("{}", render::estadisticas_cajon(&stats));
        }
        CajonCommand::Optimize { id } => {
            let mut view = ctx.gestion_cajon_view(EntityId::from(id));
            let resultado = view.optimizar().await?;
            println!("{}", serde_json::to_string_pretty(&resultado)?);
            println!("{}", render::gestion_cajon(view.state()));
        }
    }
    Ok(())
}

async fn objeto(
    ctx: &AppContext,
    action: ObjetoCommand,
    confirm: &dyn Confirmation,
) -> anyhow::Result<()> {
    match action {
        ObjetoCommand::Create {
            nombre,
            tipo,
            tamanio,
            cajon,
            descripcion,
        } => {
            let mut home = ctx.home_view();
            let mut form = home.abrir_nuevo_objeto();
            form.cargar_opciones(ctx.cajones.as_ref(), ctx.objetos.as_ref(), ctx.notifier.as_ref())
                .await?;
            form.set_nombre(nombre);
            if let Some(tipo) = tipo {
                form.set_tipo(Some(tipo));
            }
            if let Some(tamanio) = tamanio {
                form.set_tamanio(Some(tamanio));
            }
            if let Some(cajon) = cajon {
                let cajon = EntityId::from(cajon);
                if !form.cajones().iter().any(|c| c.id == cajon) {
                    bail!("Cajón no encontrado");
                }
                form.set_cajon(Some(cajon));
            }
            if let Some(descripcion) = descripcion {
                form.set_descripcion(descripcion);
            }
            home.guardar_objeto(&mut form).await.map_err(report)?;
            println!("{}", render::home(home.state()));
        }
        ObjetoCommand::Edit {
            id,
            nombre,
            tipo,
            tamanio,
            cajon,
            sin_cajon,
            descripcion,
        } => {
            let mut home = ctx.home_view();
            home.load().await;
            let Some(mut form) = home.abrir_editar_objeto(&EntityId::from(id)) else {
                bail!("Objeto no encontrado");
            };
            if let Some(nombre) = nombre {
                form.set_nombre(nombre);
            }
            if tipo.is_some() {
                form.set_tipo(tipo);
            }
            if tamanio.is_some() {
                form.set_tamanio(tamanio);
            }
            if let Some(cajon) = cajon {
                form.set_cajon(Some(EntityId::from(cajon)));
            } else if sin_cajon {
                form.set_cajon(None);
            }
            if let Some(descripcion) = descripcion {
                form.set_descripcion(descripcion);
            }
            home.guardar_objeto(&mut form).await.map_err(report)?;
            println!("{}", render::home(home.state()));
        }
        ObjetoCommand::Delete { id } => {
            let mut home = ctx.home_view();
            home.load().await;
            if home.eliminar_objeto(&EntityId::from(id), confirm).await? {
                println!("{}", render::home(home.state()));
            }
        }
        ObjetoCommand::Search { query } => {
            let objetos = ctx.objetos.buscar(&query).await?;
            println!("{}", render::objetos(&objetos));
        }
        ObjetoCommand::Move { id, to } => {
            let objeto = ctx.objetos.get(&EntityId::from(id)).await?;
            let origen = objeto.cajon_id().cloned();
            let destino = to.map(EntityId::from);
            match origen {
                Some(origen) => {
                    let mut view = ctx.gestion_cajon_view(origen);
                    view.mover_objeto(&objeto.id, destino.as_ref()).await?;
                    println!("{}", render::gestion_cajon(view.state()));
                }
                None => {
                    ctx.objetos.mover(&objeto.id, destino.as_ref()).await?;
                    ctx.notifier.success("Objeto movido exitosamente");
                }
            }
        }
    }
    Ok(())
}

async fn recomendaciones(ctx: &AppContext, action: RecomendacionCommand) -> anyhow::Result<()> {
    let mut widget = ctx.recomendaciones_widget();
    match action {
        RecomendacionCommand::List => {
            if !widget.mount().await {
                println!("No hay recomendaciones (¿sesión iniciada?)");
            }
            for rec in widget.recomendaciones() {
                print!("{}", render::recomendacion(rec));
            }
        }
        RecomendacionCommand::Generate { usuario } => {
            let usuario = usuario.map(EntityId::from);
            let lista = widget.generar(usuario.as_ref()).await?.to_vec();
            if widget.generado_con_ia() {
                println!("🤖 Generado con IA");
            }
            if let Some(resumen) = widget.resumen() {
                println!(
                    "Cajones analizados: {} | Objetos: {} | Recomendaciones: {}",
                    resumen.total_cajones.unwrap_or_default(),
                    resumen.total_objetos.unwrap_or_default(),
                    resumen
                        .total_recomendaciones
                        .unwrap_or(lista.len() as u32)
                );
            }
            for rec in &lista {
                print!("{}", render::recomendacion(rec));
            }
        }
        RecomendacionCommand::Implement { id } => {
            widget.mount().await;
            widget.marcar_implementada(&EntityId::from(id)).await?;
            ctx.notifier.success("Recomendación marcada como implementada");
        }
        RecomendacionCommand::Unimplement { id } => {
            widget.mount().await;
            widget.desmarcar_implementada(&EntityId::from(id)).await?;
            ctx.notifier.success("Recomendación marcada como pendiente");
        }
        RecomendacionCommand::Pending => {
            let pendientes = ctx.recomendaciones.pendientes().await?;
            if pendientes.is_empty() {
                println!("No hay recomendaciones pendientes");
            }
            for rec in &pendientes {
                print!("{}", render::recomendacion(rec));
            }
        }
        RecomendacionCommand::Stats => {
            let stats = ctx.recomendaciones.estadisticas_generales().await?;
            println!("{}", render::estadisticas_generales(&stats));
        }
    }
    Ok(())
}
