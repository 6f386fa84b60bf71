use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use motor_rental::config::{DatabaseConfig, EnvironmentConfig};
use motor_rental::database;
use motor_rental::middleware::cors_layer;
use motor_rental::services::expiry_service::run_expiry_sweeper;
use motor_rental::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏍️ Motor Rental - API de alquiler de motos");
    info!("==========================================");

    let config = EnvironmentConfig::from_env()?;
    if config.admin_password_hash.is_empty() {
        warn!("⚠️ ADMIN_PASSWORD_HASH no configurado: el login de administrador está deshabilitado");
    }

    // Inicializar base de datos
    let db_config = DatabaseConfig::from_env()?;
    let pool = match database::connect(&db_config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {:#}", e);
            return Err(e);
        }
    };
    database::run_migrations(&pool).await?;

    let addr: SocketAddr = config.server_url().parse()?;
    let cors = cors_layer(&config.cors_origins);
    let sweep_every = Duration::from_secs(config.expiry_sweep_interval_secs);
    let app_state = AppState::new(pool, config);

    // Barrido de reservas pendientes caducadas
    let expiry = app_state.expiry_policy();
    if expiry.is_enabled() {
        info!("⏰ Expiración de reservas pendientes activa (cada {:?})", sweep_every);
        tokio::spawn(run_expiry_sweeper(app_state.bookings.clone(), expiry, sweep_every));
    }

    let app = create_router(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints públicos:");
    info!("   GET  /health - Health check");
    info!("   POST /api/login - Login de administrador");
    info!("   GET  /api/motorcycles - Catálogo de motos");
    info!("   GET  /api/motorcycles/:id - Detalle de moto");
    info!("   POST /api/bookings - Solicitar reserva");
    info!("🔐 Endpoints de administración:");
    info!("   GET  /api/user - Administrador actual");
    info!("   POST /api/logout - Cerrar sesión");
    info!("   POST /api/motorcycles - Crear moto");
    info!("   PUT  /api/motorcycles/:id - Actualizar moto");
    info!("   DELETE /api/motorcycles/:id - Eliminar moto");
    info!("   GET  /api/bookings?status= - Listar reservas");
    info!("   GET  /api/bookings/:id - Obtener reserva");
    info!("   PUT  /api/bookings/:id - Cambiar estado de reserva");
    info!("   DELETE /api/bookings/:id - Eliminar reserva");
    info!("   GET  /api/dashboard - Métricas del dashboard");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
