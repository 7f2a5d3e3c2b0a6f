use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use location_finder::catalog::load_catalog;
use location_finder::config::{LoggingSettings, Settings};
use location_finder::core::LocationFinder;
use location_finder::routes::{self, handle_json_payload_error, handle_query_payload_error, AppState};
use location_finder::services::{AuditLog, SessionStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging; RUST_LOG takes precedence over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.json().init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    init_tracing(&settings.logging);

    info!("Starting location finder service...");
    info!("Configuration loaded successfully");

    // Refuse to start on a broken catalog
    let catalog = load_catalog(settings.catalog.path.as_deref()).map_err(|e| {
        error!("Failed to load catalog: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!(
        "Catalog loaded ({} criteria, {} locations)",
        catalog.criteria().len(),
        catalog.locations().len()
    );

    let weights = settings.scoring_weights();
    let finder = LocationFinder::new(weights);

    info!("Finder initialized with weights: {:?}", weights);

    let sessions = Arc::new(SessionStore::new(
        settings.sessions.max_sessions,
        settings.sessions.idle_timeout_secs,
    ));

    info!(
        "Session store initialized (max: {} sessions, idle timeout: {}s)",
        settings.sessions.max_sessions, settings.sessions.idle_timeout_secs
    );

    let audit = Arc::new(AuditLog::new(settings.audit.capacity));

    // Build application state
    let app_state = AppState {
        catalog: Arc::new(catalog),
        finder,
        sessions,
        audit,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
