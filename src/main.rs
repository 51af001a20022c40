use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use career_portal::api::{
    api_config, career::CareerService, health::health_config, organization::OrganizationService,
    security_headers, validation,
};
use career_portal::config::Config;
use career_portal::db::{self, CareerStore, PgCareerStore};
use career_portal::shutdown::ShutdownCoordinator;

#[derive(Parser)]
#[command(name = "career-portal")]
#[command(about = "Career posting service for recruiter dashboards")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,

    /// Grant an organization active-career slots beyond its plan
    SetJobSlots {
        /// Organization ID
        org_id: String,

        /// Number of extra slots
        #[arg(value_parser = clap::value_parser!(i32).range(0..))]
        slots: i32,
    },
}

fn init_logging(log_dir: &str) {
    // Log files will be created as: logs/info.log.2025-01-01, logs/error.log.2025-01-01, etc.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(log_dir, "info.log");
    let warn_file = tracing_appender::rolling::daily(log_dir, "warn.log");
    let error_file = tracing_appender::rolling::daily(log_dir, "error.log");
    let debug_file = tracing_appender::rolling::daily(log_dir, "debug.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(debug_file)
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().expect("Failed to load configuration");

    std::fs::create_dir_all(&config.log_dir).expect("Failed to create logs directory");
    init_logging(&config.log_dir);

    let pool = db::connection::get_connection(&config.database_url, config.max_db_connections)
        .await
        .expect("Failed to connect to database");
    info!("Database connection pool established");

    db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let store: Arc<dyn CareerStore> = Arc::new(PgCareerStore::new(pool.clone()));

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            pool.close().await;
            Ok(())
        }
        Command::SetJobSlots { org_id, slots } => {
            let result = OrganizationService::new(store)
                .set_extra_job_slots(&org_id, slots)
                .await;
            pool.close().await;
            match result {
                Ok(response) => {
                    info!("{} ({} extra slots for {})", response.message, response.extra_job_slots, org_id);
                    Ok(())
                }
                Err(e) => {
                    error!("Failed to set job slots for {}: {}", org_id, e);
                    Err(std::io::Error::other(e.to_string()))
                }
            }
        }
        Command::Serve => serve(config, store, pool).await,
    }
}

async fn serve(
    config: Config,
    store: Arc<dyn CareerStore>,
    pool: sqlx::PgPool,
) -> std::io::Result<()> {
    info!("Starting career-portal application");
    info!("Configuration loaded successfully:");
    info!("  - Max payload size: {} bytes", config.max_payload_size);
    info!("  - Max database connections: {}", config.max_db_connections);
    info!("  - Default job limit: {}", config.default_job_limit);

    let max_payload_size = config.max_payload_size;
    let default_job_limit = config.default_job_limit;

    let server = HttpServer::new(move || {
        let career_service = web::Data::new(CareerService::new(store.clone(), default_job_limit));
        let organization_service = web::Data::new(OrganizationService::new(store.clone()));

        // Configure payload size limits globally
        let payload_config = web::PayloadConfig::default().limit(max_payload_size);

        App::new()
            .wrap(security_headers())
            .app_data(web::Data::from(store.clone()))
            .app_data(career_service)
            .app_data(organization_service)
            .app_data(payload_config)
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(health_config)
            .configure(api_config)
    });

    info!("Server starting on http://{}:{}", config.host, config.port);

    let server = server.bind((config.host.as_str(), config.port))?.run();
    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}
