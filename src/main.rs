use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use scangate::api::routes::{api_routes, root_routes};
use scangate::api::services::AppStartTime;
use scangate::config::{self, AppConfig};
use scangate::services::{CodeService, RegistrationService};
use scangate::storage::StorageFactory;
use scangate::system::init_logging;

#[derive(Parser)]
#[command(name = "scangate", version, about = "QR registration gateway")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a sample configuration file and exit
    GenerateConfig {
        #[arg(default_value = "config.toml")]
        path: PathBuf,
    },
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Some(Command::GenerateConfig { path }) = cli.command {
        std::fs::write(&path, AppConfig::generate_sample_config())?;
        println!("Sample configuration written to {}", path.display());
        return Ok(());
    }

    let app_start_time = AppStartTime {
        start_datetime: chrono::Utc::now(),
    };

    config::init_config();
    let config = config::get_config();

    // Missing backend settings are fatal, there is nothing to recover into.
    if let Err(e) = config.validate() {
        eprintln!("{}", e.format_simple());
        std::process::exit(1);
    }

    let _logging_guard = init_logging(config);

    let storage = match StorageFactory::create().await {
        Ok(storage) => storage,
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };
    info!("Using storage backend: {}", storage.backend_name().await);

    let code_service = Arc::new(CodeService::new(
        storage.clone(),
        config.app.public_base_url.clone(),
        config.app.destination_url.clone(),
        config.app.code_suffix_length,
    ));
    let registration_service = Arc::new(RegistrationService::new(
        storage.clone(),
        config.app.destination_url.clone(),
    ));

    if config.app.admin_token.is_empty() {
        info!("Registry API is open (app.admin_token not set)");
    } else {
        info!("Registry API requires a bearer token");
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("Starting server at http://{}", bind_address);

    let cors_enabled = config.server.cors_enabled;
    HttpServer::new(move || {
        let cors = if cors_enabled {
            Cors::permissive()
        } else {
            Cors::default()
        };

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .app_data(web::Data::new(code_service.clone()))
            .app_data(web::Data::new(registration_service.clone()))
            .service(api_routes())
            .configure(root_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}
