use std::process::ExitCode;

use tracing::{error, info};

use filebox::file::StorageManager;
use filebox::web::WebServer;
use filebox::Config;

#[tokio::main]
async fn main() -> ExitCode {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = filebox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        filebox::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    info!("Filebox {}", env!("CARGO_PKG_VERSION"));

    let manager = match StorageManager::from_config(&config.files) {
        Ok(manager) => manager,
        Err(e) => {
            error!("Failed to initialize file storage: {e}");
            return ExitCode::FAILURE;
        }
    };

    let server = match WebServer::new(&config, manager) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
