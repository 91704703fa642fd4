//! LeadScout — local background service for the job lead extractor extension.

use std::path::PathBuf;
use std::sync::Arc;

use leadscout_core::LeadScoutConfig;
use leadscout_model::{ModelConfig, ModelSessionClient};
use leadscout_server::routes;
use leadscout_server::AppState;
use leadscout_store::{export, LeadStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn resolve_data_dir() -> PathBuf {
    std::env::var("LEADSCOUT_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(|p| p.to_path_buf()));
            if let Some(dir) = exe_dir {
                let parent_data = dir.join("../data");
                if parent_data.exists() {
                    return parent_data;
                }
            }
            PathBuf::from("data")
        })
}

/// Write `contents` to `target`, or stdout when no target is given.
fn emit(contents: &str, target: Option<&String>) -> anyhow::Result<()> {
    match target {
        Some(path) => {
            std::fs::write(path, contents)?;
            eprintln!("Wrote {}", path);
        }
        None => println!("{}", contents),
    }
    Ok(())
}

fn open_store() -> anyhow::Result<LeadStore> {
    let config = LeadScoutConfig::from_env(resolve_data_dir())?;
    Ok(LeadStore::open(&config.data_paths.leads_file)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    // Handle CLI subcommands
    if args.len() > 1 {
        match args[1].as_str() {
            "export-csv" => {
                let store = open_store()?;
                let csv = export::to_csv(&store.list())?;
                emit(&csv, args.get(2))?;
                return Ok(());
            }
            "export-text" => {
                let store = open_store()?;
                emit(&export::to_text(&store.list()), args.get(2))?;
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("LeadScout — job lead extraction service");
                println!();
                println!("Usage: leadscout [command]");
                println!();
                println!("Commands:");
                println!("  (none)                   Start the service");
                println!("  export-csv [file]        Export stored leads as CSV");
                println!("  export-text [file]       Export stored leads as plain text");
                println!("  help                     Show this help message");
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'leadscout help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    // Normal service startup
    let data_dir = resolve_data_dir();

    info!("Data directory: {}", data_dir.display());

    let config = LeadScoutConfig::from_env(&data_dir)?;

    let store = LeadStore::open(&config.data_paths.leads_file)
        .map_err(|e| anyhow::anyhow!("Failed to open lead store: {}", e))?;

    let model_config_file = &config.data_paths.model_config_file;
    if !model_config_file.exists() {
        let defaults = ModelConfig {
            config_path: model_config_file.clone(),
            ..Default::default()
        };
        match defaults.save() {
            Ok(()) => info!("Wrote default model config to {}", model_config_file.display()),
            Err(e) => tracing::warn!("Could not write {}: {}", model_config_file.display(), e),
        }
    }
    let model_config = ModelConfig::load(model_config_file);
    let backend = leadscout_model::create_backend(&model_config)?;
    let client = ModelSessionClient::new(backend, model_config.timeout());
    if !client.is_available().await {
        tracing::warn!("{}", client.unavailable_reason());
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config, model_config, store, client));

    // Build router
    let app = routes::build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("LeadScout listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
