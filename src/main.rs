use std::path::Path;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use debrid_edge::assets::AssetManifest;
use debrid_edge::config::{AppState, Config};
use debrid_edge::logger;
use debrid_edge::server::{self, SignalHandler};
use debrid_edge::store::DirectoryStore;

/// Config file used when no path is given (extension is resolved by `config`)
const DEFAULT_CONFIG_PATH: &str = "config";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg)?;
    let manifest = cfg.load_manifest()?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg, manifest))
}

async fn async_main(cfg: Config, manifest: AssetManifest) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_reusable_listener(addr)?;

    let store = DirectoryStore::new(&cfg.store.path);
    if !Path::new(store.root()).is_dir() {
        logger::log_warning(&format!(
            "Content store directory '{}' does not exist; static requests will fail",
            store.root().display()
        ));
    }

    logger::log_server_start(&addr, &cfg, &manifest);
    let state = Arc::new(AppState::new(cfg, manifest, Arc::new(store)));

    let signals = Arc::new(SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    // Connections are served with spawn_local
    let local = tokio::task::LocalSet::new();
    local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::new(AtomicUsize::new(0)),
            signals,
        ))
        .await
}
