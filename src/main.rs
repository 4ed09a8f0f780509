use clap::Parser;
use sound_server::config::{self, AppState, Config};
use sound_server::{logger, server};
use std::sync::Arc;

/// Serve the current directory over HTTP with CORS and audio range support.
#[derive(Debug, Parser)]
#[command(name = "sound_server", version)]
struct Cli {
    /// Config file path (extension optional)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: String,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory to serve
    #[arg(long)]
    root: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = Config::load_from(&cli.config)?;
    if let Some(host) = cli.host {
        cfg.server.host = host;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if let Some(root) = cli.root {
        cfg.media.root = root;
    }

    logger::init(&cfg)?;

    // Tokio runtime; thread count follows `server.workers` when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::create_reusable_listener(addr)?;

    logger::log_server_start(&listener.local_addr()?, &state.root, &state.config);

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals))?;

    // Connections are served by local tasks on this set
    let local = tokio::task::LocalSet::new();
    let open_connections = local
        .run_until(server::start_server_loop(
            listener,
            state,
            Arc::clone(&signals.shutdown),
        ))
        .await;

    logger::log_shutdown(open_connections);
    Ok(())
}
