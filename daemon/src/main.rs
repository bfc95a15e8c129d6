//! swatchmeta daemon — entry point for the color meta service.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use config::{ServiceConfig, StoreBackend};
use swatchmeta_auth::TokenAuthorizer;
use swatchmeta_nullables::NullTermMetaStore;
use swatchmeta_rpc::{AppState, ColorMetaClient, RpcServer};
use swatchmeta_store::TermMetaStore;
use swatchmeta_store_lmdb::LmdbEnvironment;
use swatchmeta_types::{resolve_color, TermId};
use swatchmeta_utils::{init_logging, LogFormat};

#[derive(Parser)]
#[command(name = "swatchmeta", about = "Swatch color metadata service for taxonomy terms")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base;
    /// CLI flags and env vars override them.
    #[arg(long, global = true, env = "SWATCHMETA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "SWATCHMETA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "SWATCHMETA_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP service.
    Serve {
        /// Address to bind to.
        #[arg(long, env = "SWATCHMETA_LISTEN_ADDR")]
        listen_addr: Option<String>,

        /// HTTP port.
        #[arg(long, env = "SWATCHMETA_PORT")]
        port: Option<u16>,

        /// Term metadata backend.
        #[arg(long, value_enum, env = "SWATCHMETA_STORE")]
        store: Option<StoreBackend>,

        /// LMDB data directory.
        #[arg(long, env = "SWATCHMETA_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },

    /// Set the swatch color of a term through a running service.
    SetColor {
        /// REST root the endpoint is mounted under.
        #[arg(long, default_value = "http://127.0.0.1:8080", env = "SWATCHMETA_URL")]
        url: String,

        /// Bearer token of a caller with `edit_products`.
        #[arg(long, env = "SWATCHMETA_TOKEN")]
        token: String,

        #[arg(long)]
        term_id: TermId,

        /// Hex code or CSS color name (e.g. "Navy").
        #[arg(long)]
        color: String,
    },

    /// Print every meta entry of a term from the local LMDB store.
    Show {
        #[arg(long)]
        term_id: TermId,

        /// LMDB data directory.
        #[arg(long, env = "SWATCHMETA_DATA_DIR")]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_warning) = match cli.config.as_deref() {
        Some(path) => match ServiceConfig::from_toml_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (
                ServiceConfig::default(),
                Some(format!("{e}, using defaults")),
            ),
        },
        None => (ServiceConfig::default(), None),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }

    init_logging(config.log_format, &config.log_level);
    if let Some(warning) = config_warning {
        tracing::warn!("{warning}");
    } else if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Serve {
            listen_addr,
            port,
            store,
            data_dir,
        } => {
            if let Some(addr) = listen_addr {
                config.listen_addr = addr;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(store) = store {
                config.store_backend = store;
            }
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            serve(config).await
        }
        Command::SetColor {
            url,
            token,
            term_id,
            color,
        } => {
            let hex = resolve_color(&color)
                .with_context(|| format!("cannot determine a hex code for {color:?}"))?;
            let client = ColorMetaClient::new(url, token)?;
            let response = client.set_color(term_id, &hex).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Show { term_id, data_dir } => {
            if let Some(dir) = data_dir {
                config.data_dir = dir;
            }
            let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
                .with_context(|| format!("opening store at {}", config.data_dir.display()))?;
            let all_meta = env.term_meta_store().get_all_meta(term_id)?;
            println!("{}", serde_json::to_string_pretty(&all_meta)?);
            Ok(())
        }
    }
}

async fn serve(config: ServiceConfig) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let authorizer = Arc::new(TokenAuthorizer::new(config.tokens.clone()));
    if authorizer.is_empty() {
        tracing::warn!("no tokens configured: every request will be rejected");
    }

    tracing::info!(
        "Starting swatchmeta on {}:{} (store: {:?}, tokens: {})",
        config.listen_addr,
        config.port,
        config.store_backend,
        authorizer.len(),
    );

    let server = RpcServer::new(
        config.listen_addr.clone(),
        config.port,
        AppState::new(store, authorizer),
    );
    server.start().await?;

    tracing::info!("swatchmeta exited cleanly");
    Ok(())
}

fn open_store(config: &ServiceConfig) -> anyhow::Result<Arc<dyn TermMetaStore>> {
    match config.store_backend {
        StoreBackend::Lmdb => {
            let env = LmdbEnvironment::open(&config.data_dir, config.map_size_bytes())
                .with_context(|| format!("opening store at {}", config.data_dir.display()))?;
            Ok(Arc::new(env.term_meta_store()))
        }
        StoreBackend::Memory => {
            tracing::warn!("using in-memory store: metadata is lost on exit");
            Ok(Arc::new(NullTermMetaStore::new()))
        }
    }
}
