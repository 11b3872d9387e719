//! Server command: opens the configured store and runs the API.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use miette::{IntoDiagnostic, Result};

use crate::api::{self, Config, DEFAULT_ADMIN_PASSWORD};
use crate::store::{self, StoreKind};

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "FOLIO_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "FOLIO_PORT", default_value_t = api::DEFAULT_PORT)]
    pub port: u16,

    /// Directory for content files, the database and uploads
    #[arg(long, env = "FOLIO_DATA_DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Content store backend
    #[arg(long, env = "FOLIO_STORE", value_enum, default_value_t = StoreKind::File)]
    pub store: StoreKind,

    /// Admin password
    #[arg(
        long,
        env = "FOLIO_ADMIN_PASSWORD",
        default_value = DEFAULT_ADMIN_PASSWORD,
        hide_env_values = true,
        hide_default_value = true
    )]
    pub admin_password: String,

    /// Hours an admin session stays valid
    #[arg(long, default_value_t = 12)]
    pub session_ttl_hours: u64,

    /// Built frontend to serve at /
    #[arg(long, env = "FOLIO_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Serve OpenAPI docs at /docs
    #[arg(long)]
    pub docs: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl From<ServeArgs> for Config {
    fn from(args: ServeArgs) -> Self {
        Config {
            host: args.host,
            port: args.port,
            data_dir: args.data_dir,
            store: args.store,
            admin_password: args.admin_password,
            session_ttl: Duration::from_secs(args.session_ttl_hours * 60 * 60),
            static_dir: args.static_dir,
            enable_docs: args.docs,
            verbosity: args.verbose,
        }
    }
}

/// Run the API server
pub async fn run(args: ServeArgs) -> Result<()> {
    let config = Config::from(args);

    std::fs::create_dir_all(&config.data_dir).into_diagnostic()?;
    let content = store::open(config.store, &config.data_dir).await?;

    // Print startup banner BEFORE starting server (before logging is initialized)
    let (host, port) = (config.host, config.port);
    println!();
    println!("🚀 folio server starting...");
    println!("   Site:     http://{}:{}/", host, port);
    println!("   API:      http://{}:{}/api/v1", host, port);
    if config.enable_docs {
        println!("   Docs:     http://{}:{}/docs", host, port);
    }
    println!();
    println!("   Store:    {} ({})", content.backend(), config.data_dir.display());
    if let Some(dir) = &config.static_dir {
        println!("   Frontend: {}", dir.display());
    }
    println!();

    api::run(config, content).await.into_diagnostic()?;

    Ok(())
}
