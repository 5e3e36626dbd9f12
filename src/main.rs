use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logstore::config::{ConfigBuilder, DEFAULT_HOST, DEFAULT_LOG_LEVEL, DEFAULT_PORT};
use logstore::log::LogStore;
use logstore::server;

#[derive(Parser, Debug)]
#[command(name = "logstore", version, about = "In-memory log collection served over HTTP")]
struct Args {
    /// Address to listen on.
    #[arg(long, env = "LOGSTORE_HOST", default_value = DEFAULT_HOST)]
    host: String,

    #[arg(short, long, env = "LOGSTORE_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Worker threads. Defaults to the number of physical cores.
    #[arg(short, long, env = "LOGSTORE_WORKERS")]
    workers: Option<usize>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "LOGSTORE_LOG", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut builder = ConfigBuilder::new()
        .with_host(args.host)
        .with_port(args.port)
        .with_log_level(args.log_level);
    if let Some(workers) = args.workers {
        builder = builder.with_workers(workers);
    }
    let config = builder.build();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting log store service");

    let running = server::bind(&config, Arc::new(LogStore::new()))?;
    running.server.await?;

    Ok(())
}
