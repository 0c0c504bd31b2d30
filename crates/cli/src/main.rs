use clap::Parser;
use stub_relay_domain::{CliOverrides, Config};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "stub-relay")]
#[command(version)]
#[command(about = "Forwarding DNS stub relay")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Upstream resolver (host:port)
    #[arg(short = 'r', long)]
    resolver: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS listening port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        resolver: cli.resolver.clone(),
        bind_address: cli.bind.clone(),
        dns_port: cli.port,
        log_level: cli.log_level.clone(),
    };

    if let Some(path) = cli.write_config.as_deref() {
        let config = Config::load(cli.config.as_deref(), cli_overrides)?;
        config.save(path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting stub-relay v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = cli.config.clone().or_else(Config::get_config_path) {
        info!(path = %path, "Configuration loaded");
    }

    let dns_services = di::DnsServices::new(&config).await?;
    let listen_addr = config.listen_addr()?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Shutdown signal received");
                signal_token.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
        }
    });

    server::start_dns_server(listen_addr, dns_services.handler, shutdown).await?;

    info!("Server shutdown complete");
    Ok(())
}
