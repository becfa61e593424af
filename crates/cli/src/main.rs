use clap::Parser;
use pihole_collector_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "pihole-collector")]
#[command(version)]
#[command(about = "Prometheus exporter for Pi-hole FTL query durations")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// FTL host
    #[arg(long)]
    host: Option<String>,

    /// FTL telnet API port
    // An explicit -P wins over PI_COL_TELNET_FWD_PORT. The Go pi-collector
    // let the variable override the flag.
    #[arg(short = 'P', long, env = "PI_COL_TELNET_FWD_PORT")]
    port: Option<u16>,

    /// Metrics server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        ftl_host: cli.host,
        ftl_port: cli.port,
        web_port: cli.web_port,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(cli.config.as_deref(), &config);

    info!("Starting Pi-hole collector v{}", env!("CARGO_PKG_VERSION"));

    let metrics = di::MetricsServices::new(&config)?;

    let web_addr = format!("{}:{}", config.server.bind_address, config.server.web_port);
    server::start_web_server(&web_addr, metrics.app_state()).await?;

    info!("Server shutdown complete");
    Ok(())
}
