use pihole_collector_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

/// Logging is not up yet while the config loads, so the summary is
/// emitted separately once it is.
pub fn log_config(config_path: Option<&str>, config: &Config) {
    let config_file = config_path
        .map(str::to_string)
        .or_else(Config::get_config_path)
        .unwrap_or_else(|| "default".to_string());

    info!(
        config_file = %config_file,
        ftl_endpoint = %config.ftl.endpoint(),
        idle_timeout_ms = config.ftl.idle_timeout_ms,
        web_port = config.server.web_port,
        bind = %config.server.bind_address,
        "Configuration loaded"
    );
}
