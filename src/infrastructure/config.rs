// Server configuration loading
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    pub listen_addr: String,
    /// Base URL of the synthetic dataset endpoint.
    pub data_api_url: String,
    /// Artificial delay before a load completes, so a progress indicator can
    /// visually settle. Zero is valid.
    pub settle_delay_ms: u64,
    /// Path of the persisted user-configuration file.
    pub storage_path: String,
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .set_default("listen_addr", "0.0.0.0:8080")?
        .set_default("data_api_url", "http://localhost:3001")?
        .set_default("settle_delay_ms", 500_i64)?
        .set_default("storage_path", "config/user_config.json")?
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(config::Environment::with_prefix("CHART_BENCH"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
