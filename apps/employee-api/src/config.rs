use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig, upstream::UpstreamConfig};

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub environment: Environment,
    /// Comma-separated origins; no CORS layer when unset
    pub cors_allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let upstream = UpstreamConfig::from_env()?; // Defaults to the local mock employee server
        let cors_allowed_origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .filter(|origins| !origins.trim().is_empty());

        Ok(Self {
            app: app_info!(),
            server,
            upstream,
            environment,
            cors_allowed_origin,
        })
    }
}
