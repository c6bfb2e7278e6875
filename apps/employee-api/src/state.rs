//! Application state management.
//!
//! The state holds the configuration and the upstream employee client. The
//! client wraps a reqwest connection pool, so clones share connections.

use domain_employees::HttpEmployeeUpstream;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Client for the upstream employee service (cheap to clone)
    pub upstream: HttpEmployeeUpstream,
}

impl AppState {
    pub fn new(config: crate::config::Config) -> eyre::Result<Self> {
        let upstream = HttpEmployeeUpstream::new(config.upstream.clone())
            .map_err(|e| eyre::eyre!("Failed to build employee API client: {}", e))?;

        Ok(Self { config, upstream })
    }
}
