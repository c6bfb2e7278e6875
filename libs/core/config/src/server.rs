use crate::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::net::Ipv4Addr;

const DEFAULT_PORT: u16 = 8080;

/// Listen address for the employee HTTP API, read from `HOST` and `PORT`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// `host:port`, the form `TcpListener::bind` accepts
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            host: env_or_default("HOST", &defaults.host),
            port: env_parse_or("PORT", defaults.port)?,
        })
    }
}

impl Default for ServerConfig {
    /// All interfaces on port 8080
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;

    #[test]
    fn test_unset_env_falls_back_to_default() {
        temp_env::with_vars_unset(["HOST", "PORT"], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config, ServerConfig::default());
            assert_eq!(config.address(), "0.0.0.0:8080");
        });
    }

    #[test]
    fn test_host_and_port_are_read_independently() {
        temp_env::with_vars([("HOST", Some("127.0.0.1")), ("PORT", None)], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), "127.0.0.1:8080");
        });

        temp_env::with_vars([("HOST", None), ("PORT", Some(" 3000 "))], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.address(), "0.0.0.0:3000");
        });
    }

    #[test]
    fn test_bad_port_names_the_variable() {
        for raw in ["http", "70000", "-1"] {
            temp_env::with_var("PORT", Some(raw), || {
                match ServerConfig::from_env() {
                    Err(ConfigError::ParseError { key, .. }) => assert_eq!(key, "PORT"),
                    other => panic!("PORT={raw} should not parse, got {other:?}"),
                }
            });
        }
    }

    #[test]
    fn test_address_is_bindable_form() {
        let config = ServerConfig {
            host: "192.168.1.1".to_string(),
            port: 5000,
        };
        let addr: SocketAddr = config.address().parse().unwrap();
        assert_eq!(addr.port(), 5000);
    }
}
