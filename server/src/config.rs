use axum::http::HeaderValue;
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Browser origin allowed through CORS; CORS is off when unset.
    pub client_origin: Option<HeaderValue>,
}

impl Config {
    /// Reads `HOST`, `PORT` and `CLIENT_URL`. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = match get("HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: raw,
            })?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match get("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };
        let client_origin = get("CLIENT_URL")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| {
                raw.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    name: "CLIENT_URL",
                    value: raw,
                })
            })
            .transpose()?;

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            client_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_localhost_3000() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert!(config.client_origin.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = load(&[("HOST", "0.0.0.0"), ("PORT", "8080"), ("CLIENT_URL", "http://localhost:5173")]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.client_origin.unwrap(), "http://localhost:5173");
    }

    #[test]
    fn rejects_bad_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid PORT: \"eighty\"");
    }
}
