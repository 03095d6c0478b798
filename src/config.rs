//! Settings read from the environment (and `.env`, if present).

use std::net::SocketAddr;

use anyhow::{Context as _, Result};

pub const DEFAULT_DATABASE_URL: &str = "sqlite:fyyur.db";
pub const DEFAULT_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Where the listings are stored (`DATABASE_URL`)
    pub database_url: String,
    /// What the server listens on (`FYYUR_ADDRESS`)
    pub address: SocketAddr,
    /// How many pooled connections to keep (`FYYUR_MAX_CONNECTIONS`)
    pub max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_owned());

        let address = lookup("FYYUR_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_owned());
        let address = address
            .parse()
            .with_context(|| format!("`FYYUR_ADDRESS` is not a socket address: {}", address))?;

        let max_connections = match lookup("FYYUR_MAX_CONNECTIONS") {
            Some(value) => value.parse().with_context(|| {
                format!("`FYYUR_MAX_CONNECTIONS` is not a number: {}", value)
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            address,
            max_connections,
        })
    }

    /// A private in-memory database, as used by the tests.
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_owned(),
            address: SocketAddr::from(([127, 0, 0, 1], 0)),
            max_connections: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_in(&[])).unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.address, DEFAULT_ADDRESS.parse().unwrap());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup_in(&[
            ("DATABASE_URL", "sqlite:/tmp/listings.db"),
            ("FYYUR_ADDRESS", "127.0.0.1:8080"),
            ("FYYUR_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "sqlite:/tmp/listings.db");
        assert_eq!(config.address.port(), 8080);
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn bad_values_are_reported() {
        assert!(Config::from_lookup(lookup_in(&[("FYYUR_ADDRESS", "nowhere")])).is_err());
        assert!(Config::from_lookup(lookup_in(&[("FYYUR_MAX_CONNECTIONS", "lots")])).is_err());
    }
}
