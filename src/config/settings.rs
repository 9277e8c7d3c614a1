//! Runtime settings read from the environment (after loading `.env`).

use crate::error::ConfigError;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/students";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Which `StudentStore` the server runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid {
                key: "STORE_BACKEND",
                message: format!("unknown backend '{}'", other),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the `students` table. Plain identifier only.
    pub schema: String,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub body_limit_bytes: usize,
    pub backend: StoreBackend,
    pub seed_fixtures: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: DEFAULT_DATABASE_URL.into(),
            schema: "public".into(),
            max_connections: 5,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            backend: StoreBackend::Postgres,
            seed_fixtures: false,
        }
    }
}

impl Settings {
    /// Read settings from process env. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; missing keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let schema = lookup("STUDENTS_SCHEMA").unwrap_or(defaults.schema);
        if !is_plain_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "STUDENTS_SCHEMA",
                message: format!("'{}' is not a plain identifier", schema),
            });
        }
        Ok(Settings {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            schema,
            max_connections: parse_or("DB_MAX_CONNECTIONS", lookup("DB_MAX_CONNECTIONS"), defaults.max_connections)?,
            bind_addr: parse_or("BIND_ADDR", lookup("BIND_ADDR"), defaults.bind_addr)?,
            body_limit_bytes: parse_or("BODY_LIMIT_BYTES", lookup("BODY_LIMIT_BYTES"), defaults.body_limit_bytes)?,
            backend: match lookup("STORE_BACKEND") {
                Some(v) => v.parse()?,
                None => defaults.backend,
            },
            seed_fixtures: parse_or("SEED_FIXTURES", lookup("SEED_FIXTURES"), defaults.seed_fixtures)?,
        })
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: format!("'{}': {}", v, e),
        }),
    }
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.schema, "public");
        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(s.backend, StoreBackend::Postgres);
        assert!(!s.seed_fixtures);
    }

    #[test]
    fn reads_overrides() {
        let s = settings(&[
            ("BIND_ADDR", "127.0.0.1:9000"),
            ("STORE_BACKEND", "memory"),
            ("SEED_FIXTURES", "true"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("STUDENTS_SCHEMA", "registry"),
        ])
        .unwrap();
        assert_eq!(s.bind_addr.port(), 9000);
        assert_eq!(s.backend, StoreBackend::Memory);
        assert!(s.seed_fixtures);
        assert_eq!(s.max_connections, 12);
        assert_eq!(s.schema, "registry");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(settings(&[("BODY_LIMIT_BYTES", "lots")]).is_err());
        assert!(settings(&[("STORE_BACKEND", "redis")]).is_err());
        assert!(settings(&[("STUDENTS_SCHEMA", "public; drop")]).is_err());
    }
}
