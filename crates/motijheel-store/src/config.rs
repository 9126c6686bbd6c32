//! Storage connection configuration.

use sqlx::postgres::PgConnectOptions;

/// Connection parameters for the TimescaleDB instance.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u16,
    /// Database name.
    pub database: String,
    /// Database user.
    pub user: String,
    /// Database password.
    pub password: String,
    /// Maximum pool size. Each pipeline run checks out one connection.
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "motijheel".to_string(),
            user: "postgres".to_string(),
            password: String::new(),
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// Builds sqlx connect options from the configuration.
    #[must_use]
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.max_connections, 5);
    }
}
