use std::env;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            database_url: non_empty_var("DATABASE_URL")
                .or_else(|| {
                    warn!("DATABASE_URL not set, database will be unavailable");
                    None
                }),
            database_name: non_empty_var("DATABASE_NAME")
                .or_else(|| {
                    warn!("DATABASE_NAME not set, using the default database from DATABASE_URL");
                    None
                }),
            port: parse_port(env::var("PORT").ok().as_deref()),
        };

        if !config.is_database_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_database_configured(&self) -> bool {
        self.database_url.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub fn parse_port(raw: Option<&str>) -> u16 {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("PORT value {:?} is not a valid port, using {}", value, DEFAULT_PORT);
            DEFAULT_PORT
        }),
        None => DEFAULT_PORT,
    }
}
