use anyhow::Result;
use std::env;
use std::str::FromStr;

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    /// Single origin allowed by the CORS layer.
    pub cors_origin: String,
    pub bcrypt_cost: u32,
    /// `None` when `SEED_DEMO_DATA` is unset; see [`AppConfig::seeds_demo_data`].
    pub seed_demo_data: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: "development".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_demo_data: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_setting("PORT", env::var("PORT").ok()).unwrap_or(defaults.port);
        let environment = env::var("ENVIRONMENT").unwrap_or(defaults.environment);
        let cors_origin = env::var("CORS_ORIGIN").unwrap_or(defaults.cors_origin);
        let bcrypt_cost = parse_bcrypt_cost(env::var("BCRYPT_COST").ok())
            .unwrap_or(defaults.bcrypt_cost);
        let seed_demo_data = env::var("SEED_DEMO_DATA")
            .ok()
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"));

        Ok(AppConfig {
            host,
            port,
            environment,
            cors_origin,
            bcrypt_cost,
            seed_demo_data,
        })
    }

    /// Read separately so logging can start before the rest of the config.
    pub fn log_level_from_env() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// An explicit `SEED_DEMO_DATA` wins; otherwise only development seeds.
    pub fn seeds_demo_data(&self) -> bool {
        self.seed_demo_data.unwrap_or_else(|| self.is_development())
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parses an optional setting. Unparseable values are logged and ignored.
pub(crate) fn parse_setting<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Ignoring invalid {} value {:?}, using the default", name, raw);
            None
        }
    }
}

// bcrypt rejects costs outside 4..=31
fn parse_bcrypt_cost(raw: Option<String>) -> Option<u32> {
    parse_setting::<u32>("BCRYPT_COST", raw).filter(|cost| {
        let valid = (4..=31).contains(cost);
        if !valid {
            tracing::warn!("BCRYPT_COST {} is outside 4..=31, using the default", cost);
        }
        valid
    })
}
