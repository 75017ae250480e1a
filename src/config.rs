use config::{Config, Environment, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Runtime configuration, layered from an optional `config/default` file and
/// `APP__*` environment variables. The Notion token and the six database IDs
/// have no defaults and fail startup when absent or empty.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(length(min = 1, message = "notion_token must not be empty"))]
    pub notion_token: String,

    #[validate(length(min = 1))]
    pub notion_catalog_db_id: String,
    #[validate(length(min = 1))]
    pub notion_campaign_db_id: String,
    #[validate(length(min = 1))]
    pub notion_catalog_campaign_db_id: String,
    #[validate(length(min = 1))]
    pub notion_customer_db_id: String,
    #[validate(length(min = 1))]
    pub notion_product_db_id: String,
    #[validate(length(min = 1))]
    pub notion_order_db_id: String,

    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_json: bool,
    /// Comma-separated extra CORS origins.
    #[serde(default)]
    pub cors_allowed_origins: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// Frontend dev servers (Vite and Angular) are always allowed.
const DEV_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:4200"];

impl AppConfig {
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Configured origins plus the fixed localhost dev origins, deduplicated.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = self
            .cors_allowed_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        for dev in DEV_ORIGINS {
            if !origins.iter().any(|o| o == dev) {
                origins.push(dev.to_string());
            }
        }
        origins
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

pub fn load_config() -> Result<AppConfig, AppConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the
/// configured level when set.
pub fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "beauty_webhook_api={log_level},tower_http=debug"
        ))
    });

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            notion_token: "secret".to_string(),
            notion_catalog_db_id: "db1".to_string(),
            notion_campaign_db_id: "db2".to_string(),
            notion_catalog_campaign_db_id: "db3".to_string(),
            notion_customer_db_id: "db4".to_string(),
            notion_product_db_id: "db5".to_string(),
            notion_order_db_id: "db6".to_string(),
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            log_json: false,
            cors_allowed_origins: None,
        }
    }

    #[test]
    fn empty_token_fails_validation() {
        let mut config = base_config();
        config.notion_token = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn allowed_origins_merges_config_and_dev_origins() {
        let mut config = base_config();
        config.cors_allowed_origins =
            Some("https://app.example.com, http://localhost:5173".to_string());

        let origins = config.allowed_origins();
        assert_eq!(
            origins,
            vec![
                "https://app.example.com",
                "http://localhost:5173",
                "http://localhost:4200",
            ]
        );
    }

    #[test]
    fn defaults_bind_on_port_3000() {
        let config = base_config();
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
    }
}
