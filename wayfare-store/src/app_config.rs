use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use wayfare_core::Locale;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    #[serde(default)]
    pub locale: Locale,
    #[serde(default = "default_redirect_ms")]
    pub booking_redirect_ms: u64,
    #[serde(default = "default_flight_limit")]
    pub flight_limit: u32,
}

fn default_redirect_ms() -> u64 { 2000 }
fn default_flight_limit() -> u32 { 5 }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            booking_redirect_ms: default_redirect_ms(),
            flight_limit: default_flight_limit(),
        }
    }
}

impl UiConfig {
    pub fn booking_redirect(&self) -> Duration {
        Duration::from_millis(self.booking_redirect_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Where the signed-in profile snapshot is kept between runs.
    pub profile_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { profile_path: PathBuf::from("data/profile.json") }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
    /// Registrations presenting this code get the operator role.
    #[serde(default)]
    pub operator_sign_up_code: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer-local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `WAYFARE__API__BASE_URL=http://localhost:4000/api`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Build from an inline TOML document.
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
