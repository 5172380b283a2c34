use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

fn default_db_max_connections() -> u32 {
  5
}

fn default_db_connect_timeout() -> u64 {
  5
}

fn default_db_acquire_timeout() -> u64 {
  3
}

fn default_index_path() -> String {
  "templates/index.html".to_string()
}

fn default_invoices_dir() -> String {
  "templates/invoices".to_string()
}

/// Realm announced when no configuration overrides it
pub const DEFAULT_REALM: &str = "Tiny CRM";

fn default_realm() -> String {
  DEFAULT_REALM.to_string()
}

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub server: ServerConfig,
  pub database: DatabaseConfig,
  #[serde(default)]
  pub templates: TemplatesConfig,
  #[serde(default)]
  pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  pub host: String,
  pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
  /// SQLite URL, e.g. `sqlite://tinycrm.db`
  pub url: String,
  #[serde(default = "default_db_max_connections")]
  pub max_connections: u32,
  #[serde(default = "default_db_connect_timeout")]
  pub connect_timeout_seconds: u64,
  #[serde(default = "default_db_acquire_timeout")]
  pub acquire_timeout_seconds: u64,
}

/// Locations of the front-end page and the invoice document templates
#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
  #[serde(default = "default_index_path")]
  pub index_path: String,
  #[serde(default = "default_invoices_dir")]
  pub invoices_dir: String,
}

impl Default for TemplatesConfig {
  fn default() -> Self {
    Self {
      index_path: default_index_path(),
      invoices_dir: default_invoices_dir(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
  /// Realm announced in the `WWW-Authenticate` challenge
  #[serde(default = "default_realm")]
  pub realm: String,
}

impl Default for AuthConfig {
  fn default() -> Self {
    Self {
      realm: default_realm(),
    }
  }
}

impl Config {
  /// Load configuration from files and environment variables
  ///
  /// Later sources override earlier ones:
  /// 1. config/default.toml
  /// 2. config/local.toml (if exists)
  /// 3. config/{RUN_MODE}.toml (if exists)
  /// 4. Environment variables with TINYCRM_ prefix
  ///
  /// # Environment Variables
  ///
  /// Sections are separated by double underscores:
  /// - `TINYCRM_SERVER__PORT=8080`
  /// - `TINYCRM_DATABASE__URL=sqlite://tinycrm.db`
  /// - `TINYCRM_TEMPLATES__INVOICES_DIR=/srv/tinycrm/invoices`
  /// - `TINYCRM_AUTH__REALM="Tiny CRM"`
  pub fn load() -> Result<Self, ConfigError> {
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let config = ConfigBuilder::builder()
      .add_source(File::with_name("config/default").required(true))
      .add_source(File::with_name("config/local").required(false))
      .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
      .add_source(
        Environment::with_prefix("TINYCRM")
          .prefix_separator("_")
          .separator("__")
          .try_parsing(true),
      )
      .build()?;

    config.try_deserialize()
  }
}
