//! Server configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Runtime server configuration.
///
/// Built from defaults, then an optional TOML file, then `CRUDER_*`
/// environment variables (`CRUDER_PORT=9000`), each layer overriding the last.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080_i64)?
      .set_default("store_path", "cruder.db")?
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("CRUDER"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
