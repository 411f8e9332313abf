//! HTTP server settings

use serde::Deserialize;

const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl ServerSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    pub fn from_environment(env: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(env)
            .build()?
            .try_deserialize::<ServerSettings>()?;
        Ok(settings)
    }
}
