use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use dotenv::dotenv;

/// Environment variables are read as `LICENSE_<FIELD>`.
pub const ENV_PREFIX: &str = "LICENSE";

#[derive(serde::Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Hex private key used when none is passed on the command line.
    #[serde(default)]
    pub private_key: Option<String>,
}

/// Settings from the environment, after loading `.env` if there is one.
pub fn get_settings() -> anyhow::Result<Settings> {
    if dotenv().is_err() {
        log::debug!("no .env file loaded");
    }
    load(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
}

fn load(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Settings> {
    let settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}
