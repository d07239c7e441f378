use bill_list::DateFormat;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::CLIENT_NAME;

const CONFIG_NAME: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub session_file: String,
    pub store: StoreSettings,
    pub display: Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[serde(rename = "none")]
    Disabled,
    Sqlite,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct StoreSettings {
    pub backend: Backend,
    pub db_file: String,
    pub json_file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Display {
    pub date_format: DateFormat,
    pub modal_width: u32,
}

impl Settings {
    pub fn new(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut s = Config::builder()
            .set_default("session_file", default_data_path("session.json"))?
            .set_default("store.backend", "sqlite")?
            .set_default("store.db_file", default_data_path(&format!("{}.db", CLIENT_NAME)))?
            .set_default("display.date_format", "fr")?
            .set_default("display.modal_width", i64::from(bill_list::DEFAULT_MODAL_WIDTH))?;

        if let Some(path) = config_path {
            s = s.add_source(File::with_name(path));
        } else {
            s = s.add_source(File::with_name(&default_config_path()).required(false));
        }

        s.add_source(Environment::with_prefix("BILLED").separator("__"))
            .build()?
            .try_deserialize()
    }
}

fn default_data_path(file: &str) -> String {
    dirs::data_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir()))
        .join(CLIENT_NAME)
        .join(file)
        .display()
        .to_string()
}

pub(crate) fn default_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| std::env::temp_dir()))
        .join(CLIENT_NAME)
        .join(CONFIG_NAME)
        .display()
        .to_string()
}
