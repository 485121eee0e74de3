use std::{path::PathBuf, str::FromStr};

use serde::Deserialize;
use serde_with::serde_as;
use strum::{Display, EnumString};
use url::Url;

use crate::{
    adapters::outbound::media::{CanvasError, CardCanvas},
    domain::models::{EcLevel, HexColor, ModuleShape, QrPayload, QrStyle},
};

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub card: CardSettings,
    pub qr: QrSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Externally reachable base URL, used for info image callback links.
    pub public_url: Url,
    pub static_dir: PathBuf,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct CardSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub width: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub height: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub include_info_image: bool,
    pub font_path: Option<PathBuf>,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct QrSettings {
    pub payload: QrPayload,
    pub ec_level: EcLevel,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub module_size: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub border: u32,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub foreground: HexColor,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub background: HexColor,
    pub shape: ModuleShape,
    pub logo_path: Option<PathBuf>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct StorageSettings {
    /// Parent of the per-request scratch dirs. Defaults to the OS temp dir.
    pub scratch_root: Option<PathBuf>,
}

impl CardSettings {
    pub fn canvas(&self) -> Result<CardCanvas, CanvasError> {
        CardCanvas::new(self.width, self.height)
    }
}

impl QrSettings {
    pub fn style(&self) -> QrStyle {
        QrStyle {
            ec_level: self.ec_level,
            module_size: self.module_size,
            border: self.border,
            foreground: self.foreground,
            background: self.background,
            shape: self.shape,
        }
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|err| config::ConfigError::Message(format!("no current directory: {err}")))?;
    let config_directory = base_path.join("config");

    let environment = Environment::from_str(
        std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .as_str(),
    )
    .map_err(|_| config::ConfigError::Message("failed to parse APP_ENVIRONMENT".into()))?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(config_directory.join(environment_filename)).required(false))
        .add_source(
            config::Environment::with_prefix("CARD")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}
