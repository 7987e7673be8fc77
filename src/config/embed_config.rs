use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PRICE_CSV: &str = "btc_historical_prices.csv";
pub const DEFAULT_VALUATION_CSV: &str = "btc_mnav_merged.csv";
pub const DEFAULT_TEMPLATE: &str = "index.html";
pub const DEFAULT_DATA_JS: &str = "data.js";

//input and output paths, relative to the working directory unless absolute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    pub price_csv: PathBuf,
    pub valuation_csv: PathBuf,
    pub template: PathBuf,
    pub data_js_output: PathBuf,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        EmbedConfig {
            price_csv: PathBuf::from(DEFAULT_PRICE_CSV),
            valuation_csv: PathBuf::from(DEFAULT_VALUATION_CSV),
            template: PathBuf::from(DEFAULT_TEMPLATE),
            data_js_output: PathBuf::from(DEFAULT_DATA_JS),
        }
    }
}

impl EmbedConfig {
    //load configuration from a JSON file, missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: EmbedConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    //save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    //applies per-path overrides on top of this configuration
    pub fn with_overrides(
        mut self,
        price_csv: Option<PathBuf>,
        valuation_csv: Option<PathBuf>,
        template: Option<PathBuf>,
        data_js_output: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = price_csv {
            self.price_csv = path;
        }
        if let Some(path) = valuation_csv {
            self.valuation_csv = path;
        }
        if let Some(path) = template {
            self.template = path;
        }
        if let Some(path) = data_js_output {
            self.data_js_output = path;
        }
        self
    }
}
