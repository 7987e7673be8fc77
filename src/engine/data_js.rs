use crate::config::EmbedConfig;
use crate::data::{PricePoint, ValuationPoint};
use crate::engine::embed::load_series;
use crate::error::EmbedError;
use crate::model::{fit_rainbow_model, RainbowModel};
use crate::report::SeriesSummary;
use crate::template::write_atomic;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

//result of writing the standalone data module
#[derive(Debug, Clone)]
pub struct DataJsResult {
    pub output: PathBuf,
    pub prices: SeriesSummary,
    pub valuations: SeriesSummary,
    pub btc_model: Option<RainbowModel>,
    pub mnav_model: Option<RainbowModel>,
}

//writes both series and their fitted models as a script the page can include
pub fn write_data_js(config: &EmbedConfig) -> Result<DataJsResult, EmbedError> {
    let (prices, valuations) = load_series(config)?;

    if prices.is_empty() && valuations.is_empty() {
        return Err(EmbedError::NoData);
    }

    let btc_model = fit_rainbow_model(&prices);
    let adjusted: Vec<PricePoint> = valuations
        .iter()
        .map(ValuationPoint::adjusted_price_point)
        .collect();
    let mnav_model = fit_rainbow_model(&adjusted);

    for (name, model) in [("BTC", &btc_model), ("MNAV", &mnav_model)] {
        match model {
            Some(m) => info!(series = name, a = m.a, b = m.b, c = m.c, "fitted rainbow model"),
            None => warn!(series = name, "not enough data to fit rainbow model"),
        }
    }

    let contents = render_data_js(&prices, &valuations, btc_model, mnav_model, Utc::now())?;
    write_atomic(&config.data_js_output, &contents)?;
    info!(path = %config.data_js_output.display(), bytes = contents.len(), "wrote data module");

    Ok(DataJsResult {
        output: config.data_js_output.clone(),
        prices: SeriesSummary::for_prices(&prices),
        valuations: SeriesSummary::for_valuations(&valuations),
        btc_model,
        mnav_model,
    })
}

pub fn render_data_js(
    prices: &[PricePoint],
    valuations: &[ValuationPoint],
    btc_model: Option<RainbowModel>,
    mnav_model: Option<RainbowModel>,
    updated_at: DateTime<Utc>,
) -> Result<String, EmbedError> {
    Ok(format!(
        "// Bitcoin Rainbow Chart Data\n\
         // Last updated: {}\n\
         // Generated by mnav-embed\n\
         \n\
         const btcHistoricalData = {};\n\
         \n\
         const mnavHistoricalData = {};\n\
         \n\
         const rainbowModelBTC = {};\n\
         const rainbowModelMNAV = {};\n",
        updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        serde_json::to_string_pretty(prices)?,
        serde_json::to_string_pretty(valuations)?,
        serde_json::to_string_pretty(&btc_model)?,
        serde_json::to_string_pretty(&mnav_model)?,
    ))
}
