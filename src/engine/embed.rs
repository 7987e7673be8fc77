use crate::config::EmbedConfig;
use crate::data::{load_price_series, load_valuation_series, PricePoint, ValuationPoint};
use crate::error::EmbedError;
use crate::report::SeriesSummary;
use crate::template::{splice, write_atomic, ANCHOR};
use std::path::{Path, PathBuf};
use tracing::info;

//result of embedding both series into the template
#[derive(Debug, Clone)]
pub struct EmbedResult {
    pub template: PathBuf,
    pub prices: SeriesSummary,
    pub valuations: SeriesSummary,
}

//loads both series, splices them into the template and writes it back in place
pub struct EmbedEngine {
    config: EmbedConfig,
}

impl EmbedEngine {
    pub fn new(config: EmbedConfig) -> Self {
        EmbedEngine { config }
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    pub fn run(&self) -> Result<EmbedResult, EmbedError> {
        let (prices, valuations) = load_series(&self.config)?;
        embed_into_file(&self.config.template, &prices, &valuations)?;

        Ok(EmbedResult {
            template: self.config.template.clone(),
            prices: SeriesSummary::for_prices(&prices),
            valuations: SeriesSummary::for_valuations(&valuations),
        })
    }
}

//loads the price series then the valuation series
pub fn load_series(
    config: &EmbedConfig,
) -> Result<(Vec<PricePoint>, Vec<ValuationPoint>), EmbedError> {
    let prices = load_price_series(&config.price_csv)?;
    info!(path = %config.price_csv.display(), records = prices.len(), "loaded price series");

    let valuations = load_valuation_series(&config.valuation_csv)?;
    info!(
        path = %config.valuation_csv.display(),
        records = valuations.len(),
        "loaded valuation series"
    );

    Ok((prices, valuations))
}

//reads the template, splices the data block after the anchor and replaces the file
//nothing is written when the splice fails
pub fn embed_into_file(
    template: &Path,
    prices: &[PricePoint],
    valuations: &[ValuationPoint],
) -> Result<(), EmbedError> {
    let text = std::fs::read_to_string(template).map_err(|e| EmbedError::from_io(template, e))?;
    let spliced = splice(&text, prices, valuations)?;

    write_atomic(template, &spliced)?;
    info!(
        path = %template.display(),
        anchor = ANCHOR,
        bytes = spliced.len(),
        "embedded data into template"
    );

    Ok(())
}
