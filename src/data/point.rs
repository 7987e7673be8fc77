use serde::{Deserialize, Serialize};

//leading marker carried by the date column of the source csv files
pub const DATE_MARKER: &str = "# ";

//a single daily bitcoin price observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub date: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(date: &str, price: f64) -> Self {
        PricePoint {
            date: strip_date_marker(date),
            price,
        }
    }
}

//a single daily valuation observation, serialized with the field names the chart page reads
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPoint {
    pub date: String,
    pub spot_price: f64,
    pub mnav: f64,
    pub mnav_adjusted_price: f64,
    pub btc_holdings: f64,
    pub market_cap: f64,
}

impl ValuationPoint {
    pub fn new(
        date: &str,
        spot_price: f64,
        mnav: f64,
        mnav_adjusted_price: f64,
        btc_holdings: f64,
        market_cap: f64,
    ) -> Self {
        ValuationPoint {
            date: strip_date_marker(date),
            spot_price,
            mnav,
            mnav_adjusted_price,
            btc_holdings,
            market_cap,
        }
    }

    //the mnav-scaled series as plain price points
    pub fn adjusted_price_point(&self) -> PricePoint {
        PricePoint {
            date: self.date.clone(),
            price: self.mnav_adjusted_price,
        }
    }
}

//removes every date marker wherever it appears, including ones exposed by a removal
pub fn strip_date_marker(date: &str) -> String {
    let mut stripped = date.replace(DATE_MARKER, "");
    while stripped.contains(DATE_MARKER) {
        stripped = stripped.replace(DATE_MARKER, "");
    }
    stripped
}
