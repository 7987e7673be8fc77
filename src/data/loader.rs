use crate::data::point::{PricePoint, ValuationPoint};
use crate::error::EmbedError;
use csv::{ReaderBuilder, Trim};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(rename = "# date")]
    date: String,
    #[serde(rename = "btc_price_usd", deserialize_with = "finite")]
    price: f64,
}

#[derive(Debug, Deserialize)]
struct ValuationRecord {
    #[serde(rename = "# date")]
    date: String,
    #[serde(rename = "spot btc_price_usd", deserialize_with = "finite")]
    spot_price: f64,
    #[serde(rename = "MNAV", deserialize_with = "finite")]
    mnav: f64,
    #[serde(rename = "MNAV_x_BTC_Price", deserialize_with = "finite")]
    mnav_adjusted_price: f64,
    #[serde(rename = "MSTR_BTC_Holdings", deserialize_with = "finite")]
    btc_holdings: f64,
    #[serde(rename = "MSTR_Market_Cap_USD", deserialize_with = "finite")]
    market_cap: f64,
}

impl From<PriceRecord> for PricePoint {
    fn from(record: PriceRecord) -> Self {
        PricePoint::new(&record.date, record.price)
    }
}

impl From<ValuationRecord> for ValuationPoint {
    fn from(record: ValuationRecord) -> Self {
        ValuationPoint::new(
            &record.date,
            record.spot_price,
            record.mnav,
            record.mnav_adjusted_price,
            record.btc_holdings,
            record.market_cap,
        )
    }
}

//loads the daily price series from a csv file, in file order
pub fn load_price_series<P: AsRef<Path>>(path: P) -> Result<Vec<PricePoint>, EmbedError> {
    let path = path.as_ref();
    let file = open(path)?;
    read_price_series(file, path)
}

//loads the daily valuation series from a csv file, in file order
pub fn load_valuation_series<P: AsRef<Path>>(path: P) -> Result<Vec<ValuationPoint>, EmbedError> {
    let path = path.as_ref();
    let file = open(path)?;
    read_valuation_series(file, path)
}

//`source` only names the input in errors
pub fn read_price_series<R: Read>(reader: R, source: &Path) -> Result<Vec<PricePoint>, EmbedError> {
    let records: Vec<PriceRecord> = read_records(reader, source)?;
    debug!(path = %source.display(), records = records.len(), "parsed price series");
    Ok(records.into_iter().map(PricePoint::from).collect())
}

pub fn read_valuation_series<R: Read>(
    reader: R,
    source: &Path,
) -> Result<Vec<ValuationPoint>, EmbedError> {
    let records: Vec<ValuationRecord> = read_records(reader, source)?;
    debug!(path = %source.display(), records = records.len(), "parsed valuation series");
    Ok(records.into_iter().map(ValuationPoint::from).collect())
}

//nan and inf parse as f64 but have no json form
fn finite<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(D::Error::custom(format!("non-finite value {value}")))
    }
}

fn open(path: &Path) -> Result<File, EmbedError> {
    File::open(path).map_err(|e| EmbedError::from_io(path, e))
}

//any bad row aborts the whole load
fn read_records<T, R>(reader: R, source: &Path) -> Result<Vec<T>, EmbedError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let record: T = result.map_err(|e| {
            //header is line 1
            let line = e
                .position()
                .map(|p| p.line())
                .unwrap_or(index as u64 + 2);
            EmbedError::Parse {
                path: source.to_path_buf(),
                line,
                source: e,
            }
        })?;
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALUATION_HEADER: &str = "# date,spot btc_price_usd,MNAV,MNAV_x_BTC_Price,MSTR_BTC_Holdings,MSTR_Market_Cap_USD\n";

    fn prices(text: &str) -> Result<Vec<PricePoint>, EmbedError> {
        read_price_series(text.as_bytes(), Path::new("prices.csv"))
    }

    fn valuations(text: &str) -> Result<Vec<ValuationPoint>, EmbedError> {
        read_valuation_series(text.as_bytes(), Path::new("mnav.csv"))
    }

    #[test]
    fn parses_price_rows_in_file_order() {
        let points = prices(
            "# date,btc_price_usd\n# 2023-01-02,16700\n# 2023-01-01,16500.5\n2023-01-03,16900.25\n",
        )
        .unwrap();

        assert_eq!(
            points,
            vec![
                PricePoint::new("2023-01-02", 16700.0),
                PricePoint::new("2023-01-01", 16500.5),
                PricePoint::new("2023-01-03", 16900.25),
            ]
        );
        assert!(points.iter().all(|p| !p.date.starts_with("# ")));
    }

    #[test]
    fn marker_inside_date_is_removed() {
        let points = prices("# date,btc_price_usd\n2023-01-01 # x,1\n").unwrap();
        assert_eq!(points[0].date, "2023-01-01 x");
        assert!(!points[0].date.contains("# "));
    }

    #[test]
    fn header_only_yields_empty_series() {
        assert!(prices("# date,btc_price_usd\n").unwrap().is_empty());
        assert!(valuations(VALUATION_HEADER).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_price_fails_whole_load() {
        let err = prices("# date,btc_price_usd\n# 2023-01-01,16500.5\n# 2023-01-02,n/a\n")
            .unwrap_err();

        match err {
            EmbedError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = prices("# date,btc_price_usd\n# 2023-01-01,16500.5\n# 2023-01-02,nan\n")
            .unwrap_err();
        assert!(matches!(err, EmbedError::Parse { line: 3, .. }));

        let err = prices("# date,btc_price_usd\n# 2023-01-01,inf\n").unwrap_err();
        assert!(matches!(err, EmbedError::Parse { line: 2, .. }));

        let text = format!("{VALUATION_HEADER}# 2023-01-01,16500.5,1.25,-inf,132500,4100000000\n");
        assert!(matches!(valuations(&text), Err(EmbedError::Parse { .. })));
    }

    #[test]
    fn missing_column_is_parse_error() {
        let err = prices("# date,price\n# 2023-01-01,16500.5\n").unwrap_err();
        assert!(matches!(err, EmbedError::Parse { .. }));

        let err = prices("# date,btc_price_usd\n# 2023-01-01\n").unwrap_err();
        assert!(matches!(err, EmbedError::Parse { .. }));
    }

    #[test]
    fn parses_valuation_headers_verbatim() {
        let text = format!(
            "{VALUATION_HEADER}# 2023-01-01,16500.5,1.25,20000,132500,4100000000\n"
        );
        let points = valuations(&text).unwrap();

        assert_eq!(points.len(), 1);
        let point = &points[0];
        assert_eq!(point.date, "2023-01-01");
        assert_eq!(point.spot_price, 16500.5);
        assert_eq!(point.mnav, 1.25);
        //taken as given, not mnav * spot
        assert_eq!(point.mnav_adjusted_price, 20000.0);
        assert_eq!(point.btc_holdings, 132500.0);
        assert_eq!(point.market_cap, 4.1e9);
    }

    #[test]
    fn valuation_header_case_matters() {
        let text = "# date,spot btc_price_usd,mnav,MNAV_x_BTC_Price,MSTR_BTC_Holdings,MSTR_Market_Cap_USD\n# 2023-01-01,1,1,1,1,1\n";
        assert!(matches!(valuations(text), Err(EmbedError::Parse { .. })));
    }

    #[test]
    fn extra_columns_and_padding_are_tolerated() {
        let points = prices("# date,btc_price_usd,volume\n# 2023-01-01 , 16500.5 ,12\n").unwrap();
        assert_eq!(points, vec![PricePoint::new("2023-01-01", 16500.5)]);
    }
}
