pub mod loader;
pub mod point;

pub use loader::{
    load_price_series, load_valuation_series, read_price_series, read_valuation_series,
};
pub use point::{strip_date_marker, PricePoint, ValuationPoint, DATE_MARKER};
