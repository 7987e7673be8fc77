//embeds bitcoin price and MNAV valuation series into a static chart page

pub mod config;
pub mod data;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod template;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::EmbedConfig;
    pub use crate::data::{
        load_price_series, load_valuation_series, read_price_series, read_valuation_series,
        PricePoint, ValuationPoint,
    };
    pub use crate::engine::{
        embed_into_file, load_series, write_data_js, DataJsResult, EmbedEngine, EmbedResult,
    };
    pub use crate::error::EmbedError;
    pub use crate::logging::{init_logging, LoggingConfig};
    pub use crate::model::{fit_rainbow_model, RainbowModel};
    pub use crate::report::{pretty_print_table, SeriesSummary};
    pub use crate::template::{splice, write_atomic, InitBlock, Template, ANCHOR, SKIP_MARKER};
}
