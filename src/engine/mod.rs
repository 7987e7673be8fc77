pub mod data_js;
pub mod embed;

pub use data_js::{render_data_js, write_data_js, DataJsResult};
pub use embed::{embed_into_file, load_series, EmbedEngine, EmbedResult};
