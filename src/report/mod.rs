pub mod summary;

pub use summary::{pretty_print_table, SeriesSummary};
