pub mod splice;
pub mod writer;

pub use splice::{splice, InitBlock, Template, ANCHOR, SKIP_MARKER};
pub use writer::write_atomic;
