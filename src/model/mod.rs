pub mod rainbow;

pub use rainbow::{fit_rainbow_model, RainbowModel};
