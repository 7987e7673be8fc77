pub mod embed_config;

pub use embed_config::EmbedConfig;
