use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to parse {} at line {line}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("Anchor `{0}` not found in template")]
    AnchorNotFound(&'static str),
    #[error("Anchor `{anchor}` appears {count} times in template, expected exactly once")]
    DuplicateAnchor { anchor: &'static str, count: usize },
    #[error("Template already contains embedded data (found `{0}`)")]
    AlreadyEmbedded(&'static str),
    #[error("No price or valuation records to write")]
    NoData,
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to serialize series: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EmbedError {
    //maps an io error on `path`, singling out a missing file
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            EmbedError::FileNotFound(path)
        } else {
            EmbedError::Io { path, source }
        }
    }
}
