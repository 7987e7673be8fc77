use crate::error::EmbedError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

//writes `contents` to a sibling temp file and renames it over `path`
//an interrupted write leaves the previous file intact
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), EmbedError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| EmbedError::from_io(dir, e))?;

    //temp files are created 0600, keep the mode of the file being replaced
    match std::fs::metadata(path) {
        Ok(metadata) => tmp
            .as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| EmbedError::from_io(tmp.path(), e))?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(EmbedError::from_io(path, e)),
    }

    tmp.write_all(contents.as_bytes())
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| EmbedError::from_io(tmp.path(), e))?;

    debug!(tmp = %tmp.path().display(), target = %path.display(), "renaming temp file");
    tmp.persist(path)
        .map_err(|e| EmbedError::from_io(path, e.error))?;

    Ok(())
}
