//! In-memory extraction of archive members.

use std::io::{Cursor, Read};
use std::path::Path;

use fda_model::SourceFiles;
use tracing::debug;

use crate::error::{FetchError, Result};

/// Tab-delimited members are the only ones kept.
pub fn is_member_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}

/// Reads every `.txt` member of a zip archive into memory.
pub fn extract_archive(data: &[u8]) -> Result<SourceFiles> {
    if !data.starts_with(b"PK") {
        return Err(FetchError::ArchiveExtraction(
            "payload is not a zip archive".to_string(),
        ));
    }
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut files = SourceFiles::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() || !is_member_file(entry.name()) {
            continue;
        }
        let name = entry.name().to_string();
        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry.read_to_end(&mut bytes)?;
        debug!(member = %name, bytes = bytes.len(), "extracted archive member");
        files.insert(name, bytes);
    }
    Ok(files)
}
