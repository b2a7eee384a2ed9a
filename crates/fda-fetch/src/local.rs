//! Local sources: a zip file or a directory of extracted members.

use std::fs;
use std::path::{Path, PathBuf};

use fda_model::SourceFiles;
use tracing::info;

use crate::ArchiveFetcher;
use crate::error::{FetchError, Result};
use crate::extract::{extract_archive, is_member_file};

#[derive(Debug, Clone)]
pub struct LocalFetcher {
    path: PathBuf,
    display: String,
}

impl LocalFetcher {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let display = path.display().to_string();
        Self { path, display }
    }

    fn read_directory(&self) -> Result<SourceFiles> {
        let mut files = SourceFiles::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            if is_member_file(name) {
                files.insert(name.to_string(), fs::read(&path)?);
            }
        }
        Ok(files)
    }
}

impl ArchiveFetcher for LocalFetcher {
    fn location(&self) -> &str {
        &self.display
    }

    fn fetch(&self) -> Result<SourceFiles> {
        if !self.path.exists() {
            return Err(FetchError::NotFound(self.display.clone()));
        }
        let files = if self.path.is_dir() {
            self.read_directory()?
        } else {
            extract_archive(&fs::read(&self.path)?)?
        };
        info!(source = %self.display, members = files.len(), "loaded local source");
        Ok(files)
    }
}
