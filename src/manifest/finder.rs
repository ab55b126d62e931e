use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, VrsnError};
use crate::manifest::is_supported;

/// Locates the version file to use for a command.
#[derive(Debug, Clone)]
pub struct VersionFileFinder {
    /// Explicit file passed with `--file`
    pub file_flag: Option<PathBuf>,
    /// Directory searched when no explicit file is given
    pub search_dir: PathBuf,
    /// Treat an empty directory as an error instead of returning `None`
    pub error_on_no_files: bool,
}

impl VersionFileFinder {
    pub fn new(search_dir: impl Into<PathBuf>) -> Self {
        VersionFileFinder {
            file_flag: None,
            search_dir: search_dir.into(),
            error_on_no_files: true,
        }
    }

    pub fn with_file_flag(mut self, file: Option<PathBuf>) -> Self {
        self.file_flag = file;
        self
    }

    pub fn error_on_no_files(mut self, error: bool) -> Self {
        self.error_on_no_files = error;
        self
    }

    /// Returns the version file to use.
    ///
    /// An explicit file must exist and not be a directory. Otherwise the
    /// search directory must contain exactly one supported file; with none,
    /// `Ok(None)` is returned unless `error_on_no_files` is set.
    pub fn find(&self) -> Result<Option<PathBuf>> {
        if let Some(file) = &self.file_flag {
            debug!("using --file flag with file {}", file.display());

            let candidate = self.search_dir.join(file);
            let metadata = match fs::metadata(&candidate) {
                Ok(metadata) => metadata,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    return Err(VrsnError::FileNotFound(file.clone()));
                }
                Err(e) => return Err(e.into()),
            };

            if metadata.is_dir() {
                return Err(VrsnError::FileIsDirectory(file.clone()));
            }

            return Ok(Some(file.clone()));
        }

        debug!("looking for version files in {}", self.search_dir.display());

        let mut files = version_files_in_dir(&self.search_dir)?;
        debug!("found version files: {:?}", files);

        match files.len() {
            1 => Ok(files.pop().map(PathBuf::from)),
            0 if self.error_on_no_files => Err(VrsnError::NoVersionFilesInDir),
            0 => Ok(None),
            _ => Err(VrsnError::MultipleVersionFiles(files)),
        }
    }
}

/// Lists the supported version files directly inside `dir`, sorted by name.
pub fn version_files_in_dir(dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }

        if let Some(name) = entry.file_name().to_str() {
            if is_supported(name) {
                files.push(name.to_string());
            }
        }
    }

    files.sort();
    Ok(files)
}
