use super::{KeyBundle, KeyBundleError};
use i2pkeys_common::AddressFormat;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// A key bundle persisted as two lines of text on disk
#[derive(Debug, Clone)]
pub struct KeyFile {
    path: PathBuf,
    format: AddressFormat,
}

impl KeyFile {
    /// Key file at `path`, destination line written in full
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: AddressFormat::Base64,
        }
    }

    pub fn with_format(mut self, format: AddressFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if a regular file exists at the path
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Read and parse the key file
    pub fn load(&self) -> Result<KeyBundle, KeyBundleError> {
        if !self.exists() {
            return Err(KeyBundleError::NotFound(self.path.clone()));
        }

        let text = fs::read_to_string(&self.path).map_err(|source| KeyBundleError::Read {
            path: self.path.clone(),
            source,
        })?;

        debug!(path = %self.path.display(), "loading keys");
        KeyBundle::load(&text)
    }

    /// Write the bundle, replacing any existing file
    ///
    /// The bundle goes to a private temporary file in the same directory,
    /// which is then renamed over the target. A failed write leaves the old
    /// file untouched.
    pub fn store_overwrite(&self, bundle: &KeyBundle) -> Result<(), KeyBundleError> {
        let text = bundle.store_as(self.format)?;
        let write_error = |source| KeyBundleError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(text.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;
        temp.persist(&self.path).map_err(|e| write_error(e.error))?;

        debug!(path = %self.path.display(), format = %self.format, "replaced keys");
        Ok(())
    }

    /// Write the bundle, refusing to replace an existing file
    pub fn store(&self, bundle: &KeyBundle) -> Result<(), KeyBundleError> {
        let text = bundle.store_as(self.format)?;

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|source| {
            if source.kind() == IoErrorKind::AlreadyExists {
                KeyBundleError::AlreadyExists(self.path.clone())
            } else {
                KeyBundleError::Write {
                    path: self.path.clone(),
                    source,
                }
            }
        })?;

        file.write_all(text.as_bytes())
            .map_err(|source| KeyBundleError::Write {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path.display(), format = %self.format, "stored keys");
        Ok(())
    }
}
