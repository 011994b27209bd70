use crate::codec::{Format, decode, encode};
use crate::record::{Character, CharacterList};
use anyhow::{Context, Result};
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Character lists persisted as files under one folder.
#[derive(Debug, Clone)]
pub struct FileStore {
    folder: PathBuf,
}

impl FileStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    #[must_use]
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    #[must_use]
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.folder.join(name)
    }

    /// Encode `data` into `name`, replacing any previous content.
    /// Creates the folder if needed.
    ///
    /// # Returns
    /// The number of records written.
    ///
    /// # Errors
    /// Returns an error if the folder/file cannot be created or encoding fails.
    pub fn write(&self, name: &str, data: &[Character], format: Format) -> Result<usize> {
        create_dir_all(&self.folder)
            .with_context(|| format!("mkdir -p {}", self.folder.display()))?;
        let path = self.path_of(name);
        let f = File::create(&path).with_context(|| format!("create {}", path.display()))?;
        encode(format, BufWriter::new(f), data)
            .with_context(|| format!("write {} as {}", path.display(), format))
    }

    /// Decode `name` in the given format.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or parsed.
    pub fn read(&self, name: &str, format: Format) -> Result<CharacterList> {
        let path = self.path_of(name);
        let f = File::open(&path).with_context(|| format!("open {}", path.display()))?;
        decode(format, BufReader::new(f))
            .with_context(|| format!("read {} as {}", path.display(), format))
    }
}

/// File name of a stored page: `character_007.json`.
#[must_use]
pub fn page_file_name(page: u32, format: Format) -> String {
    format!("character_{:03}.{}", page, format.extension())
}
