//! Storage configuration.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding [`Config::store_folder`].
pub const ENV_STORE_FOLDER: &str = "CHARBEAM_STORE_FOLDER";
/// Environment variable overriding [`Config::db_file`].
pub const ENV_DB_FILE: &str = "CHARBEAM_DB_FILE";

/// Where records are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// File name of the CSV table loaded at startup and rewritten on load.
    pub db_file: String,
    /// Folder holding the table and any stored pages.
    pub store_folder: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_file: "db.csv".to_string(),
            store_folder: PathBuf::from("./data"),
        }
    }
}

impl Config {
    /// Defaults, overridden by `CHARBEAM_STORE_FOLDER` / `CHARBEAM_DB_FILE`
    /// when set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(folder) = env::var_os(ENV_STORE_FOLDER).filter(|v| !v.is_empty()) {
            config.store_folder = PathBuf::from(folder);
        }
        if let Ok(db_file) = env::var(ENV_DB_FILE)
            && !db_file.is_empty()
        {
            config.db_file = db_file;
        }
        config
    }

    #[must_use]
    pub fn with_store_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.store_folder = folder.into();
        self
    }

    #[must_use]
    pub fn with_db_file(mut self, db_file: impl Into<String>) -> Self {
        self.db_file = db_file.into();
        self
    }

    /// Full path of the table file.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.store_folder.join(&self.db_file)
    }
}
