//! Service context: every operation of the utility, bound to one
//! [`Config`] and its stores.
//!
//! A `Service` is built explicitly and handed to whoever needs it (the CLI
//! builds one per invocation); nothing is process-global.

use crate::codec::Format;
use crate::config::Config;
use crate::error::StoreError;
use crate::io::csv::read_csv;
use crate::page::PageSource;
use crate::params::RunParams;
use crate::record::{Character, CharacterList};
use crate::runner::{RunReport, Runner};
use crate::store::{FileStore, MemoryStore, page_file_name};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;
use tracing::{info, warn};

pub struct Service {
    config: Config,
    memory: Arc<MemoryStore>,
    files: FileStore,
}

impl Service {
    /// Build the service and warm the memory table from the configured db
    /// file. A missing or unreadable table is logged, not fatal.
    pub fn new(config: Config) -> Self {
        let service = Self::empty(config);
        let path = service.config.db_path();
        match File::open(&path) {
            Ok(f) => match read_csv(BufReader::new(f)) {
                Ok(list) => {
                    info!(path = %path.display(), records = list.len(), "loaded character table");
                    service.memory.upsert(list);
                }
                Err(e) => warn!(path = %path.display(), error = %e, "could not load character table"),
            },
            Err(_) => info!(path = %path.display(), "no character table yet, load a CSV first"),
        }
        service
    }

    /// Build the service without touching the file system.
    #[must_use]
    pub fn empty(config: Config) -> Self {
        let files = FileStore::new(config.store_folder.clone());
        Self {
            config,
            memory: Arc::new(MemoryStore::new()),
            files,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    /// Decode a CSV table, merge it into memory and persist it as the db file.
    ///
    /// # Returns
    /// The number of records loaded.
    ///
    /// # Errors
    /// Fails on empty or malformed CSV, or if the db file cannot be written.
    /// Memory is only updated once the db file has been written.
    pub fn load_and_store<R: Read>(&self, reader: R) -> Result<usize> {
        let list = read_csv(reader).context("load character table")?;
        let written = self.files.write(&self.config.db_file, &list, Format::Csv)?;
        self.memory.upsert(list);
        info!(records = written, db = %self.config.db_path().display(), "stored character table");
        Ok(written)
    }

    /// # Errors
    /// [`StoreError::InvalidId`] for `id <= 0`, [`StoreError::NotFound`] for an
    /// unknown id.
    pub fn get_by_id(&self, id: i64) -> Result<Character> {
        let id = u64::try_from(id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(StoreError::InvalidId(id))?;
        Ok(self.memory.get(id)?)
    }

    /// Persist a page of characters as `character_NNN.<ext>`.
    ///
    /// # Errors
    /// [`StoreError::InvalidPage`] for `page <= 0`, or any write failure.
    pub fn store_page(&self, page: i64, list: &[Character], format: Format) -> Result<usize> {
        let name = page_file_name(checked_page(page)?, format);
        self.files.write(&name, list, format)
    }

    /// Fetch page `page` from `source` and persist it as
    /// `character_NNN.<ext>`.
    ///
    /// # Returns
    /// The characters of the page.
    ///
    /// # Errors
    /// [`StoreError::InvalidPage`] for `page <= 0` (the source is not asked),
    /// any failure of the source, or any write failure.
    pub fn store_page_from(
        &self,
        source: &mut dyn PageSource,
        page: i64,
        format: Format,
    ) -> Result<CharacterList> {
        let number = checked_page(page)?;
        let list = source
            .characters_by_page(number)
            .with_context(|| format!("fetch page {number}"))?;
        let name = page_file_name(number, format);
        self.files.write(&name, &list, format)?;
        info!(page = number, records = list.len(), file = %name, "stored page");
        Ok(list)
    }

    /// Read back a page stored with [`store_page`](Self::store_page).
    ///
    /// # Errors
    /// [`StoreError::InvalidPage`] for `page <= 0`, or any read failure.
    pub fn read_page(&self, page: i64, format: Format) -> Result<CharacterList> {
        let name = page_file_name(checked_page(page)?, format);
        self.files.read(&name, format)
    }

    /// Filter `reader` through the worker pool.
    ///
    /// # Errors
    /// Validation errors of `params`; see [`Runner::new`].
    pub fn read_concurrent<R: BufRead + Send>(
        &self,
        reader: R,
        params: &RunParams,
    ) -> Result<CharacterList> {
        Ok(self.read_concurrent_report(reader, params)?.into_records())
    }

    /// Like [`read_concurrent`](Self::read_concurrent) but keeps the run
    /// statistics.
    ///
    /// # Errors
    /// Validation errors of `params`; see [`Runner::new`].
    pub fn read_concurrent_report<R: BufRead + Send>(
        &self,
        reader: R,
        params: &RunParams,
    ) -> Result<RunReport> {
        Runner::new(params)?.run(reader)
    }
}

fn checked_page(page: i64) -> Result<u32, StoreError> {
    u32::try_from(page)
        .ok()
        .filter(|p| *p > 0)
        .ok_or(StoreError::InvalidPage(page))
}
