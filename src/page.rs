//! Numbered pages of characters.
//!
//! The upstream character API serves one page as
//! `{"info": {"count", "pages", "next", "prev"}, "results": [...]}`.
//! A [`PageSource`] hands out the `results` of a page; [`DocumentPage`]
//! does so for a page document already fetched into a reader.

use crate::error::{CodecError, StoreError};
use crate::record::CharacterList;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

/// Paging metadata of a page document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Characters across all pages.
    pub count: u64,
    /// Number of pages.
    pub pages: u32,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// One page as served by the character API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDocument {
    #[serde(default)]
    pub info: PageInfo,
    pub results: CharacterList,
}

/// Decode a page document.
///
/// # Errors
/// Returns [`CodecError::Empty`] for blank input and a parse error for
/// anything that is not a page document.
pub fn read_page_document<R: Read>(mut reader: R) -> Result<PageDocument> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("read page document")?;
    if buf.trim().is_empty() {
        return Err(CodecError::Empty.into());
    }
    serde_json::from_str(&buf).context("parse page document")
}

/// Supplier of numbered character pages.
pub trait PageSource {
    /// Characters on page `page` (1-based).
    ///
    /// # Errors
    /// Implementation specific; a page outside the known range should be
    /// reported as [`StoreError::InvalidPage`].
    fn characters_by_page(&mut self, page: u32) -> Result<CharacterList>;
}

/// A single page document held in a reader.
///
/// The reader is consumed by the first request; asking again is an error.
pub struct DocumentPage<R> {
    reader: Option<R>,
}

impl<R: Read> DocumentPage<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl<R: Read> PageSource for DocumentPage<R> {
    fn characters_by_page(&mut self, page: u32) -> Result<CharacterList> {
        let reader = self
            .reader
            .take()
            .ok_or_else(|| anyhow!("page document already consumed"))?;
        let doc = read_page_document(reader)?;
        if doc.info.pages > 0 && page > doc.info.pages {
            return Err(StoreError::InvalidPage(i64::from(page)).into());
        }
        debug!(
            page,
            pages = doc.info.pages,
            results = doc.results.len(),
            "decoded page document"
        );
        Ok(doc.results)
    }
}
