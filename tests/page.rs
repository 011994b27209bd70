//! Page documents and the page store entry point.

use anyhow::{Result, anyhow};
use charbeam::testing::*;
use charbeam::*;

/// Records every page it is asked for.
#[derive(Default)]
struct RecordingSource {
    asked: Vec<u32>,
}

impl PageSource for RecordingSource {
    fn characters_by_page(&mut self, page: u32) -> Result<CharacterList> {
        self.asked.push(page);
        Ok(sample_characters())
    }
}

struct BrokenSource;

impl PageSource for BrokenSource {
    fn characters_by_page(&mut self, _page: u32) -> Result<CharacterList> {
        Err(anyhow!("upstream unavailable"))
    }
}

#[test]
fn page_document_decodes_api_shape() -> Result<()> {
    let chars = sample_characters();
    let doc = read_page_document(page_document(&chars, 42).as_bytes())?;

    assert_eq!(doc.info.pages, 42);
    assert_eq!(doc.info.count, 6 * 42);
    assert_eq!(doc.info.next, None);
    assert_eq!(doc.results, chars);
    Ok(())
}

#[test]
fn page_document_without_info_is_accepted() -> Result<()> {
    let doc = read_page_document(
        r#"{"results":[{"id":8,"name":"Adjudicator Rick","species":"Human","type":"","gender":"Male","image":"","url":"","created":""}]}"#
            .as_bytes(),
    )?;
    assert_eq!(doc.info, PageInfo::default());
    assert_eq!(doc.results.len(), 1);
    assert_eq!(doc.results[0].name, "Adjudicator Rick");
    Ok(())
}

#[test]
fn page_document_rejects_empty_and_garbage() {
    let err = read_page_document("\n".as_bytes()).unwrap_err();
    assert_eq!(err.downcast_ref::<CodecError>(), Some(&CodecError::Empty));
    assert!(read_page_document("[1, 2]".as_bytes()).is_err());
    assert!(read_page_document(r#"{"info":{}}"#.as_bytes()).is_err());
}

#[test]
fn document_page_is_single_use() -> Result<()> {
    let text = page_document(&sample_characters()[..2], 3);
    let mut source = DocumentPage::new(text.as_bytes());

    assert_eq!(source.characters_by_page(1)?.len(), 2);
    assert!(source.characters_by_page(1).is_err());
    Ok(())
}

#[test]
fn document_page_rejects_page_past_the_end() {
    let text = page_document(&sample_characters(), 3);
    let err = DocumentPage::new(text.as_bytes())
        .characters_by_page(4)
        .unwrap_err();
    assert_eq!(
        err.downcast_ref::<StoreError>(),
        Some(&StoreError::InvalidPage(4))
    );
}

#[test]
fn stored_page_reads_back_in_both_formats() -> Result<()> {
    let tmp = TempDirPath::new()?;
    let service = Service::empty(Config::default().with_store_folder(tmp.path()));
    let chars = sample_characters();

    for (page, format) in [(2, Format::Csv), (7, Format::Json)] {
        let text = page_document(&chars, 10);
        let stored = service.store_page_from(&mut DocumentPage::new(text.as_bytes()), page, format)?;
        assert_eq!(stored, chars);
        assert_eq!(service.read_page(page, format)?, chars);
    }
    assert!(tmp.file_path("character_002.csv").exists());
    assert!(tmp.file_path("character_007.json").exists());
    Ok(())
}

#[test]
fn invalid_page_never_reaches_the_source() -> Result<()> {
    let tmp = TempDirPath::new()?;
    let service = Service::empty(Config::default().with_store_folder(tmp.path()));
    let mut source = RecordingSource::default();

    for bad in [0, -3] {
        let err = service
            .store_page_from(&mut source, bad, Format::Json)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::InvalidPage(bad))
        );
    }
    assert!(source.asked.is_empty());

    service.store_page_from(&mut source, 5, Format::Json)?;
    assert_eq!(source.asked, vec![5]);
    Ok(())
}

#[test]
fn source_failure_writes_nothing() -> Result<()> {
    let tmp = TempDirPath::new()?;
    let service = Service::empty(Config::default().with_store_folder(tmp.path()));

    let err = service
        .store_page_from(&mut BrokenSource, 1, Format::Csv)
        .unwrap_err();
    assert!(format!("{err:#}").contains("upstream unavailable"));
    assert!(!tmp.file_path("character_001.csv").exists());
    Ok(())
}
