//! Mock readers and temporary files for exercising I/O paths.

use std::io::{self, BufRead, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// A reader that yields `data` and then fails with an I/O error instead of
/// reporting end-of-stream.
pub struct FailingReader {
    inner: Cursor<Vec<u8>>,
    kind: io::ErrorKind,
}

impl FailingReader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            inner: Cursor::new(data.into()),
            kind: io::ErrorKind::ConnectionReset,
        }
    }

    fn exhausted(&self) -> bool {
        self.inner.position() >= self.inner.get_ref().len() as u64
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.exhausted() {
            return Err(io::Error::new(self.kind, "mock stream cut short"));
        }
        self.inner.read(buf)
    }
}

impl BufRead for FailingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.exhausted() {
            return Err(io::Error::new(self.kind, "mock stream cut short"));
        }
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
    }
}

/// A line-oriented reader that counts how many lines have been handed out.
///
/// The counter is shared, so a test can keep a handle after moving the
/// reader into a run.
pub struct CountingReader {
    lines: std::vec::IntoIter<Vec<u8>>,
    current: Cursor<Vec<u8>>,
    served: Arc<AtomicUsize>,
}

impl CountingReader {
    pub fn new(lines: &[String]) -> Self {
        let lines: Vec<Vec<u8>> = lines
            .iter()
            .map(|l| format!("{l}\n").into_bytes())
            .collect();
        Self {
            lines: lines.into_iter(),
            current: Cursor::new(Vec::new()),
            served: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle on the number of lines started so far.
    #[must_use]
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.served)
    }
}

impl Read for CountingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let available = self.fill_buf()?;
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.consume(n);
        Ok(n)
    }
}

impl BufRead for CountingReader {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        if self.current.position() >= self.current.get_ref().len() as u64 {
            if let Some(next) = self.lines.next() {
                self.served.fetch_add(1, Ordering::SeqCst);
                self.current = Cursor::new(next);
            }
        }
        self.current.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.current.consume(amt);
    }
}

/// A temporary directory that is automatically deleted when dropped.
pub struct TempDirPath {
    #[allow(dead_code)]
    temp_dir: TempDir,
    path: PathBuf,
}

impl TempDirPath {
    /// Create a new temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().to_path_buf();
        Ok(Self { temp_dir, path })
    }

    /// Get the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get a path for a file within this directory.
    #[must_use]
    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.path.join(filename)
    }
}
