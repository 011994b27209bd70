//! Line source: turns a byte stream into lines pushed onto a channel.

use crate::cancel::CancelSignal;
use crossbeam_channel::{Sender, select};
use std::io::BufRead;
use tracing::{debug, warn};

/// What the source did before it stopped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSummary {
    /// Lines read from the stream (including one that could not be handed off).
    pub lines: usize,
    /// Read error that cut the stream short, if any.
    pub error: Option<String>,
    /// `true` when the source stopped before end-of-stream because of
    /// cancellation or because nobody was left to receive lines.
    pub stopped_early: bool,
}

/// Streams lines out of any buffered reader.
///
/// Lines keep their input order, lose their `\n` / `\r\n` terminator and are
/// forwarded uninterpreted; invalid UTF-8 is replaced, not rejected.
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Push every line into `tx` until end-of-stream, a read error, the
    /// receivers hanging up, or `cancel` firing.
    ///
    /// The channel is closed when this returns, since `tx` is dropped.
    pub fn pump(mut self, tx: Sender<String>, cancel: &CancelSignal) -> SourceSummary {
        let mut summary = SourceSummary::default();
        let mut buf = Vec::new();
        loop {
            if cancel.is_cancelled() {
                summary.stopped_early = true;
                break;
            }
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    summary.lines += 1;
                    let line = String::from_utf8_lossy(strip_line_ending(&buf)).into_owned();
                    let delivered = select! {
                        send(tx, line) -> res => res.is_ok(),
                        recv(cancel.listener()) -> _ => false,
                    };
                    if !delivered {
                        summary.stopped_early = true;
                        break;
                    }
                }
                // Bytes of an unterminated line already in `buf` are dropped.
                Err(e) => {
                    warn!(error = %e, lines = summary.lines, "line source read failed, input truncated");
                    summary.error = Some(e.to_string());
                    break;
                }
            }
        }
        debug!(
            lines = summary.lines,
            stopped_early = summary.stopped_early,
            "line source finished"
        );
        summary
    }
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}
