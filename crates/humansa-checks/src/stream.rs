//! Line counting over a chunked response body.

use futures::StreamExt;
use humansa_core::{CheckOutcome, Milestone, ProbeError};
use reqwest::Response;
use tracing::debug;

use crate::inspect::truncate;
use crate::spec::Labels;

const NO_DATA: &str = "No streaming data received";
const STARTED: &str = "Streaming started";
const FIRST_CHUNK_PREVIEW: usize = 50;

/// Splits an arbitrarily chunked byte stream into lines.
///
/// Bytes after the last newline are held until more data arrives or the
/// stream ends. Lines are split on `\n`; a trailing `\r` is dropped.
#[derive(Debug, Default)]
pub struct LineSplitter {
    buffer: Vec<u8>,
}

impl LineSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a chunk and returns the non-empty lines it completed.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(text) = decode_line(&line[..line.len() - 1]) {
                lines.push(text);
            }
        }
        lines
    }

    /// Flushes the unterminated tail, if any.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        decode_line(&rest)
    }
}

fn decode_line(raw: &[u8]) -> Option<String> {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(raw).into_owned())
}

/// Tallies lines and remembers the first one.
#[derive(Debug, Default)]
struct Tally {
    count: usize,
    first: Option<String>,
}

impl Tally {
    fn record(&mut self, line: String) {
        self.count += 1;
        if self.first.is_none() {
            self.first = Some(line);
        }
    }

    fn milestones(&self) -> Vec<Milestone> {
        self.first
            .iter()
            .map(|line| Milestone {
                message: STARTED.to_string(),
                detail: Some(format!("First chunk: {}...", truncate(line, FIRST_CHUNK_PREVIEW))),
            })
            .collect()
    }
}

/// Consumes a streaming response and judges it by the number of lines received.
///
/// A fault after the first line still reports the "Streaming started" milestone.
pub async fn consume(response: Response, labels: &Labels) -> Result<CheckOutcome, ProbeError> {
    let mut splitter = LineSplitter::new();
    let mut tally = Tally::default();
    let mut body = Box::pin(response.bytes_stream());

    while let Some(chunk) = body.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                return Ok(CheckOutcome::fail(labels.error, ProbeError::from(e).to_string())
                    .with_milestones(tally.milestones()))
            }
        };
        for line in splitter.push(&bytes) {
            tally.record(line);
        }
    }
    if let Some(line) = splitter.finish() {
        tally.record(line);
    }

    debug!("stream ended after {} lines", tally.count);

    if tally.count == 0 {
        return Ok(CheckOutcome::fail_bare(NO_DATA));
    }

    Ok(CheckOutcome::pass(labels.ok, format!("Received {} chunks", tally.count)).with_milestones(tally.milestones()))
}
