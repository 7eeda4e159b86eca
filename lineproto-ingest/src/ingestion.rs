//! Line-at-a-time ingestion
//!
//! Reads framed lines from any `BufRead`, hands each one to the decoder and
//! writes every decoded data point as one JSON document per line.

use anyhow::{Context, Result};
use lineproto_core::{DataPoint, LineDecoder};
use std::io::{self, BufRead, Read, Write};
use tracing::{debug, info, warn};

use crate::config::IngestConfig;

/// Counters for one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Lines read from the input, including skipped ones
    pub lines_read: usize,
    /// Lines decoded into data points
    pub decoded: usize,
    /// Lines rejected by the decoder or the length limit
    pub rejected: usize,
    /// Blank lines skipped
    pub skipped: usize,
}

/// Drives the decoder over an input stream
pub struct LineIngestor {
    decoder: LineDecoder,
    fail_fast: bool,
    max_line_length: usize,
    skip_blank_lines: bool,
    pretty: bool,
}

impl LineIngestor {
    /// Create an ingestor from configuration
    pub fn new(config: &IngestConfig) -> Self {
        Self {
            decoder: LineDecoder::with_policy(config.decoding.duplicate_policy),
            fail_fast: config.ingestion.fail_fast,
            max_line_length: config.ingestion.max_line_length,
            skip_blank_lines: config.ingestion.skip_blank_lines,
            pretty: config.output.pretty,
        }
    }

    /// Process every line of `reader`, writing decoded points to `writer`
    pub fn run<R, W>(&self, mut reader: R, mut writer: W) -> Result<IngestStats>
    where
        R: BufRead,
        W: Write,
    {
        let mut stats = IngestStats::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            let framed = read_framed(&mut reader, &mut buf, self.max_line_length)
                .with_context(|| format!("Failed to read line {}", line_no + 1))?;

            let too_long = match framed {
                Framed::Eof => break,
                Framed::Line => None,
                Framed::TooLong(len) => Some(len),
            };
            line_no += 1;
            stats.lines_read += 1;

            if let Some(len) = too_long {
                stats.rejected += 1;
                let message = format!(
                    "Line {} is at least {} bytes, exceeding maximum of {}",
                    line_no, len, self.max_line_length
                );
                if self.fail_fast {
                    return Err(anyhow::anyhow!(message));
                }
                warn!(category = "line_too_long", "{}", message);
                continue;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    stats.rejected += 1;
                    if self.fail_fast {
                        return Err(e).with_context(|| format!("Rejected line {}", line_no));
                    }
                    warn!(category = "invalid_utf8", "Line {}: {}", line_no, e);
                    continue;
                }
            };

            if self.skip_blank_lines && line.trim().is_empty() {
                stats.skipped += 1;
                continue;
            }

            match self.decoder.decode(line) {
                Ok(point) => {
                    self.write_point(&mut writer, &point).with_context(|| {
                        format!("Failed to write data point for line {}", line_no)
                    })?;
                    stats.decoded += 1;
                }
                Err(e) => {
                    stats.rejected += 1;
                    if self.fail_fast {
                        return Err(e).with_context(|| format!("Rejected line {}", line_no));
                    }
                    warn!(category = e.category(), "Line {}: {}", line_no, e);
                }
            }
        }

        writer.flush().context("Failed to flush output")?;

        info!(
            "Ingested {} lines: {} decoded, {} rejected, {} skipped",
            stats.lines_read, stats.decoded, stats.rejected, stats.skipped
        );
        Ok(stats)
    }

    fn write_point<W: Write>(&self, writer: &mut W, point: &DataPoint) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, point)?;
        } else {
            serde_json::to_writer(&mut *writer, point)?;
        }
        writeln!(writer)?;
        debug!("Wrote data point for {}", point.measurement);
        Ok(())
    }
}

/// Outcome of reading one framed line
#[derive(Debug, PartialEq, Eq)]
enum Framed {
    /// `buf` holds the line without its "\n" / "\r\n" framing
    Line,
    /// The line exceeded the limit and was discarded; carries the bytes seen
    TooLong(usize),
    Eof,
}

/// Read one line into `buf`, never buffering more than `max_len` plus framing.
fn read_framed<R: BufRead>(
    reader: &mut R,
    buf: &mut Vec<u8>,
    max_len: usize,
) -> io::Result<Framed> {
    buf.clear();

    let cap = max_len as u64 + 2;
    let read = reader.by_ref().take(cap).read_until(b'\n', buf)?;
    if read == 0 {
        return Ok(Framed::Eof);
    }

    let terminated = buf.last() == Some(&b'\n');
    if !terminated && read as u64 == cap {
        let seen = buf.len() + skip_line(reader)?;
        buf.clear();
        return Ok(Framed::TooLong(seen));
    }

    if terminated {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }

    if buf.len() > max_len {
        let seen = buf.len();
        buf.clear();
        return Ok(Framed::TooLong(seen));
    }
    Ok(Framed::Line)
}

/// Discard input through the next "\n", returning the bytes dropped before it
fn skip_line<R: BufRead>(reader: &mut R) -> io::Result<usize> {
    let mut skipped = 0;
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(skipped);
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(skipped + pos);
            }
            None => {
                let len = available.len();
                reader.consume(len);
                skipped += len;
            }
        }
    }
}
