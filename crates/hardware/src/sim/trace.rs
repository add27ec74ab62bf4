//! Trace input.
//!
//! A trace is plain text with one access per line: an access tag (`r` or `w`) and a
//! hexadecimal address, optionally prefixed with `0x`. Blank lines are skipped and
//! anything after the address is ignored.

use std::io::BufRead;

use crate::common::{AccessType, TraceError};

/// One access from a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Read or write.
    pub kind: AccessType,
    /// Address accessed.
    pub addr: u64,
}

impl TraceEvent {
    /// Creates a read event.
    pub const fn read(addr: u64) -> Self {
        Self {
            kind: AccessType::Read,
            addr,
        }
    }

    /// Creates a write event.
    pub const fn write(addr: u64) -> Self {
        Self {
            kind: AccessType::Write,
            addr,
        }
    }
}

/// Parses one trace line. Returns `Ok(None)` for a blank line.
///
/// # Errors
///
/// Returns a [`TraceError`] naming `line_no` when the tag is not `r`/`w`, the
/// address is missing, or the address is not hexadecimal.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<TraceEvent>, TraceError> {
    let mut fields = line.split_whitespace();
    let Some(tag) = fields.next() else {
        return Ok(None);
    };

    let mut chars = tag.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => AccessType::from_trace_char(c),
        _ => None,
    }
    .ok_or_else(|| TraceError::UnknownAccess {
        line: line_no,
        found: tag.to_owned(),
    })?;

    let text = fields
        .next()
        .ok_or(TraceError::MissingField { line: line_no })?;
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| TraceError::BadAddress {
        line: line_no,
        text: text.to_owned(),
    })?;

    Ok(Some(TraceEvent { kind, addr }))
}

/// Iterator over the events of a trace, one line at a time.
#[derive(Debug)]
pub struct TraceReader<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub const fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    match parse_line(self.line_no, &self.buf) {
                        Ok(Some(event)) => return Some(Ok(event)),
                        Ok(None) => {}
                        Err(e) => return Some(Err(e)),
                    }
                }
                Err(e) => return Some(Err(TraceError::Io(e))),
            }
        }
    }
}
