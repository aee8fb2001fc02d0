//! Trace-line decoding.
//!
//! A trace is plain text with one access per line:
//!
//! ```text
//! l 0x1fffff50 4
//! s 1fffff58 1
//! ```
//!
//! The first field is `l` (load) or `s` (store), the second a hexadecimal address
//! with an optional `0x` prefix, and the third a size field that must be present
//! but is otherwise ignored. Blank lines are skipped.

use std::io::{BufRead, Lines};

use crate::common::error::TraceError;
use crate::common::{Access, AccessKind};

/// Decodes a single trace line.
///
/// # Arguments
///
/// * `line` - One line of trace text, without its terminator.
///
/// # Returns
///
/// `Ok(None)` for a blank line, `Ok(Some(access))` for a well-formed one, or the
/// reason the line is malformed.
///
/// # Errors
///
/// Returns a static description of the first problem found.
pub fn parse_line(line: &str) -> Result<Option<Access>, &'static str> {
    let mut fields = line.split_whitespace();
    let Some(op) = fields.next() else {
        return Ok(None);
    };

    let kind = match op {
        "l" => AccessKind::Load,
        "s" => AccessKind::Store,
        _ => return Err("unknown operation"),
    };

    let addr_text = fields.next().ok_or("missing address")?;
    let digits = addr_text
        .strip_prefix("0x")
        .or_else(|| addr_text.strip_prefix("0X"))
        .unwrap_or(addr_text);
    let addr = u64::from_str_radix(digits, 16).map_err(|_| "invalid hexadecimal address")?;

    if fields.next().is_none() {
        return Err("missing size field");
    }
    if fields.next().is_some() {
        return Err("unexpected trailing field");
    }

    Ok(Some(Access { kind, addr }))
}

/// Streams decoded accesses from a buffered reader.
///
/// Yields one item per non-blank line. Line numbers in errors are 1-based and
/// count blank lines.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<Access, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(TraceError::Io(e))),
            };
            self.line_no += 1;

            match parse_line(&line) {
                Ok(Some(access)) => return Some(Ok(access)),
                Ok(None) => {}
                Err(reason) => {
                    return Some(Err(TraceError::Malformed {
                        line: self.line_no,
                        reason,
                        text: line.trim().to_owned(),
                    }));
                }
            }
        }
    }
}
