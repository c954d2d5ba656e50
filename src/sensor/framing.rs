//! Line framing for the sensor byte stream.
//!
//! A line ends at `\n`, `\r`, or `\r\n`. The `\r\n` pair may straddle two
//! reads. Lines longer than the configured cap are rejected instead of
//! buffered without bound.

/// Incremental splitter over raw socket bytes.
#[derive(Debug)]
pub struct LineFramer {
    pending: Vec<u8>,
    after_cr: bool,
    max_line_bytes: usize,
}

/// A line exceeded the length cap before its terminator arrived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTooLong {
    pub limit: usize,
}

impl LineFramer {
    #[must_use]
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            pending: Vec::with_capacity(64),
            after_cr: false,
            max_line_bytes,
        }
    }

    /// Feed bytes, appending every line they complete to `lines` with
    /// terminators stripped. Lines completed before an overflow are kept.
    pub fn push(&mut self, bytes: &[u8], lines: &mut Vec<Vec<u8>>) -> Result<(), LineTooLong> {
        for &b in bytes {
            if std::mem::take(&mut self.after_cr) && b == b'\n' {
                continue;
            }
            match b {
                b'\r' | b'\n' => {
                    lines.push(std::mem::take(&mut self.pending));
                    self.after_cr = b == b'\r';
                }
                _ => {
                    if self.pending.len() >= self.max_line_bytes {
                        return Err(LineTooLong {
                            limit: self.max_line_bytes,
                        });
                    }
                    self.pending.push(b);
                }
            }
        }
        Ok(())
    }

    /// Unterminated trailing line at end of stream, if any.
    pub fn finish(&mut self) -> Option<Vec<u8>> {
        self.after_cr = false;
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}
