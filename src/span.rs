use serde::{Deserialize, Serialize};

/// Byte-offset span in source code, plus the 1-based line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: u32,
}

impl Span {
    pub fn new(start: usize, end: usize, line: u32) -> Self {
        Self { start, end, line }
    }

    /// Zero-width span at `offset`, used for the end-of-input token.
    pub fn point(offset: usize, line: u32) -> Self {
        Self { start: offset, end: offset, line }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 1 }
    }
}

/// Maps byte offsets to 1-based line numbers for a single source file.
pub struct LineIndex {
    /// Byte offset of the start of each line. line_starts[0] == 0 always.
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in source.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_of(&self, offset: usize) -> u32 {
        // Binary search: find the last line_start <= offset
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(ins) => ins.saturating_sub(1),
        };
        line as u32 + 1
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
