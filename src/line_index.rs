//! Maps a byte offset to a `line:column` pair, for diagnostics only. The
//! analyzer itself never consults this -- it works purely in byte offsets.

#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Scans `document` once for `\n` bytes. Safe on UTF-8 input: scanning
    /// for a single ASCII byte can't land inside a multi-byte sequence.
    pub fn build(document: &[u8]) -> Self {
        let mut line_starts = vec![0];
        for (i, &b) in document.iter().enumerate() {
            if b == b'\n' {
                push_line_start(&mut line_starts, i + 1);
            }
        }
        LineIndex { line_starts }
    }

    /// 0-based line number containing `byte_index`.
    pub fn line_at(&self, byte_index: usize) -> usize {
        match self.line_starts.binary_search(&byte_index) {
            Ok(i) => i,
            Err(i) => i - 1,
        }
    }

    /// 0-based column (byte offset within its line) of `byte_index`.
    pub fn column_at(&self, byte_index: usize) -> usize {
        byte_index - self.line_starts[self.line_at(byte_index)]
    }
}

fn push_line_start(line_starts: &mut Vec<usize>, byte_index: usize) {
    if line_starts.last().copied().unwrap_or(0) >= byte_index {
        return;
    }
    line_starts.push(byte_index);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_has_only_line_zero() {
        let idx = LineIndex::build(b"hello world");
        assert_eq!(idx.line_at(0), 0);
        assert_eq!(idx.line_at(10), 0);
        assert_eq!(idx.column_at(6), 6);
    }

    #[test]
    fn tracks_lines_after_newlines() {
        let idx = LineIndex::build(b"one\ntwo\nthree");
        assert_eq!(idx.line_at(0), 0);
        assert_eq!(idx.line_at(4), 1); // 't' of "two"
        assert_eq!(idx.line_at(8), 2); // 't' of "three"
        assert_eq!(idx.column_at(8), 0);
        assert_eq!(idx.column_at(10), 2);
    }
}
