//! Indentation-aware text output.

use alloc::string::String;

/// Accumulates source lines at a tracked indentation depth.
#[derive(Clone, Debug)]
pub struct SourceWriter {
    buf: String,
    indent: String,
    depth: usize,
}

impl SourceWriter {
    /// Creates a writer using `indent` as one indentation step.
    pub fn new(indent: impl Into<String>) -> Self {
        Self {
            buf: String::new(),
            indent: indent.into(),
            depth: 0,
        }
    }

    /// Writes one line at the current depth. Empty lines carry no indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(&self.indent);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    /// Writes an empty line.
    #[inline]
    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `header` (if any) and an opening brace, then indents.
    pub fn open(&mut self, header: impl AsRef<str>) {
        let header = header.as_ref();
        if !header.is_empty() {
            self.line(header);
        }
        self.line("{");
        self.depth += 1;
    }

    /// Dedents and writes a closing brace followed by `suffix`.
    pub fn close(&mut self, suffix: &str) {
        self.dedent();
        let mut closing = String::from("}");
        closing.push_str(suffix);
        self.line(closing);
    }

    #[inline]
    pub fn indent(&mut self) {
        self.depth += 1;
    }

    #[inline]
    pub fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Returns the current depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consumes the writer and returns its text.
    pub fn finish(self) -> String {
        self.buf
    }
}
