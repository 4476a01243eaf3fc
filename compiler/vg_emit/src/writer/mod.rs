//! Indentation-aware text buffer.

const INDENT: &str = "    ";

/// Line-oriented output buffer with an adjustable indentation level.
#[derive(Debug, Default)]
pub struct CodeWriter {
    indent: usize,
    output: String,
}

impl CodeWriter {
    pub fn new() -> Self {
        CodeWriter {
            indent: 0,
            output: String::with_capacity(4096),
        }
    }

    /// Increase indentation level.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease indentation level.
    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent
    }

    /// Write a line at the current indentation, followed by a newline.
    ///
    /// Empty lines are written without indentation.
    pub fn writeln(&mut self, s: &str) {
        if !s.is_empty() {
            for _ in 0..self.indent {
                self.output.push_str(INDENT);
            }
            self.output.push_str(s);
        }
        self.output.push('\n');
    }

    /// Write an empty line.
    pub fn newline(&mut self) {
        self.output.push('\n');
    }

    /// Run `f` one indentation level deeper.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent();
        f(self);
        self.dedent();
    }

    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Take the generated output, leaving the buffer empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}
