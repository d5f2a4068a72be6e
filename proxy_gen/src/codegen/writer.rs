/* Line-oriented text builder with an explicit indentation stack */

const INDENT: &str = "    ";

#[derive(Debug)]
pub struct CodeWriter {
    output: String,
    indent_level: usize,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /* Append text to the current line, indenting first if the line is fresh */
    pub fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.end_line();
    }

    /* Terminate the current line; an empty line gets no indentation */
    pub fn end_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub fn blank_line(&mut self) {
        if !self.at_line_start {
            self.end_line();
        }
        self.end_line();
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        debug_assert!(self.indent_level > 0, "unbalanced indentation");
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Writes `{`, runs `body` one level deeper, then writes `}`.
    ///
    /// Scopes opened through here are always closed, so nested namespace,
    /// type and member blocks stay balanced.
    pub fn block(&mut self, body: impl FnOnce(&mut Self)) {
        self.write_line("{");
        self.increase_indent();
        body(self);
        self.decrease_indent();
        self.write_line("}");
    }

    pub fn finish(self) -> String {
        self.output
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
