use super::to_source::ToSource;
use crate::config::GeneratorConfig;

/// Line-oriented writer for generated C#.
///
/// Implementors own a buffer and an indent level. Layout (indent unit, line
/// terminator) comes from the provided methods, which [`SourcePrinter`]
/// overrides from a [`GeneratorConfig`]. Blocks are Allman style: `{` and `}`
/// each on their own line.
pub trait Printer: Sized {
    /// The output buffer. Every provided method writes through this.
    fn buf_mut(&mut self) -> &mut String;

    /// Current indent level, in levels rather than columns.
    fn indent_level(&self) -> usize;

    fn set_indent(&mut self, level: usize);

    /// Consume the printer and return everything written.
    fn into_string(self) -> String;

    /// Terminator written by [`newline`](Printer::newline). Default: `\n`
    fn line_ending(&self) -> &'static str {
        "\n"
    }

    /// Spaces per level. Ignored when [`use_tabs`](Printer::use_tabs) is set.
    fn indent_width(&self) -> usize {
        4
    }

    /// One tab per level instead of spaces. Default: `false`
    fn use_tabs(&self) -> bool {
        false
    }

    /// Append `s` verbatim, with no indentation or terminator.
    fn word(&mut self, s: &str) {
        self.buf_mut().push_str(s);
    }

    /// Append a single space.
    fn space(&mut self) {
        self.buf_mut().push(' ');
    }

    /// Does not indent the next line.
    fn newline(&mut self) {
        let ending = self.line_ending();
        self.word(ending);
    }

    /// Write the leading whitespace for the current level. Call at the start
    /// of a line.
    fn add_indent(&mut self) {
        let level = self.indent_level();
        if self.use_tabs() {
            self.buf_mut().extend(std::iter::repeat_n('\t', level));
        } else {
            let width = level.saturating_mul(self.indent_width());
            self.buf_mut().extend(std::iter::repeat_n(' ', width));
        }
    }

    /// Saturates at `usize::MAX`.
    fn indent(&mut self) {
        self.set_indent(self.indent_level().saturating_add(1));
    }

    /// Saturates at 0.
    fn dedent(&mut self) {
        self.set_indent(self.indent_level().saturating_sub(1));
    }

    /// One complete line at the current indentation.
    fn line(&mut self, s: &str) {
        self.add_indent();
        self.word(s);
        self.newline();
    }

    /// `{` on its own line, then one level deeper.
    fn open_block(&mut self) {
        self.line("{");
        self.indent();
    }

    /// One level shallower, then `}` on its own line.
    fn close_block(&mut self) {
        self.dedent();
        self.line("}");
    }

    fn write<T: ToSource + ?Sized>(&mut self, value: &T) {
        value.write(self);
    }
}

/// [`Printer`] driven by a [`GeneratorConfig`].
#[derive(Debug, Clone, Default)]
pub struct SourcePrinter {
    buf: String,
    indent: usize,
    config: GeneratorConfig,
}

impl SourcePrinter {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            buf: String::new(),
            indent: 0,
            config,
        }
    }
}

impl Printer for SourcePrinter {
    fn buf_mut(&mut self) -> &mut String {
        &mut self.buf
    }

    fn indent_level(&self) -> usize {
        self.indent
    }

    fn set_indent(&mut self, level: usize) {
        self.indent = level;
    }

    fn into_string(self) -> String {
        self.buf
    }

    fn line_ending(&self) -> &'static str {
        self.config.line_ending.as_str()
    }

    fn indent_width(&self) -> usize {
        self.config.indent_width
    }

    fn use_tabs(&self) -> bool {
        self.config.use_tabs
    }
}
