//! Generator configuration.
//!
//! [`GeneratorConfig`] controls the layout of synthesized sources. It never
//! changes *what* is generated, so two passes with the same config over the
//! same input produce byte-identical output.
//!
//! # Example
//!
//! ```
//! use reprgen_core::{GeneratorConfig, LineEnding};
//!
//! // Four-space indentation, `\n` line endings
//! let config = GeneratorConfig::default();
//!
//! // Tabs and CRLF for Windows-first repositories
//! let config = GeneratorConfig::new()
//!     .with_tabs(true)
//!     .with_line_ending(LineEnding::CrLf);
//! assert!(config.use_tabs);
//! ```

/// Line terminator written after every generated line.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// The terminator's characters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Layout settings for synthesized sources.
///
/// # Default Values
///
/// | Setting | Default |
/// |---------|---------|
/// | `indent_width` | 4 |
/// | `use_tabs` | `false` |
/// | `line_ending` | [`LineEnding::Lf`] |
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Spaces per indent level when `use_tabs` is `false`.
    pub indent_width: usize,

    /// Indent with one tab per level.
    pub use_tabs: bool,

    /// Terminator after every line, the last one included.
    pub line_ending: LineEnding,
}

impl Default for GeneratorConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GeneratorConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        indent_width: 4,
        use_tabs: false,
        line_ending: LineEnding::Lf,
    };

    /// Same as [`GeneratorConfig::DEFAULT`].
    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the number of spaces per indent level. Has no effect while tabs
    /// are enabled.
    #[inline]
    pub const fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Indent with tabs instead of spaces.
    #[inline]
    pub const fn with_tabs(mut self, use_tabs: bool) -> Self {
        self.use_tabs = use_tabs;
        self
    }

    /// Set the terminator written after every line.
    #[inline]
    pub const fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}
