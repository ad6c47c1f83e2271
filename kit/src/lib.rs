#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]
//! Adds a generated `ToString` override to C# types marked
//! `[ToStringGenerator]`.
//!
//! This crate bundles [`reprgen_core`] with the C# front end. Most users need
//! [`compile`] and [`generator`]:
//!
//! ```
//! use reprgen::{GeneratorConfig, ParseConfig};
//!
//! let source = r#"
//! using ToStringGenerator;
//! namespace Shop
//! {
//!     [ToStringGenerator]
//!     public partial class Order
//!     {
//!         public int Id { get; set; }
//!     }
//! }
//! "#;
//!
//! let compilation = reprgen::compile([("Order.cs", source)], &ParseConfig::DEFAULT).unwrap();
//! let output = reprgen::generator(ParseConfig::DEFAULT, GeneratorConfig::DEFAULT)
//!     .generate(&compilation)
//!     .unwrap();
//!
//! assert!(output.diagnostics.is_empty());
//! assert!(output.source("Generated_Shop.Order").is_some());
//! ```

use thiserror::Error;

pub use reprgen_core::*;
pub use reprgen_csharp::{CSharp, CsError, CsSemanticModel, ParseConfig, parse_source};

/// The C# front end with its token-level API.
pub use reprgen_csharp as csharp;

/// [`Generator`] over the C# front end.
pub type CSharpGenerator = Generator<CSharp>;

/// A source that failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse `{source_id}`: {error}")]
pub struct SourceError {
    pub source_id: String,
    #[source]
    pub error: CsError,
}

impl SourceError {
    /// Where in the source parsing stopped.
    pub fn span(&self) -> Option<Span> {
        self.error.span()
    }
}

/// Parse `(source_id, text)` pairs into a [`Compilation`], stopping at the
/// first source that fails.
pub fn compile<'a, I>(sources: I, config: &ParseConfig) -> Result<Compilation, SourceError>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    sources
        .into_iter()
        .map(|(source_id, text)| {
            parse_source(source_id, text, config).map_err(|error| {
                log::debug!(source_id = source_id, error:% = error; "source rejected by parser");
                SourceError {
                    source_id: source_id.to_owned(),
                    error,
                }
            })
        })
        .collect()
}

/// A generator for the `[ToStringGenerator]` marker.
pub fn generator(parse: ParseConfig, output: GeneratorConfig) -> CSharpGenerator {
    Generator::new(CSharp::new(parse)).with_config(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_names_the_failing_source() {
        let err = compile(
            [("Good.cs", "class A { }"), ("Bad.cs", "class B {")],
            &ParseConfig::DEFAULT,
        )
        .unwrap_err();

        assert_eq!(err.source_id, "Bad.cs");
        assert_eq!(err.span(), Some(Span::new(8, 9)));
        assert_eq!(
            err.to_string(),
            "failed to parse `Bad.cs`: unterminated type block"
        );
    }

    #[test]
    fn generator_uses_the_given_configs() {
        let generator = generator(
            ParseConfig::new().with_max_nesting_depth(4),
            GeneratorConfig::new().with_tabs(true),
        );
        assert_eq!(generator.frontend().config().max_nesting_depth, 4);
        assert!(generator.config().use_tabs);
    }
}
