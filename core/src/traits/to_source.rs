use super::printer::{Printer, SourcePrinter};
use crate::config::GeneratorConfig;
use crate::syntax::{Ident, Modifier, TypeKeyword};

/// Trait for writing generated constructs as source text.
///
/// `ToSource` is the synthesis counterpart of a parser: it turns an in-memory
/// description of generated code into text through a [`Printer`], which owns
/// all layout decisions (indentation, line endings).
///
/// # Blanket Implementations
///
/// - `Option<T>`: Writes nothing for `None`, delegates for `Some`
/// - `Vec<T>`: Writes each element in sequence
/// - `&T`: Delegates to referenced value
pub trait ToSource {
    /// Write this value to the printer.
    fn write<P: Printer>(&self, printer: &mut P);

    /// Render with a [`SourcePrinter`] configured by `config`.
    fn to_source(&self, config: &GeneratorConfig) -> String {
        let mut printer = SourcePrinter::new(*config);
        self.write(&mut printer);
        printer.into_string()
    }
}

impl<T: ToSource> ToSource for Option<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        if let Some(v) = self {
            v.write(p);
        }
    }
}

impl<T: ToSource> ToSource for Vec<T> {
    fn write<P: Printer>(&self, p: &mut P) {
        for item in self {
            item.write(p);
        }
    }
}

impl<T: ToSource + ?Sized> ToSource for &T {
    fn write<P: Printer>(&self, p: &mut P) {
        (*self).write(p);
    }
}

impl ToSource for str {
    fn write<P: Printer>(&self, p: &mut P) {
        p.word(self);
    }
}

impl ToSource for String {
    fn write<P: Printer>(&self, p: &mut P) {
        p.word(self);
    }
}

impl ToSource for Ident {
    fn write<P: Printer>(&self, p: &mut P) {
        p.word(&self.text);
    }
}

impl ToSource for Modifier {
    fn write<P: Printer>(&self, p: &mut P) {
        p.word(self.as_str());
    }
}

impl ToSource for TypeKeyword {
    fn write<P: Printer>(&self, p: &mut P) {
        p.word(self.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_and_vec_delegate() {
        let config = GeneratorConfig::default();
        let none: Option<String> = None;
        assert_eq!(none.to_source(&config), "");
        assert_eq!(Some("a".to_owned()).to_source(&config), "a");
        assert_eq!(vec!["a", "b"].to_source(&config), "ab");
    }

    #[test]
    fn keywords_render_as_written() {
        let config = GeneratorConfig::default();
        assert_eq!(Modifier::Partial.to_source(&config), "partial");
        assert_eq!(TypeKeyword::RecordStruct.to_source(&config), "record struct");
    }
}
