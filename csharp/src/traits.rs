use crate::CsError;
use crate::stream::{Spanned, TokenStream};
use crate::tokens::Token;

/// Syntax that can be parsed from a [`TokenStream`].
///
/// ```ignore
/// impl Parse for Ident {
///     fn parse(stream: &mut TokenStream) -> Result<Self, CsError> {
///         // ...
///     }
/// }
/// ```
pub trait Parse: Sized {
    fn parse(stream: &mut TokenStream) -> Result<Self, CsError>;

    /// Parse and pair the result with the span it covered.
    fn parse_spanned(stream: &mut TokenStream) -> Result<Spanned<Self>, CsError> {
        let start = stream.cursor_span().map(|s| s.start).unwrap_or(0);
        let value = Self::parse(stream)?;
        let end = stream.last_span().map(|s| s.end).unwrap_or(start);
        Ok(Spanned::new(start, end, value))
    }
}

/// Single-token lookahead.
pub trait Peek: Sized {
    /// Whether `token` can start this syntax.
    fn is(token: &Token) -> bool;

    fn peek(stream: &TokenStream) -> bool {
        stream
            .peek_token()
            .map(|t| Self::is(&t.value))
            .unwrap_or(false)
    }
}

/// Name used for this syntax in "expected ..." messages.
pub trait Diagnostic {
    /// e.g. "`{`" or "identifier".
    fn fmt() -> &'static str;
}
