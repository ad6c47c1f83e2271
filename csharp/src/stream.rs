//! Token stream over lexed C# source.

use std::sync::Arc;

use logos::Logos;
use reprgen_core::Span;

use crate::CsError;
use crate::tokens::Token;
use crate::traits::{Parse, Peek};

/// A value paired with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    pub span: Span,
    pub value: T,
}

impl<T> Spanned<T> {
    pub fn new(start: usize, end: usize, value: T) -> Self {
        Self {
            span: Span::new(start, end),
            value,
        }
    }
}

pub type SpannedToken = Spanned<Token>;

/// Cursor over a lexed source. Trivia tokens are kept but skipped by every
/// significant-token accessor.
///
/// Forks share the token buffer, so lookahead through [`fork`](Self::fork)
/// is cheap.
#[derive(Debug)]
pub struct TokenStream {
    source: Arc<str>,
    tokens: Arc<Vec<SpannedToken>>,
    cursor: usize,
    last_cursor: Option<usize>,
}

impl TokenStream {
    /// Lex `source`. The first unrecognized input fails the whole source.
    pub fn lex(source: &str) -> Result<Self, CsError> {
        let mut tokens = Vec::new();
        let mut lex = Token::lexer(source);
        while let Some(tok) = lex.next() {
            let span = lex.span();
            let tok = tok.map_err(|err| err.with_span(Span::new(span.start, span.end)))?;
            tokens.push(Spanned::new(span.start, span.end, tok));
        }

        let source: Arc<str> = Arc::from(source);

        Ok(Self {
            source,
            tokens: Arc::new(tokens),
            cursor: 0,
            last_cursor: None,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `span`, empty when out of range.
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or_default()
    }

    /// Every token, trivia included.
    pub fn all(&self) -> &[SpannedToken] {
        &self.tokens
    }

    fn significant_from(&self, mut cursor: usize) -> Option<usize> {
        while let Some(tok) = self.tokens.get(cursor) {
            if !tok.value.is_trivia() {
                return Some(cursor);
            }
            cursor += 1;
        }
        None
    }

    /// Next significant token without consuming it.
    pub fn peek_token(&self) -> Option<&SpannedToken> {
        self.peek_nth(0)
    }

    /// The `n`-th significant token ahead, `0` being the next one.
    pub fn peek_nth(&self, n: usize) -> Option<&SpannedToken> {
        let mut at = self.significant_from(self.cursor)?;
        for _ in 0..n {
            at = self.significant_from(at + 1)?;
        }
        self.tokens.get(at)
    }

    /// Consume the next significant token.
    pub fn next(&mut self) -> Option<SpannedToken> {
        let at = self.significant_from(self.cursor)?;
        let tok = self.tokens.get(at).cloned()?;
        self.last_cursor = Some(at);
        self.cursor = at + 1;
        Some(tok)
    }

    /// Whether the next significant token starts a `T`.
    pub fn peek<T: Peek>(&self) -> bool {
        T::peek(self)
    }

    pub fn parse<T: Parse>(&mut self) -> Result<T, CsError> {
        T::parse(self)
    }

    /// Consume the next token if it equals `token`.
    pub fn eat(&mut self, token: &Token) -> bool {
        if self.peek_token().is_some_and(|t| &t.value == token) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consume `token` or fail naming `expect`.
    pub fn expect(&mut self, token: &Token, expect: &'static str) -> Result<Span, CsError> {
        match self.peek_token() {
            Some(tok) if &tok.value == token => {
                let span = tok.span;
                self.next();
                Ok(span)
            }
            Some(tok) => Err(CsError::Expected {
                expect,
                found: tok.value.to_string(),
            }
            .with_span(tok.span)),
            None => Err(CsError::Empty { expect }),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn rewind(&mut self, pos: usize) {
        self.cursor = pos.min(self.tokens.len());
    }

    pub fn fork(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            tokens: Arc::clone(&self.tokens),
            cursor: self.cursor,
            last_cursor: self.last_cursor,
        }
    }

    /// Span of the next significant token.
    pub fn cursor_span(&self) -> Option<Span> {
        self.peek_token().map(|t| t.span)
    }

    /// Span of the last consumed token.
    pub fn last_span(&self) -> Option<Span> {
        self.last_cursor
            .and_then(|at| self.tokens.get(at))
            .map(|t| t.span)
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Span) -> Span {
        match self.last_span() {
            Some(end) => start.join(&end),
            None => start,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.peek_token().is_none()
    }

    /// Consume one balanced group starting at the next token, which must open
    /// it. Returns the span of the whole group.
    ///
    /// `(`, `[` and `{` nest; `<` and `>` are tracked as well when
    /// `angles` is set, for generic argument and parameter lists.
    pub fn skip_group(&mut self, what: &'static str, angles: bool) -> Result<Span, CsError> {
        let Some(open) = self.next() else {
            return Err(CsError::Empty { expect: what });
        };
        let opens_angle = matches!(open.value, Token::Lt);
        if !open.value.opens() && !(angles && opens_angle) {
            return Err(CsError::Expected {
                expect: what,
                found: open.value.to_string(),
            }
            .with_span(open.span));
        }

        let mut depth = 1usize;
        while let Some(tok) = self.next() {
            if tok.value.opens() || (angles && matches!(tok.value, Token::Lt)) {
                depth += 1;
            } else if tok.value.closes() || (angles && matches!(tok.value, Token::Gt)) {
                depth -= 1;
                if depth == 0 {
                    return Ok(open.span.join(&tok.span));
                }
            }
        }
        Err(CsError::UnterminatedBlock { what }.with_span(open.span))
    }

    /// Consume tokens up to and including the next `;` outside any group.
    ///
    /// Stops without consuming at a `}` that closes an enclosing block.
    pub fn skip_statement(&mut self) -> Result<(), CsError> {
        loop {
            let Some(tok) = self.peek_token() else {
                return Ok(());
            };
            let value = &tok.value;
            if matches!(value, Token::Semi) {
                self.next();
                return Ok(());
            }
            if value.closes() {
                return Ok(());
            }
            if value.opens() {
                self.skip_group("statement", false)?;
            } else {
                self.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peeking_skips_trivia() {
        let stream = TokenStream::lex("// lead\nclass /* mid */ User").unwrap();
        assert_eq!(stream.peek_token().map(|t| &t.value), Some(&Token::Class));
        assert_eq!(
            stream.peek_nth(1).map(|t| &t.value),
            Some(&Token::Ident("User".into()))
        );
        assert!(stream.peek_nth(2).is_none());
    }

    #[test]
    fn next_tracks_last_span() {
        let mut stream = TokenStream::lex("class User").unwrap();
        stream.next();
        stream.next();
        assert_eq!(stream.last_span(), Some(Span::new(6, 10)));
        assert!(stream.is_empty());
    }

    #[test]
    fn forks_do_not_move_the_original() {
        let stream = TokenStream::lex("a b c").unwrap();
        let mut fork = stream.fork();
        fork.next();
        fork.next();
        assert_eq!(stream.cursor(), 0);
        assert_eq!(
            stream.peek_token().map(|t| &t.value),
            Some(&Token::Ident("a".into()))
        );
    }

    #[test]
    fn skip_group_balances_nested_delimiters() {
        let mut stream = TokenStream::lex("{ a { b } ( c ) } tail").unwrap();
        let span = stream.skip_group("block", false).unwrap();
        assert_eq!(stream.slice(span), "{ a { b } ( c ) }");
        assert_eq!(
            stream.peek_token().map(|t| &t.value),
            Some(&Token::Ident("tail".into()))
        );
    }

    #[test]
    fn skip_group_with_angles() {
        let mut stream = TokenStream::lex("<Dictionary<int, List<T>>> x").unwrap();
        stream.skip_group("type arguments", true).unwrap();
        assert_eq!(
            stream.peek_token().map(|t| &t.value),
            Some(&Token::Ident("x".into()))
        );
    }

    #[test]
    fn unterminated_group_is_reported_at_the_opener() {
        let mut stream = TokenStream::lex("x { a").unwrap();
        stream.next();
        let err = stream.skip_group("block", false).unwrap_err();
        assert_eq!(err.span(), Some(Span::new(2, 3)));
    }

    #[test]
    fn skip_statement_stops_after_semicolon() {
        let mut stream = TokenStream::lex("= new() { A = 1 }; next").unwrap();
        stream.skip_statement().unwrap();
        assert_eq!(
            stream.peek_token().map(|t| &t.value),
            Some(&Token::Ident("next".into()))
        );
    }

    #[test]
    fn lex_errors_carry_a_span() {
        let err = TokenStream::lex("class `").unwrap_err();
        assert_eq!(err.span(), Some(Span::new(6, 7)));
    }
}
