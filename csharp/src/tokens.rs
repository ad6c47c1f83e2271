//! C# tokens.
//!
//! Only the keywords the declaration parser branches on get their own
//! variant. Every other reserved word, every contextual keyword (`partial`,
//! `record`, `file`, `required`, `async`, `global`, `where`, ...) and every
//! predefined type name lexes as [`Token::Ident`].

use core::fmt;

use logos::Logos;
use reprgen_core::Modifier;

use crate::CsError;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(error = CsError)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// `#region`, `#if`, `#nullable`, ...
    #[regex(r"#[^\n]*", allow_greedy = true)]
    Directive,

    #[token("using")]
    Using,

    #[token("namespace")]
    Namespace,

    #[token("class")]
    Class,

    #[token("struct")]
    Struct,

    #[token("interface")]
    Interface,

    #[token("enum")]
    Enum,

    #[token("delegate")]
    Delegate,

    #[token("event")]
    Event,

    #[token("operator")]
    Operator,

    #[token("implicit")]
    Implicit,

    #[token("explicit")]
    Explicit,

    #[token("this")]
    This,

    /// Reserved-word modifiers.
    #[token("public", |_| Modifier::Public)]
    #[token("private", |_| Modifier::Private)]
    #[token("protected", |_| Modifier::Protected)]
    #[token("internal", |_| Modifier::Internal)]
    #[token("static", |_| Modifier::Static)]
    #[token("sealed", |_| Modifier::Sealed)]
    #[token("abstract", |_| Modifier::Abstract)]
    #[token("readonly", |_| Modifier::Readonly)]
    #[token("ref", |_| Modifier::Ref)]
    #[token("unsafe", |_| Modifier::Unsafe)]
    #[token("new", |_| Modifier::New)]
    #[token("virtual", |_| Modifier::Virtual)]
    #[token("override", |_| Modifier::Override)]
    #[token("extern", |_| Modifier::Extern)]
    #[token("volatile", |_| Modifier::Volatile)]
    #[token("const", |_| Modifier::Const)]
    Modifier(Modifier),

    /// Identifier as written, `@` included.
    #[regex(r"@?[\p{XID_Start}_][\p{XID_Continue}]*", |lex| lex.slice().to_owned())]
    Ident(String),

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"@"([^"]|"")*""#)]
    #[regex(r#"\$"([^"\\\n]|\\.)*""#)]
    #[regex(r#"(\$@|@\$)"([^"]|"")*""#)]
    #[regex(r#"\$*"""([^"]|"[^"]|""[^"])*""""#)]
    Str,

    #[regex(r"'([^'\\\n]|\\.)+'")]
    Char,

    #[regex(r"[0-9][0-9A-Za-z_]*(\.[0-9][0-9A-Za-z_]*)?")]
    Number,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token(";")]
    Semi,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("::")]
    ColonColon,

    #[token(":")]
    Colon,

    #[token("=>")]
    FatArrow,

    #[token("=")]
    Eq,

    #[token("?")]
    Question,

    /// Any other operator character.
    #[regex(r"[+\-*/%&|\^!~]", |lex| lex.slice().chars().next())]
    Punct(char),
}

impl Token {
    /// Comments and directives, which the parser never sees.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::LineComment | Token::BlockComment | Token::Directive
        )
    }

    /// Identifier text when this is an identifier.
    pub fn ident(&self) -> Option<&str> {
        match self {
            Token::Ident(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_ident(&self, text: &str) -> bool {
        self.ident() == Some(text)
    }

    /// Opening delimiter of a balanced group.
    pub fn opens(&self) -> bool {
        matches!(self, Token::LBrace | Token::LParen | Token::LBracket)
    }

    /// Closing delimiter of a balanced group.
    pub fn closes(&self) -> bool {
        matches!(self, Token::RBrace | Token::RParen | Token::RBracket)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Token::Ident(name) => return write!(f, "identifier `{name}`"),
            Token::Modifier(modifier) => return write!(f, "`{modifier}`"),
            Token::Punct(c) => return write!(f, "`{c}`"),
            Token::LineComment | Token::BlockComment => "comment",
            Token::Directive => "preprocessor directive",
            Token::Str => "string literal",
            Token::Char => "character literal",
            Token::Number => "number",
            Token::Using => "`using`",
            Token::Namespace => "`namespace`",
            Token::Class => "`class`",
            Token::Struct => "`struct`",
            Token::Interface => "`interface`",
            Token::Enum => "`enum`",
            Token::Delegate => "`delegate`",
            Token::Event => "`event`",
            Token::Operator => "`operator`",
            Token::Implicit => "`implicit`",
            Token::Explicit => "`explicit`",
            Token::This => "`this`",
            Token::LBrace => "`{`",
            Token::RBrace => "`}`",
            Token::LParen => "`(`",
            Token::RParen => "`)`",
            Token::LBracket => "`[`",
            Token::RBracket => "`]`",
            Token::Lt => "`<`",
            Token::Gt => "`>`",
            Token::Semi => "`;`",
            Token::Comma => "`,`",
            Token::Dot => "`.`",
            Token::ColonColon => "`::`",
            Token::Colon => "`:`",
            Token::FatArrow => "`=>`",
            Token::Eq => "`=`",
            Token::Question => "`?`",
        };
        f.write_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect()
    }

    #[test_case::test_case("class", Token::Class; "keyword")]
    #[test_case::test_case("classy", Token::Ident("classy".into()); "keyword prefix")]
    #[test_case::test_case("@class", Token::Ident("@class".into()); "verbatim identifier")]
    #[test_case::test_case("이름", Token::Ident("이름".into()); "hangul identifier")]
    #[test_case::test_case("Größe", Token::Ident("Größe".into()); "latin extended identifier")]
    #[test_case::test_case("_π2", Token::Ident("_π2".into()); "underscore start")]
    #[test_case::test_case("partial", Token::Ident("partial".into()); "contextual keyword")]
    #[test_case::test_case("sealed", Token::Modifier(Modifier::Sealed); "modifier")]
    #[test_case::test_case("::", Token::ColonColon; "alias qualifier")]
    #[test_case::test_case("=>", Token::FatArrow; "arrow")]
    #[test_case::test_case(r#"@"a""b""#, Token::Str; "verbatim string")]
    #[test_case::test_case(r#"$"{x}""#, Token::Str; "interpolated string")]
    #[test_case::test_case(r#""""raw "text" here""""#, Token::Str; "raw string")]
    #[test_case::test_case("'\\n'", Token::Char; "escaped char")]
    #[test_case::test_case("1.5f", Token::Number; "float")]
    #[test_case::test_case("%", Token::Punct('%'); "operator")]
    fn single_tokens(source: &str, expected: Token) {
        assert_eq!(lex(source), vec![expected]);
    }

    #[test]
    fn trivia_is_lexed_but_filtered() {
        let tokens: Vec<Token> = Token::lexer("#nullable enable\n// c\n/* b * */ x")
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Directive,
                Token::LineComment,
                Token::BlockComment,
                Token::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn unknown_character_is_an_error() {
        let result: Result<Vec<Token>, CsError> = Token::lexer("a ` b").collect();
        assert_eq!(result, Err(CsError::Lex));
    }

    #[test]
    fn display_names_the_token() {
        assert_eq!(Token::Ident("User".into()).to_string(), "identifier `User`");
        assert_eq!(Token::LBrace.to_string(), "`{`");
        assert_eq!(Token::Modifier(Modifier::Static).to_string(), "`static`");
    }
}
