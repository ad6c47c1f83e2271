//! Declaration parser.
//!
//! Recursive descent over the declaration level of C#: using directives,
//! namespaces, attribute lists, type declarations and member signatures.
//! Bodies, initializers, base lists and constraints are skipped as balanced
//! token groups; their contents never reach the syntax tree.

use reprgen_core::{
    Attribute, AttributeList, AttributeName, FieldDecl, Ident, Item, Member, MethodDecl,
    Modifier, NamespaceDecl, PropertyDecl, QualifiedName, Scope, ScopeId, Span, SyntaxTree,
    TypeDecl, TypeKeyword, UsingDirective,
};

use crate::CsError;
use crate::config::{ParseConfig, RecursionGuard};
use crate::stream::TokenStream;
use crate::tokens::Token;
use crate::traits::{Diagnostic, Parse, Peek};

/// Contextual keywords accepted as modifiers when followed by another word.
const CONTEXTUAL_MODIFIERS: [&str; 4] = ["partial", "file", "required", "async"];

/// Attribute targets that apply to the compilation rather than a type.
const COMPILATION_TARGETS: [&str; 2] = ["assembly", "module"];

impl Peek for Ident {
    fn is(token: &Token) -> bool {
        matches!(token, Token::Ident(_))
    }
}

impl Diagnostic for Ident {
    fn fmt() -> &'static str {
        "identifier"
    }
}

impl Parse for Ident {
    fn parse(stream: &mut TokenStream) -> Result<Self, CsError> {
        let Some(tok) = stream.peek_token() else {
            return Err(CsError::empty::<Self>());
        };
        match &tok.value {
            Token::Ident(name) => {
                let ident = Ident::new(name.clone(), tok.span);
                stream.next();
                Ok(ident)
            }
            other => Err(CsError::expected::<Self>(other).with_span(tok.span)),
        }
    }
}

impl Peek for QualifiedName {
    fn is(token: &Token) -> bool {
        Ident::is(token)
    }
}

impl Diagnostic for QualifiedName {
    fn fmt() -> &'static str {
        "qualified name"
    }
}

/// `A.B.C`, `global::A.B` or `alias::B`; generic arguments are skipped.
impl Parse for QualifiedName {
    fn parse(stream: &mut TokenStream) -> Result<Self, CsError> {
        if at_global_qualifier(stream) {
            stream.next();
            stream.next();
        }

        let mut segments = Vec::new();
        loop {
            let ident: Ident = stream.parse()?;
            segments.push(ident.unescaped().to_owned());
            if stream.peek::<GenericOpen>() {
                stream.skip_group("type arguments", true)?;
            }
            if at_qualifier(stream) {
                stream.next();
            } else {
                break;
            }
        }
        Ok(QualifiedName::from_segments(segments))
    }
}

impl Peek for AttributeList {
    fn is(token: &Token) -> bool {
        matches!(token, Token::LBracket)
    }
}

impl Diagnostic for AttributeList {
    fn fmt() -> &'static str {
        "attribute list"
    }
}

/// `[target: A, B(...), ]`
impl Parse for AttributeList {
    fn parse(stream: &mut TokenStream) -> Result<Self, CsError> {
        let open = stream.expect(&Token::LBracket, "`[`")?;

        let target = match (stream.peek_nth(0), stream.peek_nth(1)) {
            (Some(word), Some(colon)) if matches!(colon.value, Token::Colon) => {
                let text = match &word.value {
                    Token::Ident(name) => Some(name.clone()),
                    Token::Event => Some("event".to_owned()),
                    _ => None,
                };
                let span = word.span;
                text.map(|text| Ident::new(text, span))
            }
            _ => None,
        };
        if target.is_some() {
            stream.next();
            stream.next();
        }

        let mut attributes = Vec::new();
        loop {
            if stream.eat(&Token::RBracket) {
                break;
            }
            attributes.push(stream.parse::<Attribute>()?);
            if !stream.eat(&Token::Comma) {
                stream.expect(&Token::RBracket, "`]`")?;
                break;
            }
        }

        Ok(AttributeList {
            target,
            attributes,
            span: stream.span_from(open),
        })
    }
}

impl Diagnostic for Attribute {
    fn fmt() -> &'static str {
        "attribute"
    }
}

/// `Name`, `Ns.Name<T>(args)` or `global::Ns.Name`.
impl Parse for Attribute {
    fn parse(stream: &mut TokenStream) -> Result<Self, CsError> {
        let Some(start) = stream.cursor_span() else {
            return Err(CsError::empty::<Self>());
        };

        let global = at_global_qualifier(stream);
        if global {
            stream.next();
            stream.next();
        }

        let mut segments = Vec::new();
        loop {
            segments.push(stream.parse::<Ident>()?);
            if at_qualifier(stream) {
                stream.next();
            } else {
                break;
            }
        }
        if stream.peek::<GenericOpen>() {
            stream.skip_group("type arguments", true)?;
        }

        let arguments = if stream.peek_token().is_some_and(|t| t.value == Token::LParen) {
            let group = stream.skip_group("attribute arguments", false)?;
            let inner = Span::new(group.start + 1, group.end.saturating_sub(1));
            Some(stream.slice(inner).trim().to_owned())
        } else {
            None
        };

        Ok(Attribute {
            name: AttributeName { global, segments },
            arguments,
            span: stream.span_from(start),
        })
    }
}

/// `<` opening a generic argument or parameter list.
struct GenericOpen;

impl Peek for GenericOpen {
    fn is(token: &Token) -> bool {
        matches!(token, Token::Lt)
    }
}

fn at_global_qualifier(stream: &TokenStream) -> bool {
    stream.peek_nth(0).is_some_and(|t| t.value.is_ident("global"))
        && stream
            .peek_nth(1)
            .is_some_and(|t| t.value == Token::ColonColon)
}

/// `.` or `::` followed by an identifier.
fn at_qualifier(stream: &TokenStream) -> bool {
    stream
        .peek_nth(0)
        .is_some_and(|t| matches!(t.value, Token::Dot | Token::ColonColon))
        && stream.peek_nth(1).is_some_and(|t| Ident::is(&t.value))
}

/// Tokens that can follow a contextual modifier.
fn is_word(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident(_)
            | Token::Modifier(_)
            | Token::Class
            | Token::Struct
            | Token::Interface
            | Token::Enum
            | Token::Delegate
            | Token::Event
            | Token::Implicit
            | Token::Explicit
            | Token::LParen
    )
}

/// Parse one source into a [`SyntaxTree`].
pub fn parse_source(
    source_id: &str,
    text: &str,
    config: &ParseConfig,
) -> Result<SyntaxTree, CsError> {
    let stream = TokenStream::lex(text)?;
    log::debug!(source_id = source_id, tokens = stream.all().len(); "lexed source");

    let mut parser = Parser {
        stream,
        tree: SyntaxTree::new(source_id),
        config: *config,
        guard: RecursionGuard::new(),
    };
    let eof = Span::new(text.len(), text.len());
    let items = parser
        .namespace_body(ScopeId::ROOT, None)
        .map_err(|err| err.with_span(eof))?;
    parser.tree.items = items;
    Ok(parser.tree)
}

struct Parser {
    stream: TokenStream,
    tree: SyntaxTree,
    config: ParseConfig,
    guard: RecursionGuard,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.stream.peek_token().map(|t| &t.value)
    }

    fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.stream.peek_nth(n).map(|t| &t.value)
    }

    fn here(&self) -> Result<Span, CsError> {
        self.stream
            .cursor_span()
            .ok_or(CsError::Empty { expect: "declaration" })
    }

    /// Items of a namespace body, or of the compilation unit when `open` is
    /// `None`. A braced body ends at its `}`; others run to the end of input.
    fn namespace_body(&mut self, scope: ScopeId, open: Option<Span>) -> Result<Vec<Item>, CsError> {
        let mut items = Vec::new();
        let mut pending: Vec<AttributeList> = Vec::new();

        loop {
            let Some(tok) = self.stream.peek_token() else {
                if let Some(open) = open {
                    return Err(CsError::UnterminatedBlock { what: "namespace" }.with_span(open));
                }
                break;
            };
            let span = tok.span;

            match &tok.value {
                Token::RBrace if open.is_some() => {
                    self.stream.next();
                    break;
                }
                Token::Semi => {
                    self.stream.next();
                }
                Token::Using => {
                    if let Some(directive) = self.using_directive()? {
                        if let Some(target) = self.tree.scopes.get_mut(scope.0) {
                            target.usings.push(directive);
                        }
                    }
                }
                Token::Ident(word)
                    if word == "global" && self.peek_nth(1) == Some(&Token::Using) =>
                {
                    self.stream.next();
                    if let Some(directive) = self.using_directive()? {
                        self.tree.global_usings.push(directive);
                    }
                }
                Token::Modifier(Modifier::Extern)
                    if self.peek_nth(1).is_some_and(|t| t.is_ident("alias")) =>
                {
                    self.stream.skip_statement()?;
                }
                Token::LBracket => {
                    let list: AttributeList = self.stream.parse()?;
                    let applies_to_compilation = list
                        .target
                        .as_ref()
                        .is_some_and(|t| COMPILATION_TARGETS.contains(&t.text.as_str()));
                    if !applies_to_compilation {
                        pending.push(list);
                    }
                }
                Token::Namespace => {
                    pending.clear();
                    let namespace = self.namespace(scope)?;
                    items.push(Item::Namespace(namespace));
                }
                _ => {
                    let checkpoint = self.stream.cursor();
                    let modifiers = self.modifiers();
                    if self.type_keyword_ahead() {
                        let attributes = std::mem::take(&mut pending);
                        let start = attributes.first().map(|a| a.span).unwrap_or(span);
                        let decl = self.type_decl(attributes, modifiers, start, scope)?;
                        items.push(Item::Type(decl));
                    } else if self.peek() == Some(&Token::Delegate) {
                        pending.clear();
                        self.stream.skip_statement()?;
                    } else if scope == ScopeId::ROOT {
                        pending.clear();
                        self.stream.rewind(checkpoint);
                        self.top_level_statement()?;
                    } else {
                        let found = self.peek().map(ToString::to_string);
                        return Err(match found {
                            Some(found) => CsError::Expected {
                                expect: "namespace member",
                                found,
                            },
                            None => CsError::Empty {
                                expect: "namespace member",
                            },
                        }
                        .with_span(span));
                    }
                }
            }
        }

        Ok(items)
    }

    /// Skip one top-level statement: up to a `;`, or through a block.
    fn top_level_statement(&mut self) -> Result<(), CsError> {
        let start = self.here()?;
        loop {
            match self.peek() {
                None => break,
                Some(Token::Semi) => {
                    self.stream.next();
                    break;
                }
                Some(Token::RBrace) => {
                    return Err(CsError::Expected {
                        expect: "statement",
                        found: Token::RBrace.to_string(),
                    }
                    .with_span(self.here()?));
                }
                Some(Token::LBrace) => {
                    self.stream.skip_group("block", false)?;
                    break;
                }
                Some(token) if token.opens() => {
                    self.stream.skip_group("statement", false)?;
                }
                Some(_) => {
                    self.stream.next();
                }
            }
        }
        log::trace!(span:? = self.stream.span_from(start); "skipped top-level statement");
        Ok(())
    }

    /// `namespace A.B { ... }` or `namespace A.B;`
    ///
    /// Each level counts against [`ParseConfig::max_nesting_depth`] like a
    /// type declaration does.
    fn namespace(&mut self, parent: ScopeId) -> Result<NamespaceDecl, CsError> {
        let start = self.stream.expect(&Token::Namespace, "`namespace`")?;
        self.guard
            .enter(self.config.max_nesting_depth)
            .map_err(|err| err.with_span(start))?;
        let decl = self.namespace_inner(parent, start);
        self.guard.exit();
        decl
    }

    fn namespace_inner(&mut self, parent: ScopeId, start: Span) -> Result<NamespaceDecl, CsError> {
        let name: QualifiedName = self.stream.parse()?;

        let enclosing = self
            .tree
            .scope(parent)
            .map(|s| s.namespace.clone())
            .unwrap_or_default();
        let scope = self.tree.push_scope(Scope {
            parent: Some(parent),
            namespace: enclosing.join(&name),
            usings: Vec::new(),
        });

        let file_scoped = self.stream.eat(&Token::Semi);
        let items = if file_scoped {
            self.namespace_body(scope, None)?
        } else {
            let open = self.stream.expect(&Token::LBrace, "`{`")?;
            let items = self.namespace_body(scope, Some(open))?;
            self.stream.eat(&Token::Semi);
            items
        };

        Ok(NamespaceDecl {
            name,
            scope,
            file_scoped,
            items,
            span: self.stream.span_from(start),
        })
    }

    /// A `using` directive, or `None` for a using statement or an alias to
    /// something other than a name.
    fn using_directive(&mut self) -> Result<Option<UsingDirective>, CsError> {
        self.stream.expect(&Token::Using, "`using`")?;

        let statement = match (self.peek_nth(0), self.peek_nth(1)) {
            (Some(Token::LParen), _) => true,
            (Some(Token::Ident(_)), Some(Token::Ident(_))) => true,
            _ => false,
        };
        if statement {
            self.stream.skip_statement()?;
            return Ok(None);
        }

        if self.stream.eat(&Token::Modifier(Modifier::Static)) {
            let name: QualifiedName = self.stream.parse()?;
            self.stream.skip_statement()?;
            return Ok(Some(UsingDirective::Static(name)));
        }
        self.stream.eat(&Token::Modifier(Modifier::Unsafe));

        if self.peek_nth(1) == Some(&Token::Eq) {
            let alias: Ident = self.stream.parse()?;
            self.stream.next();
            let directive = if self.stream.peek::<QualifiedName>() {
                let target: QualifiedName = self.stream.parse()?;
                Some(UsingDirective::Alias {
                    alias: alias.unescaped().to_owned(),
                    target,
                })
            } else {
                None
            };
            self.stream.skip_statement()?;
            return Ok(directive);
        }

        let name: QualifiedName = self.stream.parse()?;
        self.stream.expect(&Token::Semi, "`;`")?;
        Ok(Some(UsingDirective::Namespace(name)))
    }

    fn modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        loop {
            match self.peek() {
                Some(Token::Modifier(modifier)) => {
                    modifiers.push(*modifier);
                    self.stream.next();
                }
                Some(Token::Ident(word))
                    if CONTEXTUAL_MODIFIERS.contains(&word.as_str())
                        && self.peek_nth(1).is_some_and(is_word) =>
                {
                    if let Some(modifier) = Modifier::from_keyword(word) {
                        modifiers.push(modifier);
                    }
                    self.stream.next();
                }
                _ => break,
            }
        }
        modifiers
    }

    fn type_keyword_ahead(&self) -> bool {
        match self.peek() {
            Some(Token::Class | Token::Struct | Token::Interface | Token::Enum) => true,
            Some(Token::Ident(word)) if word == "record" => matches!(
                self.peek_nth(1),
                Some(Token::Ident(_) | Token::Class | Token::Struct)
            ),
            _ => false,
        }
    }

    fn type_keyword(&mut self) -> Result<TypeKeyword, CsError> {
        let keyword = match self.peek() {
            Some(Token::Class) => TypeKeyword::Class,
            Some(Token::Struct) => TypeKeyword::Struct,
            Some(Token::Interface) => TypeKeyword::Interface,
            Some(Token::Enum) => TypeKeyword::Enum,
            Some(Token::Ident(word)) if word == "record" => {
                self.stream.next();
                if self.stream.eat(&Token::Struct) {
                    return Ok(TypeKeyword::RecordStruct);
                }
                self.stream.eat(&Token::Class);
                return Ok(TypeKeyword::Record);
            }
            Some(other) => {
                return Err(CsError::Expected {
                    expect: "type declaration",
                    found: other.to_string(),
                }
                .with_span(self.here()?));
            }
            None => {
                return Err(CsError::Empty {
                    expect: "type declaration",
                });
            }
        };
        self.stream.next();
        Ok(keyword)
    }

    /// A type declaration from its keyword on, attributes and modifiers
    /// already consumed.
    fn type_decl(
        &mut self,
        attributes: Vec<AttributeList>,
        modifiers: Vec<Modifier>,
        start: Span,
        scope: ScopeId,
    ) -> Result<TypeDecl, CsError> {
        self.guard
            .enter(self.config.max_nesting_depth)
            .map_err(|err| err.with_span(start))?;
        let decl = self.type_decl_inner(attributes, modifiers, start, scope);
        self.guard.exit();
        decl
    }

    fn type_decl_inner(
        &mut self,
        attributes: Vec<AttributeList>,
        modifiers: Vec<Modifier>,
        start: Span,
        scope: ScopeId,
    ) -> Result<TypeDecl, CsError> {
        let keyword = self.type_keyword()?;
        let name: Ident = self.stream.parse()?;
        let type_params = if self.stream.peek::<GenericOpen>() {
            self.type_params()?
        } else {
            Vec::new()
        };

        // primary constructor parameters, base list, constraints
        loop {
            match self.peek() {
                Some(Token::LBrace | Token::Semi) => break,
                Some(Token::Lt) => {
                    self.stream.skip_group("type arguments", true)?;
                }
                Some(token) if token.opens() => {
                    self.stream.skip_group("parameter list", false)?;
                }
                Some(other) if other.closes() => {
                    return Err(CsError::Expected {
                        expect: "type body",
                        found: other.to_string(),
                    }
                    .with_span(self.here()?));
                }
                Some(_) => {
                    self.stream.next();
                }
                None => return Err(CsError::Empty { expect: "type body" }),
            }
        }

        let members = if self.stream.eat(&Token::Semi) {
            Vec::new()
        } else if keyword == TypeKeyword::Enum {
            self.stream.skip_group("enum body", false)?;
            Vec::new()
        } else {
            let open = self.stream.expect(&Token::LBrace, "`{`")?;
            self.members(scope, open)?
        };
        self.stream.eat(&Token::Semi);

        Ok(TypeDecl {
            attributes,
            modifiers,
            keyword,
            name,
            type_params,
            scope,
            members,
            span: self.stream.span_from(start),
        })
    }

    /// `<T, in U, [A] out V>`
    fn type_params(&mut self) -> Result<Vec<Ident>, CsError> {
        self.stream.expect(&Token::Lt, "`<`")?;
        let mut params = Vec::new();
        loop {
            while self.stream.peek::<AttributeList>() {
                self.stream.skip_group("attribute list", false)?;
            }
            let variance = self
                .peek()
                .is_some_and(|t| t.is_ident("in") || t.is_ident("out"));
            if variance && self.peek_nth(1).is_some_and(Ident::is) {
                self.stream.next();
            }
            params.push(self.stream.parse::<Ident>()?);
            if !self.stream.eat(&Token::Comma) {
                self.stream.expect(&Token::Gt, "`>`")?;
                break;
            }
        }
        Ok(params)
    }

    fn members(&mut self, scope: ScopeId, open: Span) -> Result<Vec<Member>, CsError> {
        let mut members = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return Err(CsError::UnterminatedBlock { what: "type" }.with_span(open));
                }
                Some(Token::RBrace) => {
                    self.stream.next();
                    break;
                }
                Some(Token::Semi) => {
                    self.stream.next();
                }
                Some(_) => members.extend(self.member(scope)?),
            }
        }
        Ok(members)
    }

    /// One member declaration. Field declarations yield one member per
    /// declarator.
    fn member(&mut self, scope: ScopeId) -> Result<Vec<Member>, CsError> {
        let start = self.here()?;
        let mut attributes = Vec::new();
        while self.stream.peek::<AttributeList>() {
            attributes.push(self.stream.parse::<AttributeList>()?);
        }
        let modifiers = self.modifiers();

        if self.type_keyword_ahead() {
            let decl = self.type_decl(attributes, modifiers, start, scope)?;
            return Ok(vec![Member::Type(decl)]);
        }

        match self.peek() {
            Some(Token::Delegate | Token::Event | Token::Implicit | Token::Explicit)
            | Some(Token::Punct('~')) => return self.other_member(start),
            None => return Err(CsError::Empty { expect: "member" }),
            _ => {}
        }

        let ty_start = self.here()?;
        self.type_text()?;
        let ty = self.stream.slice(self.stream.span_from(ty_start)).to_owned();

        match self.peek() {
            // constructor
            Some(Token::LParen) => {
                self.stream.skip_group("parameter list", false)?;
                self.other_member(start)
            }
            // indexer or operator
            Some(Token::This | Token::Operator) => self.other_member(start),
            Some(Token::Ident(_)) => self.named_member(attributes, modifiers, ty, start),
            Some(other) => Err(CsError::Expected {
                expect: "member name",
                found: other.to_string(),
            }
            .with_span(self.here()?)),
            None => Err(CsError::Empty {
                expect: "member name",
            }),
        }
    }

    /// Property, method or field, type already consumed.
    fn named_member(
        &mut self,
        attributes: Vec<AttributeList>,
        modifiers: Vec<Modifier>,
        ty: String,
        start: Span,
    ) -> Result<Vec<Member>, CsError> {
        let name: Ident = self.stream.parse()?;

        // explicit interface implementation
        if self.peek() == Some(&Token::Dot) {
            return self.other_member(start);
        }

        if self.stream.peek::<GenericOpen>() {
            self.stream.skip_group("type parameters", true)?;
        }

        match self.peek() {
            Some(Token::LParen) => {
                let arity = self.arity()?;
                self.skip_member_rest()?;
                Ok(vec![Member::Method(MethodDecl {
                    modifiers,
                    name,
                    arity,
                    span: self.stream.span_from(start),
                })])
            }
            Some(Token::LBrace) => {
                self.stream.skip_group("accessor list", false)?;
                if self.stream.eat(&Token::Eq) {
                    self.stream.skip_statement()?;
                }
                Ok(vec![self.property(attributes, modifiers, ty, name, start)])
            }
            Some(Token::FatArrow) => {
                self.stream.skip_statement()?;
                Ok(vec![self.property(attributes, modifiers, ty, name, start)])
            }
            Some(Token::Eq | Token::Comma | Token::Semi) => self.fields(modifiers, ty, name, start),
            Some(other) => Err(CsError::Expected {
                expect: "member body",
                found: other.to_string(),
            }
            .with_span(self.here()?)),
            None => Err(CsError::Empty {
                expect: "member body",
            }),
        }
    }

    fn property(
        &self,
        attributes: Vec<AttributeList>,
        modifiers: Vec<Modifier>,
        ty: String,
        name: Ident,
        start: Span,
    ) -> Member {
        Member::Property(PropertyDecl {
            attributes,
            modifiers,
            ty,
            name,
            span: self.stream.span_from(start),
        })
    }

    /// `T a = 1, b, c = 2;`
    fn fields(
        &mut self,
        modifiers: Vec<Modifier>,
        ty: String,
        first: Ident,
        start: Span,
    ) -> Result<Vec<Member>, CsError> {
        let mut names = vec![first];
        loop {
            if self.stream.eat(&Token::Eq) {
                self.initializer()?;
            }
            if self.stream.eat(&Token::Comma) {
                names.push(self.stream.parse()?);
            } else {
                self.stream.expect(&Token::Semi, "`;`")?;
                break;
            }
        }

        let span = self.stream.span_from(start);
        Ok(names
            .into_iter()
            .map(|name| {
                Member::Field(FieldDecl {
                    modifiers: modifiers.clone(),
                    ty: ty.clone(),
                    name,
                    span,
                })
            })
            .collect())
    }

    /// Skip a field initializer, stopping before `,` or `;`.
    fn initializer(&mut self) -> Result<(), CsError> {
        loop {
            match self.peek() {
                None | Some(Token::Comma | Token::Semi) => return Ok(()),
                Some(token) if token.closes() => return Ok(()),
                Some(Token::Modifier(Modifier::New)) => {
                    self.stream.next();
                    if self.stream.peek::<Ident>() {
                        self.type_text()?;
                    }
                }
                Some(token) if token.opens() => {
                    self.stream.skip_group("initializer", false)?;
                }
                Some(_) => {
                    self.stream.next();
                }
            }
        }
    }

    /// Consume a type: a tuple, or a dotted name with generic arguments,
    /// followed by `?`, `*` and array ranks.
    fn type_text(&mut self) -> Result<(), CsError> {
        match self.peek() {
            Some(Token::LParen) => {
                self.stream.skip_group("tuple type", false)?;
            }
            Some(Token::Ident(_)) => {
                if at_global_qualifier(&self.stream) {
                    self.stream.next();
                    self.stream.next();
                }
                loop {
                    self.stream.parse::<Ident>()?;
                    if self.stream.peek::<GenericOpen>() {
                        self.stream.skip_group("type arguments", true)?;
                    }
                    if at_qualifier(&self.stream) {
                        self.stream.next();
                    } else {
                        break;
                    }
                }
            }
            Some(other) => {
                return Err(CsError::Expected {
                    expect: "type",
                    found: other.to_string(),
                }
                .with_span(self.here()?));
            }
            None => return Err(CsError::Empty { expect: "type" }),
        }

        loop {
            match self.peek() {
                Some(Token::Question | Token::Punct('*')) => {
                    self.stream.next();
                }
                Some(Token::LBracket)
                    if matches!(self.peek_nth(1), Some(Token::RBracket | Token::Comma)) =>
                {
                    self.stream.skip_group("array rank", false)?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Parameter count of the list at the cursor.
    fn arity(&mut self) -> Result<usize, CsError> {
        let open = self.stream.expect(&Token::LParen, "`(`")?;
        let mut depth = 1usize;
        let mut commas = 0usize;
        let mut any = false;
        loop {
            let Some(tok) = self.stream.next() else {
                return Err(CsError::UnterminatedBlock {
                    what: "parameter list",
                }
                .with_span(open));
            };
            match tok.value {
                ref value if value.opens() || *value == Token::Lt => depth += 1,
                ref value if value.closes() || *value == Token::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                Token::Comma if depth == 1 => commas += 1,
                _ => {}
            }
            any = true;
        }
        Ok(if any { commas + 1 } else { 0 })
    }

    /// Skip the remainder of a member: through `;`, a body block, or an
    /// expression body.
    fn skip_member_rest(&mut self) -> Result<(), CsError> {
        loop {
            match self.peek() {
                None | Some(Token::RBrace) => return Ok(()),
                Some(Token::Semi) => {
                    self.stream.next();
                    return Ok(());
                }
                Some(Token::LBrace) => {
                    self.stream.skip_group("body", false)?;
                    return Ok(());
                }
                Some(Token::FatArrow) => return self.stream.skip_statement(),
                Some(token) if token.opens() => {
                    self.stream.skip_group("member", false)?;
                }
                Some(_) => {
                    self.stream.next();
                }
            }
        }
    }

    fn other_member(&mut self, start: Span) -> Result<Vec<Member>, CsError> {
        self.skip_member_rest()?;
        Ok(vec![Member::Other(self.stream.span_from(start))])
    }
}
