//! Recursive descent parser for the C#-style surface language.
//!
//! Builds a rowan GreenNode tree from tokens. Supports error recovery and
//! produces a lossless CST: all trivia is kept in the tree.

use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse source text into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens);
    source_file(&mut parser);
    parser.finish()
}

/// Recovery set for namespace-level declarations
const DECL_RECOVERY: &[SyntaxKind] = &[
    SyntaxKind::NAMESPACE_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::INTERFACE_KW,
    SyntaxKind::R_BRACE,
];

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // === Token inspection ===

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    /// The next non-trivia kind at or after the current position
    fn next_non_trivia(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .map(|t| t.kind)
            .find(|k| !k.is_trivia())
    }

    // === Token consumption ===

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    // === Error handling ===

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(TextSize::new(0)));
        self.errors.push(SyntaxError::new(message, range));
    }

    fn error_recover(&mut self, message: impl Into<String>, recovery: &[SyntaxKind]) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        if !self.at_eof() && (self.at_any(recovery) || self.current_kind().is_modifier()) {
            // Already at a sync token; consume it so the caller makes progress.
            self.bump();
        } else {
            while !self.at_eof() && !self.at_any(recovery) && !self.current_kind().is_modifier() {
                self.bump();
            }
        }
        self.builder.finish_node();
    }

    // === Node building ===

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }
}

// =============================================================================
// Grammar
// =============================================================================

fn source_file(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::SOURCE_FILE);
    p.skip_trivia();
    while !p.at_eof() {
        if p.at(SyntaxKind::USING_KW) {
            using_directive(p);
        } else {
            namespace_member(p);
        }
        p.skip_trivia();
    }
    p.finish_node();
}

fn using_directive(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::USING_DIRECTIVE);
    p.bump(); // using
    p.skip_trivia();
    qualified_name(p);
    p.skip_trivia();
    p.expect(SyntaxKind::SEMICOLON);
    p.finish_node();
}

fn namespace_member(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::NAMESPACE_KW => namespace_decl(p),
        kind if kind == SyntaxKind::CLASS_KW
            || kind == SyntaxKind::INTERFACE_KW
            || kind.is_modifier() =>
        {
            type_decl(p)
        }
        _ => p.error_recover("expected namespace or type declaration", DECL_RECOVERY),
    }
}

fn namespace_decl(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::NAMESPACE_DECL);
    p.bump(); // namespace
    p.skip_trivia();
    qualified_name(p);
    p.skip_trivia();
    p.expect(SyntaxKind::L_BRACE);
    p.skip_trivia();
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        namespace_member(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// `IDENT ('.' IDENT)*`
fn qualified_name(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::QUALIFIED_NAME);
    p.expect(SyntaxKind::IDENT);
    while p.next_non_trivia() == Some(SyntaxKind::DOT) {
        p.skip_trivia();
        p.bump(); // .
        p.skip_trivia();
        p.expect(SyntaxKind::IDENT);
    }
    p.finish_node();
}

fn modifiers(p: &mut Parser<'_>) {
    while p.current_kind().is_modifier() {
        p.bump();
        p.skip_trivia();
    }
}

fn type_decl(p: &mut Parser<'_>) {
    // The node kind depends on the class/interface keyword that follows the
    // modifier run, so look ahead before opening the node.
    let mut idx = p.pos;
    while idx < p.tokens.len()
        && (p.tokens[idx].kind.is_trivia() || p.tokens[idx].kind.is_modifier())
    {
        idx += 1;
    }
    let node_kind = match p.tokens.get(idx).map(|t| t.kind) {
        Some(SyntaxKind::INTERFACE_KW) => SyntaxKind::INTERFACE_DECL,
        _ => SyntaxKind::CLASS_DECL,
    };

    p.start_node(node_kind);
    modifiers(p);
    if !p.eat(SyntaxKind::CLASS_KW) && !p.eat(SyntaxKind::INTERFACE_KW) {
        p.error("expected 'class' or 'interface'");
    }
    p.skip_trivia();
    p.expect(SyntaxKind::IDENT);
    p.skip_trivia();
    if p.at(SyntaxKind::COLON) {
        base_list(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::L_BRACE);
    p.skip_trivia();
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        member(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

fn base_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BASE_LIST);
    p.bump(); // :
    p.skip_trivia();
    base_type(p);
    p.skip_trivia();
    while p.at(SyntaxKind::COMMA) {
        p.bump();
        p.skip_trivia();
        base_type(p);
        p.skip_trivia();
    }
    p.finish_node();
}

fn base_type(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BASE_TYPE);
    qualified_name(p);
    p.finish_node();
}

/// `(void | qualified_name) ('[' ']')*`
fn type_ref(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::TYPE_REF);
    if !p.eat(SyntaxKind::VOID_KW) {
        qualified_name(p);
    }
    while p.at(SyntaxKind::L_BRACKET) {
        p.bump();
        p.expect(SyntaxKind::R_BRACKET);
    }
    p.finish_node();
}

fn member(p: &mut Parser<'_>) {
    // Nested types re-enter type_decl; everything else is typed-member shaped.
    let mut idx = p.pos;
    while idx < p.tokens.len()
        && (p.tokens[idx].kind.is_trivia() || p.tokens[idx].kind.is_modifier())
    {
        idx += 1;
    }
    match p.tokens.get(idx).map(|t| t.kind) {
        Some(SyntaxKind::CLASS_KW) | Some(SyntaxKind::INTERFACE_KW) => {
            type_decl(p);
            return;
        }
        Some(SyntaxKind::VOID_KW) | Some(SyntaxKind::IDENT) => {}
        _ => {
            p.error_recover("expected member declaration", DECL_RECOVERY);
            return;
        }
    }

    // Typed member: modifiers, return/field type, name, then the shape of
    // what follows decides field vs method vs property.
    let checkpoint = p.builder.checkpoint();
    modifiers(p);
    type_ref(p);
    p.skip_trivia();
    let name_ok = p.at(SyntaxKind::IDENT);
    if name_ok {
        p.bump();
    } else {
        p.error("expected member name");
    }
    p.skip_trivia();

    match p.current_kind() {
        SyntaxKind::L_PAREN => {
            p.builder
                .start_node_at(checkpoint, SyntaxKind::METHOD_DECL.into());
            param_list(p);
            p.skip_trivia();
            if p.at(SyntaxKind::L_BRACE) {
                block(p);
            } else {
                p.expect(SyntaxKind::SEMICOLON);
            }
            p.finish_node();
        }
        SyntaxKind::L_BRACE => {
            p.builder
                .start_node_at(checkpoint, SyntaxKind::PROPERTY_DECL.into());
            accessor_list(p);
            p.finish_node();
        }
        _ => {
            p.builder
                .start_node_at(checkpoint, SyntaxKind::FIELD_DECL.into());
            if p.at(SyntaxKind::EQ) {
                p.bump();
                p.skip_trivia();
                expression_tokens(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            p.finish_node();
        }
    }
}

fn param_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PARAM_LIST);
    p.bump(); // (
    p.skip_trivia();
    while !p.at_eof() && !p.at(SyntaxKind::R_PAREN) {
        param(p);
        p.skip_trivia();
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
        p.skip_trivia();
    }
    p.expect(SyntaxKind::R_PAREN);
    p.finish_node();
}

fn param(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::PARAM);
    type_ref(p);
    p.skip_trivia();
    p.expect(SyntaxKind::IDENT);
    p.finish_node();
}

fn accessor_list(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ACCESSOR_LIST);
    p.bump(); // {
    p.skip_trivia();
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        accessor(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

/// `('get' | 'set') (';' | block)` — get/set are contextual identifiers
fn accessor(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::ACCESSOR);
    if !p.eat(SyntaxKind::IDENT) {
        p.error_recover("expected accessor", &[SyntaxKind::R_BRACE]);
        p.finish_node();
        return;
    }
    p.skip_trivia();
    if p.at(SyntaxKind::L_BRACE) {
        block(p);
    } else {
        p.expect(SyntaxKind::SEMICOLON);
    }
    p.finish_node();
}

fn block(p: &mut Parser<'_>) {
    p.start_node(SyntaxKind::BLOCK);
    p.bump(); // {
    p.skip_trivia();
    while !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
        statement(p);
        p.skip_trivia();
    }
    p.expect(SyntaxKind::R_BRACE);
    p.finish_node();
}

fn statement(p: &mut Parser<'_>) {
    match p.current_kind() {
        SyntaxKind::L_BRACE => block(p),
        SyntaxKind::RETURN_KW => {
            p.start_node(SyntaxKind::RETURN_STMT);
            p.bump();
            p.skip_trivia();
            if !p.at(SyntaxKind::SEMICOLON) {
                expression_tokens(p);
            }
            p.expect(SyntaxKind::SEMICOLON);
            p.finish_node();
        }
        _ => {
            p.start_node(SyntaxKind::EXPR_STMT);
            let start = p.pos;
            expression_tokens(p);
            if !p.eat(SyntaxKind::SEMICOLON) {
                p.error("expected ';'");
                if p.pos == start && !p.at_eof() && !p.at(SyntaxKind::R_BRACE) {
                    p.bump();
                }
            }
            p.finish_node();
        }
    }
}

/// Consume an uninterpreted expression token run up to `;` (or `,`/`)`/`}` at
/// depth 0). Nested `()`, `[]` and `{}` are balanced, so initializers like
/// `new[] { 1, 2, 3 }` stay inside one run.
fn expression_tokens(p: &mut Parser<'_>) {
    let mut depth: i32 = 0;
    while let Some(token) = p.current() {
        match token.kind {
            SyntaxKind::SEMICOLON if depth == 0 => break,
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET => depth -= 1,
            SyntaxKind::R_BRACE => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
        if depth < 0 {
            break;
        }
        p.bump();
    }
}
