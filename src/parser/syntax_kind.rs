//! Syntax kinds for the rowan-based CST.
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the C#-style surface language.

/// All syntax kinds (tokens and nodes).
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (namespaces, type declarations, members).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,   // identifier
    INTEGER, // 42
    DECIMAL, // 3.14
    STRING,  // "hello"
    CHAR,    // 'c'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    SEMICOLON, // ;
    COLON,     // :
    COMMA,     // ,
    DOT,       // .
    EQ,        // =
    EQ_EQ,     // ==
    BANG_EQ,   // !=
    LT,        // <
    GT,        // >
    LT_EQ,     // <=
    GT_EQ,     // >=
    PLUS,      // +
    MINUS,     // -
    STAR,      // *
    SLASH,     // /
    PERCENT,   // %
    BANG,      // !
    AMP,       // &
    AMP_AMP,   // &&
    PIPE,      // |
    PIPE_PIPE, // ||
    QUESTION,  // ?
    FAT_ARROW, // =>

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    NAMESPACE_KW,
    USING_KW,
    CLASS_KW,
    INTERFACE_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    INTERNAL_KW,
    STATIC_KW,
    ABSTRACT_KW,
    SEALED_KW,
    PARTIAL_KW,
    VIRTUAL_KW,
    OVERRIDE_KW,
    EXTERN_KW,
    READONLY_KW,
    VOID_KW,
    RETURN_KW,
    NEW_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    USING_DIRECTIVE,
    QUALIFIED_NAME,
    NAMESPACE_DECL,
    CLASS_DECL,
    INTERFACE_DECL,
    BASE_LIST,
    BASE_TYPE,
    TYPE_REF,
    FIELD_DECL,
    METHOD_DECL,
    PROPERTY_DECL,
    PARAM_LIST,
    PARAM,
    ACCESSOR_LIST,
    ACCESSOR,
    BLOCK,
    RETURN_STMT,
    EXPR_STMT,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::NAMESPACE_KW as u16) && (self as u16) <= (Self::NEW_KW as u16)
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::INTERNAL_KW
                | Self::STATIC_KW
                | Self::ABSTRACT_KW
                | Self::SEALED_KW
                | Self::PARTIAL_KW
                | Self::VIRTUAL_KW
                | Self::OVERRIDE_KW
                | Self::EXTERN_KW
                | Self::READONLY_KW
        )
    }

    /// Check if this kind is a statement node
    pub fn is_statement(self) -> bool {
        matches!(self, Self::BLOCK | Self::RETURN_STMT | Self::EXPR_STMT)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CsLanguage {}

impl rowan::Language for CsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<CsLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<CsLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<CsLanguage>;
