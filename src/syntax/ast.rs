//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.

use crate::parser::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn first_ident_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .find(|token| token.kind() == SyntaxKind::IDENT)
}

fn has_modifier(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|element| element.into_token())
        .any(|token| token.kind() == kind)
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

// ============================================================================
// Names
// ============================================================================

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// The name segments, in source order
    pub fn segments(&self) -> impl Iterator<Item = SyntaxToken> + use<> {
        self.0
            .children_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind() == SyntaxKind::IDENT)
    }

    /// The dotted name as written, trivia stripped
    pub fn text(&self) -> String {
        self.segments()
            .map(|token| token.text().to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

// ============================================================================
// Namespaces and type declarations
// ============================================================================

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    pub fn name(&self) -> Option<QualifiedName> {
        self.0.children().find_map(QualifiedName::cast)
    }
}

ast_node!(ClassDecl, CLASS_DECL);
ast_node!(InterfaceDecl, INTERFACE_DECL);

ast_node!(BaseList, BASE_LIST);
ast_node!(BaseType, BASE_TYPE);

impl BaseList {
    pub fn types(&self) -> impl Iterator<Item = BaseType> + use<> {
        self.0.children().filter_map(BaseType::cast)
    }
}

impl BaseType {
    pub fn name(&self) -> Option<QualifiedName> {
        self.0.children().find_map(QualifiedName::cast)
    }
}

/// A class or interface declaration.
///
/// This is the sum the declaration scanner yields when the caller does not
/// care which of the two keywords introduced the type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
}

impl AstNode for TypeDecl {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(kind, SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => ClassDecl::cast(node).map(Self::Class),
            SyntaxKind::INTERFACE_DECL => InterfaceDecl::cast(node).map(Self::Interface),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(class) => class.syntax(),
            Self::Interface(interface) => interface.syntax(),
        }
    }
}

impl TypeDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident_token(self.syntax())
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|token| token.text().to_string())
    }

    pub fn base_list(&self) -> Option<BaseList> {
        self.syntax().children().find_map(BaseList::cast)
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Self::Interface(_))
    }

    pub fn is_abstract(&self) -> bool {
        has_modifier(self.syntax(), SyntaxKind::ABSTRACT_KW)
    }

    pub fn is_static(&self) -> bool {
        has_modifier(self.syntax(), SyntaxKind::STATIC_KW)
    }

    pub fn is_sealed(&self) -> bool {
        has_modifier(self.syntax(), SyntaxKind::SEALED_KW)
    }

    pub fn is_partial(&self) -> bool {
        has_modifier(self.syntax(), SyntaxKind::PARTIAL_KW)
    }
}

impl ClassDecl {
    pub fn name(&self) -> Option<String> {
        first_ident_token(&self.0).map(|token| token.text().to_string())
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<String> {
        first_ident_token(&self.0).map(|token| token.text().to_string())
    }
}

// ============================================================================
// Members
// ============================================================================

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    /// The type as written, trivia stripped
    pub fn text(&self) -> String {
        let mut out = String::new();
        for element in self.0.children_with_tokens() {
            match element {
                rowan::NodeOrToken::Node(node) => {
                    if let Some(name) = QualifiedName::cast(node) {
                        out.push_str(&name.text());
                    }
                }
                rowan::NodeOrToken::Token(token) if !token.kind().is_trivia() => {
                    out.push_str(token.text());
                }
                _ => {}
            }
        }
        out
    }
}

ast_node!(FieldDecl, FIELD_DECL);

impl FieldDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident_token(&self.0)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|token| token.text().to_string())
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

ast_node!(MethodDecl, METHOD_DECL);

impl MethodDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident_token(&self.0)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|token| token.text().to_string())
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn param_list(&self) -> Option<ParamList> {
        self.0.children().find_map(ParamList::cast)
    }

    /// The executable body, if the declaration has one.
    ///
    /// Abstract, extern and interface methods end in `;` and return None.
    pub fn body(&self) -> Option<Block> {
        self.0.children().find_map(Block::cast)
    }

    pub fn is_abstract(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::ABSTRACT_KW)
    }

    pub fn is_extern(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::EXTERN_KW)
    }

    pub fn is_partial(&self) -> bool {
        has_modifier(&self.0, SyntaxKind::PARTIAL_KW)
    }
}

ast_node!(ParamList, PARAM_LIST);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + use<> {
        self.0.children().filter_map(Param::cast)
    }
}

ast_node!(Param, PARAM);

impl Param {
    pub fn ty(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }

    pub fn name(&self) -> Option<String> {
        first_ident_token(&self.0).map(|token| token.text().to_string())
    }
}

ast_node!(PropertyDecl, PROPERTY_DECL);

impl PropertyDecl {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        first_ident_token(&self.0)
    }

    pub fn name(&self) -> Option<String> {
        self.name_token().map(|token| token.text().to_string())
    }

    pub fn ty(&self) -> Option<TypeRef> {
        self.0.children().find_map(TypeRef::cast)
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(Block, BLOCK);

impl Block {
    /// Direct statements of this block (nested blocks count as one statement)
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + use<> {
        self.0.children().filter(|node| node.kind().is_statement())
    }

    pub fn statement_count(&self) -> usize {
        self.statements().count()
    }
}
