//! Typed syntax layer: AST wrappers over the rowan CST and the declaration
//! scanner that walks them.

pub mod ast;
pub mod declarations;

pub use ast::{
    AstNode, BaseList, BaseType, Block, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl,
    NamespaceDecl, Param, ParamList, PropertyDecl, QualifiedName, SourceFile, TypeDecl, TypeRef,
};
pub use declarations::{
    declarations, interface_declarations, namespace_declarations, type_declarations,
};
