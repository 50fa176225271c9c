//! Lossless parser for the C#-style surface language.
//!
//! The pipeline is the rust-analyzer shape:
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//! ```

mod grammar;
mod lexer;
mod syntax_kind;

pub use grammar::{Parse, SyntaxError, parse};
pub use lexer::{Lexer, Token, tokenize};
pub use syntax_kind::{CsLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
