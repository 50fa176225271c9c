//! Compile-time diagnostics and the fatal compilation error.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::{FileId, TextRange};

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents a valid compilation
    #[default]
    Error,
    /// A warning that doesn't prevent compilation
    Warning,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// A single compile-time finding tied to a source range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: FileId,
    pub range: TextRange,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn error(file: FileId, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            file,
            range,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// A project's sources did not produce a valid compiled unit.
///
/// Fatal: raised by `Compilation::compile` and aborts solution
/// initialization as a whole. Carries every error-severity diagnostic.
#[derive(Debug, Clone, Error)]
#[error("project '{project}' failed to compile: {}", summary(.diagnostics))]
pub struct CompilationFailure {
    pub project: SmolStr,
    pub diagnostics: Vec<Diagnostic>,
}

fn summary(diagnostics: &[Diagnostic]) -> String {
    match diagnostics.first() {
        Some(first) if diagnostics.len() == 1 => first.message.clone(),
        Some(first) => format!(
            "{} (and {} more)",
            first.message,
            diagnostics.len() - 1
        ),
        None => "unknown error".to_string(),
    }
}
