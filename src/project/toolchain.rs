//! Process-wide host configuration with an explicit init-once lifecycle.
//!
//! The first [`Toolchain::get`] performs discovery and registers the result;
//! every later call returns the same instance. The workspace loader calls it
//! before any discovery, and callers may invoke it themselves to front-load
//! the registration.

use std::path::Path;

use once_cell::sync::OnceCell;

static TOOLCHAIN: OnceCell<Toolchain> = OnceCell::new();

/// Environment variable adding extra source extensions (comma separated)
const EXTRA_EXTENSIONS_VAR: &str = "SLNSCOPE_SOURCE_EXT";

/// Discovered host configuration
#[derive(Debug, Clone)]
pub struct Toolchain {
    source_extensions: Vec<String>,
}

impl Toolchain {
    /// The registered toolchain, discovering and registering it on first use
    pub fn get() -> &'static Toolchain {
        TOOLCHAIN.get_or_init(Self::discover)
    }

    fn discover() -> Self {
        let mut source_extensions = vec!["cs".to_string()];
        if let Ok(extra) = std::env::var(EXTRA_EXTENSIONS_VAR) {
            for ext in extra.split(',') {
                let ext = ext.trim().trim_start_matches('.');
                if !ext.is_empty() && !source_extensions.iter().any(|e| e == ext) {
                    source_extensions.push(ext.to_string());
                }
            }
        }
        tracing::info!(extensions = ?source_extensions, "toolchain registered");
        Self { source_extensions }
    }

    /// File extensions the loader treats as compilation units
    pub fn source_extensions(&self) -> &[String] {
        &self.source_extensions
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|e| e == ext))
    }
}
