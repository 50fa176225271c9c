//! Project management: solution descriptors, workspace loading, and the
//! process-wide toolchain registration.

mod loader;
mod solution;
pub mod toolchain;

pub use loader::{LoadedSolution, SourceMap, load_solution};
pub use solution::{LoadError, ProjectDescriptor, Solution};
pub use toolchain::Toolchain;
