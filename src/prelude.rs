//! Prelude module for convenient imports
//!
//! This module re-exports the types needed for the usual materialize, edit,
//! extract cycle. Import it to get the core functionality without naming
//! each module.
//!
//! # Example
//!
//! ```rust,no_run
//! use socs_blocks::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let phases = read_phases_file("path/to/rules.json")?;
//! let registry = BlockRegistry::default();
//!
//! let mut workspace = Workspace::new();
//! Materializer::new(&registry).materialize_phases(&phases, &mut workspace)?;
//!
//! let extraction = Extractor::new(&workspace, &registry).extract_phases();
//! for diagnostic in &extraction.diagnostics {
//!     println!("{}", diagnostic);
//! }
//! # Ok(())
//! # }
//! ```

// Translation
pub use crate::extractor::{Diagnostic, Extraction, Extractor, Severity};
pub use crate::materializer::{Insertion, Materializer};
pub use crate::scope::{Binding, ScopeResolver};

// Blocks and graphs
pub use crate::blocks::{BlockKind, BlockRegistry};
pub use crate::graph::{BlockGraph, NodeId, Workspace, WorkspaceTree};

// Program model
pub use crate::program::{
    Category, Expression, Phase, Phases, Statement, parse_phases, parse_statement,
    read_phases_file, read_statement_file,
};

// Error types
pub use crate::error::{ExtractError, GraphError, MaterializeError, ProgramError, ScopeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
