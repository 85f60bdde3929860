//! # socs-blocks - Card-Game Rules as Programs and as Blocks
//!
//! **socs-blocks** translates card-game rules between two representations: a
//! structured program (a tagged-union syntax tree with a stable JSON wire
//! format) and a graph of connected visual blocks as a block-editor toolkit
//! holds it. Translation is type-directed in both directions, and reading a
//! graph back never fails as a whole: malformed blocks are dropped and
//! described by diagnostics.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Program**: parse a [`program::Statement`] or a set of
//!     [`program::Phases`] from JSON.
//! 2.  **Materialize**: build blocks for it in any [`graph::BlockGraph`]
//!     (the bundled [`graph::Workspace`] or a host toolkit's graph) with a
//!     [`materializer::Materializer`].
//! 3.  **Edit**: the user rearranges the blocks.
//! 4.  **Extract**: read the graph back into a program with an
//!     [`extractor::Extractor`], optionally checking every variable reference
//!     against the names in scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use socs_blocks::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let program = parse_statement(r#"{"SetNumber": {"name": "score", "value": {"Literal": 5}}}"#)?;
//!
//!     // The registry maps block tags to kinds. Build it once and share it.
//!     let registry = BlockRegistry::default();
//!
//!     let mut workspace = Workspace::new();
//!     let root = Materializer::new(&registry)
//!         .materialize(&program, &mut workspace, Insertion::Detached)?;
//!     println!("{}", WorkspaceTree { workspace: &workspace });
//!
//!     let extraction = Extractor::builder(&workspace, &registry)
//!         .check_scopes(true)
//!         .build()
//!         .extract_statement_chain(root);
//!
//!     assert_eq!(extraction.value, program);
//!     assert!(extraction.is_clean());
//!     Ok(())
//! }
//! ```

pub mod blocks;
pub mod error;
pub mod extractor;
pub mod graph;
pub mod materializer;
pub mod prelude;
pub mod program;
pub mod scope;
