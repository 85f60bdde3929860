use crate::graph::NodeId;
use crate::program::Category;
use thiserror::Error;

/// Errors raised by a block graph when a structural invariant would break.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} does not exist in this workspace")]
    UnknownNode(NodeId),

    #[error("Node {child} is already attached to node {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("Input '{input}' on node {node} is already connected")]
    InputOccupied { node: NodeId, input: String },

    #[error("Node {0} already has a next statement")]
    NextOccupied(NodeId),

    #[error("Attaching node {child} below node {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },
}

/// Errors that can occur while building a graph from a program.
///
/// A conforming program never produces these; they indicate a broken graph
/// implementation or a registry that lacks a canonical block.
#[derive(Error, Debug, Clone)]
pub enum MaterializeError {
    #[error("Failed to wire '{block_type}' node {node}: {source}")]
    Connection {
        block_type: String,
        node: NodeId,
        #[source]
        source: GraphError,
    },
}

/// Errors raised by the scope resolver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error(
        "Walking the enclosing nodes of {node} exceeded {limit} steps; the graph's parent relation is cyclic"
    )]
    EnclosureCycle { node: NodeId, limit: usize },
}

/// The four failure classes of extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticClass {
    SchemaMismatch,
    MissingRequiredInput,
    UnknownNodeType,
    UnresolvedReference,
}

/// A localized extraction failure. Carried inside a `Diagnostic`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Input '{input}' expects a {expected} but holds a {found}")]
    TypeMismatch {
        input: String,
        expected: Category,
        found: Category,
    },

    #[error("Input '{input}' holds '{block_type}', which produces no value")]
    NotAValue { input: String, block_type: String },

    #[error("'{block_type}' produces a value and cannot be used as a statement")]
    NotAStatement { block_type: String },

    #[error("'{block_type}' cannot appear here; expected {expected}")]
    MisplacedBlock {
        block_type: String,
        expected: &'static str,
    },

    #[error("Required input '{input}' is not connected")]
    MissingInput { input: String },

    #[error("Required field '{field}' is empty")]
    MissingField { field: String },

    #[error("Field '{field}' holds invalid value '{value}'")]
    InvalidField { field: String, value: String },

    #[error("Block type '{0}' has no program mapping")]
    UnknownBlockType(String),

    #[error("No {category} named '{name}' is in scope here")]
    UnresolvedVariable { name: String, category: Category },

    #[error("Phase '{0}' is defined more than once")]
    DuplicatePhase(String),

    #[error(transparent)]
    Scope(#[from] ScopeError),
}

impl ExtractError {
    pub fn class(&self) -> DiagnosticClass {
        match self {
            ExtractError::TypeMismatch { .. }
            | ExtractError::NotAValue { .. }
            | ExtractError::NotAStatement { .. }
            | ExtractError::MisplacedBlock { .. } => DiagnosticClass::SchemaMismatch,
            ExtractError::MissingInput { .. }
            | ExtractError::MissingField { .. }
            | ExtractError::InvalidField { .. }
            | ExtractError::DuplicatePhase(_) => DiagnosticClass::MissingRequiredInput,
            ExtractError::UnknownBlockType(_) => DiagnosticClass::UnknownNodeType,
            ExtractError::UnresolvedVariable { .. } | ExtractError::Scope(_) => {
                DiagnosticClass::UnresolvedReference
            }
        }
    }
}

/// Errors reading or writing programs in their JSON wire format.
#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Failed to parse program JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
