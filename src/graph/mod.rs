//! The block-graph capability surface and an in-memory workspace.
//!
//! The translator never owns graph nodes; it talks to whatever toolkit holds
//! them through [`BlockGraph`]. [`Workspace`] is a self-contained
//! implementation used by the CLI and the tests, and by hosts that keep the
//! graph outside a UI toolkit.

mod display;
mod workspace;

pub use display::WorkspaceTree;
pub use workspace::{BlockNode, InputLink, Workspace};

use crate::error::GraphError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node inside one graph. Handles are not meaningful across graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        NodeId(index as u32)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a node hangs off its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Attachment {
    /// Plugged into a named value socket.
    Value(String),
    /// First node of the chain held by a named statement input.
    Statement(String),
    /// Follows the parent in a statement chain.
    Next,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    pub node: NodeId,
    pub via: Attachment,
}

/// The primitives the translator needs from a visual-block toolkit.
///
/// Fields follow the toolkit convention of plain strings; `None` means the
/// field was never set. Connections must keep the parent relation a tree:
/// implementations reject a second parent and any cycle.
pub trait BlockGraph {
    fn create_node(&mut self, block_type: &str) -> NodeId;

    fn block_type(&self, node: NodeId) -> Option<&str>;

    fn field(&self, node: NodeId, name: &str) -> Option<&str>;

    fn set_field(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), GraphError>;

    /// The node held by a value socket or the first node of a statement input.
    fn input(&self, node: NodeId, name: &str) -> Option<NodeId>;

    fn connect_value(&mut self, parent: NodeId, input: &str, child: NodeId)
    -> Result<(), GraphError>;

    fn connect_statement(
        &mut self,
        parent: NodeId,
        input: &str,
        first: NodeId,
    ) -> Result<(), GraphError>;

    fn next(&self, node: NodeId) -> Option<NodeId>;

    fn previous(&self, node: NodeId) -> Option<NodeId>;

    /// The node `node` is attached to, through any kind of link.
    fn owner(&self, node: NodeId) -> Option<NodeId>;

    fn connect_next(&mut self, node: NodeId, next: NodeId) -> Result<(), GraphError>;

    fn all_nodes(&self) -> Vec<NodeId>;

    fn node_count(&self) -> usize {
        self.all_nodes().len()
    }

    /// The node owning the statement input whose chain contains `node`,
    /// walking through value sockets and previous links. `None` at top level.
    fn enclosing_node(&self, node: NodeId) -> Option<NodeId>;
}

/// Iterates a statement chain from `first` along next links.
pub fn chain<G: BlockGraph + ?Sized>(graph: &G, first: Option<NodeId>) -> ChainIter<'_, G> {
    ChainIter {
        graph,
        current: first,
    }
}

pub struct ChainIter<'a, G: ?Sized> {
    graph: &'a G,
    current: Option<NodeId>,
}

impl<G: BlockGraph + ?Sized> Iterator for ChainIter<'_, G> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.current?;
        self.current = self.graph.next(node);
        Some(node)
    }
}
