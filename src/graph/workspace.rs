use super::{Attachment, BlockGraph, NodeId, ParentLink};
use crate::error::GraphError;
use ahash::AHashMap;

/// A single block in a [`Workspace`].
#[derive(Debug, Clone)]
pub struct BlockNode {
    pub id: NodeId,
    pub block_type: String,
    pub fields: AHashMap<String, String>,
    /// Connected inputs in connection order.
    pub inputs: Vec<(String, InputLink)>,
    pub next: Option<NodeId>,
    pub parent: Option<ParentLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLink {
    pub target: NodeId,
    pub is_statement: bool,
}

/// An in-memory block graph.
///
/// Every connection is validated on insertion so the parent relation stays a
/// tree: a node has at most one parent, and no node can become its own
/// ancestor. Upward walks are therefore bounded by the tree depth.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    nodes: Vec<BlockNode>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&BlockNode> {
        self.nodes.get(id.index())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut BlockNode, GraphError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(GraphError::UnknownNode(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<&ParentLink> {
        self.node(id).and_then(|n| n.parent.as_ref())
    }

    /// Nodes with no parent, in creation order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| n.parent.is_none())
            .map(|n| n.id)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Detaches `id` (and everything below it) from its parent.
    /// Returns the link that was removed, if any.
    pub fn disconnect(&mut self, id: NodeId) -> Result<Option<ParentLink>, GraphError> {
        let Some(link) = self.node_mut(id)?.parent.take() else {
            return Ok(None);
        };
        let parent = self.node_mut(link.node)?;
        match &link.via {
            Attachment::Next => parent.next = None,
            Attachment::Value(name) | Attachment::Statement(name) => {
                parent.inputs.retain(|(input, _)| input != name);
            }
        }
        Ok(Some(link))
    }

    /// Checks that `child` may be attached below `parent`.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), GraphError> {
        let child_node = self.node(child).ok_or(GraphError::UnknownNode(child))?;
        if self.node(parent).is_none() {
            return Err(GraphError::UnknownNode(parent));
        }
        if let Some(link) = &child_node.parent {
            return Err(GraphError::AlreadyAttached {
                child,
                parent: link.node,
            });
        }
        // `child` is a root, so a cycle can only form if it is an ancestor of `parent`.
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(GraphError::WouldCycle { parent, child });
            }
            cursor = self.parent(current).map(|l| l.node);
        }
        Ok(())
    }

    fn attach_input(
        &mut self,
        parent: NodeId,
        input: &str,
        child: NodeId,
        is_statement: bool,
    ) -> Result<(), GraphError> {
        self.check_attach(parent, child)?;
        let parent_node = self.node_mut(parent)?;
        if parent_node.inputs.iter().any(|(name, _)| name == input) {
            return Err(GraphError::InputOccupied {
                node: parent,
                input: input.to_string(),
            });
        }
        parent_node.inputs.push((
            input.to_string(),
            InputLink {
                target: child,
                is_statement,
            },
        ));
        let via = if is_statement {
            Attachment::Statement(input.to_string())
        } else {
            Attachment::Value(input.to_string())
        };
        self.node_mut(child)?.parent = Some(ParentLink { node: parent, via });
        Ok(())
    }
}

impl BlockGraph for Workspace {
    fn create_node(&mut self, block_type: &str) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(BlockNode {
            id,
            block_type: block_type.to_string(),
            fields: AHashMap::new(),
            inputs: Vec::new(),
            next: None,
            parent: None,
        });
        id
    }

    fn block_type(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.block_type.as_str())
    }

    fn field(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|n| n.fields.get(name))
            .map(String::as_str)
    }

    fn set_field(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), GraphError> {
        self.node_mut(node)?
            .fields
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn input(&self, node: NodeId, name: &str) -> Option<NodeId> {
        self.node(node)?
            .inputs
            .iter()
            .find(|(input, _)| input == name)
            .map(|(_, link)| link.target)
    }

    fn connect_value(
        &mut self,
        parent: NodeId,
        input: &str,
        child: NodeId,
    ) -> Result<(), GraphError> {
        self.attach_input(parent, input, child, false)
    }

    fn connect_statement(
        &mut self,
        parent: NodeId,
        input: &str,
        first: NodeId,
    ) -> Result<(), GraphError> {
        self.attach_input(parent, input, first, true)
    }

    fn next(&self, node: NodeId) -> Option<NodeId> {
        self.node(node)?.next
    }

    fn previous(&self, node: NodeId) -> Option<NodeId> {
        match self.parent(node)? {
            ParentLink {
                node,
                via: Attachment::Next,
            } => Some(*node),
            _ => None,
        }
    }

    fn owner(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).map(|link| link.node)
    }

    fn connect_next(&mut self, node: NodeId, next: NodeId) -> Result<(), GraphError> {
        self.check_attach(node, next)?;
        let current = self.node_mut(node)?;
        if current.next.is_some() {
            return Err(GraphError::NextOccupied(node));
        }
        current.next = Some(next);
        self.node_mut(next)?.parent = Some(ParentLink {
            node,
            via: Attachment::Next,
        });
        Ok(())
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn enclosing_node(&self, node: NodeId) -> Option<NodeId> {
        let mut current = node;
        loop {
            let link = self.parent(current)?;
            match link.via {
                Attachment::Statement(_) => return Some(link.node),
                Attachment::Value(_) | Attachment::Next => current = link.node,
            }
        }
    }
}
