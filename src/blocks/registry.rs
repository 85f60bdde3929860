use super::catalogue::{BlockKind, BlockRole, field, register_default_blocks};
use crate::graph::{BlockGraph, NodeId};
use crate::program::Category;
use ahash::AHashMap;

/// The immutable table mapping toolkit tags to block kinds.
///
/// Built once and handed by reference to the materializer, the extractor and
/// the scope resolver. Nothing in the crate keeps a global copy.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    by_tag: AHashMap<String, BlockKind>,
}

pub struct BlockRegistryBuilder {
    by_tag: AHashMap<String, BlockKind>,
}

impl BlockRegistryBuilder {
    pub fn new() -> Self {
        let mut by_tag = AHashMap::new();
        register_default_blocks(&mut by_tag);
        Self { by_tag }
    }

    /// Makes `user_tag` read as the block whose canonical tag is `canonical_tag`.
    /// Unknown canonical tags are ignored.
    pub fn with_alias(mut self, user_tag: &str, canonical_tag: &str) -> Self {
        match BlockKind::from_tag(canonical_tag) {
            Some(kind) => {
                self.by_tag.insert(user_tag.to_string(), kind);
            }
            None => log::warn!(
                "Ignoring alias '{}': '{}' is not a known block",
                user_tag,
                canonical_tag
            ),
        }
        self
    }

    pub fn build(self) -> BlockRegistry {
        BlockRegistry {
            by_tag: self.by_tag,
        }
    }
}

impl Default for BlockRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockRegistry {
    pub fn builder() -> BlockRegistryBuilder {
        BlockRegistryBuilder::new()
    }

    pub fn kind(&self, tag: &str) -> Option<BlockKind> {
        self.by_tag.get(tag).copied()
    }

    /// The tag written into graphs for `kind`. Aliases are read-only, so this
    /// is always the canonical tag.
    pub fn tag(&self, kind: BlockKind) -> &'static str {
        kind.tag()
    }

    pub fn kind_of<G: BlockGraph + ?Sized>(&self, graph: &G, node: NodeId) -> Option<BlockKind> {
        graph.block_type(node).and_then(|tag| self.kind(tag))
    }

    /// The category a value node outputs, or `None` for unknown tags,
    /// statements and typed getters with an unreadable `TYPE` field.
    pub fn output_category<G: BlockGraph + ?Sized>(
        &self,
        graph: &G,
        node: NodeId,
    ) -> Option<Category> {
        match self.kind_of(graph, node)?.role() {
            BlockRole::Value(category) => Some(category),
            BlockRole::TypedValue => graph
                .field(node, field::TYPE)
                .and_then(Category::from_type_tag),
            _ => None,
        }
    }

    /// Number of registered tags, aliases included.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        BlockRegistryBuilder::new().build()
    }
}
