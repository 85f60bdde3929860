//! Variable visibility in a block graph.
//!
//! Two constructs bind names: an offer's `PLAYER_NAME` (a player) and the
//! selection choices of an offer case (typed by their `CHOICE_TYPE`). A name
//! is visible below the statement input that owns it and nowhere else, so
//! resolution walks outward through [`BlockGraph::enclosing_node`]. Closer
//! binders shadow outer ones with the same name. Global names come last.

use crate::blocks::{BlockKind, BlockRegistry, field, input, selection_categories};
use crate::error::ScopeError;
use crate::graph::{BlockGraph, NodeId, chain};
use crate::program::Category;
use ahash::AHashSet;

/// A name visible at some point of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub category: Category,
    /// The node that introduced the name. `None` for globals registered by
    /// the host.
    pub binder: Option<NodeId>,
}

pub struct ScopeResolver<'g, G: ?Sized> {
    graph: &'g G,
    registry: &'g BlockRegistry,
    globals: Vec<Binding>,
}

impl<'g, G: BlockGraph + ?Sized> ScopeResolver<'g, G> {
    /// Creates a resolver whose globals are the names of every
    /// `socs_set_number` block in the graph.
    pub fn new(graph: &'g G, registry: &'g BlockRegistry) -> Self {
        let globals = graph
            .all_nodes()
            .into_iter()
            .filter(|&node| registry.kind_of(graph, node) == Some(BlockKind::SetNumber))
            .filter_map(|node| {
                let name = graph.field(node, field::NAME).filter(|n| !n.is_empty())?;
                Some(Binding {
                    name: name.to_string(),
                    category: Category::Number,
                    binder: Some(node),
                })
            })
            .collect();
        Self {
            graph,
            registry,
            globals,
        }
    }

    /// Registers a name that is visible everywhere, such as a configured zone.
    pub fn with_global(mut self, category: Category, name: &str) -> Self {
        self.globals.push(Binding {
            name: name.to_string(),
            category,
            binder: None,
        });
        self
    }

    /// All names of `category` visible at `node`, closest binder first.
    /// Each name appears once.
    pub fn resolve_names(
        &self,
        node: NodeId,
        category: Category,
    ) -> Result<Vec<Binding>, ScopeError> {
        let limit = self.graph.node_count();
        let mut seen = AHashSet::new();
        let mut names = Vec::new();
        let mut push = |binding: Binding, names: &mut Vec<Binding>| {
            if seen.insert(binding.name.clone()) {
                names.push(binding);
            }
        };

        let mut steps = 0;
        let mut from = node;
        let mut cursor = self.graph.enclosing_node(node);
        while let Some(enclosing) = cursor {
            steps += 1;
            if steps > limit {
                return Err(ScopeError::EnclosureCycle { node, limit });
            }
            log::trace!("Scope walk from {} visits {}", node, enclosing);
            let member = self.chain_member(enclosing, from, limit);
            for binding in self.bindings_of(enclosing, member, category, limit) {
                push(binding, &mut names);
            }
            from = enclosing;
            cursor = self.graph.enclosing_node(enclosing);
        }

        for global in self.globals.iter().filter(|g| g.category == category) {
            push(global.clone(), &mut names);
        }
        Ok(names)
    }

    /// The binding `name` refers to at `node`, if any.
    pub fn resolve_name(
        &self,
        node: NodeId,
        category: Category,
        name: &str,
    ) -> Result<Option<Binding>, ScopeError> {
        Ok(self
            .resolve_names(node, category)?
            .into_iter()
            .find(|b| b.name == name))
    }

    /// The member of one of `enclosing`'s input chains that holds `from`,
    /// or the value child of `enclosing` that holds it.
    fn chain_member(&self, enclosing: NodeId, from: NodeId, limit: usize) -> Option<NodeId> {
        let mut cursor = from;
        for _ in 0..limit {
            let up = self.graph.owner(cursor)?;
            if up == enclosing || self.graph.previous(cursor) == Some(up) {
                return Some(cursor);
            }
            cursor = up;
        }
        None
    }

    /// Names of `category` introduced by `binder` for the statements it
    /// encloses. A choice does not see its own name, so `member` (the chain
    /// member the walk came from) contributes nothing.
    fn bindings_of(
        &self,
        binder: NodeId,
        member: Option<NodeId>,
        category: Category,
        limit: usize,
    ) -> Vec<Binding> {
        match self.registry.kind_of(self.graph, binder) {
            Some(BlockKind::Offer) if category == Category::Player => self
                .graph
                .field(binder, field::PLAYER_NAME)
                .filter(|name| !name.is_empty())
                .map(|name| Binding {
                    name: name.to_string(),
                    category,
                    binder: Some(binder),
                })
                .into_iter()
                .collect(),
            Some(BlockKind::OfferCase | BlockKind::OfferCaseAny) => {
                chain(self.graph, self.graph.input(binder, input::OFFERS))
                    .take(limit)
                    .filter(|&choice| {
                        Some(choice) != member
                            && self.registry.kind_of(self.graph, choice)
                                == Some(BlockKind::ChoiceUnified)
                    })
                    .filter_map(|choice| {
                        let name = self.graph.field(choice, field::AS).filter(|n| !n.is_empty())?;
                        let choice_type = self.graph.field(choice, field::CHOICE_TYPE)?;
                        let (bound, _) = selection_categories(choice_type)?;
                        (bound == category).then(|| Binding {
                            name: name.to_string(),
                            category,
                            binder: Some(choice),
                        })
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }
}
