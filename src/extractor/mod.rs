//! Graph to program.
//!
//! Extraction is best effort. A node that cannot be read is dropped and
//! described by a [`Diagnostic`]; its siblings are still extracted. Only the
//! innermost failure is reported: an expression whose child was dropped
//! drops silently, up to the nearest statement, which then leaves its chain.
//!
//! The graph is only ever read.

mod diagnostics;
mod expressions;
mod statements;

pub use diagnostics::{Diagnostic, Extraction, PathSegment, Severity};

use crate::blocks::{BlockKind, BlockRegistry};
use crate::error::ExtractError;
use crate::graph::{BlockGraph, NodeId};
use crate::program::*;
use crate::scope::ScopeResolver;

pub struct Extractor<'g, G: ?Sized> {
    graph: &'g G,
    registry: &'g BlockRegistry,
    scopes: Option<ScopeResolver<'g, G>>,
}

pub struct ExtractorBuilder<'g, G: ?Sized> {
    graph: &'g G,
    registry: &'g BlockRegistry,
    check_scopes: bool,
    globals: Vec<(Category, String)>,
}

impl<'g, G: BlockGraph + ?Sized> ExtractorBuilder<'g, G> {
    pub fn new(graph: &'g G, registry: &'g BlockRegistry) -> Self {
        Self {
            graph,
            registry,
            check_scopes: false,
            globals: Vec::new(),
        }
    }

    /// Checks every extracted variable reference against the names in scope.
    /// Unresolved references are kept and reported as warnings.
    pub fn check_scopes(mut self, enabled: bool) -> Self {
        self.check_scopes = enabled;
        self
    }

    /// Adds a name visible everywhere when scopes are checked.
    pub fn with_global(mut self, category: Category, name: &str) -> Self {
        self.globals.push((category, name.to_string()));
        self
    }

    pub fn build(self) -> Extractor<'g, G> {
        let scopes = self.check_scopes.then(|| {
            self.globals.iter().fold(
                ScopeResolver::new(self.graph, self.registry),
                |resolver, (category, name)| resolver.with_global(*category, name),
            )
        });
        Extractor {
            graph: self.graph,
            registry: self.registry,
            scopes,
        }
    }
}

/// Declares one typed extraction entry point per expression category.
macro_rules! typed_extractors {
    ( $( ($fn_name:ident, $category:ident, $ty:ty) ),* $(,)? ) => {
        impl<'g, G: BlockGraph + ?Sized> Extractor<'g, G> {
            $(
                pub fn $fn_name(&self, node: NodeId) -> Extraction<Option<$ty>> {
                    self.extract_expr(node, Category::$category).map(|expr| match expr {
                        Some(Expression::$category(value)) => Some(value),
                        _ => None,
                    })
                }
            )*
        }
    };
}

typed_extractors! {
    (extract_number, Number, NumberExpression),
    (extract_boolean, Boolean, BooleanExpression),
    (extract_player, Player, PlayerExpression),
    (extract_player_collection, PlayerCollection, PlayerCollectionExpression),
    (extract_zone, Zone, ZoneExpression),
    (extract_zone_collection, ZoneCollection, ZoneCollectionExpression),
    (extract_card, Card, CardExpression),
    (extract_card_collection, CardCollection, CardCollectionExpression),
    (extract_rank, Rank, RankExpression),
    (extract_suit, Suit, SuitExpression),
}

impl<'g, G: BlockGraph + ?Sized> Extractor<'g, G> {
    /// An extractor without scope checking.
    pub fn new(graph: &'g G, registry: &'g BlockRegistry) -> Self {
        ExtractorBuilder::new(graph, registry).build()
    }

    pub fn builder(graph: &'g G, registry: &'g BlockRegistry) -> ExtractorBuilder<'g, G> {
        ExtractorBuilder::new(graph, registry)
    }

    /// Extracts the chain starting at `first`: no statements give `Empty`,
    /// one gives that statement and more give a `Block` in chain order.
    pub fn extract_statement_chain(&self, first: Option<NodeId>) -> Extraction<Statement> {
        self.run(|walk| walk.statement_chain(first))
    }

    /// Extracts a single statement node, ignoring what follows it.
    pub fn extract_statement(&self, node: NodeId) -> Extraction<Option<Statement>> {
        self.run(|walk| walk.statement(node))
    }

    /// Extracts the value rooted at `node` as an expression of `category`.
    /// A collection category also accepts its element, wrapped in `Single`.
    pub fn extract_expr(&self, node: NodeId, category: Category) -> Extraction<Option<Expression>> {
        self.run(|walk| walk.value(node, category))
    }

    /// Extracts every top-level phase hat block. Phases are keyed by their
    /// `PHASE` field; of two phases with the same name, the one created
    /// later is dropped.
    pub fn extract_phases(&self) -> Extraction<Phases> {
        self.run(|walk| walk.phases())
    }

    fn run<T>(&self, f: impl FnOnce(&mut Walk<'_, 'g, G>) -> T) -> Extraction<T> {
        let mut walk = Walk {
            extractor: self,
            graph: self.graph,
            registry: self.registry,
            limit: self.graph.node_count(),
            diagnostics: Vec::new(),
            path: Vec::new(),
        };
        let value = f(&mut walk);
        Extraction {
            value,
            diagnostics: walk.diagnostics,
        }
    }
}

/// State of one extraction pass.
struct Walk<'e, 'g, G: ?Sized> {
    extractor: &'e Extractor<'g, G>,
    graph: &'g G,
    registry: &'g BlockRegistry,
    /// Upper bound on chain lengths, so a foreign graph with a cyclic next
    /// relation cannot loop forever.
    limit: usize,
    diagnostics: Vec<Diagnostic>,
    path: Vec<PathSegment>,
}

impl<'g, G: BlockGraph + ?Sized> Walk<'_, 'g, G> {
    fn report(&mut self, node: NodeId, severity: Severity, error: ExtractError) {
        let diagnostic = Diagnostic {
            node,
            block_type: self.graph.block_type(node).unwrap_or_default().to_string(),
            path: self.path.clone(),
            severity,
            error,
        };
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Reports a failure that drops `node`. Always returns `None`.
    fn fail<T>(&mut self, node: NodeId, error: ExtractError) -> Option<T> {
        self.report(node, Severity::Error, error);
        None
    }

    /// Runs `f` with `parent.input` appended to the diagnostic path.
    fn within<T>(&mut self, parent: NodeId, input: &str, f: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push(PathSegment {
            node: parent,
            input: input.to_string(),
        });
        let result = f(self);
        self.path.pop();
        result
    }

    /// The input currently being read, for error messages.
    fn current_input(&self) -> String {
        self.path
            .last()
            .map(|segment| segment.input.clone())
            .unwrap_or_else(|| "value".to_string())
    }

    fn kind(&mut self, node: NodeId) -> Option<BlockKind> {
        match self.registry.kind_of(self.graph, node) {
            Some(kind) => Some(kind),
            None => {
                let tag = self.graph.block_type(node).unwrap_or_default().to_string();
                self.fail(node, ExtractError::UnknownBlockType(tag))
            }
        }
    }

    /// A field that must hold a non-empty value.
    fn required_field(&mut self, node: NodeId, name: &str) -> Option<String> {
        match self.graph.field(node, name) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => self.fail(
                node,
                ExtractError::MissingField {
                    field: name.to_string(),
                },
            ),
        }
    }

    /// A required field read through `parse`; unparsable values are reported.
    fn parsed_field<T>(
        &mut self,
        node: NodeId,
        name: &str,
        parse: impl FnOnce(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = self.required_field(node, name)?;
        match parse(raw.trim()) {
            Some(value) => Some(value),
            None => self.fail(
                node,
                ExtractError::InvalidField {
                    field: name.to_string(),
                    value: raw,
                },
            ),
        }
    }

    /// Checks `name` against the scope at `node` when scope checking is on.
    fn check_reference(&mut self, node: NodeId, category: Category, name: &str) {
        let extractor = self.extractor;
        let Some(scopes) = &extractor.scopes else {
            return;
        };
        match scopes.resolve_name(node, category, name) {
            Ok(Some(_)) => {}
            Ok(None) => self.report(
                node,
                Severity::Warning,
                ExtractError::UnresolvedVariable {
                    name: name.to_string(),
                    category,
                },
            ),
            Err(e) => self.report(node, Severity::Warning, e.into()),
        }
    }
}
