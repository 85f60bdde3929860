//! Program to graph.
//!
//! The materializer walks a [`Statement`] and creates one node per statement
//! or expression, writing scalars into fields, expressions into value
//! sockets and nested statements into statement inputs. Binder names are
//! only ever written into fields; no symbol table is kept.

mod expressions;

use crate::blocks::{BlockKind, BlockRegistry, choice_type_tag, field, input, option};
use crate::error::{GraphError, MaterializeError};
use crate::graph::{BlockGraph, NodeId};
use crate::program::{ChoiceAction, Expression, OfferCase, OfferChoice, Phases, Statement};

/// Where the first node of a materialized statement is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion<'a> {
    /// Left as a new root.
    Detached,
    /// On the next link of an existing node.
    After(NodeId),
    /// As the first node of a statement input.
    Input(NodeId, &'a str),
}

pub struct Materializer<'r> {
    registry: &'r BlockRegistry,
}

impl<'r> Materializer<'r> {
    pub fn new(registry: &'r BlockRegistry) -> Self {
        Self { registry }
    }

    /// Creates the nodes for `statement` and attaches them at `insertion`.
    ///
    /// `Empty` creates nothing. A `Block` becomes a chain in element order;
    /// the return value is the last node created, so callers can keep
    /// appending after it.
    pub fn materialize<G: BlockGraph + ?Sized>(
        &self,
        statement: &Statement,
        graph: &mut G,
        insertion: Insertion<'_>,
    ) -> Result<Option<NodeId>, MaterializeError> {
        if let Statement::Block(items) = statement {
            let mut insertion = insertion;
            let mut last = None;
            for item in items {
                if let Some(node) = self.materialize(item, graph, insertion)? {
                    last = Some(node);
                    insertion = Insertion::After(node);
                }
            }
            return Ok(last);
        }
        let Some(node) = self.statement_node(statement, graph)? else {
            return Ok(None);
        };
        self.attach(graph, node, insertion)?;
        Ok(Some(node))
    }

    /// Creates the nodes for a standalone expression and returns its root.
    pub fn materialize_expr<G: BlockGraph + ?Sized>(
        &self,
        expression: &Expression,
        graph: &mut G,
    ) -> Result<NodeId, MaterializeError> {
        match expression {
            Expression::Number(e) => self.number(e, graph),
            Expression::Boolean(e) => self.boolean(e, graph),
            Expression::Player(e) => self.player(e, graph),
            Expression::PlayerCollection(e) => self.player_collection(e, graph),
            Expression::Zone(e) => self.zone(e, graph),
            Expression::ZoneCollection(e) => self.zone_collection(e, graph),
            Expression::Card(e) => self.card(e, graph),
            Expression::CardCollection(e) => self.card_collection(e, graph),
            Expression::Rank(e) => self.rank(e, graph),
            Expression::Suit(e) => self.suit(e, graph),
        }
    }

    /// Creates one phase hat block per phase, in name order, each with its
    /// `evaluate` chain hung off the hat's next link. Returns the hat nodes.
    pub fn materialize_phases<G: BlockGraph + ?Sized>(
        &self,
        phases: &Phases,
        graph: &mut G,
    ) -> Result<Vec<NodeId>, MaterializeError> {
        let mut hats = Vec::with_capacity(phases.len());
        for (name, phase) in phases {
            let hat = self.create(graph, BlockKind::Phase);
            self.set(graph, hat, BlockKind::Phase, field::PHASE, name)?;
            self.materialize(&phase.evaluate, graph, Insertion::After(hat))?;
            hats.push(hat);
        }
        Ok(hats)
    }

    fn statement_node<G: BlockGraph + ?Sized>(
        &self,
        statement: &Statement,
        graph: &mut G,
    ) -> Result<Option<NodeId>, MaterializeError> {
        let node = match statement {
            Statement::Empty | Statement::Block(_) => return Ok(None),
            Statement::EnterPhase(name) => {
                let node = self.create(graph, BlockKind::EnterPhase);
                self.set(graph, node, BlockKind::EnterPhase, field::PHASE_NAME, name)?;
                node
            }
            Statement::SetNumber { name, value } => {
                let kind = BlockKind::SetNumber;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::NAME, name)?;
                let value = self.number(value, graph)?;
                self.plug(graph, node, kind, input::VALUE, value)?;
                node
            }
            Statement::Conditional {
                condition,
                go_true,
                go_false,
            } => {
                let kind = BlockKind::IfElse;
                let node = self.create(graph, kind);
                let condition = self.boolean(condition, graph)?;
                self.plug(graph, node, kind, input::CONDITION, condition)?;
                self.materialize(go_true, graph, Insertion::Input(node, input::GO_TRUE))?;
                self.materialize(go_false, graph, Insertion::Input(node, input::GO_FALSE))?;
                node
            }
            Statement::While { condition, body } => {
                let kind = BlockKind::While;
                let node = self.create(graph, kind);
                let condition = self.boolean(condition, graph)?;
                self.plug(graph, node, kind, input::CONDITION, condition)?;
                self.materialize(body, graph, Insertion::Input(node, input::DO))?;
                node
            }
            Statement::Shuffle(zones) => {
                let kind = BlockKind::Shuffle;
                let node = self.create(graph, kind);
                let zones = self.zone_collection(zones, graph)?;
                self.plug(graph, node, kind, input::ZONES, zones)?;
                node
            }
            Statement::GenerateCards { cards: _, dest } => {
                let kind = BlockKind::GenerateCards;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::CARDS, option::ALL_ALLOWED)?;
                let dest = self.zone(dest, graph)?;
                self.plug(graph, node, kind, input::DEST, dest)?;
                node
            }
            Statement::Deal {
                num_cards,
                source,
                dest,
            } => {
                let kind = BlockKind::DealCards;
                let node = self.create(graph, kind);
                let num_cards = self.number(num_cards, graph)?;
                self.plug(graph, node, kind, input::NUM_CARDS, num_cards)?;
                let source = self.zone(source, graph)?;
                self.plug(graph, node, kind, input::SOURCE, source)?;
                let dest = self.zone_collection(dest, graph)?;
                self.plug(graph, node, kind, input::DEST, dest)?;
                node
            }
            Statement::MoveCardsTo { source, dest } => {
                let kind = BlockKind::MoveCards;
                let node = self.create(graph, kind);
                let source = self.card_collection(source, graph)?;
                self.plug(graph, node, kind, input::SOURCE, source)?;
                let dest = self.zone(dest, graph)?;
                self.plug(graph, node, kind, input::DEST, dest)?;
                node
            }
            Statement::DeclareWinner(players) => {
                let kind = BlockKind::DeclareWinner;
                let node = self.create(graph, kind);
                let players = self.player_collection(players, graph)?;
                self.plug(graph, node, kind, input::PLAYER, players)?;
                node
            }
            Statement::AdvancePlayerState(amount) => {
                let kind = BlockKind::PlayerAdvance;
                let node = self.create(graph, kind);
                let amount = self.number(amount, graph)?;
                self.plug(graph, node, kind, input::ADVANCE, amount)?;
                node
            }
            Statement::Offer {
                offer_to,
                player_name,
                cases,
            } => {
                // An empty binder name has no block form; it reads back as `None`.
                let player_name = player_name.as_deref().filter(|n| !n.is_empty());
                let kind = match player_name {
                    Some(_) => BlockKind::Offer,
                    None => BlockKind::OfferDeclareless,
                };
                let node = self.create(graph, kind);
                if let Some(name) = player_name {
                    self.set(graph, node, kind, field::PLAYER_NAME, name)?;
                }
                let offer_to = self.player_collection(offer_to, graph)?;
                self.plug(graph, node, kind, input::OFFER_TO, offer_to)?;

                let mut case_nodes = Vec::with_capacity(cases.len());
                for case in cases {
                    case_nodes.push(self.offer_case(case, graph)?);
                }
                self.link_chain(graph, node, kind, input::CASES, &case_nodes)?;
                node
            }
        };
        Ok(Some(node))
    }

    fn offer_case<G: BlockGraph + ?Sized>(
        &self,
        case: &OfferCase,
        graph: &mut G,
    ) -> Result<NodeId, MaterializeError> {
        let kind = match case.condition {
            Some(_) => BlockKind::OfferCase,
            None => BlockKind::OfferCaseAny,
        };
        let node = self.create(graph, kind);
        self.set(graph, node, kind, field::PROMPT, &case.message)?;
        if let Some(condition) = &case.condition {
            let filter = self.boolean(condition, graph)?;
            self.plug(graph, node, kind, input::FILTER, filter)?;
        }

        let mut choice_nodes = Vec::with_capacity(case.choices.len());
        for choice in &case.choices {
            choice_nodes.push(self.offer_choice(choice, graph)?);
        }
        self.link_chain(graph, node, kind, input::OFFERS, &choice_nodes)?;
        self.materialize(&case.then, graph, Insertion::Input(node, input::ACTIONS))?;
        Ok(node)
    }

    fn offer_choice<G: BlockGraph + ?Sized>(
        &self,
        choice: &OfferChoice,
        graph: &mut G,
    ) -> Result<NodeId, MaterializeError> {
        match choice {
            OfferChoice::Selection { name, choice_type } => {
                let kind = BlockKind::ChoiceUnified;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::AS, name)?;
                self.set(graph, node, kind, field::CHOICE_TYPE, choice_type_tag(choice_type))?;
                let source = self.choice_source(choice_type, graph)?;
                self.plug(graph, node, kind, input::SOURCE, source)?;
                Ok(node)
            }
            OfferChoice::Action(ChoiceAction::MoveCards { from, to }) => {
                let kind = BlockKind::ChoiceMove;
                let node = self.create(graph, kind);
                let from = self.zone(from, graph)?;
                self.plug(graph, node, kind, input::SOURCE, from)?;
                let to = self.zone(to, graph)?;
                self.plug(graph, node, kind, input::DEST, to)?;
                Ok(node)
            }
        }
    }

    fn attach<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        node: NodeId,
        insertion: Insertion<'_>,
    ) -> Result<(), MaterializeError> {
        let result = match insertion {
            Insertion::Detached => Ok(()),
            Insertion::After(previous) => graph.connect_next(previous, node),
            Insertion::Input(parent, name) => graph.connect_statement(parent, name, node),
        };
        result.map_err(|source| connection_error(&*graph, node, source))
    }

    /// Hangs `nodes` as a chain under the statement input `name` of `parent`.
    fn link_chain<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        parent: NodeId,
        kind: BlockKind,
        name: &str,
        nodes: &[NodeId],
    ) -> Result<(), MaterializeError> {
        let Some((first, _)) = nodes.split_first() else {
            return Ok(());
        };
        graph
            .connect_statement(parent, name, *first)
            .map_err(|source| wiring_error(kind, parent, source))?;
        for pair in nodes.windows(2) {
            graph
                .connect_next(pair[0], pair[1])
                .map_err(|source| connection_error(&*graph, pair[0], source))?;
        }
        Ok(())
    }

    pub(crate) fn create<G: BlockGraph + ?Sized>(&self, graph: &mut G, kind: BlockKind) -> NodeId {
        let node = graph.create_node(self.registry.tag(kind));
        log::debug!("Created '{}' node {}", kind.tag(), node);
        node
    }

    pub(crate) fn set<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        node: NodeId,
        kind: BlockKind,
        name: &str,
        value: &str,
    ) -> Result<(), MaterializeError> {
        graph
            .set_field(node, name, value)
            .map_err(|source| wiring_error(kind, node, source))
    }

    pub(crate) fn plug<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        node: NodeId,
        kind: BlockKind,
        name: &str,
        child: NodeId,
    ) -> Result<(), MaterializeError> {
        graph
            .connect_value(node, name, child)
            .map_err(|source| wiring_error(kind, node, source))
    }
}

fn wiring_error(kind: BlockKind, node: NodeId, source: GraphError) -> MaterializeError {
    MaterializeError::Connection {
        block_type: kind.tag().to_string(),
        node,
        source,
    }
}

fn connection_error<G: BlockGraph + ?Sized>(
    graph: &G,
    node: NodeId,
    source: GraphError,
) -> MaterializeError {
    MaterializeError::Connection {
        block_type: graph.block_type(node).unwrap_or_default().to_string(),
        node,
        source,
    }
}
