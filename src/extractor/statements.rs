use super::Walk;
use crate::blocks::{BlockKind, BlockRole, field, input, option, selection_categories};
use crate::error::ExtractError;
use crate::graph::{BlockGraph, NodeId, chain};
use crate::program::*;

impl<'g, G: BlockGraph + ?Sized> Walk<'_, 'g, G> {
    /// Extracts a chain, dropping the statements that fail.
    pub(super) fn statement_chain(&mut self, first: Option<NodeId>) -> Statement {
        let nodes: Vec<NodeId> = chain(self.graph, first).take(self.limit).collect();
        let statements = nodes
            .into_iter()
            .filter_map(|node| self.statement(node))
            .collect();
        Statement::from_chain(statements)
    }

    /// The chain held by a statement input. Unconnected inputs are `Empty`.
    fn statement_input(&mut self, parent: NodeId, name: &str) -> Statement {
        let first = self.graph.input(parent, name);
        self.within(parent, name, |walk| walk.statement_chain(first))
    }

    pub(super) fn statement(&mut self, node: NodeId) -> Option<Statement> {
        let kind = self.kind(node)?;
        match kind {
            BlockKind::EnterPhase => self
                .required_field(node, field::PHASE_NAME)
                .map(Statement::EnterPhase),
            BlockKind::SetNumber => {
                let name = self.required_field(node, field::NAME);
                let value = self.number(node, input::VALUE);
                Some(Statement::SetNumber {
                    name: name?,
                    value: value?,
                })
            }
            BlockKind::IfElse => {
                let condition = self.boolean(node, input::CONDITION);
                let go_true = self.statement_input(node, input::GO_TRUE);
                let go_false = self.statement_input(node, input::GO_FALSE);
                Some(Statement::Conditional {
                    condition: condition?,
                    go_true: Box::new(go_true),
                    go_false: Box::new(go_false),
                })
            }
            BlockKind::While => {
                let condition = self.boolean(node, input::CONDITION);
                let body = self.statement_input(node, input::DO);
                Some(Statement::While {
                    condition: condition?,
                    body: Box::new(body),
                })
            }
            BlockKind::Shuffle => self
                .zone_collection(node, input::ZONES)
                .map(Statement::Shuffle),
            BlockKind::GenerateCards => {
                let cards = self.card_set(node);
                let dest = self.zone(node, input::DEST);
                Some(Statement::GenerateCards {
                    cards: cards?,
                    dest: dest?,
                })
            }
            BlockKind::DealCards => {
                let num_cards = self.number(node, input::NUM_CARDS);
                let source = self.zone(node, input::SOURCE);
                let dest = self.zone_collection(node, input::DEST);
                Some(Statement::Deal {
                    num_cards: num_cards?,
                    source: source?,
                    dest: dest?,
                })
            }
            BlockKind::MoveCards => {
                let source = self.card_collection(node, input::SOURCE);
                let dest = self.zone(node, input::DEST);
                Some(Statement::MoveCardsTo {
                    source: source?,
                    dest: dest?,
                })
            }
            BlockKind::DeclareWinner => self
                .player_collection(node, input::PLAYER)
                .map(Statement::DeclareWinner),
            BlockKind::PlayerAdvance => self
                .number(node, input::ADVANCE)
                .map(Statement::AdvancePlayerState),
            BlockKind::Offer | BlockKind::OfferDeclareless => self.offer(node, kind),
            BlockKind::Phase
            | BlockKind::OfferCase
            | BlockKind::OfferCaseAny
            | BlockKind::ChoiceUnified
            | BlockKind::ChoiceMove => self.fail(
                node,
                ExtractError::MisplacedBlock {
                    block_type: kind.tag().to_string(),
                    expected: "a statement",
                },
            ),
            BlockKind::NumberLiteral
            | BlockKind::GetNumber
            | BlockKind::NumCards
            | BlockKind::BooleanLiteral
            | BlockKind::Compare
            | BlockKind::PlayerOfType
            | BlockKind::PlayerCurrent
            | BlockKind::PlayersAll
            | BlockKind::GetUnified
            | BlockKind::ZoneForPlayer
            | BlockKind::ZonesOfType
            | BlockKind::CardSelector
            | BlockKind::CardsMatchingSuit
            | BlockKind::CardsMatchingRank
            | BlockKind::RankFromCard
            | BlockKind::SuitFromCard
            | BlockKind::RankLiteral
            | BlockKind::SuitLiteral => self.fail(
                node,
                ExtractError::NotAStatement {
                    block_type: kind.tag().to_string(),
                },
            ),
        }
    }

    /// The `CARDS` dropdown of a generate block. Unset means all cards.
    fn card_set(&mut self, node: NodeId) -> Option<CardSetExpression> {
        match self.graph.field(node, field::CARDS) {
            None | Some("") | Some(option::ALL_ALLOWED) => Some(CardSetExpression::AllAllowed),
            Some(other) => self.fail(
                node,
                ExtractError::InvalidField {
                    field: field::CARDS.to_string(),
                    value: other.to_string(),
                },
            ),
        }
    }

    fn offer(&mut self, node: NodeId, kind: BlockKind) -> Option<Statement> {
        let player_name = match kind {
            BlockKind::Offer => self.required_field(node, field::PLAYER_NAME).map(Some),
            _ => Some(None),
        };
        let offer_to = self.player_collection(node, input::OFFER_TO);
        let cases = self.within(node, input::CASES, |walk| {
            let first = walk.graph.input(node, input::CASES);
            walk.chain_of(first, BlockRole::Case, "an offer case", Self::offer_case)
        });
        Some(Statement::Offer {
            offer_to: offer_to?,
            player_name: player_name?,
            cases,
        })
    }

    /// Extracts one offer case. A case-any block never has a condition; a
    /// plain case has one only when its `FILTER` is connected.
    fn offer_case(&mut self, node: NodeId, kind: BlockKind) -> Option<OfferCase> {
        let filtered =
            kind == BlockKind::OfferCase && self.graph.input(node, input::FILTER).is_some();
        let condition = if filtered {
            self.boolean(node, input::FILTER).map(Some)
        } else {
            Some(None)
        };
        let message = self
            .graph
            .field(node, field::PROMPT)
            .unwrap_or_default()
            .to_string();
        let choices = self.within(node, input::OFFERS, |walk| {
            let first = walk.graph.input(node, input::OFFERS);
            walk.chain_of(first, BlockRole::Choice, "an offer choice", Self::offer_choice)
        });
        let then = self.statement_input(node, input::ACTIONS);
        Some(OfferCase {
            condition: condition?,
            message,
            choices,
            then,
        })
    }

    fn offer_choice(&mut self, node: NodeId, kind: BlockKind) -> Option<OfferChoice> {
        if kind == BlockKind::ChoiceMove {
            let from = self.zone(node, input::SOURCE);
            let to = self.zone(node, input::DEST);
            return Some(OfferChoice::Action(ChoiceAction::MoveCards {
                from: from?,
                to: to?,
            }));
        }

        let name = self.required_field(node, field::AS);
        let categories = self.parsed_field(node, field::CHOICE_TYPE, selection_categories);
        let (bound, _) = categories?;
        let choice_type = match bound {
            Category::Player => self
                .player_collection(node, input::SOURCE)
                .map(ChoiceType::Player),
            Category::PlayerCollection => self
                .player_collection(node, input::SOURCE)
                .map(ChoiceType::PlayerSelection),
            Category::Card => self
                .card_collection(node, input::SOURCE)
                .map(ChoiceType::Card),
            _ => self
                .card_collection(node, input::SOURCE)
                .map(ChoiceType::CardSelection),
        };
        Some(OfferChoice::Selection {
            name: name?,
            choice_type: choice_type?,
        })
    }

    /// Extracts a chain whose nodes must all have `role`, dropping the rest.
    fn chain_of<T>(
        &mut self,
        first: Option<NodeId>,
        role: BlockRole,
        expected: &'static str,
        read: impl Fn(&mut Self, NodeId, BlockKind) -> Option<T>,
    ) -> Vec<T> {
        let nodes: Vec<NodeId> = chain(self.graph, first).take(self.limit).collect();
        let mut items = Vec::with_capacity(nodes.len());
        for node in nodes {
            let Some(kind) = self.kind(node) else {
                continue;
            };
            if kind.role() != role {
                self.fail::<()>(
                    node,
                    ExtractError::MisplacedBlock {
                        block_type: kind.tag().to_string(),
                        expected,
                    },
                );
                continue;
            }
            if let Some(item) = read(self, node, kind) {
                items.push(item);
            }
        }
        items
    }

    /// Extracts every phase hat block that sits at the top level.
    pub(super) fn phases(&mut self) -> Phases {
        let mut phases = Phases::new();
        for node in self.graph.all_nodes() {
            if self.registry.kind_of(self.graph, node) != Some(BlockKind::Phase) {
                continue;
            }
            // A nested hat is reported by whatever chain holds it.
            if self.graph.previous(node).is_some() || self.graph.enclosing_node(node).is_some() {
                continue;
            }
            let name = self.required_field(node, field::PHASE);
            let evaluate = self.statement_chain(self.graph.next(node));
            let Some(name) = name else {
                continue;
            };
            if phases.contains_key(&name) {
                self.fail::<()>(node, ExtractError::DuplicatePhase(name));
                continue;
            }
            log::debug!("Extracted phase '{}' from {}", name, node);
            phases.insert(name, Phase { evaluate });
        }
        phases
    }
}
