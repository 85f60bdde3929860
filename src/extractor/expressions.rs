use super::Walk;
use crate::blocks::{BlockKind, BlockRole, field, input, option};
use crate::error::ExtractError;
use crate::graph::{BlockGraph, NodeId};
use crate::program::*;

impl<'e, 'g, G: BlockGraph + ?Sized> Walk<'e, 'g, G> {
    /// Extracts the value at a root node as an expression of `expected`.
    pub(super) fn value(&mut self, node: NodeId, expected: Category) -> Option<Expression> {
        let (kind, found) = self.check_value(node, expected)?;
        match expected {
            Category::Number => self.number_at(node, kind, found).map(Expression::from),
            Category::Boolean => self.boolean_at(node, kind, found).map(Expression::from),
            Category::Player => self.player_at(node, kind, found).map(Expression::from),
            Category::PlayerCollection => self
                .player_collection_at(node, kind, found)
                .map(Expression::from),
            Category::Zone => self.zone_at(node, kind, found).map(Expression::from),
            Category::ZoneCollection => self
                .zone_collection_at(node, kind, found)
                .map(Expression::from),
            Category::Card => self.card_at(node, kind, found).map(Expression::from),
            Category::CardCollection => self
                .card_collection_at(node, kind, found)
                .map(Expression::from),
            Category::Rank => self.rank_at(node, kind, found).map(Expression::from),
            Category::Suit => self.suit_at(node, kind, found).map(Expression::from),
        }
    }

    pub(super) fn number(&mut self, parent: NodeId, name: &str) -> Option<NumberExpression> {
        self.socket(parent, name, Category::Number, Self::number_at)
    }

    pub(super) fn boolean(&mut self, parent: NodeId, name: &str) -> Option<BooleanExpression> {
        self.socket(parent, name, Category::Boolean, Self::boolean_at)
    }

    pub(super) fn player(&mut self, parent: NodeId, name: &str) -> Option<PlayerExpression> {
        self.socket(parent, name, Category::Player, Self::player_at)
    }

    pub(super) fn player_collection(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Option<PlayerCollectionExpression> {
        self.socket(
            parent,
            name,
            Category::PlayerCollection,
            Self::player_collection_at,
        )
    }

    pub(super) fn zone(&mut self, parent: NodeId, name: &str) -> Option<ZoneExpression> {
        self.socket(parent, name, Category::Zone, Self::zone_at)
    }

    pub(super) fn zone_collection(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Option<ZoneCollectionExpression> {
        self.socket(parent, name, Category::ZoneCollection, Self::zone_collection_at)
    }

    pub(super) fn card(&mut self, parent: NodeId, name: &str) -> Option<CardExpression> {
        self.socket(parent, name, Category::Card, Self::card_at)
    }

    pub(super) fn card_collection(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> Option<CardCollectionExpression> {
        self.socket(parent, name, Category::CardCollection, Self::card_collection_at)
    }

    pub(super) fn rank(&mut self, parent: NodeId, name: &str) -> Option<RankExpression> {
        self.socket(parent, name, Category::Rank, Self::rank_at)
    }

    pub(super) fn suit(&mut self, parent: NodeId, name: &str) -> Option<SuitExpression> {
        self.socket(parent, name, Category::Suit, Self::suit_at)
    }

    /// Reads the value plugged into a required socket. `read` is only called
    /// once the child is known to output a category `expected` accepts.
    fn socket<T>(
        &mut self,
        parent: NodeId,
        name: &str,
        expected: Category,
        read: impl FnOnce(&mut Self, NodeId, BlockKind, Category) -> Option<T>,
    ) -> Option<T> {
        let Some(child) = self.graph.input(parent, name) else {
            return self.fail(
                parent,
                ExtractError::MissingInput {
                    input: name.to_string(),
                },
            );
        };
        self.within(parent, name, |walk| {
            let (kind, found) = walk.check_value(child, expected)?;
            read(walk, child, kind, found)
        })
    }

    /// Checks that `node` is a known value block whose output `expected`
    /// accepts. Returns its kind and output category.
    fn check_value(&mut self, node: NodeId, expected: Category) -> Option<(BlockKind, Category)> {
        let kind = self.kind(node)?;
        let found = match kind.role() {
            BlockRole::Value(category) => category,
            BlockRole::TypedValue => self.variable_category(node)?,
            BlockRole::Hat | BlockRole::Statement | BlockRole::Case | BlockRole::Choice => {
                let error = ExtractError::NotAValue {
                    input: self.current_input(),
                    block_type: kind.tag().to_string(),
                };
                return self.fail(node, error);
            }
        };
        if !expected.accepts(found) {
            return self.type_mismatch(node, expected, found);
        }
        Some((kind, found))
    }

    /// The output category of a typed variable getter.
    fn variable_category(&mut self, node: NodeId) -> Option<Category> {
        let tag = self.required_field(node, field::TYPE)?;
        match Category::from_type_tag(&tag).filter(|c| c.has_variables()) {
            Some(category) => Some(category),
            None => self.fail(
                node,
                ExtractError::InvalidField {
                    field: field::TYPE.to_string(),
                    value: tag,
                },
            ),
        }
    }

    fn type_mismatch<T>(&mut self, node: NodeId, expected: Category, found: Category) -> Option<T> {
        let error = ExtractError::TypeMismatch {
            input: self.current_input(),
            expected,
            found,
        };
        self.fail(node, error)
    }

    /// The name held by a variable getter, checked against the scope.
    fn reference(&mut self, node: NodeId, name_field: &str, category: Category) -> Option<String> {
        let name = self.required_field(node, name_field)?;
        self.check_reference(node, category, &name);
        Some(name)
    }

    fn number_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<NumberExpression> {
        match kind {
            BlockKind::NumberLiteral => self
                .parsed_field(node, field::NUM, |raw| raw.parse::<i32>().ok())
                .map(NumberExpression::Literal),
            BlockKind::GetNumber => self
                .reference(node, field::VAR_NAME, Category::Number)
                .map(NumberExpression::GetVariable),
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::Number)
                .map(NumberExpression::GetVariable),
            BlockKind::NumCards => {
                let cards = self.card_collection(node, input::CARD_COLLECTION)?;
                Some(NumberExpression::CardsIn(Box::new(cards)))
            }
            _ => self.type_mismatch(node, Category::Number, found),
        }
    }

    fn boolean_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<BooleanExpression> {
        match kind {
            BlockKind::BooleanLiteral => self
                .parsed_field(node, field::BOOL, |raw| match raw {
                    option::TRUE => Some(true),
                    option::FALSE => Some(false),
                    _ => None,
                })
                .map(BooleanExpression::Literal),
            BlockKind::Compare => {
                let compared_to = self.parsed_field(node, field::OP, Comparison::from_code);
                let a = self.number(node, input::A);
                let b = self.number(node, input::B);
                Some(BooleanExpression::Comparison {
                    a: Box::new(a?),
                    compared_to: compared_to?,
                    b: Box::new(b?),
                })
            }
            BlockKind::PlayerOfType => {
                let type_name = self.required_field(node, field::TYPE_NAME);
                let player = self.player(node, input::PLAYER);
                Some(BooleanExpression::PlayerIsType {
                    player: player?,
                    type_name: type_name?,
                })
            }
            _ => self.type_mismatch(node, Category::Boolean, found),
        }
    }

    fn player_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<PlayerExpression> {
        match kind {
            BlockKind::PlayerCurrent => Some(PlayerExpression::CurrentPlayer),
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::Player)
                .map(PlayerExpression::GetVariable),
            _ => self.type_mismatch(node, Category::Player, found),
        }
    }

    fn player_collection_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<PlayerCollectionExpression> {
        if found == Category::Player {
            return self
                .player_at(node, kind, found)
                .map(PlayerCollectionExpression::Single);
        }
        match kind {
            BlockKind::PlayersAll => Some(PlayerCollectionExpression::AllPlayers),
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::PlayerCollection)
                .map(PlayerCollectionExpression::GetVariable),
            _ => self.type_mismatch(node, Category::PlayerCollection, found),
        }
    }

    fn zone_at(&mut self, node: NodeId, kind: BlockKind, found: Category) -> Option<ZoneExpression> {
        match kind {
            BlockKind::ZoneForPlayer => {
                let zone_name = self.required_field(node, field::ZONE_NAME);
                let player = self.player(node, input::PLAYER);
                Some(ZoneExpression::OwnedByPlayer {
                    player: player?,
                    zone_name: zone_name?,
                })
            }
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::Zone)
                .map(ZoneExpression::GetVariable),
            _ => self.type_mismatch(node, Category::Zone, found),
        }
    }

    fn zone_collection_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<ZoneCollectionExpression> {
        if found == Category::Zone {
            return self
                .zone_at(node, kind, found)
                .map(ZoneCollectionExpression::Single);
        }
        match kind {
            BlockKind::ZonesOfType => self
                .required_field(node, field::ZONE_TYPE)
                .map(ZoneCollectionExpression::OfType),
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::ZoneCollection)
                .map(ZoneCollectionExpression::GetVariable),
            _ => self.type_mismatch(node, Category::ZoneCollection, found),
        }
    }

    fn card_at(&mut self, node: NodeId, kind: BlockKind, found: Category) -> Option<CardExpression> {
        match kind {
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::Card)
                .map(CardExpression::GetVariable),
            _ => self.type_mismatch(node, Category::Card, found),
        }
    }

    fn card_collection_at(
        &mut self,
        node: NodeId,
        kind: BlockKind,
        found: Category,
    ) -> Option<CardCollectionExpression> {
        if found == Category::Card {
            return self
                .card_at(node, kind, found)
                .map(CardCollectionExpression::Single);
        }
        match kind {
            BlockKind::GetUnified => self
                .reference(node, field::VARIABLE, Category::CardCollection)
                .map(CardCollectionExpression::GetVariable),
            BlockKind::CardSelector => {
                let selector = self.parsed_field(node, field::SELECTOR, |raw| {
                    [option::SELECT_ALL, option::SELECT_TOP, option::SELECT_BOTTOM]
                        .into_iter()
                        .find(|s| *s == raw)
                });
                let zone = self.zone(node, input::ZONE);
                let zone = zone?;
                Some(match selector? {
                    option::SELECT_TOP => CardCollectionExpression::TopInZone(zone),
                    option::SELECT_BOTTOM => CardCollectionExpression::BottomInZone(zone),
                    _ => CardCollectionExpression::AllInZone(zone),
                })
            }
            BlockKind::CardsMatchingSuit => {
                let zone = self.zone(node, input::ZONE);
                let suit = self.suit(node, input::SUIT);
                Some(CardCollectionExpression::MatchingSuit {
                    zone: zone?,
                    suit: suit?,
                })
            }
            BlockKind::CardsMatchingRank => {
                let zone = self.zone(node, input::ZONE);
                let rank = self.rank(node, input::RANK);
                Some(CardCollectionExpression::MatchingRank {
                    zone: zone?,
                    rank: rank?,
                })
            }
            _ => self.type_mismatch(node, Category::CardCollection, found),
        }
    }

    fn rank_at(&mut self, node: NodeId, kind: BlockKind, found: Category) -> Option<RankExpression> {
        match kind {
            BlockKind::RankLiteral => self
                .parsed_field(node, field::RANK, |raw| raw.parse::<Rank>().ok())
                .map(RankExpression::Literal),
            BlockKind::RankFromCard => self.card(node, input::CARD).map(RankExpression::FromCard),
            _ => self.type_mismatch(node, Category::Rank, found),
        }
    }

    fn suit_at(&mut self, node: NodeId, kind: BlockKind, found: Category) -> Option<SuitExpression> {
        match kind {
            BlockKind::SuitLiteral => self
                .parsed_field(node, field::SUIT, |raw| raw.parse::<Suit>().ok())
                .map(SuitExpression::Literal),
            BlockKind::SuitFromCard => self.card(node, input::CARD).map(SuitExpression::FromCard),
            _ => self.type_mismatch(node, Category::Suit, found),
        }
    }
}
