use super::Materializer;
use crate::blocks::{BlockKind, field, input, option};
use crate::error::MaterializeError;
use crate::graph::{BlockGraph, NodeId};
use crate::program::*;

type NodeResult = Result<NodeId, MaterializeError>;

impl Materializer<'_> {
    pub(super) fn number<G: BlockGraph + ?Sized>(
        &self,
        expr: &NumberExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            NumberExpression::Literal(value) => {
                self.leaf(graph, BlockKind::NumberLiteral, field::NUM, &value.to_string())
            }
            NumberExpression::GetVariable(name) => {
                self.leaf(graph, BlockKind::GetNumber, field::VAR_NAME, name)
            }
            NumberExpression::CardsIn(cards) => {
                let kind = BlockKind::NumCards;
                let node = self.create(graph, kind);
                let cards = self.card_collection(cards, graph)?;
                self.plug(graph, node, kind, input::CARD_COLLECTION, cards)?;
                Ok(node)
            }
        }
    }

    pub(super) fn boolean<G: BlockGraph + ?Sized>(
        &self,
        expr: &BooleanExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            BooleanExpression::Literal(value) => {
                let value = if *value { option::TRUE } else { option::FALSE };
                self.leaf(graph, BlockKind::BooleanLiteral, field::BOOL, value)
            }
            BooleanExpression::Comparison { a, compared_to, b } => {
                let kind = BlockKind::Compare;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::OP, compared_to.code())?;
                let a = self.number(a, graph)?;
                self.plug(graph, node, kind, input::A, a)?;
                let b = self.number(b, graph)?;
                self.plug(graph, node, kind, input::B, b)?;
                Ok(node)
            }
            BooleanExpression::PlayerIsType { player, type_name } => {
                let kind = BlockKind::PlayerOfType;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::TYPE_NAME, type_name)?;
                let player = self.player(player, graph)?;
                self.plug(graph, node, kind, input::PLAYER, player)?;
                Ok(node)
            }
        }
    }

    pub(super) fn player<G: BlockGraph + ?Sized>(
        &self,
        expr: &PlayerExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            PlayerExpression::CurrentPlayer => Ok(self.create(graph, BlockKind::PlayerCurrent)),
            PlayerExpression::GetVariable(name) => self.variable(graph, Category::Player, name),
        }
    }

    pub(super) fn player_collection<G: BlockGraph + ?Sized>(
        &self,
        expr: &PlayerCollectionExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            PlayerCollectionExpression::AllPlayers => Ok(self.create(graph, BlockKind::PlayersAll)),
            PlayerCollectionExpression::Single(player) => self.player(player, graph),
            PlayerCollectionExpression::GetVariable(name) => {
                self.variable(graph, Category::PlayerCollection, name)
            }
        }
    }

    pub(super) fn zone<G: BlockGraph + ?Sized>(
        &self,
        expr: &ZoneExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            ZoneExpression::OwnedByPlayer { player, zone_name } => {
                let kind = BlockKind::ZoneForPlayer;
                let node = self.create(graph, kind);
                self.set(graph, node, kind, field::ZONE_NAME, zone_name)?;
                let player = self.player(player, graph)?;
                self.plug(graph, node, kind, input::PLAYER, player)?;
                Ok(node)
            }
            ZoneExpression::GetVariable(name) => self.variable(graph, Category::Zone, name),
        }
    }

    pub(super) fn zone_collection<G: BlockGraph + ?Sized>(
        &self,
        expr: &ZoneCollectionExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            ZoneCollectionExpression::Single(zone) => self.zone(zone, graph),
            ZoneCollectionExpression::OfType(zone_type) => {
                self.leaf(graph, BlockKind::ZonesOfType, field::ZONE_TYPE, zone_type)
            }
            ZoneCollectionExpression::GetVariable(name) => {
                self.variable(graph, Category::ZoneCollection, name)
            }
        }
    }

    pub(super) fn card<G: BlockGraph + ?Sized>(
        &self,
        expr: &CardExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            CardExpression::GetVariable(name) => self.variable(graph, Category::Card, name),
        }
    }

    pub(super) fn card_collection<G: BlockGraph + ?Sized>(
        &self,
        expr: &CardCollectionExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            CardCollectionExpression::Single(card) => self.card(card, graph),
            CardCollectionExpression::GetVariable(name) => {
                self.variable(graph, Category::CardCollection, name)
            }
            CardCollectionExpression::AllInZone(zone) => {
                self.selector(graph, option::SELECT_ALL, zone)
            }
            CardCollectionExpression::TopInZone(zone) => {
                self.selector(graph, option::SELECT_TOP, zone)
            }
            CardCollectionExpression::BottomInZone(zone) => {
                self.selector(graph, option::SELECT_BOTTOM, zone)
            }
            CardCollectionExpression::MatchingSuit { zone, suit } => {
                let kind = BlockKind::CardsMatchingSuit;
                let node = self.create(graph, kind);
                let zone = self.zone(zone, graph)?;
                self.plug(graph, node, kind, input::ZONE, zone)?;
                let suit = self.suit(suit, graph)?;
                self.plug(graph, node, kind, input::SUIT, suit)?;
                Ok(node)
            }
            CardCollectionExpression::MatchingRank { zone, rank } => {
                let kind = BlockKind::CardsMatchingRank;
                let node = self.create(graph, kind);
                let zone = self.zone(zone, graph)?;
                self.plug(graph, node, kind, input::ZONE, zone)?;
                let rank = self.rank(rank, graph)?;
                self.plug(graph, node, kind, input::RANK, rank)?;
                Ok(node)
            }
        }
    }

    pub(super) fn rank<G: BlockGraph + ?Sized>(
        &self,
        expr: &RankExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            RankExpression::Literal(rank) => {
                self.leaf(graph, BlockKind::RankLiteral, field::RANK, rank.name())
            }
            RankExpression::FromCard(card) => {
                let kind = BlockKind::RankFromCard;
                let node = self.create(graph, kind);
                let card = self.card(card, graph)?;
                self.plug(graph, node, kind, input::CARD, card)?;
                Ok(node)
            }
        }
    }

    pub(super) fn suit<G: BlockGraph + ?Sized>(
        &self,
        expr: &SuitExpression,
        graph: &mut G,
    ) -> NodeResult {
        match expr {
            SuitExpression::Literal(suit) => {
                self.leaf(graph, BlockKind::SuitLiteral, field::SUIT, suit.name())
            }
            SuitExpression::FromCard(card) => {
                let kind = BlockKind::SuitFromCard;
                let node = self.create(graph, kind);
                let card = self.card(card, graph)?;
                self.plug(graph, node, kind, input::CARD, card)?;
                Ok(node)
            }
        }
    }

    /// The `SOURCE` value of a selection choice.
    pub(super) fn choice_source<G: BlockGraph + ?Sized>(
        &self,
        choice_type: &ChoiceType,
        graph: &mut G,
    ) -> NodeResult {
        match choice_type {
            ChoiceType::Player(players) | ChoiceType::PlayerSelection(players) => {
                self.player_collection(players, graph)
            }
            ChoiceType::Card(cards) | ChoiceType::CardSelection(cards) => {
                self.card_collection(cards, graph)
            }
        }
    }

    /// A value block carrying a single field and no sockets.
    fn leaf<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        kind: BlockKind,
        name: &str,
        value: &str,
    ) -> NodeResult {
        let node = self.create(graph, kind);
        self.set(graph, node, kind, name, value)?;
        Ok(node)
    }

    /// A typed variable getter; its output category is stored in `TYPE`.
    fn variable<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        category: Category,
        name: &str,
    ) -> NodeResult {
        let kind = BlockKind::GetUnified;
        let node = self.create(graph, kind);
        self.set(graph, node, kind, field::TYPE, category.type_tag())?;
        self.set(graph, node, kind, field::VARIABLE, name)?;
        Ok(node)
    }

    fn selector<G: BlockGraph + ?Sized>(
        &self,
        graph: &mut G,
        selector: &str,
        zone: &ZoneExpression,
    ) -> NodeResult {
        let kind = BlockKind::CardSelector;
        let node = self.create(graph, kind);
        self.set(graph, node, kind, field::SELECTOR, selector)?;
        let zone = self.zone(zone, graph)?;
        self.plug(graph, node, kind, input::ZONE, zone)?;
        Ok(node)
    }
}
