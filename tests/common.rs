//! Common test utilities for building programs and block graphs.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use socs_blocks::graph::BlockNode;
use socs_blocks::prelude::*;
use socs_blocks::program::*;

/// Materializes `statement` into a fresh workspace and returns the workspace
/// and the first node of the top-level chain.
#[allow(dead_code)]
pub fn materialize(statement: &Statement) -> (Workspace, Option<NodeId>) {
    let registry = BlockRegistry::default();
    let mut workspace = Workspace::new();
    Materializer::new(&registry)
        .materialize(statement, &mut workspace, Insertion::Detached)
        .expect("Materialization should not fail on a workspace");
    let first = workspace.roots().into_iter().next();
    (workspace, first)
}

/// Extracts the chain starting at `first` without scope checking.
#[allow(dead_code)]
pub fn extract(workspace: &Workspace, first: Option<NodeId>) -> Extraction<Statement> {
    let registry = BlockRegistry::default();
    Extractor::new(workspace, &registry).extract_statement_chain(first)
}

/// The first node with the given block tag, in creation order.
#[allow(dead_code)]
pub fn find_block(workspace: &Workspace, block_type: &str) -> NodeId {
    find_blocks(workspace, block_type)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("No '{}' block in workspace", block_type))
}

#[allow(dead_code)]
pub fn find_blocks(workspace: &Workspace, block_type: &str) -> Vec<NodeId> {
    workspace
        .all_nodes()
        .into_iter()
        .filter(|&id| workspace.block_type(id) == Some(block_type))
        .collect()
}

#[allow(dead_code)]
pub fn node<'a>(workspace: &'a Workspace, id: NodeId) -> &'a BlockNode {
    workspace.node(id).expect("Node should exist")
}

/// Creates a node with the given fields set.
#[allow(dead_code)]
pub fn block(workspace: &mut Workspace, block_type: &str, fields: &[(&str, &str)]) -> NodeId {
    let id = workspace.create_node(block_type);
    for (name, value) in fields {
        workspace
            .set_field(id, name, value)
            .expect("Setting a field on a fresh node should succeed");
    }
    id
}

#[allow(dead_code)]
pub fn zone_var(name: &str) -> ZoneExpression {
    ZoneExpression::GetVariable(name.to_string())
}

#[allow(dead_code)]
pub fn hand_of(player: PlayerExpression) -> ZoneExpression {
    ZoneExpression::OwnedByPlayer {
        player,
        zone_name: "hand".to_string(),
    }
}

/// A program touching every statement kind and every expression variant.
#[allow(dead_code)]
pub fn create_full_program() -> Statement {
    let player_p = || PlayerExpression::GetVariable("p".to_string());
    let card_c = || CardExpression::GetVariable("c".to_string());

    Statement::Block(vec![
        Statement::EnterPhase("deal".to_string()),
        Statement::SetNumber {
            name: "score".to_string(),
            value: NumberExpression::Literal(5),
        },
        Statement::GenerateCards {
            cards: CardSetExpression::AllAllowed,
            dest: zone_var("deck"),
        },
        Statement::Shuffle(ZoneCollectionExpression::Single(zone_var("deck"))),
        Statement::Shuffle(ZoneCollectionExpression::OfType("hand".to_string())),
        Statement::Deal {
            num_cards: NumberExpression::CardsIn(Box::new(CardCollectionExpression::AllInZone(
                hand_of(PlayerExpression::CurrentPlayer),
            ))),
            source: zone_var("deck"),
            dest: ZoneCollectionExpression::GetVariable("hands".to_string()),
        },
        Statement::Conditional {
            condition: BooleanExpression::Comparison {
                a: Box::new(NumberExpression::GetVariable("score".to_string())),
                compared_to: Comparison::Gte,
                b: Box::new(NumberExpression::Literal(10)),
            },
            go_true: Box::new(Statement::Block(vec![
                Statement::DeclareWinner(PlayerCollectionExpression::AllPlayers),
                Statement::AdvancePlayerState(NumberExpression::Literal(1)),
            ])),
            go_false: Box::new(Statement::Empty),
        },
        Statement::While {
            condition: BooleanExpression::PlayerIsType {
                player: PlayerExpression::CurrentPlayer,
                type_name: "human".to_string(),
            },
            body: Box::new(Statement::MoveCardsTo {
                source: CardCollectionExpression::TopInZone(zone_var("deck")),
                dest: hand_of(PlayerExpression::CurrentPlayer),
            }),
        },
        Statement::Offer {
            offer_to: PlayerCollectionExpression::Single(PlayerExpression::CurrentPlayer),
            player_name: Some("p".to_string()),
            cases: vec![
                OfferCase {
                    condition: Some(BooleanExpression::Literal(true)),
                    message: "Play a card".to_string(),
                    choices: vec![
                        OfferChoice::Selection {
                            name: "c".to_string(),
                            choice_type: ChoiceType::Card(CardCollectionExpression::AllInZone(
                                hand_of(player_p()),
                            )),
                        },
                        OfferChoice::Action(ChoiceAction::MoveCards {
                            from: zone_var("deck"),
                            to: hand_of(player_p()),
                        }),
                    ],
                    then: Statement::MoveCardsTo {
                        source: CardCollectionExpression::Single(card_c()),
                        dest: zone_var("pile"),
                    },
                },
                OfferCase {
                    condition: None,
                    message: "Pass".to_string(),
                    choices: vec![
                        OfferChoice::Selection {
                            name: "who".to_string(),
                            choice_type: ChoiceType::PlayerSelection(
                                PlayerCollectionExpression::AllPlayers,
                            ),
                        },
                        OfferChoice::Selection {
                            name: "q".to_string(),
                            choice_type: ChoiceType::Player(
                                PlayerCollectionExpression::GetVariable("everyone".to_string()),
                            ),
                        },
                        OfferChoice::Selection {
                            name: "hearts".to_string(),
                            choice_type: ChoiceType::CardSelection(
                                CardCollectionExpression::MatchingSuit {
                                    zone: hand_of(player_p()),
                                    suit: SuitExpression::Literal(Suit::Hearts),
                                },
                            ),
                        },
                    ],
                    then: Statement::Block(vec![
                        Statement::DeclareWinner(PlayerCollectionExpression::GetVariable(
                            "who".to_string(),
                        )),
                        Statement::MoveCardsTo {
                            source: CardCollectionExpression::GetVariable("hearts".to_string()),
                            dest: zone_var("pile"),
                        },
                    ]),
                },
            ],
        },
        Statement::Offer {
            offer_to: PlayerCollectionExpression::AllPlayers,
            player_name: None,
            cases: vec![],
        },
        Statement::MoveCardsTo {
            source: CardCollectionExpression::BottomInZone(zone_var("pile")),
            dest: zone_var("deck"),
        },
        Statement::MoveCardsTo {
            source: CardCollectionExpression::MatchingRank {
                zone: zone_var("pile"),
                rank: RankExpression::Literal(Rank::Ace),
            },
            dest: zone_var("deck"),
        },
        Statement::MoveCardsTo {
            source: CardCollectionExpression::MatchingRank {
                zone: zone_var("pile"),
                rank: RankExpression::FromCard(CardExpression::GetVariable("top".to_string())),
            },
            dest: zone_var("deck"),
        },
        Statement::MoveCardsTo {
            source: CardCollectionExpression::MatchingSuit {
                zone: zone_var("pile"),
                suit: SuitExpression::FromCard(CardExpression::GetVariable("top".to_string())),
            },
            dest: zone_var("deck"),
        },
        Statement::DeclareWinner(PlayerCollectionExpression::Single(
            PlayerExpression::GetVariable("winner".to_string()),
        )),
    ])
}

/// An offer binding player `p` whose only case also binds a card named `p`.
/// The case's `then` declares `p` the winner.
#[allow(dead_code)]
pub fn create_shadowing_offer() -> Statement {
    Statement::Offer {
        offer_to: PlayerCollectionExpression::AllPlayers,
        player_name: Some("p".to_string()),
        cases: vec![OfferCase {
            condition: None,
            message: "Pick".to_string(),
            choices: vec![OfferChoice::Selection {
                name: "p".to_string(),
                choice_type: ChoiceType::Card(CardCollectionExpression::AllInZone(zone_var(
                    "deck",
                ))),
            }],
            then: Statement::DeclareWinner(PlayerCollectionExpression::Single(
                PlayerExpression::GetVariable("p".to_string()),
            )),
        }],
    }
}

/// Generates random well-formed programs from a fixed seed.
#[allow(dead_code)]
pub struct ProgramGenerator {
    rng: StdRng,
}

const NAMES: [&str; 6] = ["score", "p", "deck", "hand", "pile", "round"];

#[allow(dead_code)]
impl ProgramGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn name(&mut self) -> String {
        NAMES[self.rng.random_range(0..NAMES.len())].to_string()
    }

    pub fn statement(&mut self, depth: u32) -> Statement {
        let max = if depth == 0 { 9 } else { 14 };
        match self.rng.random_range(0..max) {
            0 => Statement::EnterPhase(self.name()),
            1 => Statement::SetNumber {
                name: self.name(),
                value: self.number(),
            },
            2 => Statement::Shuffle(self.zone_collection()),
            3 => Statement::GenerateCards {
                cards: CardSetExpression::AllAllowed,
                dest: self.zone(),
            },
            4 => Statement::Deal {
                num_cards: self.number(),
                source: self.zone(),
                dest: self.zone_collection(),
            },
            5 => Statement::MoveCardsTo {
                source: self.card_collection(),
                dest: self.zone(),
            },
            6 => Statement::DeclareWinner(self.player_collection()),
            7 => Statement::AdvancePlayerState(self.number()),
            8 => Statement::Empty,
            9 => Statement::Conditional {
                condition: self.boolean(),
                go_true: Box::new(self.statement(depth - 1)),
                go_false: Box::new(self.statement(depth - 1)),
            },
            10 => Statement::While {
                condition: self.boolean(),
                body: Box::new(self.statement(depth - 1)),
            },
            11 => {
                let len = self.rng.random_range(0..4);
                Statement::Block((0..len).map(|_| self.statement(depth - 1)).collect())
            }
            _ => self.offer(depth),
        }
    }

    fn offer(&mut self, depth: u32) -> Statement {
        let player_name = self.rng.random_bool(0.5).then(|| self.name());
        let cases = (0..self.rng.random_range(0..3))
            .map(|_| OfferCase {
                condition: self.rng.random_bool(0.5).then(|| self.boolean()),
                message: if self.rng.random_bool(0.2) {
                    String::new()
                } else {
                    format!("Choose {}", self.name())
                },
                choices: (0..self.rng.random_range(0..3))
                    .map(|_| self.choice())
                    .collect(),
                then: self.statement(depth - 1),
            })
            .collect();
        Statement::Offer {
            offer_to: self.player_collection(),
            player_name,
            cases,
        }
    }

    fn choice(&mut self) -> OfferChoice {
        match self.rng.random_range(0..5) {
            0 => OfferChoice::Selection {
                name: self.name(),
                choice_type: ChoiceType::Player(self.player_collection()),
            },
            1 => OfferChoice::Selection {
                name: self.name(),
                choice_type: ChoiceType::PlayerSelection(self.player_collection()),
            },
            2 => OfferChoice::Selection {
                name: self.name(),
                choice_type: ChoiceType::Card(self.card_collection()),
            },
            3 => OfferChoice::Selection {
                name: self.name(),
                choice_type: ChoiceType::CardSelection(self.card_collection()),
            },
            _ => OfferChoice::Action(ChoiceAction::MoveCards {
                from: self.zone(),
                to: self.zone(),
            }),
        }
    }

    pub fn number(&mut self) -> NumberExpression {
        match self.rng.random_range(0..3) {
            0 => NumberExpression::Literal(self.rng.random_range(-1000..1000)),
            1 => NumberExpression::GetVariable(self.name()),
            _ => NumberExpression::CardsIn(Box::new(self.card_collection())),
        }
    }

    pub fn boolean(&mut self) -> BooleanExpression {
        match self.rng.random_range(0..3) {
            0 => BooleanExpression::Literal(self.rng.random_bool(0.5)),
            1 => {
                let ops = Comparison::all();
                BooleanExpression::Comparison {
                    a: Box::new(self.number()),
                    compared_to: ops[self.rng.random_range(0..ops.len())],
                    b: Box::new(self.number()),
                }
            }
            _ => BooleanExpression::PlayerIsType {
                player: self.player(),
                type_name: self.name(),
            },
        }
    }

    pub fn player(&mut self) -> PlayerExpression {
        if self.rng.random_bool(0.5) {
            PlayerExpression::CurrentPlayer
        } else {
            PlayerExpression::GetVariable(self.name())
        }
    }

    pub fn player_collection(&mut self) -> PlayerCollectionExpression {
        match self.rng.random_range(0..3) {
            0 => PlayerCollectionExpression::AllPlayers,
            1 => PlayerCollectionExpression::Single(self.player()),
            _ => PlayerCollectionExpression::GetVariable(self.name()),
        }
    }

    pub fn zone(&mut self) -> ZoneExpression {
        if self.rng.random_bool(0.5) {
            ZoneExpression::OwnedByPlayer {
                player: self.player(),
                zone_name: self.name(),
            }
        } else {
            ZoneExpression::GetVariable(self.name())
        }
    }

    pub fn zone_collection(&mut self) -> ZoneCollectionExpression {
        match self.rng.random_range(0..3) {
            0 => ZoneCollectionExpression::Single(self.zone()),
            1 => ZoneCollectionExpression::OfType(self.name()),
            _ => ZoneCollectionExpression::GetVariable(self.name()),
        }
    }

    pub fn card(&mut self) -> CardExpression {
        CardExpression::GetVariable(self.name())
    }

    pub fn card_collection(&mut self) -> CardCollectionExpression {
        match self.rng.random_range(0..7) {
            0 => CardCollectionExpression::Single(self.card()),
            1 => CardCollectionExpression::GetVariable(self.name()),
            2 => CardCollectionExpression::AllInZone(self.zone()),
            3 => CardCollectionExpression::TopInZone(self.zone()),
            4 => CardCollectionExpression::BottomInZone(self.zone()),
            5 => CardCollectionExpression::MatchingSuit {
                zone: self.zone(),
                suit: self.suit(),
            },
            _ => CardCollectionExpression::MatchingRank {
                zone: self.zone(),
                rank: self.rank(),
            },
        }
    }

    pub fn rank(&mut self) -> RankExpression {
        if self.rng.random_bool(0.5) {
            let ranks = Rank::all();
            RankExpression::Literal(ranks[self.rng.random_range(0..ranks.len())])
        } else {
            RankExpression::FromCard(self.card())
        }
    }

    pub fn suit(&mut self) -> SuitExpression {
        if self.rng.random_bool(0.5) {
            let suits = Suit::all();
            SuitExpression::Literal(suits[self.rng.random_range(0..suits.len())])
        } else {
            SuitExpression::FromCard(self.card())
        }
    }
}
