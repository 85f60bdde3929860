use super::expression::*;
use serde::{Deserialize, Serialize};

/// A statement of the rule language.
///
/// The serde representation is the wire format shared with the rules engine:
/// unit variants are bare strings and data variants are single-key objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    EnterPhase(String),
    SetNumber {
        name: String,
        value: NumberExpression,
    },
    Conditional {
        condition: BooleanExpression,
        go_true: Box<Statement>,
        go_false: Box<Statement>,
    },
    While {
        condition: BooleanExpression,
        #[serde(rename = "do")]
        body: Box<Statement>,
    },
    Shuffle(ZoneCollectionExpression),
    GenerateCards {
        cards: CardSetExpression,
        dest: ZoneExpression,
    },
    Deal {
        num_cards: NumberExpression,
        source: ZoneExpression,
        dest: ZoneCollectionExpression,
    },
    MoveCardsTo {
        source: CardCollectionExpression,
        dest: ZoneExpression,
    },
    DeclareWinner(PlayerCollectionExpression),
    AdvancePlayerState(NumberExpression),
    Offer {
        offer_to: PlayerCollectionExpression,
        player_name: Option<String>,
        cases: Vec<OfferCase>,
    },
    Block(Vec<Statement>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferCase {
    pub condition: Option<BooleanExpression>,
    pub message: String,
    pub choices: Vec<OfferChoice>,
    pub then: Statement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferChoice {
    Selection { name: String, choice_type: ChoiceType },
    Action(ChoiceAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceAction {
    MoveCards { from: ZoneExpression, to: ZoneExpression },
}

/// What a selection choice picks from, and therefore what it binds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceType {
    Player(PlayerCollectionExpression),
    PlayerSelection(PlayerCollectionExpression),
    Card(CardCollectionExpression),
    CardSelection(CardCollectionExpression),
}

impl ChoiceType {
    /// The category of the name a selection of this type introduces.
    pub fn bound_category(&self) -> super::Category {
        use super::Category;
        match self {
            ChoiceType::Player(_) => Category::Player,
            ChoiceType::PlayerSelection(_) => Category::PlayerCollection,
            ChoiceType::Card(_) => Category::Card,
            ChoiceType::CardSelection(_) => Category::CardCollection,
        }
    }
}

impl Statement {
    /// Collapses a statement list by arity: none is `Empty`, one is itself,
    /// more is a `Block`.
    pub fn from_chain(mut statements: Vec<Statement>) -> Statement {
        match statements.len() {
            0 => Statement::Empty,
            1 => statements.remove(0),
            _ => Statement::Block(statements),
        }
    }

    /// Returns the canonical form of this statement: nested blocks are
    /// flattened, `Empty` entries inside blocks disappear and every block is
    /// collapsed by arity. An offer's empty `player_name` becomes `None`.
    /// A block chain can only represent canonical forms.
    pub fn normalized(&self) -> Statement {
        match self {
            Statement::Block(_) => {
                let mut flat = Vec::new();
                self.flatten_into(&mut flat);
                Statement::from_chain(flat)
            }
            Statement::Conditional {
                condition,
                go_true,
                go_false,
            } => Statement::Conditional {
                condition: condition.clone(),
                go_true: Box::new(go_true.normalized()),
                go_false: Box::new(go_false.normalized()),
            },
            Statement::While { condition, body } => Statement::While {
                condition: condition.clone(),
                body: Box::new(body.normalized()),
            },
            Statement::Offer {
                offer_to,
                player_name,
                cases,
            } => Statement::Offer {
                offer_to: offer_to.clone(),
                player_name: player_name.clone().filter(|n| !n.is_empty()),
                cases: cases
                    .iter()
                    .map(|c| OfferCase {
                        condition: c.condition.clone(),
                        message: c.message.clone(),
                        choices: c.choices.clone(),
                        then: c.then.normalized(),
                    })
                    .collect(),
            },
            other => other.clone(),
        }
    }

    fn flatten_into(&self, out: &mut Vec<Statement>) {
        match self {
            Statement::Empty => {}
            Statement::Block(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            other => out.push(other.normalized()),
        }
    }
}
