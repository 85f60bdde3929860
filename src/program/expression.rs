use super::{Category, Rank, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberExpression {
    Literal(i32),
    GetVariable(String),
    CardsIn(Box<CardCollectionExpression>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanExpression {
    Literal(bool),
    Comparison {
        a: Box<NumberExpression>,
        compared_to: Comparison,
        b: Box<NumberExpression>,
    },
    PlayerIsType {
        player: PlayerExpression,
        type_name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = "EQ")]
    Eq,
    #[serde(rename = "NEQ")]
    Neq,
    #[serde(rename = "LT")]
    Lt,
    #[serde(rename = "LTE")]
    Lte,
    #[serde(rename = "GT")]
    Gt,
    #[serde(rename = "GTE")]
    Gte,
}

impl Comparison {
    pub fn all() -> [Comparison; 6] {
        use Comparison::*;
        [Eq, Neq, Lt, Lte, Gt, Gte]
    }

    /// The operator code used by the compare block's `OP` dropdown.
    pub fn code(self) -> &'static str {
        match self {
            Comparison::Eq => "EQ",
            Comparison::Neq => "NEQ",
            Comparison::Lt => "LT",
            Comparison::Lte => "LTE",
            Comparison::Gt => "GT",
            Comparison::Gte => "GTE",
        }
    }

    pub fn from_code(code: &str) -> Option<Comparison> {
        Comparison::all().into_iter().find(|c| c.code() == code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerExpression {
    CurrentPlayer,
    GetVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCollectionExpression {
    AllPlayers,
    Single(PlayerExpression),
    GetVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneExpression {
    OwnedByPlayer {
        player: PlayerExpression,
        zone_name: String,
    },
    GetVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneCollectionExpression {
    Single(ZoneExpression),
    OfType(String),
    GetVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardExpression {
    GetVariable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardCollectionExpression {
    Single(CardExpression),
    GetVariable(String),
    AllInZone(ZoneExpression),
    TopInZone(ZoneExpression),
    BottomInZone(ZoneExpression),
    MatchingSuit {
        zone: ZoneExpression,
        suit: SuitExpression,
    },
    MatchingRank {
        zone: ZoneExpression,
        rank: RankExpression,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankExpression {
    Literal(Rank),
    FromCard(CardExpression),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitExpression {
    Literal(Suit),
    FromCard(CardExpression),
}

/// The set of cards a `GenerateCards` statement creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardSetExpression {
    AllAllowed,
}

/// An expression of any category, tagged by its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    Number(NumberExpression),
    Boolean(BooleanExpression),
    Player(PlayerExpression),
    PlayerCollection(PlayerCollectionExpression),
    Zone(ZoneExpression),
    ZoneCollection(ZoneCollectionExpression),
    Card(CardExpression),
    CardCollection(CardCollectionExpression),
    Rank(RankExpression),
    Suit(SuitExpression),
}

impl Expression {
    pub fn category(&self) -> Category {
        match self {
            Expression::Number(_) => Category::Number,
            Expression::Boolean(_) => Category::Boolean,
            Expression::Player(_) => Category::Player,
            Expression::PlayerCollection(_) => Category::PlayerCollection,
            Expression::Zone(_) => Category::Zone,
            Expression::ZoneCollection(_) => Category::ZoneCollection,
            Expression::Card(_) => Category::Card,
            Expression::CardCollection(_) => Category::CardCollection,
            Expression::Rank(_) => Category::Rank,
            Expression::Suit(_) => Category::Suit,
        }
    }

    /// The variable name if this expression is a bare `GetVariable`.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Expression::Number(NumberExpression::GetVariable(n))
            | Expression::Player(PlayerExpression::GetVariable(n))
            | Expression::PlayerCollection(PlayerCollectionExpression::GetVariable(n))
            | Expression::Zone(ZoneExpression::GetVariable(n))
            | Expression::ZoneCollection(ZoneCollectionExpression::GetVariable(n))
            | Expression::Card(CardExpression::GetVariable(n))
            | Expression::CardCollection(CardCollectionExpression::GetVariable(n)) => Some(n),
            _ => None,
        }
    }
}

impl From<NumberExpression> for Expression {
    fn from(e: NumberExpression) -> Self {
        Expression::Number(e)
    }
}

impl From<BooleanExpression> for Expression {
    fn from(e: BooleanExpression) -> Self {
        Expression::Boolean(e)
    }
}

impl From<PlayerExpression> for Expression {
    fn from(e: PlayerExpression) -> Self {
        Expression::Player(e)
    }
}

impl From<PlayerCollectionExpression> for Expression {
    fn from(e: PlayerCollectionExpression) -> Self {
        Expression::PlayerCollection(e)
    }
}

impl From<ZoneExpression> for Expression {
    fn from(e: ZoneExpression) -> Self {
        Expression::Zone(e)
    }
}

impl From<ZoneCollectionExpression> for Expression {
    fn from(e: ZoneCollectionExpression) -> Self {
        Expression::ZoneCollection(e)
    }
}

impl From<CardExpression> for Expression {
    fn from(e: CardExpression) -> Self {
        Expression::Card(e)
    }
}

impl From<CardCollectionExpression> for Expression {
    fn from(e: CardCollectionExpression) -> Self {
        Expression::CardCollection(e)
    }
}

impl From<RankExpression> for Expression {
    fn from(e: RankExpression) -> Self {
        Expression::Rank(e)
    }
}

impl From<SuitExpression> for Expression {
    fn from(e: SuitExpression) -> Self {
        Expression::Suit(e)
    }
}
