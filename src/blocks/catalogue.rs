use crate::program::Category;
use ahash::AHashMap;

/// What a block is for, which decides where it may appear in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    /// Top-level block naming a phase; its chain hangs off its next link.
    Hat,
    /// An ordinary statement in a chain.
    Statement,
    /// An offer case, chained inside an offer's `CASES` input.
    Case,
    /// An offer choice, chained inside a case's `OFFERS` input.
    Choice,
    /// A value block with a fixed output category.
    Value(Category),
    /// A value block whose output category is read from its `TYPE` field.
    TypedValue,
}

/// Master macro defining every block kind, its canonical tag, its role and
/// the default tag table.
macro_rules! define_blocks {
    ( $( ($variant:ident, $tag:literal, $role:expr) ),* $(,)? ) => {
        /// Every block type the translator understands.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum BlockKind {
            $( $variant, )*
        }

        impl BlockKind {
            pub const ALL: &'static [BlockKind] = &[ $( BlockKind::$variant, )* ];

            /// The canonical toolkit tag for this kind.
            pub fn tag(self) -> &'static str {
                match self {
                    $( BlockKind::$variant => $tag, )*
                }
            }

            pub fn role(self) -> BlockRole {
                match self {
                    $( BlockKind::$variant => $role, )*
                }
            }

            pub fn from_tag(tag: &str) -> Option<BlockKind> {
                match tag {
                    $( $tag => Some(BlockKind::$variant), )*
                    _ => None,
                }
            }
        }

        pub(super) fn register_default_blocks(by_tag: &mut AHashMap<String, BlockKind>) {
            $( by_tag.insert($tag.to_string(), BlockKind::$variant); )*
        }
    };
}

define_blocks! {
    // Structure
    (Phase, "socs_phase", BlockRole::Hat),

    // Statements
    (EnterPhase, "socs_enter_phase", BlockRole::Statement),
    (SetNumber, "socs_set_number", BlockRole::Statement),
    (IfElse, "socs_remade_if_else", BlockRole::Statement),
    (While, "socs_remade_while", BlockRole::Statement),
    (Shuffle, "socs_shuffle", BlockRole::Statement),
    (GenerateCards, "socs_gen_cards", BlockRole::Statement),
    (DealCards, "socs_deal_cards", BlockRole::Statement),
    (MoveCards, "socs_cards_move", BlockRole::Statement),
    (DeclareWinner, "socs_declare_winner", BlockRole::Statement),
    (PlayerAdvance, "socs_player_advance", BlockRole::Statement),
    (Offer, "socs_offer", BlockRole::Statement),
    (OfferDeclareless, "socs_offer_declareless", BlockRole::Statement),

    // Offer parts
    (OfferCase, "socs_offer_case", BlockRole::Case),
    (OfferCaseAny, "socs_offer_case_any", BlockRole::Case),
    (ChoiceUnified, "socs_choice_unified", BlockRole::Choice),
    (ChoiceMove, "socs_choice_move", BlockRole::Choice),

    // Values
    (NumberLiteral, "math_number", BlockRole::Value(Category::Number)),
    (GetNumber, "socs_get_number", BlockRole::Value(Category::Number)),
    (NumCards, "socs_num_cards", BlockRole::Value(Category::Number)),
    (BooleanLiteral, "logic_boolean", BlockRole::Value(Category::Boolean)),
    (Compare, "logic_compare", BlockRole::Value(Category::Boolean)),
    (PlayerOfType, "socs_player_of_type", BlockRole::Value(Category::Boolean)),
    (PlayerCurrent, "socs_player_current", BlockRole::Value(Category::Player)),
    (PlayersAll, "socs_players_all", BlockRole::Value(Category::PlayerCollection)),
    (GetUnified, "socs_get_unified", BlockRole::TypedValue),
    (ZoneForPlayer, "socs_zone_for_player", BlockRole::Value(Category::Zone)),
    (ZonesOfType, "socs_zones_of_type", BlockRole::Value(Category::ZoneCollection)),
    (CardSelector, "socs_card_selector", BlockRole::Value(Category::CardCollection)),
    (CardsMatchingSuit, "socs_cards_matching_suit", BlockRole::Value(Category::CardCollection)),
    (CardsMatchingRank, "socs_cards_matching_rank", BlockRole::Value(Category::CardCollection)),
    (RankFromCard, "socs_rank_from_card", BlockRole::Value(Category::Rank)),
    (SuitFromCard, "socs_suit_from_card", BlockRole::Value(Category::Suit)),
    (RankLiteral, "socs_rank_literal", BlockRole::Value(Category::Rank)),
    (SuitLiteral, "socs_suit_literal", BlockRole::Value(Category::Suit)),
}

/// Field names used by the block catalogue.
pub mod field {
    pub const PHASE: &str = "PHASE";
    pub const PHASE_NAME: &str = "PHASE_NAME";
    pub const NAME: &str = "NAME";
    pub const CARDS: &str = "CARDS";
    pub const PLAYER_NAME: &str = "PLAYER_NAME";
    pub const PROMPT: &str = "PROMPT";
    pub const AS: &str = "AS";
    pub const CHOICE_TYPE: &str = "CHOICE_TYPE";
    pub const NUM: &str = "NUM";
    pub const VAR_NAME: &str = "VAR_NAME";
    pub const BOOL: &str = "BOOL";
    pub const OP: &str = "OP";
    pub const TYPE_NAME: &str = "TYPE_NAME";
    pub const TYPE: &str = "TYPE";
    pub const VARIABLE: &str = "VARIABLE";
    pub const ZONE_NAME: &str = "ZONE_NAME";
    pub const ZONE_TYPE: &str = "ZONE_TYPE";
    pub const SELECTOR: &str = "SELECTOR";
    pub const RANK: &str = "RANK";
    pub const SUIT: &str = "SUIT";
}

/// Value socket and statement input names used by the block catalogue.
pub mod input {
    pub const VALUE: &str = "VALUE";
    pub const CONDITION: &str = "CONDITION";
    pub const GO_TRUE: &str = "GO_TRUE";
    pub const GO_FALSE: &str = "GO_FALSE";
    pub const DO: &str = "DO";
    pub const ZONES: &str = "ZONES";
    pub const DEST: &str = "DEST";
    pub const SOURCE: &str = "SOURCE";
    pub const NUM_CARDS: &str = "NUM_CARDS";
    pub const PLAYER: &str = "PLAYER";
    pub const ADVANCE: &str = "ADVANCE";
    pub const OFFER_TO: &str = "OFFER_TO";
    pub const CASES: &str = "CASES";
    pub const FILTER: &str = "FILTER";
    pub const OFFERS: &str = "OFFERS";
    pub const ACTIONS: &str = "ACTIONS";
    pub const CARD_COLLECTION: &str = "CARD_COLLECTION";
    pub const A: &str = "A";
    pub const B: &str = "B";
    pub const ZONE: &str = "ZONE";
    pub const SUIT: &str = "SUIT";
    pub const RANK: &str = "RANK";
    pub const CARD: &str = "CARD";
}

/// Dropdown values with a fixed meaning.
pub mod option {
    pub const ALL_ALLOWED: &str = "ALL";
    pub const TRUE: &str = "TRUE";
    pub const FALSE: &str = "FALSE";
    pub const SELECT_ALL: &str = "ALL";
    pub const SELECT_TOP: &str = "TOP";
    pub const SELECT_BOTTOM: &str = "BOTTOM";
}
