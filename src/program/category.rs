use std::fmt;

/// The expression categories of the rule language.
///
/// Every value socket in the block graph is typed by one category, and every
/// value block declares the category it outputs. The string tags are the
/// connection-check names the block toolkit uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Number,
    Boolean,
    Player,
    PlayerCollection,
    Zone,
    ZoneCollection,
    Card,
    CardCollection,
    Rank,
    Suit,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Number,
        Category::Boolean,
        Category::Player,
        Category::PlayerCollection,
        Category::Zone,
        Category::ZoneCollection,
        Category::Card,
        Category::CardCollection,
        Category::Rank,
        Category::Suit,
    ];

    /// The toolkit's connection-check tag for this category.
    pub fn type_tag(self) -> &'static str {
        match self {
            Category::Number => "Number",
            Category::Boolean => "Boolean",
            Category::Player => "socs_t_player",
            Category::PlayerCollection => "socs_t_player_sel",
            Category::Zone => "socs_t_zone",
            Category::ZoneCollection => "socs_t_zone_sel",
            Category::Card => "socs_t_card",
            Category::CardCollection => "socs_t_card_sel",
            Category::Rank => "socs_t_rank",
            Category::Suit => "socs_t_suit",
        }
    }

    pub fn from_type_tag(tag: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.type_tag() == tag)
    }

    /// The singleton category a collection socket also accepts.
    pub fn element(self) -> Option<Category> {
        match self {
            Category::PlayerCollection => Some(Category::Player),
            Category::ZoneCollection => Some(Category::Zone),
            Category::CardCollection => Some(Category::Card),
            _ => None,
        }
    }

    /// Whether a socket of this category can hold a block that outputs `found`.
    pub fn accepts(self, found: Category) -> bool {
        self == found || self.element() == Some(found)
    }

    /// Categories that have a `GetVariable` form in the program schema.
    pub fn has_variables(self) -> bool {
        !matches!(self, Category::Boolean | Category::Rank | Category::Suit)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Number => "number",
            Category::Boolean => "boolean",
            Category::Player => "player",
            Category::PlayerCollection => "player collection",
            Category::Zone => "zone",
            Category::ZoneCollection => "zone collection",
            Category::Card => "card",
            Category::CardCollection => "card collection",
            Category::Rank => "rank",
            Category::Suit => "suit",
        };
        f.write_str(name)
    }
}
