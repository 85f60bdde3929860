//! The block catalogue and its registry.
//!
//! [`BlockKind`] is the closed set of blocks the translator handles; every
//! tag literal lives in `catalogue.rs`. [`BlockRegistry`] resolves tags found
//! in a graph (including user aliases) to kinds.

mod catalogue;
mod registry;

pub use catalogue::{BlockKind, BlockRole, field, input, option};
pub use registry::{BlockRegistry, BlockRegistryBuilder};

use crate::program::{Category, ChoiceType};

/// The `CHOICE_TYPE` dropdown value for a selection choice.
pub fn choice_type_tag(choice_type: &ChoiceType) -> &'static str {
    choice_type.bound_category().type_tag()
}

/// Reads a `CHOICE_TYPE` dropdown value as the category the selection binds
/// and the category its `SOURCE` socket holds.
pub fn selection_categories(choice_type_tag: &str) -> Option<(Category, Category)> {
    let bound = Category::from_type_tag(choice_type_tag)?;
    let source = match bound {
        Category::Player | Category::PlayerCollection => Category::PlayerCollection,
        Category::Card | Category::CardCollection => Category::CardCollection,
        _ => return None,
    };
    Some((bound, source))
}
