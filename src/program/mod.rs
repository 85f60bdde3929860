pub mod cards;
pub mod category;
pub mod expression;
pub mod phases;
pub mod statement;

pub use cards::*;
pub use category::*;
pub use expression::*;
pub use phases::*;
pub use statement::*;
