pub mod nutrition;
mod recipe;

pub use nutrition::{standardize, CANONICAL_NUTRIENTS};
pub use recipe::RecipeExtractor;
