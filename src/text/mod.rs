mod glyphs;
mod reducer;
mod tagger;

pub use glyphs::normalize_glyphs;
pub use reducer::IngredientReducer;
pub use tagger::{LexiconTagger, PosTag, Tagger};
