//! Text matching primitives for DogFinder.
//!
//! This crate provides:
//! - Case and diacritic folding
//! - Levenshtein edit distance
//! - Normalized similarity with a containment shortcut

mod fuzzy;
mod normalize;

pub use fuzzy::{levenshtein_distance, text_similarity};
pub use normalize::{fold_case, fold_label};
