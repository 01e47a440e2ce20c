//! Breed taxonomy for DogFinder.
//!
//! Absorbs the two ways breed labels disagree in practice: people name the
//! same breed in different languages and registers ("pastor alemán",
//! "alsatian", "German Shepherd"), and image classifiers confuse visually
//! close breeds (a husky tagged as a pomeranian).
//!
//! # Example
//!
//! ```
//! use dogfinder_breeds::{BreedTaxonomy, VisualTag};
//!
//! let taxonomy = BreedTaxonomy::builtin();
//! let tags = [VisualTag::new("Eskimo dog, husky", 0.82)];
//!
//! assert!(taxonomy.are_similar("Husky", "Pomeranian"));
//! assert_eq!(taxonomy.best_similarity_score(&tags, "siberiano husky"), 0.82);
//! ```

mod tables;
mod tag;
mod taxonomy;

pub use tables::{FAMILIES, SYNONYMS};
pub use tag::VisualTag;
pub use taxonomy::{BreedTaxonomy, MatchTier};

/// Whether two labels are similar under the built-in taxonomy.
#[inline]
pub fn are_similar(label_a: &str, label_b: &str) -> bool {
    BreedTaxonomy::builtin().are_similar(label_a, label_b)
}

/// Highest probability among `tags` similar to `target_breed` under the
/// built-in taxonomy.
#[inline]
pub fn best_similarity_score(tags: &[VisualTag], target_breed: &str) -> f64 {
    BreedTaxonomy::builtin().best_similarity_score(tags, target_breed)
}
