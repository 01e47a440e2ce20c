//! Breed similarity.
//!
//! Two labels are similar when one contains the other, when both mention the
//! same synonym entry, or when both mention members of the same visual
//! family. The tiers are tried in that order.

use crate::tables::{FAMILIES, SYNONYMS};
use crate::VisualTag;
use dogfinder_search::fold_label;
use once_cell::sync::Lazy;
use serde::Serialize;

static BUILTIN: Lazy<BreedTaxonomy> = Lazy::new(|| BreedTaxonomy::from_static(SYNONYMS, FAMILIES));

/// Which tier established that two labels are similar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// One normalized label contains the other
    Substring,
    /// Both labels mention the same synonym entry
    Synonym,
    /// Both labels mention members of the same visual family
    Family,
}

/// A named group of normalized terms; a label matches the group when it
/// contains any of the terms.
#[derive(Debug, Clone, PartialEq)]
struct TermGroup {
    name: String,
    terms: Vec<String>,
}

impl TermGroup {
    fn new<S: AsRef<str>>(name: &str, terms: impl IntoIterator<Item = S>) -> Self {
        let mut folded: Vec<String> = terms
            .into_iter()
            .map(|t| fold_label(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        folded.sort();
        folded.dedup();
        Self {
            name: fold_label(name),
            terms: folded,
        }
    }

    fn matches(&self, folded_label: &str) -> bool {
        self.terms.iter().any(|term| folded_label.contains(term.as_str()))
    }
}

/// Read-only synonym and family tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BreedTaxonomy {
    synonyms: Vec<TermGroup>,
    families: Vec<TermGroup>,
}

impl BreedTaxonomy {
    /// Builds a taxonomy from `(canonical key, synonyms)` and
    /// `(family name, member keys)` pairs.
    ///
    /// Every term is folded; a synonym entry also matches its own key.
    pub fn new<K, S, F, M>(
        synonyms: impl IntoIterator<Item = (K, S)>,
        families: impl IntoIterator<Item = (F, M)>,
    ) -> Self
    where
        K: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
        F: AsRef<str>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        let synonyms = synonyms
            .into_iter()
            .map(|(key, names)| {
                let key = key.as_ref();
                let terms: Vec<String> = std::iter::once(key.to_string())
                    .chain(names.into_iter().map(|n| n.as_ref().to_string()))
                    .collect();
                TermGroup::new(key, terms)
            })
            .collect();

        let families = families
            .into_iter()
            .map(|(name, members)| TermGroup::new(name.as_ref(), members))
            .collect();

        Self { synonyms, families }
    }

    /// Builds a taxonomy from static tables.
    pub fn from_static(
        synonyms: &[(&str, &[&str])],
        families: &[(&str, &[&str])],
    ) -> Self {
        Self::new(
            synonyms.iter().map(|(k, s)| (*k, s.iter().copied())),
            families.iter().map(|(f, m)| (*f, m.iter().copied())),
        )
    }

    /// The process-wide built-in taxonomy, built on first use.
    pub fn builtin() -> &'static BreedTaxonomy {
        &BUILTIN
    }

    /// Canonical keys of the synonym entries.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &str> {
        self.synonyms.iter().map(|g| g.name.as_str())
    }

    /// Names of the visual families.
    pub fn family_names(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(|g| g.name.as_str())
    }

    /// The first tier under which the two labels are similar, if any.
    ///
    /// A label that is empty after normalization is contained in every
    /// other label, so it matches at the substring tier.
    pub fn match_tier(&self, label_a: &str, label_b: &str) -> Option<MatchTier> {
        let a = fold_label(label_a);
        let b = fold_label(label_b);

        let tier = if a.contains(&b) || b.contains(&a) {
            MatchTier::Substring
        } else if self.synonyms.iter().any(|g| g.matches(&a) && g.matches(&b)) {
            MatchTier::Synonym
        } else if self.families.iter().any(|g| g.matches(&a) && g.matches(&b)) {
            MatchTier::Family
        } else {
            return None;
        };

        tracing::trace!(a = %a, b = %b, ?tier, "Breed labels matched");
        Some(tier)
    }

    /// Whether the two labels plausibly name the same kind of dog.
    ///
    /// ```
    /// use dogfinder_breeds::BreedTaxonomy;
    ///
    /// let taxonomy = BreedTaxonomy::builtin();
    /// assert!(taxonomy.are_similar("pastor alemán", "German Shepherd"));
    /// assert!(!taxonomy.are_similar("chihuahua", "great dane"));
    /// ```
    pub fn are_similar(&self, label_a: &str, label_b: &str) -> bool {
        self.match_tier(label_a, label_b).is_some()
    }

    /// Highest probability among tags similar to `target_breed`, or 0.
    pub fn best_similarity_score(&self, tags: &[VisualTag], target_breed: &str) -> f64 {
        if target_breed.trim().is_empty() {
            return 0.0;
        }

        tags.iter()
            .filter(|tag| self.are_similar(&tag.label, target_breed))
            .map(VisualTag::confidence)
            .fold(0.0, f64::max)
    }
}

impl Default for BreedTaxonomy {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn taxonomy() -> &'static BreedTaxonomy {
        BreedTaxonomy::builtin()
    }

    #[test]
    fn test_substring_tier() {
        assert_eq!(
            taxonomy().match_tier("golden retriever", "golden"),
            Some(MatchTier::Substring)
        );
        assert_eq!(
            taxonomy().match_tier("Golden", "GOLDEN RETRIEVER"),
            Some(MatchTier::Substring)
        );
    }

    #[test]
    fn test_synonym_tier() {
        assert_eq!(
            taxonomy().match_tier("pastor aleman", "german shepherd"),
            Some(MatchTier::Synonym)
        );
        assert!(taxonomy().are_similar("Pastor Alemán", "alsatian"));
        assert!(taxonomy().are_similar("salchicha", "Dachshund"));
        assert!(taxonomy().are_similar("chihuahueño", "chihuahua"));
    }

    #[test]
    fn test_family_tier() {
        assert_eq!(
            taxonomy().match_tier("Husky", "Pomeranian"),
            Some(MatchTier::Family)
        );
        assert!(taxonomy().are_similar("samoyed", "alaskan malamute"));
        assert!(taxonomy().are_similar("maltese", "bichon frise"));
    }

    #[test]
    fn test_dissimilar() {
        assert!(!taxonomy().are_similar("chihuahua", "great dane"));
        assert!(!taxonomy().are_similar("Husky", "Chihuahua"));
        assert!(!taxonomy().are_similar("pug", "beagle"));
    }

    #[test]
    fn test_empty_label_is_contained_in_everything() {
        assert!(taxonomy().are_similar("", "beagle"));
        assert!(taxonomy().are_similar("beagle", "  "));
        assert!(taxonomy().are_similar("", ""));
        assert_eq!(taxonomy().match_tier("", "beagle"), Some(MatchTier::Substring));

        // A blank target still scores nothing, even against a blank tag.
        let tags = vec![VisualTag::new("", 0.8), VisualTag::new("beagle", 0.6)];
        assert_eq!(taxonomy().best_similarity_score(&tags, "beagle"), 0.8);
        assert_eq!(taxonomy().best_similarity_score(&tags, "  "), 0.0);
    }

    #[test]
    fn test_classifier_style_labels() {
        assert!(taxonomy().are_similar("Eskimo dog, husky", "Siberian Husky"));
        assert!(taxonomy().are_similar("Labrador retriever", "golden"));
    }

    #[test]
    fn test_best_similarity_score() {
        let tags = vec![
            VisualTag::new("Chihuahua", 0.55),
            VisualTag::new("golden retriever", 0.30),
            VisualTag::new("Labrador retriever", 0.12),
        ];

        assert_eq!(taxonomy().best_similarity_score(&tags, "Golden"), 0.30);
        assert_eq!(taxonomy().best_similarity_score(&tags, "chihuahueño"), 0.55);
        assert_eq!(taxonomy().best_similarity_score(&tags, "great dane"), 0.0);
        assert_eq!(taxonomy().best_similarity_score(&tags, ""), 0.0);
        assert_eq!(taxonomy().best_similarity_score(&[], "pug"), 0.0);
    }

    #[test]
    fn test_custom_taxonomy() {
        let taxonomy = BreedTaxonomy::new(
            [("xoloitzcuintle", vec!["xolo", "perro pelón"])],
            [("hairless", vec!["xoloitzcuintle", "chinese crested"])],
        );

        assert!(taxonomy.are_similar("Perro Pelón", "xoloitzcuintle"));
        assert!(taxonomy.are_similar("xoloitzcuintle mix", "chinese crested"));
        assert!(!taxonomy.are_similar("xolo", "chinese crested"));
        assert!(!taxonomy.are_similar("german shepherd", "pastor aleman"));
        assert_eq!(taxonomy.canonical_keys().collect::<Vec<_>>(), vec!["xoloitzcuintle"]);
        assert_eq!(taxonomy.family_names().collect::<Vec<_>>(), vec!["hairless"]);
    }

    #[test]
    fn test_builtin_tables_are_folded() {
        assert!(taxonomy().canonical_keys().any(|k| k == "german shepherd"));
        assert!(taxonomy().family_names().any(|f| f == "spitz"));
        assert!(taxonomy()
            .synonyms
            .iter()
            .flat_map(|g| g.terms.iter())
            .all(|t| t.is_ascii()));
    }

    proptest! {
        #[test]
        fn prop_similarity_symmetric(a in "[a-z ]{0,16}", b in "[a-z ]{0,16}") {
            prop_assert_eq!(taxonomy().are_similar(&a, &b), taxonomy().are_similar(&b, &a));
        }

        #[test]
        fn prop_non_empty_label_similar_to_itself(s in "[a-z]{1,16}") {
            prop_assert!(taxonomy().are_similar(&s, &s));
        }
    }
}
