//! Visual classifier output.

use serde::{Deserialize, Serialize};

/// One `(label, probability)` guess from an image classifier.
///
/// Classifiers emit tags sorted by descending probability, so the first tag
/// of a sequence is the top guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualTag {
    /// Class label, e.g. "golden retriever" or "Eskimo dog, husky"
    #[serde(alias = "className")]
    pub label: String,
    /// Probability in `[0, 1]`
    pub probability: f64,
}

impl VisualTag {
    /// Creates a tag, clamping the probability into `[0, 1]`.
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability: sanitize_probability(probability),
        }
    }

    /// Probability safe for arithmetic: non-finite values count as 0 and the
    /// rest is clamped into `[0, 1]`.
    #[inline]
    pub fn confidence(&self) -> f64 {
        sanitize_probability(self.probability)
    }

    /// Text before the first comma of the label.
    ///
    /// ```
    /// use dogfinder_breeds::VisualTag;
    ///
    /// let tag = VisualTag::new("Eskimo dog, husky", 0.7);
    /// assert_eq!(tag.primary_label(), "Eskimo dog");
    /// ```
    pub fn primary_label(&self) -> &str {
        self.label.split(',').next().unwrap_or_default().trim()
    }
}

fn sanitize_probability(probability: f64) -> f64 {
    if probability.is_finite() {
        probability.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps() {
        assert_eq!(VisualTag::new("pug", 1.4).probability, 1.0);
        assert_eq!(VisualTag::new("pug", -0.2).probability, 0.0);
        assert_eq!(VisualTag::new("pug", f64::NAN).probability, 0.0);
    }

    #[test]
    fn test_confidence_sanitizes_raw_values() {
        let tag = VisualTag {
            label: "pug".into(),
            probability: f64::INFINITY,
        };
        assert_eq!(tag.confidence(), 0.0);
    }

    #[test]
    fn test_class_name_alias() {
        let tag: VisualTag =
            serde_json::from_str(r#"{"className": "golden retriever", "probability": 0.91}"#)
                .unwrap();
        assert_eq!(tag.label, "golden retriever");
        assert_eq!(tag.probability, 0.91);
    }

    #[test]
    fn test_primary_label_without_comma() {
        assert_eq!(VisualTag::new(" beagle ", 0.5).primary_label(), "beagle");
    }
}
