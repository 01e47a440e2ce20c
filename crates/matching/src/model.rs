//! Inputs of the relevance engine.
//!
//! All types deserialize from the camelCase JSON the sighting store and the
//! web client exchange. None of them are mutated by the engine.

use crate::decode::{lenient_tags, lenient_timestamp};
use chrono::{DateTime, Utc};
use dogfinder_breeds::VisualTag;
use dogfinder_geo::Location;
use serde::{Deserialize, Serialize};

/// What a user is looking for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Free text typed by the user
    #[serde(default)]
    pub search_term: Option<String>,

    /// Breed the user believes the dog to be
    #[serde(default, alias = "breed")]
    pub breed_hint: Option<String>,

    /// Where the user is searching from
    #[serde(default)]
    pub location: Option<Location>,

    /// Classifier output for the user's photo, most probable first
    #[serde(default, deserialize_with = "lenient_tags")]
    pub visual_tags: Vec<VisualTag>,
}

impl SearchQuery {
    /// An empty query.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_breed_hint(mut self, breed: impl Into<String>) -> Self {
        self.breed_hint = Some(breed.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_visual_tags(mut self, tags: impl IntoIterator<Item = VisualTag>) -> Self {
        self.visual_tags = tags.into_iter().collect();
        self
    }

    /// Whether the query was driven by a photo.
    pub fn has_visual_tags(&self) -> bool {
        !self.visual_tags.is_empty()
    }

    /// Whether a search term was typed. Any non-empty text counts, blanks
    /// included.
    pub fn has_search_term(&self) -> bool {
        self.search_term.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// Whether any search criterion is active. Queries without criteria are
    /// browsed by recency instead of relevance.
    pub fn has_criteria(&self) -> bool {
        self.has_search_term() || self.location.is_some() || self.has_visual_tags()
    }
}

/// One reported sighting, as stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SightingRecord {
    /// Store identifier, used to deduplicate alerts
    #[serde(default)]
    pub id: Option<String>,

    /// Breed declared by the reporter
    #[serde(default)]
    pub breed: Option<String>,

    /// Free-text description
    #[serde(default)]
    pub details: Option<String>,

    /// Place described in words by the reporter
    #[serde(default)]
    pub manual_location: Option<String>,

    /// Where the dog was seen
    #[serde(default)]
    pub location: Option<Location>,

    /// Classifier output for the reporter's photo, most probable first
    #[serde(default, deserialize_with = "lenient_tags")]
    pub ai_tags: Vec<VisualTag>,

    /// When the sighting was reported
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SightingRecord {
    /// A record with only an identifier set.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

/// A saved alert: the dog a user lost and where.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertProfile {
    #[serde(default, alias = "breed")]
    pub breed_hint: Option<String>,

    #[serde(default)]
    pub location: Option<Location>,
}

impl AlertProfile {
    /// The query an alert scan scores candidates with: the breed doubles as
    /// the free-text search term.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            search_term: self.breed_hint.clone(),
            breed_hint: self.breed_hint.clone(),
            location: self.location.clone(),
            visual_tags: Vec::new(),
        }
    }
}

/// The value of an optional text field when it carries any text.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dogfinder_geo::GeoPoint;
    use serde_json::json;

    #[test]
    fn test_record_from_store_json() {
        let record: SightingRecord = serde_json::from_value(json!({
            "id": "abc123",
            "breed": "Golden Retriever",
            "details": "friendly, red collar",
            "manualLocation": "Parque México",
            "location": "{\"latitude\":19.4117,\"longitude\":-99.1700}",
            "aiTags": [{"className": "golden retriever", "probability": 0.74}],
            "createdAt": "2024-05-01T12:00:00Z",
            "status": "sighted",
            "contactInfo": "555-0100"
        }))
        .unwrap();

        assert_eq!(record.id.as_deref(), Some("abc123"));
        assert_eq!(record.manual_location.as_deref(), Some("Parque México"));
        assert_eq!(
            record.location.as_ref().and_then(Location::resolve),
            Some(GeoPoint::new(19.4117, -99.17))
        );
        assert_eq!(record.ai_tags, vec![VisualTag::new("golden retriever", 0.74)]);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_record_with_malformed_fields_still_decodes() {
        let record: SightingRecord = serde_json::from_value(json!({
            "breed": "pug",
            "location": {"latitude": "north"},
            "aiTags": "not a list",
            "createdAt": "last tuesday"
        }))
        .unwrap();

        assert_eq!(record.breed.as_deref(), Some("pug"));
        assert!(record.location.as_ref().and_then(Location::resolve).is_none());
        assert!(record.ai_tags.is_empty());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_null_fields() {
        let record: SightingRecord =
            serde_json::from_value(json!({"aiTags": null, "createdAt": null, "location": null}))
                .unwrap();
        assert!(record.ai_tags.is_empty());
        assert!(record.created_at.is_none());
        assert!(record.location.is_none());
    }

    #[test]
    fn test_query_breed_alias() {
        let query: SearchQuery =
            serde_json::from_value(json!({"breed": "beagle", "visualTags": []})).unwrap();
        assert_eq!(query.breed_hint.as_deref(), Some("beagle"));
        assert!(!query.has_visual_tags());
    }

    #[test]
    fn test_has_criteria() {
        assert!(!SearchQuery::new().has_criteria());
        assert!(!SearchQuery::new().with_search_term("").has_criteria());
        assert!(SearchQuery::new().with_search_term("  ").has_criteria());
        assert!(!SearchQuery::new().with_breed_hint("pug").has_criteria());
        assert!(SearchQuery::new().with_search_term("pug").has_criteria());
        assert!(SearchQuery::new()
            .with_location(GeoPoint::new(19.4, -99.1))
            .has_criteria());
        assert!(SearchQuery::new()
            .with_visual_tags([VisualTag::new("pug", 0.9)])
            .has_criteria());
    }

    #[test]
    fn test_alert_profile_query() {
        let profile = AlertProfile {
            breed_hint: Some("husky".into()),
            location: Some(GeoPoint::new(19.4, -99.1).into()),
        };
        let query = profile.to_query();

        assert_eq!(query.search_term.as_deref(), Some("husky"));
        assert_eq!(query.breed_hint.as_deref(), Some("husky"));
        assert!(query.location.is_some());
        assert!(query.visual_tags.is_empty());
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("pug".into())), Some("pug"));
        assert_eq!(non_blank(&Some(" \t".into())), None);
        assert_eq!(non_blank(&None), None);
    }
}
