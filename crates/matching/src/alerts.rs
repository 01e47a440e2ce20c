//! Proactive alerts.
//!
//! When a new sighting arrives, an owner with a saved profile is alerted if
//! the sighting is a strong match. Each sighting alerts at most once: the
//! caller keeps the returned [`NotifiedIds`] between scans.

use crate::model::{AlertProfile, SightingRecord};
use crate::scorer::RelevanceScorer;
use dogfinder_core::config::AlertsConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Default number of remembered sighting ids.
pub const DEFAULT_NOTIFIED_CAPACITY: usize = 20;

/// Bounded, insertion-ordered set of sighting ids already alerted on.
///
/// Once full, recording a new id forgets the oldest one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct NotifiedIds {
    ids: VecDeque<String>,
    capacity: usize,
}

impl NotifiedIds {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NOTIFIED_CAPACITY)
    }

    /// An empty set remembering at most `capacity` ids (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            ids: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild a set from ids ordered oldest first, keeping the newest
    /// `capacity` of them.
    pub fn from_ids(ids: impl IntoIterator<Item = String>, capacity: usize) -> Self {
        let mut set = Self::with_capacity(capacity);
        for id in ids {
            set.record(id);
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    /// Remember `id`, evicting the oldest entry when full. Recording a known
    /// id is a no-op.
    pub fn record(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.contains(&id) {
            return;
        }
        while self.ids.len() >= self.capacity {
            self.ids.pop_front();
        }
        self.ids.push_back(id);
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Ids oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids.into()
    }
}

impl Default for NotifiedIds {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for NotifiedIds {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids, DEFAULT_NOTIFIED_CAPACITY)
    }
}

impl From<NotifiedIds> for Vec<String> {
    fn from(ids: NotifiedIds) -> Self {
        ids.into_vec()
    }
}

/// Why a scan did or did not alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ScanDecision {
    NoProfile,
    NoCandidates,
    /// The newest candidate has no id and cannot be deduplicated
    MissingId,
    AlreadyNotified,
    BelowThreshold { score: f64 },
    Notify { score: f64 },
}

/// Result of one scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome<'c> {
    /// The sighting to alert on, if any
    pub to_notify: Option<&'c SightingRecord>,
    /// Ids to keep for the next scan
    pub notified_ids: NotifiedIds,
    pub decision: ScanDecision,
}

/// Decides whether the newest sighting warrants an alert.
#[derive(Debug, Clone)]
pub struct AlertScanner<'t> {
    scorer: RelevanceScorer<'t>,
    threshold: f64,
}

impl Default for AlertScanner<'static> {
    fn default() -> Self {
        Self::new(RelevanceScorer::default(), &AlertsConfig::default())
    }
}

impl<'t> AlertScanner<'t> {
    pub fn new(scorer: RelevanceScorer<'t>, config: &AlertsConfig) -> Self {
        Self {
            scorer,
            threshold: config.threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn scorer(&self) -> &RelevanceScorer<'t> {
        &self.scorer
    }

    /// Evaluate the newest sighting against `profile`.
    ///
    /// Only `candidates[0]` is considered; older sightings were already
    /// evaluated when they arrived. A score at or above the threshold for an
    /// id not yet in `notified` alerts and records the id.
    pub fn scan<'c>(
        &self,
        profile: Option<&AlertProfile>,
        candidates: &'c [SightingRecord],
        mut notified: NotifiedIds,
    ) -> ScanOutcome<'c> {
        let (to_notify, decision) = match (profile, candidates.first()) {
            (None, _) => (None, ScanDecision::NoProfile),
            (Some(_), None) => (None, ScanDecision::NoCandidates),
            (Some(profile), Some(newest)) => match newest.id.as_deref() {
                None => {
                    tracing::warn!("Newest sighting has no id, skipping alert check");
                    (None, ScanDecision::MissingId)
                }
                Some(id) if notified.contains(id) => (None, ScanDecision::AlreadyNotified),
                Some(id) => {
                    let score = self.scorer.score(&profile.to_query(), newest);
                    if score >= self.threshold {
                        notified.record(id);
                        (Some(newest), ScanDecision::Notify { score })
                    } else {
                        (None, ScanDecision::BelowThreshold { score })
                    }
                }
            },
        };

        match decision {
            ScanDecision::Notify { score } => tracing::info!(
                sighting = candidates.first().and_then(|c| c.id.as_deref()),
                score,
                "Strong match, alerting owner"
            ),
            _ => tracing::debug!(?decision, "No alert"),
        }

        ScanOutcome {
            to_notify,
            notified_ids: notified,
            decision,
        }
    }
}
