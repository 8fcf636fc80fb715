//! Caller-maintained exclusion state.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Titles, issues and events the user has chosen to hide, plus title merges.
///
/// The client owns and persists this; it is passed in with every query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Exclusions {
    /// Activity names excluded from statistics
    #[serde(default)]
    pub hidden_titles: HashSet<String>,
    /// Issue keys (`{event_id}-{type}`) whose events are excluded
    #[serde(default)]
    pub hidden_issue_keys: HashSet<String>,
    /// Events deleted by the user
    #[serde(default)]
    pub removed_event_ids: HashSet<String>,
    /// Original title -> merged title
    #[serde(default)]
    pub title_merges: HashMap<String, String>,
}

impl Exclusions {
    pub fn is_empty(&self) -> bool {
        self.hidden_titles.is_empty()
            && self.hidden_issue_keys.is_empty()
            && self.removed_event_ids.is_empty()
            && self.title_merges.is_empty()
    }
}
