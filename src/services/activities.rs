//! Activity catalog used by the search box.

use std::collections::HashMap;

use crate::models::{ActivityOption, CalendarEvent};

/// Maximum number of options returned by a search.
pub const SEARCH_RESULT_LIMIT: usize = 10;

/// Distinct titles with event counts, most frequent first.
pub fn unique_activities(events: &[CalendarEvent]) -> Vec<ActivityOption> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut options: Vec<ActivityOption> = Vec::new();

    for event in events {
        match index.get(event.title()) {
            Some(&slot) => options[slot].count += 1,
            None => {
                index.insert(event.title(), options.len());
                options.push(ActivityOption {
                    name: event.title().to_string(),
                    count: 1,
                });
            }
        }
    }

    options.sort_by(|a, b| b.count.cmp(&a.count));
    options
}

/// Case-insensitive substring search; a blank term returns the top entries.
pub fn search_activities(options: &[ActivityOption], term: &str) -> Vec<ActivityOption> {
    let needle = term.trim().to_lowercase();

    options
        .iter()
        .filter(|option| needle.is_empty() || option.name.to_lowercase().contains(&needle))
        .take(SEARCH_RESULT_LIMIT)
        .cloned()
        .collect()
}
