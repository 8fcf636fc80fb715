// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merge suggestions for similarly named activities.
//!
//! Titles are clustered greedily around a seed: each unassigned title starts
//! a group and pulls in every later unassigned title similar enough to the
//! seed. Members are not compared with each other when joining, so a title
//! close to a member but not to the seed stays out. Cost is quadratic in the
//! number of distinct titles.

use std::collections::HashSet;

use crate::models::{CalendarEvent, MergeSuggestion};

pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Lowercase, trim, collapse whitespace, then drop punctuation.
///
/// Letters and digits of every script are kept: "Cumpleaños" becomes
/// "cumpleaños", not "cumpleaos".
pub fn normalize_name(name: &str) -> String {
    let collapsed = name
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect()
}

/// Similarity of two activity names in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = normalize_name(a);
    let b = normalize_name(b);

    if a == b {
        return 1.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let longer = len_a.max(len_b);

    if a.contains(&b) || b.contains(&a) {
        return len_a.min(len_b) as f64 / longer as f64;
    }

    1.0 - strsim::levenshtein(&a, &b) as f64 / longer as f64
}

/// Distinct titles in first-seen order.
fn distinct_titles(events: &[CalendarEvent]) -> Vec<&str> {
    let mut seen = HashSet::new();
    events
        .iter()
        .map(CalendarEvent::title)
        .filter(|title| seen.insert(*title))
        .collect()
}

/// Canonical name for a group.
///
/// Prefers titles starting with an uppercase letter, then the longest
/// normalized form; the earliest title wins ties so trailing punctuation or
/// spaces never decide the name.
pub fn suggest_canonical_name(titles: &[&str]) -> String {
    let capitalized: Vec<&str> = titles
        .iter()
        .copied()
        .filter(|t| t.chars().next().is_some_and(char::is_uppercase))
        .collect();
    let candidates = if capitalized.is_empty() {
        titles
    } else {
        &capitalized[..]
    };

    candidates
        .iter()
        .copied()
        .reduce(|best, current| {
            if normalize_name(current).chars().count() > normalize_name(best).chars().count() {
                current
            } else {
                best
            }
        })
        .unwrap_or_default()
        .to_string()
}

/// Mean similarity over every pair in the group.
fn mean_pairwise_similarity(group: &[&str]) -> f64 {
    let mut total = 0.0;
    let mut comparisons = 0usize;
    for (i, a) in group.iter().enumerate() {
        for b in &group[i + 1..] {
            total += similarity(a, b);
            comparisons += 1;
        }
    }

    if comparisons == 0 {
        return 0.0;
    }
    total / comparisons as f64
}

/// Propose groups of at least two titles whose similarity to the group seed
/// reaches `threshold`. Sorted by descending confidence.
pub fn generate_merge_suggestions(
    events: &[CalendarEvent],
    threshold: f64,
) -> Vec<MergeSuggestion> {
    let titles = distinct_titles(events);
    let mut assigned = vec![false; titles.len()];
    let mut suggestions = Vec::new();

    for (i, seed) in titles.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let mut group = vec![*seed];

        for (j, candidate) in titles.iter().enumerate().skip(i + 1) {
            if !assigned[j] && similarity(seed, candidate) >= threshold {
                group.push(*candidate);
                assigned[j] = true;
            }
        }

        if group.len() < 2 {
            continue;
        }

        let members: HashSet<&str> = group.iter().copied().collect();
        let (event_count, total_minutes) = events
            .iter()
            .filter(|e| members.contains(e.title()))
            .fold((0usize, 0i64), |(count, minutes), e| {
                (count + 1, minutes + e.duration_minutes())
            });

        suggestions.push(MergeSuggestion {
            suggested_name: suggest_canonical_name(&group),
            confidence: mean_pairwise_similarity(&group),
            activities: group.into_iter().map(String::from).collect(),
            event_count,
            total_minutes,
        });
    }

    tracing::debug!(
        titles = titles.len(),
        suggestions = suggestions.len(),
        threshold,
        "Generated merge suggestions"
    );

    suggestions.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    suggestions
}
