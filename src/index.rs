//! Alternate views for large specs: a tag → paths index, keyword-relevance
//! search over method text, and a top-N object ranking. These operate on
//! resolved path entries only; the assembler is the place where unresolved
//! references get inferred.

use crate::extract::segment_object_name;
use crate::spec::{MethodEntry, ObjectGroup, ObjectMap, PathEntry, Spec, Verb};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashSet;

/// Paths grouped under one declared tag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TagEntry {
    pub description: String,
    pub paths: Vec<String>,
}

/// Index of declared tags to the paths whose methods carry them.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    pub tags: IndexMap<String, TagEntry>,
}

impl TagIndex {
    /// Seed from the spec's declared tag list, then attach every path whose
    /// methods reference a declared tag. Undeclared method tags are not
    /// invented as index entries.
    pub fn build(spec: &Spec) -> TagIndex {
        let mut index = TagIndex::default();
        for (name, description) in &spec.tags {
            index.tags.insert(
                name.clone(),
                TagEntry {
                    description: description.clone(),
                    paths: Vec::new(),
                },
            );
        }
        for (path, entry) in &spec.paths {
            let PathEntry::Resolved(methods) = entry else {
                continue;
            };
            for method in methods.values() {
                for tag in &method.tags {
                    if let Some(slot) = index.tags.get_mut(tag) {
                        if !slot.paths.contains(path) {
                            slot.paths.push(path.clone());
                        }
                    }
                }
            }
        }
        index
    }

    pub fn paths_for(&self, tag: &str) -> Option<&[String]> {
        self.tags.get(tag).map(|entry| entry.paths.as_slice())
    }
}

/// Objects grouped by primary tag (first declared tag, segment-derived name
/// for untagged methods), optionally restricted to a tag allowlist.
pub fn objects_by_tags(spec: &Spec, tag_filter: Option<&[String]>) -> ObjectMap {
    let mut objects = ObjectMap::new();
    for (path, entry) in &spec.paths {
        let PathEntry::Resolved(methods) = entry else {
            continue;
        };
        for method in methods.values() {
            if let Some(filter) = tag_filter {
                if !method.tags.iter().any(|t| filter.contains(t)) {
                    continue;
                }
            }
            let primary = method
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| segment_object_name(path));
            let group = objects.entry(primary.clone()).or_insert_with(|| ObjectGroup {
                tag: Some(primary.clone()),
                description: spec.tags.get(&primary).cloned(),
                path_count: Some(0),
                ..ObjectGroup::default()
            });
            group.methods.insert(path.clone(), method.clone());
            group.path_count = Some(group.path_count.unwrap_or(0) + 1);
        }
    }
    objects
}

/// One search result method with its keyword score.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub method: MethodEntry,
    pub relevance_score: usize,
}

/// Search results for one primary tag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchGroup {
    pub tag: String,
    pub relevance_score: usize,
    pub methods: IndexMap<String, SearchHit>,
}

/// Score every method by case-insensitive keyword occurrences across its
/// description, summary, operation id, and path, grouped by primary tag.
/// Groups come back ordered by best score, ties in insertion order.
pub fn search_by_keywords<S: AsRef<str>>(
    spec: &Spec,
    keywords: &[S],
) -> IndexMap<String, SearchGroup> {
    let needles: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    let mut groups: IndexMap<String, SearchGroup> = IndexMap::new();

    for (path, entry) in &spec.paths {
        let PathEntry::Resolved(methods) = entry else {
            continue;
        };
        for method in methods.values() {
            let haystack = format!(
                "{} {} {} {}",
                method.description, method.summary, method.operation, path
            )
            .to_lowercase();
            let score: usize = needles.iter().map(|k| haystack.matches(k).count()).sum();
            if score == 0 {
                continue;
            }
            let primary = method
                .tags
                .first()
                .cloned()
                .unwrap_or_else(|| segment_object_name(path));
            let group = groups.entry(primary.clone()).or_insert_with(|| SearchGroup {
                tag: primary,
                ..SearchGroup::default()
            });
            group.methods.insert(
                path.clone(),
                SearchHit {
                    method: method.clone(),
                    relevance_score: score,
                },
            );
            group.relevance_score = group.relevance_score.max(score);
        }
    }

    let mut ordered: Vec<(String, SearchGroup)> = groups.into_iter().collect();
    ordered.sort_by(|a, b| b.1.relevance_score.cmp(&a.1.relevance_score));
    ordered.into_iter().collect()
}

/// Top `limit` objects by endpoint count, with a fixed bonus for groups
/// exposing at least three distinct verbs (a proxy for full CRUD support).
/// Ordering is deterministic: score descending, then name ascending.
pub fn top_objects(spec: &Spec, limit: usize) -> ObjectMap {
    const CRUD_BONUS: usize = 5;
    const CRUD_VERBS: usize = 3;

    let objects = objects_by_tags(spec, None);
    let mut scored: Vec<(usize, String, ObjectGroup)> = objects
        .into_iter()
        .map(|(name, group)| {
            let verbs: HashSet<Verb> = group.methods.values().map(|m| m.verb).collect();
            let mut score = group.path_count.unwrap_or(0);
            if verbs.len() >= CRUD_VERBS {
                score += CRUD_BONUS;
            }
            (score, name, group)
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, name, group)| (name, group))
        .collect()
}
