use super::infer::{guess_tag_from_ref, infer_methods};
use super::position::{is_placeholder, segments, ExtractionRule};
use crate::resolver::ResolutionReport;
use crate::spec::{MethodMap, ObjectGroup, ObjectMap, PathEntry, Spec};
use serde::Serialize;
use tracing::{debug, warn};

/// Which grouping strategy produced the object map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Primary: object name taken from the analyzer's segment position
    Position,
    /// Degeneracy fallback: tag fan-out, path segments for untagged paths
    TagSegment,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::Position => f.write_str("position"),
            ExtractionStrategy::TagSegment => f.write_str("tag_segment"),
        }
    }
}

/// Run-level diagnostics. Returned to the caller, never printed: surfacing
/// unresolved/inferred counts to end users is the caller's job, so
/// low-confidence results stay visible.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub total_paths: usize,
    pub external_refs: usize,
    pub resolved_refs: usize,
    /// Paths whose methods were synthesized by the inference fallback
    pub inferred_paths: usize,
    pub strategy: ExtractionStrategy,
    pub segment_index: usize,
    pub object_count: usize,
}

/// Build the object → methods map for a resolved spec.
///
/// Every path contributes its parsed methods, or inferred ones when its
/// `$ref` survived resolution unresolved. If the primary position strategy
/// collapses to at most one object — common on flat specs where the chosen
/// segment is constant — a secondary tag/segment pass runs, and whichever
/// strategy yields strictly more objects wins (ties keep the primary).
pub fn assemble(
    spec: &Spec,
    rule: &ExtractionRule,
    resolution: &ResolutionReport,
) -> (ObjectMap, ExtractionReport) {
    let mut inferred_paths = 0usize;
    let normalized: Vec<(&str, MethodMap)> = spec
        .paths
        .iter()
        .map(|(path, entry)| {
            let methods = match entry {
                PathEntry::Resolved(methods) => methods.clone(),
                PathEntry::UnresolvedRef(reference) => {
                    warn!(path, reference, "inferring methods for unresolved ref");
                    inferred_paths += 1;
                    infer_methods(path, &guess_tag_from_ref(reference))
                }
            };
            (path.as_str(), methods)
        })
        .collect();

    let mut primary = ObjectMap::new();
    for (path, methods) in &normalized {
        let name = rule.object_for(path);
        let group = primary.entry(name).or_insert_with(ObjectGroup::default);
        for method in methods.values() {
            group.methods.insert(path.to_string(), method.clone());
        }
    }

    let (objects, strategy) = if primary.len() <= 1 && !normalized.is_empty() {
        debug!(
            objects = primary.len(),
            "primary strategy degenerated, trying tag/segment grouping"
        );
        let secondary = assemble_by_tags_and_segments(&normalized);
        if secondary.len() > primary.len() {
            debug!(objects = secondary.len(), "tag/segment grouping won");
            (secondary, ExtractionStrategy::TagSegment)
        } else {
            (primary, ExtractionStrategy::Position)
        }
    } else {
        (primary, ExtractionStrategy::Position)
    };

    let report = ExtractionReport {
        total_paths: spec.paths.len(),
        external_refs: resolution.external_refs,
        resolved_refs: resolution.resolved_refs,
        inferred_paths,
        strategy,
        segment_index: rule.segment_index(),
        object_count: objects.len(),
    };
    (objects, report)
}

/// Secondary grouping: fan each path's methods into one object per declared
/// tag, or — when no method on the path carries a tag — into one object per
/// literal path segment. A path belonging to several objects at once is
/// intentional here, not deduplicated.
fn assemble_by_tags_and_segments(normalized: &[(&str, MethodMap)]) -> ObjectMap {
    let mut objects = ObjectMap::new();
    for (path, methods) in normalized {
        let mut tags: Vec<&str> = Vec::new();
        for method in methods.values() {
            for tag in &method.tags {
                if !tag.is_empty() && !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }

        let keys: Vec<String> = if tags.is_empty() {
            let mut segs: Vec<String> = Vec::new();
            for seg in segments(path) {
                if !is_placeholder(seg) && !segs.iter().any(|s| s == seg) {
                    segs.push(seg.to_string());
                }
            }
            segs
        } else {
            tags.iter().map(|t| t.to_string()).collect()
        };

        for key in keys {
            let group = objects.entry(key).or_insert_with(ObjectGroup::default);
            for method in methods.values() {
                group.methods.insert(path.to_string(), method.clone());
            }
        }
    }
    objects
}
