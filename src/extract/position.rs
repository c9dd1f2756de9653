use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Whether a path segment is a `{param}` placeholder (the entire segment is
/// wrapped in braces).
pub fn is_placeholder(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// `/`-delimited segments of a path template, without empty leading/trailing
/// entries.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Last non-parameter segment of a path, or `"default"`. This is the
/// segment-derived object name used by the tag-grouping views, where the
/// trailing literal (`/groups/{groupId}/clusters` → `clusters`) names the
/// resource.
pub fn segment_object_name(path: &str) -> String {
    segments(path)
        .iter()
        .rev()
        .find(|s| !is_placeholder(s))
        .map(|s| s.to_string())
        .unwrap_or_else(|| "default".to_string())
}

/// Uniqueness score of one segment index across all paths.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionScore {
    pub index: usize,
    /// distinct non-parameter values / paths long enough to have this index
    pub uniqueness: f64,
    pub distinct: usize,
}

/// The analyzer's immutable result: the segment index that best identifies a
/// resource, plus a memoized per-path object name so a path always maps to
/// the same object for the lifetime of one extraction run.
///
/// Tag-based grouping alone is unreliable — many real specs omit tags or
/// apply them inconsistently — so object names are taken from path structure,
/// adapted per document rather than hardcoding segment 0.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    selected: usize,
    ranking: Vec<PositionScore>,
    names: IndexMap<String, String>,
}

impl ExtractionRule {
    /// Score every segment index over the given path templates and memoize
    /// an object name per path. Never fails: pathological input (no paths,
    /// single-segment paths) degrades to the `"default"` bucket.
    pub fn analyze<'a, I>(paths: I) -> ExtractionRule
    where
        I: IntoIterator<Item = &'a str>,
    {
        let segmented: Vec<(String, Vec<&str>)> = paths
            .into_iter()
            .map(|p| (p.to_string(), segments(p)))
            .collect();
        let max_len = segmented.iter().map(|(_, s)| s.len()).max().unwrap_or(0);

        let mut ranking = Vec::with_capacity(max_len);
        for index in 0..max_len {
            let mut distinct: HashSet<&str> = HashSet::new();
            let mut valid = 0usize;
            for (_, segs) in &segmented {
                if let Some(seg) = segs.get(index) {
                    // Placeholders count toward the denominator but never
                    // toward distinctness.
                    valid += 1;
                    if !is_placeholder(seg) {
                        distinct.insert(seg);
                    }
                }
            }
            let uniqueness = if valid > 0 {
                distinct.len() as f64 / valid as f64
            } else {
                0.0
            };
            debug!(
                index,
                distinct = distinct.len(),
                valid,
                uniqueness,
                "scored segment position"
            );
            ranking.push(PositionScore {
                index,
                uniqueness,
                distinct: distinct.len(),
            });
        }

        // Documented comparator: uniqueness desc, distinct-count desc, index
        // asc. Not left to stable-sort accident.
        ranking.sort_by(|a, b| {
            b.uniqueness
                .total_cmp(&a.uniqueness)
                .then(b.distinct.cmp(&a.distinct))
                .then(a.index.cmp(&b.index))
        });

        let selected = ranking.first().map(|s| s.index).unwrap_or(0);
        debug!(selected, "selected segment position for object extraction");

        let mut rule = ExtractionRule {
            selected,
            ranking,
            names: IndexMap::new(),
        };
        for (path, segs) in &segmented {
            let name = rule.assign(segs);
            rule.names.insert(path.clone(), name);
        }
        rule
    }

    /// The winning segment index (0 when the spec had no paths).
    pub fn segment_index(&self) -> usize {
        self.selected
    }

    /// Object name for a path. Memoized for every analyzed path; unseen
    /// paths go through the same fallback chain, so lookups stay consistent
    /// within a run.
    pub fn object_for(&self, path: &str) -> String {
        if let Some(name) = self.names.get(path) {
            return name.clone();
        }
        self.assign(&segments(path))
    }

    fn assign(&self, segs: &[&str]) -> String {
        if segs.is_empty() {
            return "default".to_string();
        }
        if let Some(seg) = segs.get(self.selected) {
            if !is_placeholder(seg) {
                return seg.to_string();
            }
            // Placeholder at the selected index: take the next-best ranked
            // index that yields a literal for this path.
            for score in self.ranking.iter().skip(1) {
                if let Some(seg) = segs.get(score.index) {
                    if !is_placeholder(seg) {
                        return seg.to_string();
                    }
                }
            }
            return "default".to_string();
        }
        // Path shorter than the selected index: last literal segment.
        segs.iter()
            .rev()
            .find(|s| !is_placeholder(s))
            .map(|s| s.to_string())
            .unwrap_or_else(|| "default".to_string())
    }
}
