//! # apimap
//!
//! **apimap** partitions the endpoints of an OpenAPI/Swagger document into
//! named *objects* — logical groups of paths and methods — for downstream
//! selection and code generation. It is built for the ugly end of the spec
//! spectrum: trivial single-file documents and large, irregular, multi-file
//! enterprise specs alike, using only structural heuristics (no schema
//! registry, no assumption of tag discipline).
//!
//! ## Architecture
//!
//! - **[`spec`]** — document loading (path or URL, JSON with YAML fallback,
//!   optional large-spec filtering) and the typed data model
//! - **[`extract`]** — the position heuristic that picks which path segment
//!   names an object, the method-inference fallback for unresolved
//!   references, and the assembler with its degeneracy fallback
//! - **[`resolver`]** — path-level `$ref` resolution across external files
//! - **[`index`]** — tag index, keyword search, and top-N ranking for
//!   large specs
//! - **[`context`]** — caller-owned source/target maps for selection
//!
//! ## Pipeline
//!
//! ```text
//! load → Spec::from_value → ExtractionRule::analyze → resolve_paths → assemble
//! ```
//!
//! An extraction run is a pure function from spec bytes to an object map
//! (plus the file/network reads that reference resolution triggers). All
//! state is taken and returned explicitly; nothing is cached across calls.
//!
//! ## Quick start
//!
//! ```no_run
//! use apimap::extract_objects;
//!
//! # fn main() -> Result<(), apimap::LoadError> {
//! let extraction = extract_objects("openapi.yaml")?;
//! for (name, group) in &extraction.objects {
//!     println!("{name}: {} methods", group.methods.len());
//! }
//! eprintln!(
//!     "{} paths, {}/{} refs resolved, strategy {}",
//!     extraction.report.total_paths,
//!     extraction.report.resolved_refs,
//!     extraction.report.external_refs,
//!     extraction.report.strategy,
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Loading is the only fatal stage: unresolved references degrade to
//! inferred methods, degenerate groupings fall back to tags and segments,
//! and a pathless spec yields an empty map. The returned
//! [`ExtractionReport`] carries the diagnostics a caller should surface so
//! low-confidence results stay visible.

pub mod cli;
pub mod context;
mod error;
pub mod extract;
pub mod index;
pub mod resolver;
pub mod spec;

pub use context::{ExtractionContext, MapKind, SelectionReport};
pub use error::LoadError;
pub use extract::{ExtractionReport, ExtractionRule, ExtractionStrategy};
pub use resolver::ResolutionReport;
pub use spec::{MethodEntry, ObjectGroup, ObjectMap, ParameterMeta, PathFilter, Spec, Verb};

use serde_json::Value;

/// The result of one extraction run: the object map handed to downstream
/// consumers, plus run-level diagnostics.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub objects: ObjectMap,
    pub report: ExtractionReport,
}

/// Run the full pipeline over a spec at a filesystem path or `http(s)` URL.
pub fn extract_objects(location: &str) -> Result<Extraction, LoadError> {
    let value = spec::load(location)?;
    Ok(extract_from_value(location, value))
}

/// Like [`extract_objects`], but drops `paths` entries failing `filter`
/// right after decode — the large-spec mode for multi-megabyte documents.
pub fn extract_objects_filtered(
    location: &str,
    filter: &PathFilter,
) -> Result<Extraction, LoadError> {
    let value = spec::load_filtered(location, filter)?;
    Ok(extract_from_value(location, value))
}

/// Run extraction over an already decoded document. `location` is still
/// needed: external references are resolved relative to it.
pub fn extract_from_value(location: &str, value: Value) -> Extraction {
    let mut spec = Spec::from_value(value);
    let rule = ExtractionRule::analyze(spec.paths.keys().map(String::as_str));
    let resolution = resolver::resolve_paths(location, &mut spec.paths);
    let (objects, report) = extract::assemble(&spec, &rule, &resolution);
    Extraction { objects, report }
}

/// Load a spec and resolve its external references, without assembling.
/// This is the entry point for the [`index`] views, which want the resolved
/// [`Spec`] rather than the object map.
pub fn load_resolved_spec(location: &str) -> Result<(Spec, ResolutionReport), LoadError> {
    let value = spec::load(location)?;
    let mut spec = Spec::from_value(value);
    let resolution = resolver::resolve_paths(location, &mut spec.paths);
    Ok((spec, resolution))
}
