//! Spec loading and data model.
//!
//! [`load`] fetches a document from a path or URL and decodes it (JSON first,
//! YAML fallback); [`Spec::from_value`] reduces the decoded tree to the typed
//! model the rest of the engine consumes. Path entries are classified at
//! parse time as inline method maps or external `$ref` pointers — see
//! [`PathEntry`].

mod load;
mod types;

pub use load::{decode, load, load_filtered, PathFilter};
pub use types::{
    default_operation_id, parse_path_entry, MethodEntry, MethodMap, ObjectGroup, ObjectMap,
    ParameterMeta, PathEntry, PathMap, Spec, Verb,
};
