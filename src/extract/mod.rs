//! Object extraction: the position heuristic, the inference fallback for
//! unresolved references, and the assembler that turns a resolved spec into
//! the object → methods map.

mod assemble;
mod infer;
mod position;

pub use assemble::{assemble, ExtractionReport, ExtractionStrategy};
pub use infer::{guess_tag_from_ref, infer_methods};
pub use position::{is_placeholder, segment_object_name, segments, ExtractionRule, PositionScore};
