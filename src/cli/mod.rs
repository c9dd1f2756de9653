//! Command-line interface for the `apimap` binary.
//!
//! Four subcommands, all thin wrappers over the library:
//!
//! - `extract` — write the full object map as JSON
//! - `objects` — list object names with method counts
//! - `search` — keyword-relevance search over a spec
//! - `top` — top-N objects by endpoint count and CRUD coverage
//!
//! Diagnostics (path counts, resolved/unresolved references, chosen
//! strategy) go to stderr via `tracing`; primary output goes to stdout.

mod commands;

pub use commands::{run_cli, Cli, Commands};
