use crate::context::save_object_map;
use crate::index::{search_by_keywords, top_objects};
use crate::spec::PathFilter;
use clap::{Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "apimap")]
#[command(about = "Partition OpenAPI endpoints into named objects", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract the object map from a spec and write it as JSON
    Extract {
        /// Spec location: filesystem path or http(s) URL
        #[arg(short, long)]
        spec: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Keep only paths whose methods declare one of these tags
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Keep only these exact path templates
        #[arg(long = "path")]
        paths: Vec<String>,
    },
    /// List extracted object names with method counts
    Objects {
        #[arg(short, long)]
        spec: String,
    },
    /// Keyword-relevance search over descriptions, operation ids and paths
    Search {
        #[arg(short, long)]
        spec: String,

        /// Keywords to score by
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Rank objects by endpoint count and CRUD coverage
    Top {
        #[arg(short, long)]
        spec: String,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
}

fn path_filter(tags: Vec<String>, paths: Vec<String>) -> PathFilter {
    PathFilter {
        paths: (!paths.is_empty()).then(|| paths.into_iter().collect::<HashSet<_>>()),
        tags: (!tags.is_empty()).then(|| tags.into_iter().collect::<HashSet<_>>()),
    }
}

pub fn run_cli() -> anyhow::Result<()> {
    // Diagnostics to stderr so piped stdout stays clean JSON.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract {
            spec,
            out,
            pretty,
            tags,
            paths,
        } => {
            let filter = path_filter(tags, paths);
            let extraction = if filter.is_empty() {
                crate::extract_objects(&spec)?
            } else {
                crate::extract_objects_filtered(&spec, &filter)?
            };
            let report = &extraction.report;
            info!(
                total_paths = report.total_paths,
                resolved_refs = report.resolved_refs,
                external_refs = report.external_refs,
                inferred_paths = report.inferred_paths,
                strategy = %report.strategy,
                segment_index = report.segment_index,
                objects = report.object_count,
                "extraction finished"
            );
            match out {
                Some(path) => {
                    save_object_map(&path, &extraction.objects)?;
                    info!(out = %path.display(), "object map written");
                }
                None => {
                    let json = if pretty {
                        serde_json::to_string_pretty(&extraction.objects)?
                    } else {
                        serde_json::to_string(&extraction.objects)?
                    };
                    println!("{json}");
                }
            }
            Ok(())
        }
        Commands::Objects { spec } => {
            let extraction = crate::extract_objects(&spec)?;
            for (name, group) in &extraction.objects {
                println!("{name}\t{} methods", group.methods.len());
            }
            Ok(())
        }
        Commands::Search { spec, keywords } => {
            let (resolved, _) = crate::load_resolved_spec(&spec)?;
            let results = search_by_keywords(&resolved, &keywords);
            for (tag, group) in &results {
                println!("{tag} (score {})", group.relevance_score);
                for (path, hit) in &group.methods {
                    println!("  {} {path}  {}", hit.method.verb, hit.method.operation);
                }
            }
            Ok(())
        }
        Commands::Top { spec, limit } => {
            let (resolved, _) = crate::load_resolved_spec(&spec)?;
            let top = top_objects(&resolved, limit);
            for (name, group) in &top {
                println!(
                    "{name}\t{} paths",
                    group.path_count.unwrap_or(group.methods.len())
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_with_filters() {
        let cli = Cli::try_parse_from([
            "apimap", "extract", "--spec", "api.yaml", "--tag", "books", "--tag", "authors",
            "--pretty",
        ])
        .expect("parse");
        match cli.command {
            Commands::Extract {
                spec, tags, pretty, ..
            } => {
                assert_eq!(spec, "api.yaml");
                assert_eq!(tags, vec!["books", "authors"]);
                assert!(pretty);
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_parse_search_requires_keywords() {
        assert!(Cli::try_parse_from(["apimap", "search", "--spec", "api.yaml"]).is_err());
        let cli = Cli::try_parse_from(["apimap", "search", "--spec", "api.yaml", "user", "group"])
            .expect("parse");
        match cli.command {
            Commands::Search { keywords, .. } => assert_eq!(keywords, vec!["user", "group"]),
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn test_parse_top_default_limit() {
        let cli = Cli::try_parse_from(["apimap", "top", "--spec", "api.yaml"]).expect("parse");
        match cli.command {
            Commands::Top { limit, .. } => assert_eq!(limit, 10),
            _ => panic!("wrong subcommand"),
        }
    }
}
