//! `categories` command handlers.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;
use shopdesk_core::{CategoryNode, FlatCategory};

/// Sub-commands available under `categories`.
#[derive(Debug, Subcommand)]
pub enum CategoryCommands {
    /// Print the category hierarchy as an indented tree
    Tree {
        /// Category export: a JSON/YAML array or a page with a `data` array
        #[arg(long)]
        input: PathBuf,

        /// Keep only branches whose name or slug contains this keyword
        #[arg(long)]
        search: Option<String>,

        /// Print the forest as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the hierarchy as a depth-first table
    Flat {
        /// Category export: a JSON/YAML array or a page with a `data` array
        #[arg(long)]
        input: PathBuf,

        /// Keep only branches whose name or slug contains this keyword
        #[arg(long)]
        search: Option<String>,

        /// Print the rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

pub(crate) fn run(command: CategoryCommands) -> anyhow::Result<()> {
    match command {
        CategoryCommands::Tree {
            input,
            search,
            json,
        } => {
            let forest = load_forest(&input, search.as_deref())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&forest)?);
            } else {
                print!("{}", render_tree(&forest));
            }
            Ok(())
        }
        CategoryCommands::Flat {
            input,
            search,
            json,
        } => {
            let forest = load_forest(&input, search.as_deref())?;
            let rows = shopdesk_core::flatten_tree(&forest);
            if json {
                println!("{}", render_flat_json(&rows)?);
            } else {
                print!("{}", render_flat(&rows));
            }
            Ok(())
        }
    }
}

/// Load, build, and optionally search a category export.
fn load_forest(input: &Path, search: Option<&str>) -> anyhow::Result<Vec<CategoryNode>> {
    let records = shopdesk_core::load_categories(input)
        .with_context(|| format!("loading categories from {}", input.display()))?;

    let unreachable = shopdesk_core::unreachable_ids(&records);
    if !unreachable.is_empty() {
        tracing::warn!(
            count = unreachable.len(),
            ids = ?unreachable,
            "categories with cyclic parent references are not shown"
        );
    }

    let forest = shopdesk_core::build_tree(&records);
    tracing::info!(
        records = records.len(),
        roots = forest.len(),
        "built category tree"
    );

    Ok(match search {
        Some(keyword) => {
            let filtered = shopdesk_core::search_tree(&forest, keyword);
            tracing::info!(
                keyword,
                matched = shopdesk_core::count_nodes(&filtered),
                "filtered category tree"
            );
            filtered
        }
        None => forest,
    })
}

pub(crate) fn render_tree(forest: &[CategoryNode]) -> String {
    if forest.is_empty() {
        return "no categories\n".to_string();
    }

    let mut out = String::new();
    for row in shopdesk_core::flatten_tree(forest) {
        let _ = writeln!(
            out,
            "{}{} ({}) #{}",
            "  ".repeat(row.depth),
            row.name,
            row.slug,
            row.id
        );
    }
    out
}

pub(crate) fn render_flat(rows: &[FlatCategory]) -> String {
    let mut out = format!("{:<7}{:<8}{:<8}{:<32}SLUG\n", "DEPTH", "ID", "PARENT", "NAME");
    for row in rows {
        let parent = row.parent_id.map(|p| p.to_string()).unwrap_or_default();
        let name = if row.name.chars().count() > 30 {
            format!("{}...", row.name.chars().take(27).collect::<String>())
        } else {
            row.name.clone()
        };
        let _ = writeln!(
            out,
            "{:<7}{:<8}{:<8}{:<32}{}",
            row.depth, row.id, parent, name, row.slug
        );
    }
    out
}

pub(crate) fn render_flat_json(rows: &[FlatCategory]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}
