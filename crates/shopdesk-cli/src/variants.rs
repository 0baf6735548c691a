//! `variants` command handlers.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context;
use clap::Subcommand;
use rust_decimal::Decimal;
use shopdesk_core::{AppConfig, VariantDefaults, VariantRow};

/// Sub-commands available under `variants`.
#[derive(Debug, Subcommand)]
pub enum VariantCommands {
    /// Generate one SKU row per combination of selected attribute values
    Generate {
        /// Selection file: an object of attribute key to selected values
        #[arg(long)]
        input: PathBuf,

        /// Product slug used as the SKU prefix
        #[arg(long, required_unless_present = "name", conflicts_with = "name")]
        slug: Option<String>,

        /// Product name; slugified when no slug is given
        #[arg(long)]
        name: Option<String>,

        /// Price pre-filled into every row (defaults to SHOPDESK_DEFAULT_PRICE)
        #[arg(long)]
        price: Option<Decimal>,

        /// Stock pre-filled into every row (defaults to SHOPDESK_DEFAULT_STOCK)
        #[arg(long)]
        stock: Option<u32>,

        /// Image reference pre-filled into every row
        #[arg(long)]
        image: Option<String>,

        /// Print rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print how many rows a selection would generate
    Count {
        /// Selection file: an object of attribute key to selected values
        #[arg(long)]
        input: PathBuf,
    },
}

pub(crate) fn run(command: VariantCommands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        VariantCommands::Generate {
            input,
            slug,
            name,
            price,
            stock,
            image,
            json,
        } => {
            let selection = shopdesk_core::load_selection(&input)
                .with_context(|| format!("loading selection from {}", input.display()))?;
            let slug = resolve_slug(slug, name.as_deref())?;

            let mut defaults = VariantDefaults::from_config(config);
            if let Some(price) = price {
                defaults.price = price;
            }
            if let Some(stock) = stock {
                defaults.stock = stock;
            }
            defaults.image = image;

            let rows = shopdesk_core::build_variant_rows(
                &slug,
                &selection,
                &defaults,
                config.max_combinations,
            )?;
            tracing::info!(slug = %slug, rows = rows.len(), "generated variant rows");

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_rows(&rows));
            }
            Ok(())
        }
        VariantCommands::Count { input } => {
            let selection = shopdesk_core::load_selection(&input)
                .with_context(|| format!("loading selection from {}", input.display()))?;
            let count = shopdesk_core::combination_count(&selection)
                .ok_or_else(|| anyhow::anyhow!("selection produces too many combinations to count"))?;
            if count > config.max_combinations {
                tracing::warn!(
                    count,
                    limit = config.max_combinations,
                    "selection exceeds SHOPDESK_MAX_COMBINATIONS"
                );
            }
            println!("{count}");
            Ok(())
        }
    }
}

/// Pick the SKU prefix: an explicit slug wins, otherwise the product name is
/// slugified.
pub(crate) fn resolve_slug(slug: Option<String>, name: Option<&str>) -> anyhow::Result<String> {
    let slug = match (slug, name) {
        (Some(slug), _) => slug,
        (None, Some(name)) => shopdesk_core::slugify(name),
        (None, None) => anyhow::bail!("either --slug or --name is required"),
    };
    if slug.trim().is_empty() {
        anyhow::bail!("product slug is empty");
    }
    Ok(slug)
}

pub(crate) fn render_rows(rows: &[VariantRow]) -> String {
    let mut out = format!("{:<40}{:<12}{:<8}ATTRIBUTES\n", "SKU", "PRICE", "STOCK");
    for row in rows {
        let attributes = row
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(
            out,
            "{:<40}{:<12}{:<8}{}",
            row.sku, row.price, row.stock, attributes
        );
    }
    out
}
