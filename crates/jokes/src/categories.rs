use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use jokes_core::categories::is_favorites;
use jokes_core::display::{abbreviation, format_timestamp_ms};
use serde::Serialize;

use crate::context::AppContext;

#[derive(Debug, clap::Args, Clone)]
pub struct CategoriesOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Category listing as shown to the user
#[derive(Debug, Serialize, Clone)]
pub struct CategoriesOutput {
    pub categories: Vec<String>,
    pub fetched_at: Option<String>,
}

pub async fn run(options: CategoriesOptions, ctx: &AppContext) -> Result<()> {
    if ctx.config.verbose {
        eprintln!("JokeAPI Base: {}", ctx.client.base_url());
    }

    let output = categories_data(ctx).await?;

    if options.json {
        println!("{}", format_categories_json(&output)?);
    } else {
        println!("{}", format_categories_table(&output));
    }

    Ok(())
}

/// Fetches the category listing, including the local Favorites entry
pub async fn categories_data(ctx: &AppContext) -> Result<CategoriesOutput> {
    let response = ctx
        .client
        .categories()
        .await
        .context("Failed to fetch categories")?;
    let fetched_at = format_timestamp_ms(response.timestamp);
    let categories = response.into_listing().map_err(Error::from)?;

    Ok(CategoriesOutput {
        categories,
        fetched_at,
    })
}

fn format_categories_json(output: &CategoriesOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_categories_table(output: &CategoriesOutput) -> String {
    if output.categories.is_empty() {
        return format!("{}", "No categories available.".yellow());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["", "CATEGORY", "FETCH WITH"]);

    for category in &output.categories {
        let (badge, command) = if is_favorites(category) {
            ("★".to_string(), "jokes favorites list".to_string())
        } else {
            (abbreviation(category), format!("jokes fetch {category}"))
        };
        table.add_row(prettytable::row![badge, category, command]);
    }

    let mut result = table.to_string();
    if let Some(fetched_at) = &output.fetched_at {
        result.push_str(&format!("\n{} {}", "Fetched at".green(), fetched_at.bright_black()));
    }
    result
}
