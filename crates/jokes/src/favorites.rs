use crate::prelude::{println, *};
use colored::Colorize;
use jokes_core::favorites::FavoritesStore;
use jokes_core::joke::{Joke, JokeId};
use serde::Serialize;

use crate::context::AppContext;
use crate::fetch::format_joke;

#[derive(Debug, clap::Parser)]
#[command(name = "favorites")]
#[command(about = "Manage favorite jokes stored locally")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List every favorite joke
    #[clap(name = "list")]
    List(ListOptions),

    /// Show a single favorite joke
    #[clap(name = "show")]
    Show(ShowOptions),

    /// Remove a joke from favorites
    #[clap(name = "remove")]
    Remove(RemoveOptions),
}

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Only show a short preview of each joke
    #[arg(long)]
    pub short: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct ShowOptions {
    /// Joke ID
    pub id: JokeId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RemoveOptions {
    /// Joke ID
    pub id: JokeId,
}

#[derive(Debug, Serialize, Clone)]
pub struct FavoritesOutput {
    pub jokes: Vec<Joke>,
}

pub async fn run(app: App, ctx: &AppContext) -> Result<()> {
    match app.command {
        Commands::List(options) => list(ctx, options.json, options.short).await,
        Commands::Show(options) => show(ctx, options).await,
        Commands::Remove(options) => remove(ctx, options).await,
    }
}

/// Prints every stored favorite
pub async fn list(ctx: &AppContext, json: bool, short: bool) -> Result<()> {
    let jokes = ctx.with_favorites(|store| store.list_all()).await?;
    let output = FavoritesOutput { jokes };

    if json {
        println!("{}", format_favorites_json(&output)?);
    } else {
        println!("{}", format_favorites_text(&output, short));
    }

    Ok(())
}

async fn show(ctx: &AppContext, options: ShowOptions) -> Result<()> {
    let id = options.id;
    let joke = ctx
        .with_favorites(move |store| store.get(id))
        .await?
        .ok_or_else(|| eyre!("Joke {} is not in favorites", id))?;

    if options.json {
        let json = serde_json::to_string_pretty(&joke)
            .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
        println!("{json}");
    } else {
        println!("{}", format_joke(&joke, false));
    }

    Ok(())
}

async fn remove(ctx: &AppContext, options: RemoveOptions) -> Result<()> {
    let id = options.id;
    let outcome = ctx.with_favorites(move |store| store.delete(id)).await?;

    println!("Joke {}: {}", id, outcome.message());
    Ok(())
}

fn format_favorites_json(output: &FavoritesOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_favorites_text(output: &FavoritesOutput, short: bool) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&format!(
        "{}\n",
        format!("FAVORITES ({})", output.jokes.len())
            .bright_yellow()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_yellow()));

    if output.jokes.is_empty() {
        result.push_str(&format!(
            "\n{}\n  {}\n",
            "No favorite jokes yet. Save some with:".yellow(),
            "jokes fetch <category> --save".cyan()
        ));
        return result;
    }

    for joke in &output.jokes {
        result.push('\n');
        result.push_str(&format_joke(joke, short));
    }

    result.push_str(&format!(
        "\n{}: {}\n",
        "To remove one".bright_white().bold(),
        "jokes favorites remove <id>".cyan()
    ));

    result
}
