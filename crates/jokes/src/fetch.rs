use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use jokes_core::categories::is_favorites;
use jokes_core::display::{abbreviation, amount_notice, preview, title};
use jokes_core::favorites::{FavoritesStore, InsertOutcome};
use jokes_core::joke::{ContentFlag, Joke, JokeId, JokePayload};
use jokes_core::query::{build_query, JokeQuery};
use log::warn;
use serde::Serialize;

use crate::context::AppContext;

#[derive(Debug, clap::Args, Clone)]
pub struct FetchOptions {
    /// Category to fetch from, e.g. "Programming", "Miscellaneous" or "Any".
    /// "Favorites" lists the locally stored jokes instead.
    #[arg(value_name = "CATEGORY")]
    pub category: String,

    /// Exclude jokes carrying this content flag (repeatable)
    #[arg(short, long = "blacklist", value_name = "FLAG")]
    pub blacklist: Vec<ContentFlag>,

    /// Number of jokes to request (defaults to 4 when missing or not a number)
    #[arg(short, long, env = "JOKES_AMOUNT")]
    pub amount: Option<String>,

    /// Only single-part jokes
    #[arg(long)]
    pub single: bool,

    /// Only two-part jokes
    #[arg(long)]
    pub twopart: bool,

    /// Save every fetched joke to favorites
    #[arg(long)]
    pub save: bool,

    /// Save only the fetched joke with this id (repeatable)
    #[arg(long = "save-id", value_name = "ID", conflicts_with = "save")]
    pub save_ids: Vec<JokeId>,

    /// Only show a short preview of each joke
    #[arg(long)]
    pub short: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of saving one fetched joke
#[derive(Debug, Serialize, Clone)]
pub struct SaveReport {
    pub id: JokeId,
    pub outcome: Option<InsertOutcome>,
    pub error: Option<String>,
}

/// Fetched jokes together with the query that produced them
#[derive(Debug, Serialize, Clone)]
pub struct FetchOutput {
    pub category: String,
    pub query: JokeQuery,
    pub jokes: Vec<Joke>,
    pub notice: Option<String>,
    pub saved: Vec<SaveReport>,
}

pub async fn run(options: FetchOptions, ctx: &AppContext) -> Result<()> {
    if is_favorites(&options.category) {
        return crate::favorites::list(ctx, options.json, options.short).await;
    }

    let query = build_query(
        &options.blacklist,
        options.amount.as_deref(),
        options.single,
        options.twopart,
    );

    if ctx.config.verbose {
        eprintln!(
            "Fetching {} jokes: {:?}",
            options.category,
            query.query_pairs()
        );
    }

    let mut output = fetch_data(ctx, &options.category, query).await?;

    if options.save || !options.save_ids.is_empty() {
        let selected = select_for_saving(&output.jokes, options.save, &options.save_ids);
        output.saved = save_all(ctx, &selected).await;
        for id in unfetched_ids(&output.jokes, &options.save_ids) {
            output.saved.push(SaveReport {
                id,
                outcome: None,
                error: Some("not among the fetched jokes".to_string()),
            });
        }
    }

    if options.json {
        println!("{}", format_fetch_json(&output)?);
    } else {
        println!("{}", format_fetch_text(&output, options.short));
    }

    Ok(())
}

/// Fetches jokes for `category` and reports a received/requested mismatch
pub async fn fetch_data(ctx: &AppContext, category: &str, query: JokeQuery) -> Result<FetchOutput> {
    let jokes = match ctx.client.jokes(category, &query).await {
        Ok(jokes) => jokes,
        // The API's own explanation is shown as-is.
        Err(Error::Api(api)) => return Err(eyre!("{}", api.notice())),
        Err(e) => {
            return Err(eyre!(e).wrap_err(format!(
                "Failed to fetch jokes from {category}. Check your connection and try again"
            )))
        }
    };

    let notice = amount_notice(query.amount, jokes.len());

    Ok(FetchOutput {
        category: category.to_string(),
        query,
        jokes,
        notice,
        saved: Vec::new(),
    })
}

/// Jokes to store: all of them with `--save`, otherwise the ones named by `--save-id`
fn select_for_saving(jokes: &[Joke], all: bool, ids: &[JokeId]) -> Vec<Joke> {
    jokes
        .iter()
        .filter(|joke| all || ids.contains(&joke.id))
        .cloned()
        .collect()
}

/// Requested ids that the fetch did not return, without repeats
fn unfetched_ids(jokes: &[Joke], ids: &[JokeId]) -> Vec<JokeId> {
    let mut missing: Vec<JokeId> = Vec::new();
    for id in ids {
        if !jokes.iter().any(|joke| joke.id == *id) && !missing.contains(id) {
            missing.push(*id);
        }
    }
    missing
}

/// Stores each joke as favorite; failures are reported per joke and never abort
async fn save_all(ctx: &AppContext, jokes: &[Joke]) -> Vec<SaveReport> {
    let mut reports = Vec::with_capacity(jokes.len());

    for joke in jokes {
        let id = joke.id;
        let owned = joke.clone();
        let report = match ctx.with_favorites(move |store| store.insert(&owned)).await {
            Ok(outcome) => SaveReport {
                id,
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => {
                warn!("Failed to save joke {id}: {e:#}");
                SaveReport {
                    id,
                    outcome: None,
                    error: Some(format!("{e:#}")),
                }
            }
        };
        reports.push(report);
    }

    reports
}

fn format_fetch_json(output: &FetchOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render one joke: heading, then either its preview or its full content
pub fn format_joke(joke: &Joke, short: bool) -> String {
    let mut result = String::new();

    let marker = if joke.flags.is_clean() {
        String::new()
    } else {
        let names: Vec<&str> = joke.flags.set_flags().iter().map(|f| f.as_str()).collect();
        format!(" {}", format!("⚑ {}", names.join(", ")).red())
    };

    result.push_str(&format!(
        "{} {}{}\n",
        format!("[{}]", abbreviation(&joke.category)).yellow().bold(),
        title(joke).white().bold(),
        marker
    ));

    if short {
        result.push_str(&format!("    {}\n", preview(joke)));
        return result;
    }

    match &joke.payload {
        JokePayload::Single { text } => {
            result.push_str(&format!("    {text}\n"));
        }
        JokePayload::TwoPart { setup, delivery } => {
            result.push_str(&format!("    {setup}\n"));
            result.push_str(&format!("    {} {}\n", "→".cyan(), delivery.bright_white()));
        }
    }

    result
}

fn format_fetch_text(output: &FetchOutput, short: bool) -> String {
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&format!(
        "{}\n",
        format!("{} JOKES", output.category.to_uppercase())
            .bright_cyan()
            .bold()
    ));
    result.push_str(&format!("{}\n", "=".repeat(80).bright_cyan()));

    if output.jokes.is_empty() {
        result.push_str(&format!("\n{}\n", "No jokes returned.".yellow()));
    }

    for joke in &output.jokes {
        result.push('\n');
        result.push_str(&format_joke(joke, short));
    }

    if let Some(notice) = &output.notice {
        result.push_str(&format!("\n{}\n", notice.yellow()));
    }

    if !output.saved.is_empty() {
        result.push_str(&format!("\n{}\n", "FAVORITES".bright_yellow().bold()));
        for report in &output.saved {
            let line = match (&report.outcome, &report.error) {
                (Some(outcome), _) => format!("{}", outcome.message().green()),
                (None, Some(error)) => format!("{}", format!("Could not save: {error}").red()),
                (None, None) => String::new(),
            };
            result.push_str(&format!("  Joke {}: {}\n", report.id, line));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokes_core::joke::Flags;
    use std::time::Duration;
    use tempfile::TempDir;

    use crate::config::JokesConfig;

    fn context(database: std::path::PathBuf) -> AppContext {
        let config = JokesConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            database,
            timeout: Duration::from_secs(1),
            verbose: false,
        };
        AppContext::new(config).unwrap()
    }

    fn single(id: JokeId) -> Joke {
        Joke {
            id,
            category: "Programming".to_string(),
            lang: "en".to_string(),
            safe: true,
            flags: Flags::default(),
            payload: JokePayload::Single {
                text: "There are only 10 kinds of people in this world.".to_string(),
            },
        }
    }

    fn twopart(id: JokeId) -> Joke {
        Joke {
            id,
            category: "Pun".to_string(),
            lang: "en".to_string(),
            safe: false,
            flags: Flags {
                nsfw: true,
                ..Flags::default()
            },
            payload: JokePayload::TwoPart {
                setup: "Why did the scarecrow win an award?".to_string(),
                delivery: "He was outstanding in his field.".to_string(),
            },
        }
    }

    fn output(jokes: Vec<Joke>, requested: &str) -> FetchOutput {
        let query = build_query(&[ContentFlag::Racist], Some(requested), true, true);
        let notice = amount_notice(query.amount, jokes.len());
        FetchOutput {
            category: "Programming".to_string(),
            query,
            jokes,
            notice,
            saved: Vec::new(),
        }
    }

    #[test]
    fn test_format_joke_full_twopart() {
        colored::control::set_override(false);
        let text = format_joke(&twopart(3), false);

        assert!(text.contains("[Pu] Pun: Joke 3"));
        assert!(text.contains("⚑ nsfw"));
        assert!(text.contains("Why did the scarecrow win an award?"));
        assert!(text.contains("→ He was outstanding in his field."));
    }

    #[test]
    fn test_format_joke_short_uses_preview() {
        colored::control::set_override(false);
        let text = format_joke(&single(1), true);

        assert!(text.contains("There are..."));
        assert!(!text.contains("kinds of people"));
        assert!(!text.contains("⚑"));
    }

    #[test]
    fn test_format_fetch_text_shows_amount_notice() {
        colored::control::set_override(false);
        let text = format_fetch_text(&output(vec![single(1)], "4"), false);

        assert!(text.contains("PROGRAMMING JOKES"));
        assert!(text.contains("Received 1 jokes"));
    }

    #[test]
    fn test_format_fetch_text_empty() {
        colored::control::set_override(false);
        let text = format_fetch_text(&output(Vec::new(), "2"), false);
        assert!(text.contains("No jokes returned."));
    }

    #[test]
    fn test_format_fetch_text_save_reports() {
        colored::control::set_override(false);
        let mut out = output(vec![single(1), twopart(2)], "2");
        out.saved = vec![
            SaveReport {
                id: 1,
                outcome: Some(InsertOutcome::Inserted),
                error: None,
            },
            SaveReport {
                id: 2,
                outcome: None,
                error: Some("disk full".to_string()),
            },
        ];

        let text = format_fetch_text(&out, true);
        assert!(text.contains("Joke 1: Saved to favorites"));
        assert!(text.contains("Joke 2: Could not save: disk full"));
        assert!(out.notice.is_none());
    }

    #[test]
    fn test_select_for_saving() {
        let jokes = vec![single(1), twopart(2), single(3)];

        let all: Vec<JokeId> = select_for_saving(&jokes, true, &[])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(all, vec![1, 2, 3]);

        let chosen: Vec<JokeId> = select_for_saving(&jokes, false, &[3, 1, 9])
            .iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(chosen, vec![1, 3]);

        assert!(select_for_saving(&jokes, false, &[]).is_empty());
    }

    #[test]
    fn test_unfetched_ids() {
        let jokes = vec![single(1), twopart(2)];
        assert_eq!(unfetched_ids(&jokes, &[2, 9, 7, 9]), vec![9, 7]);
        assert!(unfetched_ids(&jokes, &[1, 2]).is_empty());
    }

    #[tokio::test]
    async fn test_save_all_storage_failure_is_reported_per_joke() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be opened as a database file.
        let ctx = context(dir.path().to_path_buf());

        let reports = save_all(&ctx, &[single(1), twopart(2)]).await;

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].id, 1);
        assert_eq!(reports[1].id, 2);
        for report in &reports {
            assert!(report.outcome.is_none());
            let error = report.error.as_deref().unwrap();
            assert!(error.starts_with("Failed to open favorites database"));
        }
    }

    #[tokio::test]
    async fn test_save_all_twice_reports_already_present() {
        let dir = TempDir::new().unwrap();
        let ctx = context(dir.path().join("favorites.db"));
        let jokes = vec![single(1), twopart(2)];

        let first = save_all(&ctx, &jokes).await;
        let second = save_all(&ctx, &jokes).await;

        assert!(first
            .iter()
            .all(|r| r.outcome == Some(InsertOutcome::Inserted) && r.error.is_none()));
        assert!(second
            .iter()
            .all(|r| r.outcome == Some(InsertOutcome::AlreadyPresent) && r.error.is_none()));
    }

    #[test]
    fn test_format_fetch_json() {
        let json = format_fetch_json(&output(vec![twopart(2)], "1")).unwrap();

        assert!(json.contains("\"blacklist\": \"racist\""));
        assert!(json.contains("\"type\": \"twopart\""));
        assert!(json.contains("\"delivery\""));
        assert!(json.contains("\"saved\": []"));
    }
}
