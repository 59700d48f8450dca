use crate::prelude::*;
use clap::Parser;

mod categories;
mod client;
mod config;
mod context;
mod error;
mod favorites;
mod fetch;
mod prelude;
mod store;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse JokeAPI jokes by category and keep your favorites offline"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// JokeAPI base URL
    #[clap(
        long,
        env = "JOKES_API_URL",
        global = true,
        default_value = config::DEFAULT_API_URL
    )]
    api_url: String,

    /// Path of the favorites database
    #[clap(long, env = "JOKES_DATABASE", global = true)]
    database: Option<std::path::PathBuf>,

    /// HTTP request timeout in seconds
    #[clap(long, env = "JOKES_TIMEOUT", global = true, default_value = "10")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "JOKES_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List joke categories
    Categories(crate::categories::CategoriesOptions),

    /// Fetch jokes from a category
    Fetch(crate::fetch::FetchOptions),

    /// Manage favorite jokes stored locally
    Favorites(crate::favorites::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();
    let config = config::JokesConfig::from_global(&app.global)?;
    let ctx = context::AppContext::new(config)?;

    match app.command {
        SubCommands::Categories(options) => crate::categories::run(options, &ctx).await,
        SubCommands::Fetch(options) => crate::fetch::run(options, &ctx).await,
        SubCommands::Favorites(sub_app) => crate::favorites::run(sub_app, &ctx).await,
    }
}
