use crate::prelude::*;
use jokes_core::favorites::FavoritesStore;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::client::JokeApiClient;
use crate::config::JokesConfig;
use crate::store::SqliteFavorites;

/// Process-wide collaborators shared by every command
///
/// The HTTP client is built eagerly; the favorites database is only opened
/// the first time a command needs it.
pub struct AppContext {
    pub config: JokesConfig,
    pub client: JokeApiClient,
    favorites: OnceCell<Arc<SqliteFavorites>>,
}

impl AppContext {
    pub fn new(config: JokesConfig) -> Result<Self> {
        let client = JokeApiClient::new(&config)?;

        Ok(Self {
            config,
            client,
            favorites: OnceCell::new(),
        })
    }

    pub async fn favorites(&self) -> Result<Arc<SqliteFavorites>> {
        let store = self
            .favorites
            .get_or_try_init(|| async {
                let path = self.config.database.clone();
                let store = tokio::task::spawn_blocking(move || SqliteFavorites::open(&path))
                    .await
                    .map_err(Error::from)??;
                Ok::<_, Error>(Arc::new(store))
            })
            .await
            .with_context(|| {
                format!(
                    "Failed to open favorites database at {}",
                    self.config.database.display()
                )
            })?;

        Ok(Arc::clone(store))
    }

    /// Run a favorites store operation off the async runtime
    pub async fn with_favorites<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SqliteFavorites) -> Result<T, <SqliteFavorites as FavoritesStore>::Error>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let store = self.favorites().await?;
        let result = tokio::task::spawn_blocking(move || f(store.as_ref()))
            .await
            .map_err(Error::from)??;
        Ok(result)
    }
}
