use crate::error::Error;
use jokes_core::joke::Joke;
use jokes_core::query::JokeQuery;
use jokes_core::response::{CategoriesResponse, JokesResponse};
use log::debug;

use crate::config::JokesConfig;

/// HTTP client for the JokeAPI endpoints
///
/// Built once by the composition root and shared by every command.
#[derive(Debug, Clone)]
pub struct JokeApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl JokeApiClient {
    pub fn new(config: &JokesConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("jokes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /categories`
    pub async fn categories(&self) -> Result<CategoriesResponse, Error> {
        let url = format!("{}/categories", self.base_url);
        debug!("GET {url}");

        let body = self.get_body(&url, &[]).await?;
        let response: CategoriesResponse = serde_json::from_str(&body)?;
        Ok(response)
    }

    /// `GET /joke/{category}` with the given query
    pub async fn jokes(&self, category: &str, query: &JokeQuery) -> Result<Vec<Joke>, Error> {
        let url = format!(
            "{}/joke/{}",
            self.base_url,
            urlencoding::encode(category)
        );
        let pairs = query.query_pairs();
        debug!("GET {url} {pairs:?}");

        let body = self.get_body(&url, &pairs).await?;
        let response = JokesResponse::parse(&body)?;
        Ok(response.into_result()?)
    }

    /// Send the request and return the body
    ///
    /// JokeAPI answers some application errors with a non-2xx status and an
    /// `error: true` body. Those bodies are returned so the caller can surface
    /// the API's own message; other non-2xx responses become [`Error::Http`].
    async fn get_body(&self, url: &str, query: &[(&str, String)]) -> Result<String, Error> {
        let response = self.http.get(url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() && !carries_api_error(&body) {
            return Err(Error::Http { status });
        }

        Ok(body)
    }
}

fn carries_api_error(body: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(body)
        .map(|value| value.get("error") == Some(&serde_json::Value::Bool(true)))
        .unwrap_or(false)
}
