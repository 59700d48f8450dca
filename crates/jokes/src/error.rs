use jokes_core::response::ApiError;

// Variants wrapping a source error leave it out of their own message; the
// report chain prints it.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with HTTP {status}")]
    Http { status: reqwest::StatusCode },

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Unexpected response body")]
    Decode(#[from] serde_json::Error),

    #[error("Favorites database error")]
    Storage(#[from] rusqlite::Error),

    #[error("Favorites database lock poisoned")]
    LockPoisoned,

    #[error("Background task failed")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_eyre::eyre::eyre;

    #[test]
    fn test_storage_cause_printed_once_in_chain() {
        let report = eyre!(Error::from(rusqlite::Error::QueryReturnedNoRows))
            .wrap_err("Failed to save joke");
        let text = format!("{report:#}");

        assert!(text.starts_with("Failed to save joke: Favorites database error"));
        assert_eq!(text.matches("Query returned no rows").count(), 1);
    }

    #[test]
    fn test_api_error_shows_notice_once() {
        let api = ApiError {
            code: Some(106),
            message: Some("No matching joke found".to_string()),
            additional_info: None,
            caused_by: Vec::new(),
            internal_error: false,
        };
        let text = format!("{:#}", eyre!(Error::from(api)));

        assert_eq!(text, "No matching joke found");
    }
}
