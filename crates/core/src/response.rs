//! JokeAPI response envelopes
//!
//! Both endpoints answer with an `error` boolean. When it is `true` the body
//! carries an error description instead of data; [`ApiError`] is built from
//! those fields so callers can tell application errors from transport ones.

use serde::{Deserialize, Serialize};

use crate::categories::{resolve_categories, CategoryAlias};
use crate::joke::Joke;

/// Application-level error reported by the API with `error: true`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    pub code: Option<i32>,
    pub message: Option<String>,
    pub additional_info: Option<String>,
    pub caused_by: Vec<String>,
    pub internal_error: bool,
}

impl ApiError {
    /// Human-readable text to show the user, verbatim from the API
    pub fn notice(&self) -> String {
        self.additional_info
            .clone()
            .or_else(|| self.message.clone())
            .unwrap_or_else(|| "The joke API reported an unspecified error".to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notice())
    }
}

impl std::error::Error for ApiError {}

/// Error fields shared by every error-shaped response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub caused_by: Option<Vec<String>>,
    #[serde(default)]
    pub code: Option<i32>,
    #[serde(default)]
    pub internal_error: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
}

impl From<ErrorDetails> for ApiError {
    fn from(details: ErrorDetails) -> Self {
        ApiError {
            code: details.code,
            message: details.message,
            additional_info: details.additional_info,
            caused_by: details.caused_by.unwrap_or_default(),
            internal_error: details.internal_error.unwrap_or(false),
        }
    }
}

/// Body of `GET /categories`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub category_aliases: Vec<CategoryAlias>,
    pub error: bool,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub details: ErrorDetails,
}

impl CategoriesResponse {
    /// Display listing of this response, or the API error it carries
    pub fn into_listing(self) -> Result<Vec<String>, ApiError> {
        if self.error {
            return Err(self.details.into());
        }
        Ok(resolve_categories(&self.categories, &self.category_aliases))
    }
}

/// Body of `GET /joke/{category}`, success and error shapes merged
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokesResponse {
    #[serde(default)]
    pub amount: Option<u32>,
    pub error: bool,
    #[serde(default)]
    pub jokes: Option<Vec<Joke>>,
    #[serde(default)]
    pub timestamp: Option<i64>,
    #[serde(flatten)]
    pub details: ErrorDetails,
}

impl JokesResponse {
    /// Parse a response body
    ///
    /// With `amount=1` the API returns the joke object itself next to
    /// `error: false` instead of a `jokes` array; that shape is normalized into
    /// a one-element list.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(body)?;

        let is_single = value.get("error") == Some(&serde_json::Value::Bool(false))
            && value.get("jokes").is_none()
            && value.get("id").is_some();

        if is_single {
            let joke: Joke = serde_json::from_value(value)?;
            return Ok(JokesResponse {
                amount: Some(1),
                error: false,
                jokes: Some(vec![joke]),
                timestamp: None,
                details: ErrorDetails::default(),
            });
        }

        serde_json::from_value(value)
    }

    /// Fetched jokes, or the API error this response carries
    pub fn into_result(self) -> Result<Vec<Joke>, ApiError> {
        if self.error {
            return Err(self.details.into());
        }
        Ok(self.jokes.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joke::JokeType;

    const FLAGS: &str = r#"{"nsfw":false,"religious":false,"political":false,"racist":false,"sexist":false,"explicit":false}"#;

    #[test]
    fn test_categories_into_listing() {
        let body = r#"{
            "error": false,
            "categories": ["Any", "Misc", "Programming", "Dark", "Pun", "Spooky", "Christmas"],
            "categoryAliases": [
                {"alias": "Miscellaneous", "resolved": "Misc"},
                {"alias": "Coding", "resolved": "Programming"}
            ],
            "timestamp": 1700000000000
        }"#;

        let response: CategoriesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.timestamp, Some(1700000000000));

        let listing = response.into_listing().unwrap();
        assert_eq!(listing[1], "Miscellaneous");
        assert_eq!(listing.last().map(String::as_str), Some("Favorites"));
        assert_eq!(listing.len(), 8);
    }

    #[test]
    fn test_categories_error_shape() {
        let body = r#"{"error": true, "internalError": true, "code": 500, "message": "Internal Error", "causedBy": ["boom"], "timestamp": 1}"#;
        let response: CategoriesResponse = serde_json::from_str(body).unwrap();

        let err = response.into_listing().unwrap_err();
        assert_eq!(err.code, Some(500));
        assert!(err.internal_error);
        assert_eq!(err.notice(), "Internal Error");
    }

    #[test]
    fn test_jokes_success_shape() {
        let body = format!(
            r#"{{"error": false, "amount": 2, "jokes": [
                {{"category":"Programming","type":"single","joke":"A","flags":{FLAGS},"id":1,"safe":true,"lang":"en"}},
                {{"category":"Pun","type":"twopart","setup":"B","delivery":"C","flags":{FLAGS},"id":2,"safe":true,"lang":"en"}}
            ]}}"#
        );

        let response = JokesResponse::parse(&body).unwrap();
        assert_eq!(response.amount, Some(2));

        let jokes = response.into_result().unwrap();
        assert_eq!(jokes.len(), 2);
        assert_eq!(jokes[1].joke_type(), JokeType::TwoPart);
    }

    #[test]
    fn test_jokes_single_object_shape() {
        let body = format!(
            r#"{{"error": false, "category":"Programming","type":"single","joke":"Only one","flags":{FLAGS},"id":9,"safe":true,"lang":"en"}}"#
        );

        let jokes = JokesResponse::parse(&body).unwrap().into_result().unwrap();
        assert_eq!(jokes.len(), 1);
        assert_eq!(jokes[0].id, 9);
        assert_eq!(jokes[0].lead_text(), "Only one");
    }

    #[test]
    fn test_jokes_error_surfaces_additional_info() {
        let body = r#"{
            "error": true,
            "internalError": false,
            "code": 106,
            "message": "No matching joke found",
            "causedBy": ["No jokes were found that match your provided filter(s)."],
            "additionalInfo": "The specified category is invalid - Got: \"foo\" - Possible categories are: \"Any, Misc\"",
            "timestamp": 1579170794412
        }"#;

        let err = JokesResponse::parse(body).unwrap().into_result().unwrap_err();
        assert_eq!(err.code, Some(106));
        assert_eq!(err.caused_by.len(), 1);
        assert!(err.to_string().starts_with("The specified category is invalid"));
    }

    #[test]
    fn test_jokes_missing_list_is_empty() {
        let jokes = JokesResponse::parse(r#"{"error": false, "amount": 0}"#)
            .unwrap()
            .into_result()
            .unwrap();
        assert!(jokes.is_empty());
    }

    #[test]
    fn test_api_error_notice_fallback() {
        let err = ApiError::from(ErrorDetails::default());
        assert_eq!(err.notice(), "The joke API reported an unspecified error");
    }
}
