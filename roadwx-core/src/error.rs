use thiserror::Error;

/// A configured phrasing vocabulary could not be turned into matchers.
#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("vocabulary list `{0}` must contain at least one non-empty entry")]
    Empty(&'static str),

    #[error("invalid `{field}` pattern: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },
}

/// Failure of a single route acquisition attempt.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("at least two waypoints are required, got {0}")]
    TooFewWaypoints(usize),

    #[error("routing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("routing service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode routing response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("routing service returned no route: {0}")]
    NoRoute(String),
}
