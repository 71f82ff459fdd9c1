use std::path::PathBuf;

/// Errors raised while loading or validating a routing configuration.
///
/// Classification itself never fails; only alternate tables supplied at
/// runtime can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum RoutingError {
    #[error("failed to read routing config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid routing config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("category key '{key}' is listed more than once")]
    DuplicateCategory { key: String },

    #[error("category rule has an empty key")]
    EmptyCategoryKey,

    #[error("geographic rule '{rule}' has an empty marker")]
    EmptyMarker { rule: String },

    #[error("keyword group #{index} has no keywords")]
    EmptyKeywordGroup { index: usize },
}

pub type Result<T> = std::result::Result<T, RoutingError>;
