use thiserror::Error;

/// Plugin options were rejected before any rewriting took place.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "component transform requires plugin options that are an object with a `transforms` \
         property which is an array"
    )]
    NotAnObject,

    #[error("component transform options must contain a `transforms` array")]
    MissingTransforms,

    #[error("invalid component transform options: {0}")]
    Malformed(#[from] serde_json::Error),
}
