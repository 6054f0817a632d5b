use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A `regex_matches` validator was given a pattern that does not compile.
    #[error("invalid validator pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
