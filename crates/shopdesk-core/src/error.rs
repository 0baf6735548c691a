use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("select at least one attribute value")]
    EmptySelection,

    #[error("selection produces {count} combinations; the limit is {limit}")]
    TooManyCombinations { count: usize, limit: usize },

    #[error("selection produces more combinations than can be counted")]
    CombinationOverflow,

    #[error("failed to read {path}: {source}")]
    InputIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    InputParse { path: String, reason: String },
}
