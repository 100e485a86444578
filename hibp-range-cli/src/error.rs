#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] hibp_range::ConfigError),

    #[error("invalid log filter {value:?}: {source}")]
    LogFilter {
        value: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("failed to install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("--concurrency must be at least 1")]
    InvalidArgs,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode verdict: {0}")]
    Json(#[from] serde_json::Error),
}
