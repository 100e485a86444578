use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Installs a compact stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `fallback` is used as the filter.
pub fn init(fallback: &str) -> Result<(), Error> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .map_err(|source| Error::LogFilter { value: fallback.to_owned(), source })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(Error::Subscriber)
}
