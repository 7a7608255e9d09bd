/// Core error type for the plugin.
///
/// Adapter crates map their specific errors into this type so the core can
/// handle failures consistently (usage error vs swallowed vs propagated).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("external error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, Error>;
