use std::path::PathBuf;

/// Everything that can go wrong outside the (infallible) simulation.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("terminal or file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, GameError>;
