#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to spawn bridge '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("bridge I/O error: {0}")]
    Io(String),

    #[error("invalid JSON ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("bridge command '{command}' failed: {error}")]
    Protocol { command: String, error: String },

    #[error("no element at index path {0:?}")]
    Detached(Vec<usize>),
}
