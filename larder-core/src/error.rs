use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),
}

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("Embedding model error: {0}")]
    Model(String),

    #[error("Embedding model returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },

    #[error("Embedder not available: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Recipe index is empty")]
    EmptyIndex,

    #[error("Vector dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Got {texts} texts but {metadatas} metadata entries")]
    LengthMismatch { texts: usize, metadatas: usize },

    #[error(transparent)]
    Embed(#[from] EmbedError),
}
