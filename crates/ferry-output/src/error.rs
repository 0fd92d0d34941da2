use thiserror::Error;

/// A log or trace backend failed to write.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("log write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV trace write failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
