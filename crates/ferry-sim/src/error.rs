use ferry_core::FerryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] FerryError),

    #[error("failed to spawn {agent}: {source}")]
    Spawn {
        agent:  String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} panicked")]
    AgentPanicked(String),
}

pub type SimResult<T> = Result<T, SimError>;
