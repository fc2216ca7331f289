use rn_graph::GraphError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("road graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SimResult<T> = Result<T, SimError>;
