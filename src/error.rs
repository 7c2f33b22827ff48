use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("Invalid suit: {0}")]
    InvalidSuit(char),

    #[error("Malformed card code: {0}")]
    MalformedCode(String),

    #[error("More than two copies of {0} across hand, floor and cross")]
    TooManyCopies(String),

    #[error("Cross may hold at most {max} cards, got {got}")]
    CrossOverflow { max: usize, got: usize },

    #[error("Floor group #{index} has fewer than three cards and no cross anchor")]
    UndersizedFloorGroup { index: usize },

    #[error("Search deadline elapsed")]
    Timeout,

    #[error("Reconstruction failed: {0}")]
    Reconstruction(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SolverError {
    /// Stable error kind reported in the response `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            SolverError::InvalidRank(_)
            | SolverError::InvalidSuit(_)
            | SolverError::MalformedCode(_) => "MalformedCode",
            SolverError::TooManyCopies(_)
            | SolverError::CrossOverflow { .. }
            | SolverError::UndersizedFloorGroup { .. }
            | SolverError::JsonError(_) => "InvalidInput",
            SolverError::Timeout => "Timeout",
            SolverError::Reconstruction(_) => "ReconstructionFailure",
        }
    }
}

pub type SolverResult<T> = Result<T, SolverError>;
