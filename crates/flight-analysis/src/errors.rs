use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Track contains no fixes")]
    EmptyTrack,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Extreme simplification did not converge after {passes} passes")]
    AnalysisDidNotConverge { passes: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
