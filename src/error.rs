use std::fmt;

/// Unified error type returned by every fallible operation in this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    InvalidFen(String),
    InvalidMoveString(String),
    IllegalMove(String),
    EvaluatorFailure(String),
    InvalidOption(String),
    IoError(String),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidFen(s) => write!(f, "invalid FEN: {s}"),
            ChessError::InvalidMoveString(s) => write!(f, "invalid move string: {s}"),
            ChessError::IllegalMove(s) => write!(f, "illegal move: {s}"),
            ChessError::EvaluatorFailure(s) => write!(f, "evaluator failure: {s}"),
            ChessError::InvalidOption(s) => write!(f, "invalid option: {s}"),
            ChessError::IoError(s) => write!(f, "io error: {s}"),
        }
    }
}

impl std::error::Error for ChessError {}

pub type Result<T> = std::result::Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_text_is_stable() {
        assert_eq!(
            ChessError::InvalidFen("bad".into()).to_string(),
            "invalid FEN: bad"
        );
        assert_eq!(
            ChessError::IllegalMove("e2e5".into()).to_string(),
            "illegal move: e2e5"
        );
    }
}
