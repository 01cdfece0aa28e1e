use thiserror::Error;

/// An error encountered while parsing a puzzle from text
#[derive(Error, Debug)]
#[error("error parsing puzzle: {}", msg)]
pub struct ParsePuzzleError {
    msg: String,
}

impl<S: Into<String>> From<S> for ParsePuzzleError {
    fn from(msg: S) -> Self {
        Self { msg: msg.into() }
    }
}
