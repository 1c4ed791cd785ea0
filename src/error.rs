use thiserror::Error;

/// Failure to turn user input into an instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Not a number.")]
    NotANumber,

    #[error("Timestamp out of range: {0}")]
    OutOfRange(String),
}

/// A menu selection outside the enumerated range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid choice.")]
pub struct InvalidChoice {
    pub input: String,
}

impl InvalidChoice {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}
