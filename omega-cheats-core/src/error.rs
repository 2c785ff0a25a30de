use thiserror::Error;

/// Errors raised while reading or translating Libretro cheats.
#[derive(Debug, Error)]
pub enum CheatError {
    /// I/O error while reading a cheat file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is malformed, or uses an unknown Code Breaker code type
    #[error("Parse error: {0}")]
    Parse(String),

    /// The cheat is well-formed but the Omega kernel cannot express it
    #[error("Unsupported cheat: {0}")]
    Unsupported(String),
}

impl CheatError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// True for errors that only invalidate the current cheat or file,
    /// as opposed to I/O failures that should abort the run.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Unsupported(_))
    }
}
