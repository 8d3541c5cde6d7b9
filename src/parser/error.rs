/// Failures raised while reading a single dice token such as `"3d6+"`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParserError {
    /// Another error, tagged with the character offset inside the token.
    #[error("{kind} (at character {position})")]
    Located {
        /// Offset of the offending character, counted in chars.
        position: usize,
        /// The error found there.
        kind: Box<ParserError>
    },

    /// A count or face count does not fit in a `u16`.
    #[error("Invalid number: {0}")]
    Number(#[from] std::num::ParseIntError),

    /// A count or face count of zero.
    #[error("Zero value is not accepted")]
    ZeroValue,

    /// The `d` between count and faces is missing.
    #[error("Expected 'd', got {0:?}")]
    MissingDice(Option<char>),

    /// Nothing numeric follows the `d`.
    #[error("Expected face count after 'd'")]
    MissingFaces,

    /// Characters left after the processor symbol.
    #[error("Unexpected trailing input: {0}")]
    Trailing(String),

    /// The processor symbol is not in the registry.
    #[error("Unknown processor: {0}")]
    UnknownProcessor(char),

    /// The token has no characters at all.
    #[error("Token is empty")]
    Empty,
}

impl ParserError {
    /// The error itself, without location.
    pub fn kind(&self) -> &Self {
        match self {
            ParserError::Located { kind, .. } => kind.as_ref(),
            other => other
        }
    }

    /// Where in the token the error was found, if known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParserError::Located { position, .. } => Some(*position),
            _ => None
        }
    }

    /// Tags the error with `position`. The innermost location wins.
    pub fn at(self, position: usize) -> Self {
        match self {
            located @ ParserError::Located { .. } => located,
            kind => ParserError::Located { position, kind: Box::new(kind) }
        }
    }
}

pub type Result<T> = std::result::Result<T, ParserError>;
