use crate::parser::ParserError;


/// Errors surfaced by the pipeline.
///
/// A line that simply does not contain dice notation is not an error:
/// [`crate::recognize`] returns `None` for it. Only strict callers escalate
/// that to [`Error::MalformedLine`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The `d` / face count part of a token could not be read.
    #[error("Malformed token '{token}' - {source}")]
    MalformedToken {
        /// Raw token text as it appeared in the input.
        token: String,
        /// What went wrong inside the token.
        source: ParserError
    },

    /// A processor symbol is not present in the active registry.
    #[error("Unknown processor: {0}")]
    UnknownProcessor(char),

    /// A digit, whitespace or `,` was offered as a processor symbol.
    #[error("Symbol {0:?} separates tokens and cannot name a processor")]
    ReservedSymbol(char),

    /// Strict mode was requested and the line holds no dice instruction.
    #[error("No dice instruction found on line: {0:?}")]
    MalformedLine(String),
}

impl Error {
    /// Lifts a token-level error into the crate error, keeping the token text.
    pub(crate) fn from_token(token: &str, err: ParserError) -> Self {
        match err.kind() {
            ParserError::UnknownProcessor(symbol) => Error::UnknownProcessor(*symbol),
            _ => Error::MalformedToken { token: token.into(), source: err }
        }
    }
}


#[cfg(test)]
mod test {
    use super::*;


    #[test]
    fn test_unknown_processor_is_lifted() {
        let err = Error::from_token("2d6!", ParserError::UnknownProcessor('!').at(3));
        assert_eq!(err, Error::UnknownProcessor('!'));
    }

    #[test]
    fn test_other_errors_keep_token() {
        let err = Error::from_token("2x6", ParserError::MissingDice(Some('x')).at(1));

        match err {
            Error::MalformedToken { token, source } => {
                assert_eq!(token, "2x6");
                assert_eq!(source.position(), Some(1));
            },
            other => panic!("unexpected {other:?}")
        }
    }
}
