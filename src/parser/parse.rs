use std::fmt::Display;
use crate::{Error, Registry, Roll};
use crate::parser::error::*;
use crate::parser::{Lexer, tokenize};


/// One dice instruction read from a token, before anything is rolled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedToken {
    /// Canonical name: the token text with an implicit count written out.
    pub name: String,
    /// How many dice with how many faces.
    pub roll: Roll,
    /// Processor symbol, already checked against the registry.
    pub processor: Option<char>
}

impl ParsedToken {
    /// What this token adds to the report layout: the width of its name and
    /// the number of dice it rolls.
    pub fn contribution(&self) -> (usize, u16) {
        (self.name.chars().count(), self.roll.count())
    }
}

impl Display for ParsedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}


/// Parses a single token such as `"3d6+"` or `"d20"`.
///
/// # Errors
/// Errors are wrapped with a [`ParserError::Located`] pointing inside the
/// token. The wrapped error is one of:
/// - [`ParserError::Empty`] for an empty token,
/// - [`ParserError::MissingDice`] / [`ParserError::MissingFaces`] when the
///   `d` or face count cannot be found,
/// - [`ParserError::ZeroValue`] for a zero count or face count,
/// - [`ParserError::Number`] when a number does not fit,
/// - [`ParserError::UnknownProcessor`] when the trailing symbol is not in
///   `registry`,
/// - [`ParserError::Trailing`] for anything after the processor.
///
/// # Examples
/// ```
/// use inline_dice::{parse_token, Registry};
///
/// let token = parse_token("d6+", &Registry::default()).unwrap();
/// assert_eq!(token.name, "1d6+");
/// assert_eq!(token.roll.count(), 1);
/// assert_eq!(token.roll.size(), 6);
/// assert_eq!(token.processor, Some('+'));
/// ```
pub fn parse_token(token: &str, registry: &Registry) -> Result<ParsedToken> {
    let mut lexer = Lexer::new(token);

    if lexer.is_empty() {
        return Err(ParserError::Empty.at(0));
    }

    let count = lexer.read_number()?;

    let position = lexer.position;
    match lexer.next_char() {
        Some('d') => {},
        other => return Err(ParserError::MissingDice(other).at(position))
    }

    let position = lexer.position;
    let size = lexer.read_number()?
        .ok_or_else(|| ParserError::MissingFaces.at(position))?;

    let position = lexer.position;
    let processor = match lexer.next_char() {
        Some(symbol) if registry.contains(symbol) => Some(symbol),
        Some(symbol) => return Err(ParserError::UnknownProcessor(symbol).at(position)),
        None => None
    };

    if lexer.peek().is_some() {
        return Err(ParserError::Trailing(lexer.rest()).at(lexer.position));
    }

    let roll = Roll::builder(size)
        .count(count.unwrap_or(1))
        .build()
        .map_err(|err| err.at(0))?;

    let name = match count {
        Some(_) => token.to_string(),
        None => format!("1{token}")
    };

    log::trace!("parsed token {token:?} as {name}");
    Ok(ParsedToken { name, roll, processor })
}


/// Tokenizes `text` and parses every token, stopping at the first failure.
///
/// # Errors
/// - [`Error::UnknownProcessor`] if a token names an unregistered processor.
/// - [`Error::MalformedToken`] for any other token failure, or when `text`
///   holds no token at all.
pub fn parse_tokens(text: &str, registry: &Registry) -> std::result::Result<Vec<ParsedToken>, Error> {
    let tokens = tokenize(text);

    if tokens.is_empty() {
        return Err(Error::from_token(text, ParserError::Empty));
    }

    tokens.into_iter()
        .map(|token| parse_token(token, registry).map_err(|err| Error::from_token(token, err)))
        .collect()
}
