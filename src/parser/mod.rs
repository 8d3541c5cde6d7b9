mod error;
mod lexer;
mod recognize;
mod parse;

#[cfg(test)]
mod str_test_strategies;

pub use error::ParserError;
pub(crate) use lexer::Lexer;
pub use lexer::tokenize;
pub use recognize::recognize;
pub use parse::{ParsedToken, parse_token, parse_tokens};
