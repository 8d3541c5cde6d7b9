use crate::parser::error::*;


/// Splits a recognized span into raw instruction tokens.
///
/// Tokens are separated by any run of commas or whitespace (newlines
/// included). Empty fragments are discarded, order is preserved.
///
/// # Examples
/// ```
/// use inline_dice::tokenize;
///
/// assert_eq!(tokenize(" 2d6,, d20+\n4d4<"), vec!["2d6", "d20+", "4d4<"]);
/// ```
pub fn tokenize(span: &str) -> Vec<&str> {
    span.split(|ch: char| ch == ',' || ch.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}


/// Character cursor over a single token.
#[derive(Debug)]
pub(crate) struct Lexer {
    input: Vec<char>,
    pub position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Reads a run of ASCII digits. `Ok(None)` if there is no digit here.
    pub fn read_number(&mut self) -> Result<Option<u16>> {
        let start = self.position;
        while self.peek().is_some_and(|ch| ch.is_ascii_digit()) {
            self.position += 1;
        }

        if start == self.position {
            return Ok(None);
        }

        let number_str: String = self.input[start..self.position].iter().collect();
        let number: u16 = number_str.parse()
            .map_err(|err: std::num::ParseIntError| ParserError::from(err).at(start))?;

        if number == 0 {
            return Err(ParserError::ZeroValue.at(start));
        }

        Ok(Some(number))
    }

    /// Everything not consumed yet.
    pub fn rest(&self) -> String {
        self.input[self.position..].iter().collect()
    }
}
