//! Inline dice notation.
//!
//! Finds lines made only of dice tokens such as `2d6, d20+ 4d4<`, rolls
//! them, runs the optional processors and renders a small report:
//!
//! ```text
//! Rolls:
//! - 2d6  :: [ 5, 3 ]
//! - 1d4+ :: [ 2 ]
//!   Σ    :: 2
//! ```
//!
//! [`Pipeline`] ties everything together; the individual stages are
//! exported for hosts that need finer control.

#![warn(missing_docs)]
#![warn(clippy::missing_errors_doc)]


#[cfg(test)]
mod roll_test_strategies;

mod error;
mod roll;
mod parser;
mod processor;
mod report;
mod pipeline;

pub use error::Error;
pub use roll::{Roll, RollBuilder, DieSource, RandomSource, ScriptedSource, roll};
pub use parser::{
    ParserError, ParsedToken,
    recognize, tokenize, parse_token, parse_tokens
};
pub use processor::{Builtin, Processed, Registry, Transform};
pub use report::{Instruction, Report, ReportMetadata, format_report, MIN_NAME_WIDTH, AGGREGATE_LABEL};
pub use pipeline::{Pipeline, parse_and_format};
