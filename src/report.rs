use std::fmt::Display;
use crate::Processed;


/// Smallest column width used for instruction names.
///
/// Equal to the length of the shortest possible name (`"1dN"`), so it never
/// widens a report on its own.
pub const MIN_NAME_WIDTH: usize = 3;

/// Label shown on the line holding an aggregate.
pub const AGGREGATE_LABEL: &str = "Σ";


/// A rolled and processed dice instruction, ready to be printed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    /// Canonical name, e.g. `"1d4+"`.
    pub name: String,
    /// Number of dice the token asked for, whatever the processor did to
    /// the rolls afterwards.
    pub count: u16,
    /// Rolls after the processor ran, and its aggregate if any.
    pub processed: Processed,
    /// Processor symbol taken from the token.
    pub processor: Option<char>
}

impl Instruction {
    /// What this instruction adds to the report layout, same as
    /// [`crate::ParsedToken::contribution`].
    pub fn contribution(&self) -> (usize, u16) {
        (self.name.chars().count(), self.count)
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}


/// Layout facts derived from all instructions of one report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportMetadata {
    /// Width of the name column, never below [`MIN_NAME_WIDTH`].
    pub max_name_length: usize,
    /// More than one die was rolled in total.
    pub plural: bool
}

impl ReportMetadata {
    /// Folds per-instruction `(name_length, dice_count)` pairs, in input order.
    ///
    /// # Examples
    /// ```
    /// use inline_dice::ReportMetadata;
    ///
    /// let metadata = ReportMetadata::fold([(3, 2), (4, 1)]);
    /// assert_eq!(metadata.max_name_length, 4);
    /// assert!(metadata.plural);
    ///
    /// let single = ReportMetadata::fold([(3, 1)]);
    /// assert!(!single.plural);
    /// ```
    pub fn fold<I: IntoIterator<Item = (usize, u16)>>(contributions: I) -> Self {
        let (max_name_length, dice) = contributions.into_iter()
            .fold((MIN_NAME_WIDTH, 0u32), |(width, dice), (name_length, count)| {
                (width.max(name_length), dice.saturating_add(count as u32))
            });

        Self { max_name_length, plural: dice > 1 }
    }
}


/// A complete report: instructions in input order plus their layout.
///
/// Rendering is done by [`Display`] and is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Instructions in the order their tokens appeared.
    pub instructions: Vec<Instruction>,
    /// Derived layout.
    pub metadata: ReportMetadata
}

impl Report {
    /// Builds a report, deriving the metadata from the instructions.
    ///
    /// Dice counts are the declared [`Instruction::count`]s, not the number
    /// of rolls left after processing.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        let metadata = ReportMetadata::fold(instructions.iter().map(Instruction::contribution));

        Self { instructions, metadata }
    }

    fn lines(&self) -> Vec<String> {
        let width = self.metadata.max_name_length;
        let header = if self.metadata.plural { "Rolls:" } else { "Roll:" };

        let mut lines = vec![header.to_string()];
        for instruction in &self.instructions {
            let rolls = instruction.processed.rolls.iter()
                .map(u16::to_string)
                .collect::<Vec<_>>()
                .join(", ");

            lines.push(format!("- {:<width$} :: [ {rolls} ]", instruction.name));

            if let Some(aggregate) = instruction.processed.aggregate {
                lines.push(format!("  {AGGREGATE_LABEL:<width$} :: {aggregate}"));
            }
        }

        lines
    }
}

impl Display for Report {
    /// Header, one line per instruction, an extra line per aggregate, and a
    /// single trailing newline.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.lines().join("\n"))
    }
}


/// Renders `instructions` with the given layout.
///
/// # Examples
/// ```
/// use inline_dice::{format_report, Instruction, Processed, ReportMetadata};
///
/// let instructions = vec![Instruction {
///     name: "1d20".into(),
///     count: 1,
///     processed: Processed::unchanged(vec![17]),
///     processor: None,
/// }];
///
/// let text = format_report(&instructions, &ReportMetadata::fold([(4, 1)]));
/// assert_eq!(text, "Roll:\n- 1d20 :: [ 17 ]\n");
/// ```
pub fn format_report(instructions: &[Instruction], metadata: &ReportMetadata) -> String {
    Report { instructions: instructions.to_vec(), metadata: *metadata }.to_string()
}
