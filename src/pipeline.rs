use crate::{
    DieSource, Error, Instruction, Processed, RandomSource, Registry, Report,
    parser::{parse_tokens, recognize, ParsedToken}
};


/// The dice notation pipeline: recognize, tokenize, parse, roll, process,
/// format.
///
/// A pipeline owns its processor [`Registry`] and its [`DieSource`]. Nothing
/// else is kept between calls.
///
/// # Examples
/// ```
/// use inline_dice::{Pipeline, Registry, ScriptedSource};
///
/// let mut pipeline = Pipeline::with_source(Registry::default(), ScriptedSource::new([5, 3, 2]));
///
/// let report = pipeline.parse_and_format("2d6, d4+").unwrap();
/// assert_eq!(report, "Rolls:\n- 2d6  :: [ 5, 3 ]\n- 1d4+ :: [ 2 ]\n  Σ    :: 2\n");
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline<S = RandomSource> {
    registry: Registry,
    source: S
}

impl Pipeline<RandomSource> {
    /// A pipeline rolling with the thread-local generator.
    pub fn new(registry: Registry) -> Self {
        Self::with_source(registry, RandomSource::thread())
    }
}

impl Default for Pipeline<RandomSource> {
    fn default() -> Self {
        Self::new(Registry::default())
    }
}

impl<S: DieSource> Pipeline<S> {
    /// A pipeline rolling with `source`.
    pub fn with_source(registry: Registry, source: S) -> Self {
        Self { registry, source }
    }

    /// The active processor registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Gives the die source back, e.g. to inspect a scripted source.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Parses every token of `text`, then rolls and processes them.
    ///
    /// All tokens are parsed before the first die is rolled, so a bad token
    /// anywhere in `text` means nothing is rolled at all.
    ///
    /// # Errors
    /// - [`Error::MalformedToken`] if a token cannot be read or `text` is empty.
    /// - [`Error::UnknownProcessor`] if a token names an unregistered processor.
    pub fn evaluate(&mut self, text: &str) -> Result<Report, Error> {
        let parsed = parse_tokens(text, &self.registry)?;

        let instructions = parsed.into_iter()
            .map(|token| self.instruction(token))
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(Report::new(instructions))
    }

    /// Parses, rolls and renders `text` as a report.
    ///
    /// # Errors
    /// Same as [`Pipeline::evaluate`].
    pub fn parse_and_format(&mut self, text: &str) -> Result<String, Error> {
        let report = self.evaluate(text)?.to_string();

        log::debug!("rendered report for {text:?}");
        Ok(report)
    }

    /// Recognizes `span` and, if it is a dice line, returns its report.
    ///
    /// `Ok(None)` means the span is not a dice line.
    ///
    /// # Errors
    /// Same as [`Pipeline::evaluate`], for spans that were recognized.
    pub fn recognize_and_transform(&mut self, span: &str) -> Result<Option<String>, Error> {
        recognize(span)
            .map(|matched| self.parse_and_format(matched))
            .transpose()
    }

    /// Replaces the content of `line` with its report if it is a dice line.
    ///
    /// Returns whether `line` was replaced. On any error `line` is left
    /// untouched.
    ///
    /// # Errors
    /// - [`Error::MalformedLine`] if `strict` is set and `line` holds no dice
    ///   instruction. Without `strict` such a line returns `Ok(false)`.
    /// - Any error of [`Pipeline::evaluate`].
    pub fn replace_line_if_recognized(&mut self, line: &mut String, strict: bool) -> Result<bool, Error> {
        match self.recognize_and_transform(line.as_str())? {
            Some(report) => {
                *line = report;
                Ok(true)
            },
            None if strict => Err(Error::MalformedLine(line.clone())),
            None => Ok(false)
        }
    }

    /// Replaces every dice line of `text` with its report and leaves all
    /// other lines as they are.
    ///
    /// # Errors
    /// Fails on the first dice line that cannot be evaluated; the caller's
    /// text is not touched since a new string is only returned on success.
    pub fn transform_text(&mut self, text: &str) -> Result<String, Error> {
        let mut output = String::with_capacity(text.len());

        for line in text.split_inclusive('\n') {
            let (body, ending) = line_ending(line);

            match self.recognize_and_transform(body)? {
                Some(report) => {
                    let report = report.trim_end_matches('\n');

                    if ending == "\r\n" {
                        output.push_str(&report.replace('\n', ending));
                    } else {
                        output.push_str(report);
                    }
                    output.push_str(ending);
                },
                None => output.push_str(line)
            }
        }

        Ok(output)
    }

    fn instruction(&mut self, token: ParsedToken) -> Result<Instruction, Error> {
        let rolls = token.roll.roll(&mut self.source);

        let processed = match token.processor {
            Some(symbol) => self.registry.apply(symbol, &rolls)?,
            None => Processed::unchanged(rolls)
        };

        Ok(Instruction {
            name: token.name,
            count: token.roll.count(),
            processed,
            processor: token.processor
        })
    }
}


/// Splits a line into its body and its terminator: `"\r\n"`, `"\n"` or none.
fn line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}


/// Parses, rolls and renders `text` with the default registry and the
/// thread-local generator.
///
/// # Errors
/// Same as [`Pipeline::evaluate`].
///
/// # Examples
/// ```
/// use inline_dice::parse_and_format;
///
/// let report = parse_and_format("3d6+").unwrap();
/// assert!(report.starts_with("Rolls:\n- 3d6+ :: [ "));
/// assert_eq!(report.lines().count(), 3);
/// ```
pub fn parse_and_format(text: &str) -> Result<String, Error> {
    Pipeline::default().parse_and_format(text)
}
