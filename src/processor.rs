use std::{collections::BTreeMap, fmt, sync::Arc};
use crate::Error;


/// Output of a processor: the (possibly reordered) rolls plus an optional
/// scalar derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Processed {
    /// Roll values after the transform.
    pub rolls: Vec<u16>,
    /// Aggregate such as a sum, if the processor computes one.
    pub aggregate: Option<u32>
}

impl Processed {
    /// Rolls passed through untouched, no aggregate.
    pub fn unchanged(rolls: Vec<u16>) -> Self {
        Self { rolls, aggregate: None }
    }

    /// The aggregate, if this result carries one.
    pub fn total(&self) -> Option<u32> {
        self.aggregate
    }
}


/// The transforms that ship with the crate.
///
/// Lets a registry be described as plain data, e.g. a `{symbol: builtin}`
/// map loaded from a host configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Builtin {
    /// Sorts the rolls from lowest to highest.
    SortAscending,
    /// Sorts the rolls from highest to lowest.
    SortDescending,
    /// Keeps the order and attaches the sum of all rolls.
    Sum
}

impl Builtin {
    /// Runs the transform.
    pub fn apply(self, rolls: &[u16]) -> Processed {
        let mut rolls = rolls.to_vec();

        match self {
            Builtin::SortAscending => {
                rolls.sort_unstable();
                Processed::unchanged(rolls)
            },
            Builtin::SortDescending => {
                rolls.sort_unstable_by(|a, b| b.cmp(a));
                Processed::unchanged(rolls)
            },
            Builtin::Sum => {
                let sum = rolls.iter().map(|&v| v as u32).sum();
                Processed { rolls, aggregate: Some(sum) }
            }
        }
    }
}


/// A transform over one roll sequence.
pub type Transform = dyn Fn(&[u16]) -> Processed + Send + Sync;


/// Maps single-character processor symbols to transforms.
///
/// The registry is built once and handed to the [`crate::Pipeline`]; it is
/// only read while a line is being evaluated.
///
/// # Examples
/// ```
/// use inline_dice::{Processed, Registry};
///
/// let registry = Registry::default()
///     .with('!', |rolls: &[u16]| Processed {
///         rolls: rolls.to_vec(),
///         aggregate: rolls.iter().max().map(|&v| v as u32),
///     })?;
///
/// let processed = registry.apply('!', &[2, 6, 4])?;
/// assert_eq!(processed.aggregate, Some(6));
/// assert!(registry.contains('+'));
/// # Ok::<(), inline_dice::Error>(())
/// ```
#[derive(Clone)]
pub struct Registry {
    entries: BTreeMap<char, Arc<Transform>>
}

impl Registry {
    /// A registry with no processors at all.
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Builds a registry from data, e.g. loaded configuration.
    ///
    /// # Errors
    /// Returns [`Error::ReservedSymbol`] for the first symbol that could never
    /// appear after a token, see [`Registry::register`].
    pub fn from_builtins<I: IntoIterator<Item = (char, Builtin)>>(builtins: I) -> Result<Self, Error> {
        builtins.into_iter()
            .try_fold(Self::empty(), |registry, (symbol, builtin)| {
                registry.with(symbol, move |rolls: &[u16]| builtin.apply(rolls))
            })
    }

    /// Adds or replaces the transform for `symbol`, returning the registry.
    ///
    /// # Errors
    /// Same as [`Registry::register`].
    pub fn with<F>(mut self, symbol: char, transform: F) -> Result<Self, Error>
    where
        F: Fn(&[u16]) -> Processed + Send + Sync + 'static
    {
        self.register(symbol, transform)?;
        Ok(self)
    }

    /// Adds or replaces the transform for `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::ReservedSymbol`] for ASCII digits, whitespace and `,`.
    /// Those end or separate a token, so the recognizer never reads them as
    /// a processor.
    pub fn register<F>(&mut self, symbol: char, transform: F) -> Result<(), Error>
    where
        F: Fn(&[u16]) -> Processed + Send + Sync + 'static
    {
        if is_reserved(symbol) {
            return Err(Error::ReservedSymbol(symbol));
        }

        self.insert(symbol, Arc::new(transform));
        Ok(())
    }

    fn insert(&mut self, symbol: char, transform: Arc<Transform>) {
        if self.entries.insert(symbol, transform).is_some() {
            log::debug!("processor '{symbol}' overridden");
        }
    }

    /// Whether `symbol` has a transform.
    pub fn contains(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }

    /// Registered symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    /// Applies the transform registered for `symbol`.
    ///
    /// # Errors
    /// Returns [`Error::UnknownProcessor`] if nothing is registered for `symbol`.
    pub fn apply(&self, symbol: char, rolls: &[u16]) -> Result<Processed, Error> {
        let transform = self.entries.get(&symbol)
            .ok_or(Error::UnknownProcessor(symbol))?;

        Ok(transform(rolls))
    }
}

impl Default for Registry {
    /// `<` sorts ascending, `>` sorts descending, `+` sums.
    fn default() -> Self {
        let mut registry = Self::empty();

        for (symbol, builtin) in [
            ('<', Builtin::SortAscending),
            ('>', Builtin::SortDescending),
            ('+', Builtin::Sum),
        ] {
            registry.insert(symbol, Arc::new(move |rolls: &[u16]| builtin.apply(rolls)));
        }

        registry
    }
}

/// Characters that terminate or separate tokens.
fn is_reserved(symbol: char) -> bool {
    symbol.is_ascii_digit() || symbol.is_whitespace() || symbol == ','
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.entries.keys()).finish()
    }
}
