use std::sync::LazyLock;
use regex::Regex;


/// `COUNT? d FACES PROC?` where `PROC` is any single character that cannot
/// start a separator or continue a number. Whether the symbol is actually
/// registered is decided later by the token parser.
const TOKEN: &str = r"[0-9]*d[0-9]+[^0-9\s,]?";

static DICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[\s,]*({TOKEN}(?:[\s,]+{TOKEN})*)[\s,]*$"))
        .unwrap_or_else(|err| unreachable!("dice line pattern is valid: {err}"))
});


/// Finds the dice instructions in `span`.
///
/// The whole span must consist of dice tokens separated by commas and
/// whitespace; leading and trailing separators are ignored and left out of
/// the returned slice. Anything else, including prose around a dice-like
/// fragment or an already formatted report, yields `None`.
///
/// # Examples
/// ```
/// use inline_dice::recognize;
///
/// assert_eq!(recognize("  2d6, 1d4+ "), Some("2d6, 1d4+"));
/// assert_eq!(recognize("roll 2d6 please"), None);
/// assert_eq!(recognize("- 2d6  :: [ 5, 3 ]"), None);
/// ```
pub fn recognize(span: &str) -> Option<&str> {
    let matched = DICE_LINE.captures(span)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str());

    match matched {
        Some(text) => log::debug!("recognized dice line {text:?}"),
        None => log::trace!("no dice instruction in {span:?}")
    }

    matched
}


#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use crate::parser::str_test_strategies::*;


    proptest! {
        #[test]
        fn test_recognizes_generated_lines(line in dice_line_strategy()) {
            let matched = recognize(&line);

            prop_assert!(matched.is_some(), "line = {line:?}");
            let matched = matched.unwrap();
            prop_assert_eq!(matched, line.trim_matches(|ch: char| ch == ',' || ch.is_whitespace()));
        }

        #[test]
        fn test_prose_around_dice(
            line in dice_line_strategy(),
            word in "[a-ce-zA-Z]{2,8}"
        ) {
            let prefixed = format!("{word} {line}");
            let suffixed = format!("{line} {word}");

            prop_assert_eq!(recognize(&prefixed), None);
            prop_assert_eq!(recognize(&suffixed), None);
        }
    }

    #[test]
    fn test_whole_line() {
        assert_eq!(recognize("2d6, 1d4+"), Some("2d6, 1d4+"));
        assert_eq!(recognize("d20"), Some("d20"));
        assert_eq!(recognize(",, d8<  3d10>,"), Some("d8<  3d10>"));
    }

    #[test]
    fn test_rejects_prose() {
        assert_eq!(recognize("roll 2d6 please"), None);
        assert_eq!(recognize("2d6 please"), None);
        assert_eq!(recognize("hello"), None);
    }

    #[test]
    fn test_rejects_incomplete_tokens() {
        assert_eq!(recognize(""), None);
        assert_eq!(recognize("   "), None);
        assert_eq!(recognize("2d"), None);
        assert_eq!(recognize("d"), None);
        assert_eq!(recognize("2d6++"), None);
        assert_eq!(recognize("2d6 x"), None);
        assert_eq!(recognize("dd6"), None);
    }

    #[test]
    fn test_unregistered_symbol_still_recognized() {
        assert_eq!(recognize("2d6!"), Some("2d6!"));
    }

    #[test]
    fn test_rejects_report_text() {
        let report = "Rolls:\n- 2d6  :: [ 5, 3 ]\n- 1d4+ :: [ 2 ]\n  Σ    :: 2\n";

        assert_eq!(recognize(report), None);
        for line in report.lines() {
            assert_eq!(recognize(line), None, "line = {line:?}");
        }
    }
}
