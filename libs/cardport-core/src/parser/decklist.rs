//! Free-text deck lists: `3 Card Name` or `3x Card Name`.

use regex::Regex;
use std::sync::LazyLock;

use super::{parse_quantity, positive_quantity, ParseResult};
use crate::error::ParseError;
use crate::types::CardEntry;

static DECK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[xX]?\s+(.*)$").expect("valid regex"));

/// Blank lines and `//` or `#` comments carry no card.
pub fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with("//") || trimmed.starts_with('#')
}

pub(super) fn parse_decklist(raw: &str) -> Vec<ParseResult> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !is_skippable(line))
        .map(|(idx, line)| parse_line(line.trim_start(), idx + 1))
        .collect()
}

fn parse_line(line: &str, line_num: usize) -> ParseResult {
    let captures = DECK_LINE.captures(line).ok_or_else(|| {
        ParseError::new(line_num, "Invalid format")
            .with_suggestion("use \"4 Card Name\" or \"4x Card Name\"")
    })?;

    let quantity = positive_quantity(parse_quantity(&captures[1]))
        .ok_or_else(|| ParseError::new(line_num, "Invalid quantity"))?;

    let name = captures[2].trim();
    if name.is_empty() {
        return Err(ParseError::new(line_num, "Missing card name"));
    }

    Ok(CardEntry::named(line_num, name.to_string(), quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_comments_and_blanks_silently() {
        let results = parse_decklist("// comment\n\n2x Nu Gundam");
        assert_eq!(results.len(), 1);
        let entry = results[0].as_ref().unwrap();
        assert_eq!(entry.card_name, "Nu Gundam");
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.source_line, 3);
    }

    #[test]
    fn hash_comments_are_skipped() {
        assert!(parse_decklist("# Sideboard\n   # indented").is_empty());
    }

    #[test]
    fn accepts_both_forms() {
        let results = parse_decklist("3 Zaku II\n2x Gouf Custom\n1X Dom");
        let parsed: Vec<_> = results
            .iter()
            .map(|r| {
                let e = r.as_ref().unwrap();
                (e.quantity, e.card_name.as_str())
            })
            .collect();
        assert_eq!(parsed, vec![(3, "Zaku II"), (2, "Gouf Custom"), (1, "Dom")]);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let results = parse_decklist("   4 Zaku");
        assert_eq!(results[0].as_ref().unwrap().card_name, "Zaku");
    }

    #[test]
    fn non_matching_line_is_invalid_format() {
        for line in ["Zaku II", "x3 Zaku", "3xZaku", "-1 Zaku"] {
            let results = parse_decklist(line);
            let err = results[0].as_ref().unwrap_err();
            assert_eq!(err.message, "Invalid format", "line {:?}", line);
            assert!(err.suggestion.is_some());
        }
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let results = parse_decklist("0 Zaku");
        assert_eq!(results[0].as_ref().unwrap_err().message, "Invalid quantity");
    }

    #[test]
    fn overflowing_quantity_is_invalid() {
        let results = parse_decklist("99999999999999999999999 Zaku");
        assert_eq!(results[0].as_ref().unwrap_err().message, "Invalid quantity");
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let results = parse_decklist("3   ");
        assert_eq!(results[0].as_ref().unwrap_err().message, "Missing card name");
    }
}
