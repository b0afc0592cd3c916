//! Number lists, lengths and lenient float prefixes

use logos::Logos;

use crate::parser::ast::{Length, LengthUnit};
use crate::parser::lexer::{lex_strict, Token};
use crate::ParseError;

/// Parse a comma/whitespace separated list of numbers (`points`, `viewBox`)
pub fn parse_number_list(input: &str) -> Result<Vec<f64>, ParseError> {
    let (tokens, bad_char) = lex_strict(input);
    if let Some(span) = bad_char {
        return Err(ParseError::syntax(span, "Unexpected character in number list"));
    }

    let mut numbers = Vec::with_capacity(tokens.len());
    let mut after_comma = false;
    for (tok, span) in tokens {
        match tok {
            Token::Number(n) => {
                numbers.push(n);
                after_comma = false;
            }
            Token::Comma if !numbers.is_empty() && !after_comma => after_comma = true,
            _ => return Err(ParseError::syntax(span, "Expected a number")),
        }
    }
    if after_comma {
        return Err(ParseError::syntax(
            input.len()..input.len(),
            "Trailing comma in number list",
        ));
    }
    Ok(numbers)
}

/// Parse a length such as `10`, `2.5mm` or `50%`
pub fn parse_length(input: &str) -> Option<Length> {
    let (tokens, bad_char) = lex_strict(input);
    if bad_char.is_some() {
        return None;
    }
    match tokens.as_slice() {
        [(Token::Number(value), _)] => Some(Length::user(*value)),
        [(Token::Number(value), n), (Token::Percent, p)] if n.end == p.start => Some(Length {
            value: *value,
            unit: LengthUnit::Percent,
        }),
        [(Token::Number(value), n), (Token::Ident(suffix), s)] if n.end == s.start => {
            LengthUnit::from_suffix(suffix).map(|unit| Length {
                value: *value,
                unit,
            })
        }
        _ => None,
    }
}

/// Leading number of a string, ignoring whatever follows it.
///
/// Mirrors the lenient float parsing browsers apply to attribute strings:
/// `"7px"` is 7, `"1.5.5"` is 1.5, `"px"` has no number.
pub fn parse_float_prefix(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    match Token::lexer(trimmed).spanned().next() {
        Some((Ok(Token::Number(n)), span)) if span.start == 0 => Some(n),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_list_separators() {
        assert_eq!(
            parse_number_list("0,0 10, 20 -5-5").unwrap(),
            vec![0.0, 0.0, 10.0, 20.0, -5.0, -5.0]
        );
        assert_eq!(parse_number_list("").unwrap(), Vec::<f64>::new());
    }

    #[test]
    fn test_number_list_rejects_garbage() {
        assert!(parse_number_list("1,,2").is_err());
        assert!(parse_number_list(",1").is_err());
        assert!(parse_number_list("1 2,").is_err());
        assert!(parse_number_list("1 a").is_err());
    }

    #[test]
    fn test_parse_length_units() {
        assert_eq!(parse_length("10"), Some(Length::user(10.0)));
        let mm = parse_length("25.4mm").unwrap();
        assert!((mm.to_user_units(0.0) - 96.0).abs() < 1e-9);
        let pct = parse_length("50%").unwrap();
        assert_eq!(pct.to_user_units(300.0), 150.0);
        assert_eq!(parse_length(" 2px ").map(|l| l.to_user_units(0.0)), Some(2.0));
    }

    #[test]
    fn test_parse_length_rejects_unknown_units() {
        assert_eq!(parse_length("10 px"), None);
        assert_eq!(parse_length("10furlongs"), None);
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length(""), None);
    }

    #[test]
    fn test_float_prefix() {
        assert_eq!(parse_float_prefix("7"), Some(7.0));
        assert_eq!(parse_float_prefix("  7px"), Some(7.0));
        assert_eq!(parse_float_prefix("1.5.5"), Some(1.5));
        assert_eq!(parse_float_prefix("100%"), Some(100.0));
        assert_eq!(parse_float_prefix("px7"), None);
        assert_eq!(parse_float_prefix(""), None);
    }
}
