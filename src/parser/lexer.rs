//! Lexer for SVG attribute micro-syntaxes using logos
//!
//! Shared by transform lists, number lists and lengths.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\x0C]+")]
pub enum Token {
    // Transform functions
    #[token("matrix")]
    Matrix,
    #[token("translate")]
    Translate,
    #[token("scale")]
    Scale,
    #[token("rotate")]
    Rotate,
    #[token("skewX")]
    SkewX,
    #[token("skewY")]
    SkewY,

    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token("%")]
    Percent,

    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Unit suffixes and anything else word-like
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

/// Lex input, stopping at the first unrecognized character.
///
/// Returns the tokens read so far and the span of the offending input, if any.
pub fn lex_strict(input: &str) -> (Vec<(Token, Span)>, Option<Span>) {
    let mut tokens = Vec::new();
    for (tok, span) in Token::lexer(input).spanned() {
        match tok {
            Ok(t) => tokens.push((t, span)),
            Err(()) => return (tokens, Some(span)),
        }
    }
    (tokens, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_transform_keywords() {
        assert_eq!(
            tokens("translate rotate skewX"),
            vec![Token::Translate, Token::Rotate, Token::SkewX]
        );
    }

    #[test]
    fn test_numbers_with_signs_and_exponents() {
        assert_eq!(
            tokens("10-5 +.5 1e2 -3.25E-1"),
            vec![
                Token::Number(10.0),
                Token::Number(-5.0),
                Token::Number(0.5),
                Token::Number(100.0),
                Token::Number(-0.325),
            ]
        );
    }

    #[test]
    fn test_compact_decimals_split() {
        assert_eq!(
            tokens("1.5.5"),
            vec![Token::Number(1.5), Token::Number(0.5)]
        );
    }

    #[test]
    fn test_length_with_unit() {
        assert_eq!(
            tokens("12.5mm"),
            vec![Token::Number(12.5), Token::Ident("mm".to_string())]
        );
        assert_eq!(tokens("50%"), vec![Token::Number(50.0), Token::Percent]);
    }

    #[test]
    fn test_lex_strict_reports_bad_char() {
        let (toks, bad) = lex_strict("translate(1) @");
        assert_eq!(toks.len(), 4);
        assert_eq!(bad, Some(13..14));
    }
}
