//! Transform-list parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::TransformOp;
use crate::parser::lexer::Token;

/// Which transform function was named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformKind {
    Matrix,
    Translate,
    Scale,
    Rotate,
    SkewX,
    SkewY,
}

impl TransformKind {
    fn name(self) -> &'static str {
        match self {
            TransformKind::Matrix => "matrix",
            TransformKind::Translate => "translate",
            TransformKind::Scale => "scale",
            TransformKind::Rotate => "rotate",
            TransformKind::SkewX => "skewX",
            TransformKind::SkewY => "skewY",
        }
    }

    fn arity(self) -> &'static str {
        match self {
            TransformKind::Matrix => "6",
            TransformKind::Translate | TransformKind::Scale => "1 or 2",
            TransformKind::Rotate => "1 or 3",
            TransformKind::SkewX | TransformKind::SkewY => "1",
        }
    }

    /// Build the operation, or `None` when the argument count is wrong
    fn build(self, args: &[f64]) -> Option<TransformOp> {
        match (self, args) {
            (TransformKind::Matrix, &[a, b, c, d, e, f]) => Some(TransformOp::Matrix([a, b, c, d, e, f])),
            (TransformKind::Translate, &[tx]) => Some(TransformOp::Translate { tx, ty: 0.0 }),
            (TransformKind::Translate, &[tx, ty]) => Some(TransformOp::Translate { tx, ty }),
            (TransformKind::Scale, &[s]) => Some(TransformOp::Scale { sx: s, sy: s }),
            (TransformKind::Scale, &[sx, sy]) => Some(TransformOp::Scale { sx, sy }),
            (TransformKind::Rotate, &[angle]) => Some(TransformOp::Rotate {
                angle,
                center: None,
            }),
            (TransformKind::Rotate, &[angle, cx, cy]) => Some(TransformOp::Rotate {
                angle,
                center: Some((cx, cy)),
            }),
            (TransformKind::SkewX, &[angle]) => Some(TransformOp::SkewX(angle)),
            (TransformKind::SkewY, &[angle]) => Some(TransformOp::SkewY(angle)),
            _ => None,
        }
    }
}

/// Parse an SVG `transform` attribute value into its function list
///
/// An empty or whitespace-only value yields an empty list (identity).
pub fn parse_transform(input: &str) -> Result<Vec<TransformOp>, Vec<crate::ParseError>> {
    let len = input.len();

    let (tokens, bad_char) = crate::parser::lexer::lex_strict(input);
    if let Some(span) = bad_char {
        return Err(vec![crate::ParseError::syntax(
            span,
            "Unexpected character in transform list",
        )]);
    }

    let token_iter = tokens.into_iter().map(|(tok, span)| (tok, span.into()));

    // Turn the token iterator into a stream that chumsky can use
    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    transform_list_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn transform_list_parser<'a, I>(
) -> impl Parser<'a, I, Vec<TransformOp>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let number = select! {
        Token::Number(n) => n,
    };

    // Arguments may be separated by commas, whitespace, or both
    let arguments = number
        .separated_by(just(Token::Comma).or_not())
        .collect::<Vec<f64>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose));

    let kind = select! {
        Token::Matrix => TransformKind::Matrix,
        Token::Translate => TransformKind::Translate,
        Token::Scale => TransformKind::Scale,
        Token::Rotate => TransformKind::Rotate,
        Token::SkewX => TransformKind::SkewX,
        Token::SkewY => TransformKind::SkewY,
    };

    let transform = kind
        .then(arguments)
        .try_map(|(kind, args), span: SimpleSpan| {
            kind.build(&args).ok_or_else(|| {
                Rich::custom(
                    span,
                    format!(
                        "{}() takes {} arguments, found {}",
                        kind.name(),
                        kind.arity(),
                        args.len()
                    ),
                )
            })
        });

    transform
        .separated_by(just(Token::Comma).or_not())
        .collect()
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::compose;
    use crate::geometry::{Local, LocalPoint};

    #[test]
    fn test_parse_empty_is_identity() {
        assert_eq!(parse_transform("").unwrap(), vec![]);
        assert_eq!(parse_transform("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_parse_translate_rotate() {
        let ops = parse_transform("translate(10,20) rotate(45)").unwrap();
        assert_eq!(
            ops,
            vec![
                TransformOp::Translate { tx: 10.0, ty: 20.0 },
                TransformOp::Rotate {
                    angle: 45.0,
                    center: None
                },
            ]
        );
    }

    #[test]
    fn test_parse_whitespace_and_comma_separators() {
        let ops = parse_transform("scale(2) ,translate(1 2),matrix(1,0,0 1 5 6)").unwrap();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], TransformOp::Scale { sx: 2.0, sy: 2.0 });
        assert_eq!(ops[2], TransformOp::Matrix([1.0, 0.0, 0.0, 1.0, 5.0, 6.0]));
    }

    #[test]
    fn test_parse_rotate_about_center() {
        let ops = parse_transform("rotate(90 5 5)").unwrap();
        let m = compose::<Local>(&ops);
        let p = m.apply(LocalPoint::new(10.0, 5.0));
        assert!((p.x - 5.0).abs() < 1e-9, "x: got {}", p.x);
        assert!((p.y - 10.0).abs() < 1e-9, "y: got {}", p.y);
    }

    #[test]
    fn test_wrong_arity_is_error() {
        let errs = parse_transform("rotate(1, 2)").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].to_string().contains("rotate() takes 1 or 3 arguments"));
    }

    #[test]
    fn test_unknown_function_is_error() {
        assert!(parse_transform("translateX(10)").is_err());
        assert!(parse_transform("translate(10").is_err());
        assert!(parse_transform("translate(10) #").is_err());
    }

    #[test]
    fn test_compose_order_leftmost_outermost() {
        let ops = parse_transform("translate(10,0) scale(2)").unwrap();
        let m = compose::<Local>(&ops);
        let p = m.apply(LocalPoint::new(1.0, 1.0));
        assert_eq!((p.x, p.y), (12.0, 2.0));
    }
}
