//! Parsers for SVG attribute micro-syntaxes

pub mod ast;
mod grammar;
pub mod lexer;
pub mod numbers;
pub mod path;

pub use ast::*;
pub use grammar::parse_transform;
pub use numbers::{parse_float_prefix, parse_length, parse_number_list};
pub use path::{parse_path, path_bounds, ParsedPath};
