//! Coordinate-space tagged geometry primitives
//!
//! Points, rectangles, segments and affine transforms all carry the
//! coordinate space they live in as a type parameter. Mixing spaces without
//! an explicit transform is a type error.

pub mod affine;
pub mod types;

pub use affine::Affine;
pub use types::{
    Local, LocalPoint, LocalRect, Point, Rect, Root, RootPoint, RootRect, Screen, ScreenPoint,
    Segment, Space,
};
