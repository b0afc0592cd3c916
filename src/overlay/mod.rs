//! Screen-space rendering of measurement reports
//!
//! Reports carry root-space geometry; the overlay maps it through the
//! root-to-screen transform and emits an SVG the size of the viewport,
//! meant to be stacked on top of the displayed document.

pub mod config;
pub mod svg;

pub use config::OverlayConfig;
pub use svg::{render_overlay, OverlayBuilder};
