//! Layered image templates.
//!
//! A [`Pattern`] turns a [`Context`] of template variables into [`Layer`]s.
//! Each layer is a [`Canvas`] with [`Rectangle`] and [`Text`] elements placed
//! by [`Point`] and [`Position`]; text lines are arranged with
//! [`HorizontalAlignment`] and [`VerticalAlignment`]. Layers are composited
//! in order into a single RGBA image.

pub mod context;
pub mod document;
pub mod draw;
pub mod elements;
mod error;
pub mod fonts;
pub mod geometry;
pub mod layers;
pub mod patterns;
pub mod text;

pub use context::Context;
pub use elements::{
    Canvas, HorizontalAlignment, Point, Position, Rectangle, Text, VerticalAlignment,
};
pub use layers::Layer;
pub use patterns::Pattern;

pub use document::PatternDocument;
pub use elements::{ColorRgba8, Element, Outline};
pub use error::{PatternError, Result};
pub use fonts::{Font, FontCache, TextMeasure};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
