//! Drawing helpers shared by paint backends.
//!
//! # Layer-Based Rendering
//!
//! Painted elements are assigned to a [`RenderLayer`] and collected in a
//! [`LayeredOutput`], which emits them bottom to top regardless of the order
//! in which they were produced.
mod connector;
mod layer;

pub use connector::{ArrowMarkers, path_data};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
