//! Rendering module
//!
//! Builds a list of draw commands per frame; the host surface rasterizes it.

pub mod frame;

pub use frame::{Color, DrawCommand, Frame, TextAlign, build_frame};
