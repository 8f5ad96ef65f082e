//! Rendering backends and rasterization.
//!
//! Provides rasterization for geometric primitives plus text drawing for
//! panel titles and axis captions.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: Fast non-antialiased line drawing, plus a dashed
//!   variant for reference-line overlays
//! - **Scanline Circle**: Filled circle rendering for scatter markers, one
//!   blended row at a time
//!
//! # References
//!
//! - Bresenham, J. E. (1965). "Algorithm for computer control of a digital plotter."

mod primitives;
mod text;

pub use primitives::{
    draw_circle, draw_dashed_line, draw_line, draw_point, draw_rect, draw_rect_outline,
};
pub use text::TextRenderer;
