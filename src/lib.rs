//! # Jointgrid
//!
//! Faceted grid-of-jointplots rendering for tabular data.
//!
//! Given a table of observations and two categorical partition keys (row,
//! column), jointgrid groups the data, renders one jointplot per group (a
//! central bivariate panel plus two marginal histograms), and composes the
//! panels into a single grid figure with coordinated labeling: column titles
//! on the top row, composite y-labels on the left column, the x caption on
//! the bottom row. A facet-wrap mode lays the facets out in a fixed number
//! of columns instead.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jointgrid::prelude::*;
//!
//! let mut df = DataFrame::new();
//! df.add_column_str("sample", &["a", "a", "b", "b"]);
//! df.add_column_str("batch", &["1", "2", "1", "2"]);
//! df.add_column_f32("time", &[0.1, 0.4, 0.2, 0.8]);
//! df.add_column_f32("depth", &[1.0, 2.0, 1.5, 2.5]);
//!
//! FacetGrid::new(df, "sample", "batch", "time", "depth")
//!     .dimensions(900, 600)
//!     .build()?
//!     .save("grid.png")?;
//! ```
//!
//! ## Design
//!
//! - **No ambient figure state**: figures are explicit [`framebuffer::Framebuffer`]
//!   values created, passed, and dropped by the caller.
//! - **One validated configuration**: [`plots::JointConfig`] enumerates every
//!   recognized option with its default and is validated once at build time.
//! - **Merge by blit**: each facet renders into its own isolated framebuffer;
//!   composition copies finished pixels into pre-computed cell rectangles.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code (Cloudflare incident 2025-11-18)
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types used throughout the rendering pipeline.
pub mod color;

/// Columnar data abstraction and facet partitioning.
pub mod data;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Geometric primitives for figure layout.
pub mod geometry;

/// Scale functions for data-to-visual mappings.
pub mod scale;

/// Statistical helpers (extents, histogram and 2-D count binning).
pub mod stats;

/// Theme system for non-data visual appearance.
pub mod theme;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Faceting: label-boundary policy and the grid composer.
pub mod facet;

/// The jointplot panel renderer.
pub mod plots;

// ============================================================================
// Rendering Modules
// ============================================================================

/// Rendering primitives and text rasterization.
pub mod render;

/// Output encoders (PNG, SVG).
pub mod output;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for jointgrid operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use jointgrid::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::data::{DataFrame, DataValue};
    pub use crate::error::{Error, Result};
    pub use crate::facet::{AxisLabel, FacetContext, FacetGrid, LabelRefs, PanelLabels, PlotFn};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::geometry::Rect;
    pub use crate::plots::{JointConfig, JointKind, JointPlot, PanelPlot, RefLine};
    pub use crate::scale::{ColorScale, Colormap, LinearScale, Scale};
    pub use crate::theme::Theme;
    pub use batuta_common::display::WithDimensions;
}

// ============================================================================
// Re-exports
// ============================================================================

/// Re-export trueno for direct access to SIMD operations.
pub use trueno;

// ============================================================================
// Tests
// ============================================================================
