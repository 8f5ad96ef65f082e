//! Faceting: boundary-label policy and the grid composer.
//!
//! [`labels`] decides which facet carries which title and axis caption, as a
//! pure function of the facet key and precomputed boundary references.
//! [`grid`] partitions the table, renders one jointplot per facet, and
//! merges the panels into one shared figure.

mod grid;
mod labels;

pub use grid::{joint_panel, BuiltFacetGrid, FacetContext, FacetGrid, PlotFn};
pub use labels::{AxisLabel, LabelRefs, PanelLabels};
