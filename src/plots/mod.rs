//! High-level plot types.
//!
//! Provides the jointplot panel renderer with its builder API.

mod jointplot;

pub use jointplot::{
    BuiltJointPlot, JointConfig, JointKind, JointPlot, PanelPlot, RefLine,
};
