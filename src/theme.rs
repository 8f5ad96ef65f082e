//! Theme system.
//!
//! Controls the non-data visual appearance of joint panels.

use crate::color::Rgba;

/// Theme specification.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color.
    pub background: Rgba,
    /// Joint area background color.
    pub panel_background: Rgba,
    /// Axis line color.
    pub axis_color: Rgba,
    /// Text color.
    pub text_color: Rgba,
    /// Fill color for marginal histogram bars.
    pub marginal_fill: Rgba,
    /// Show axis lines around the joint area.
    pub show_axis: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self::white()
    }
}

impl Theme {
    /// White theme (seaborn white-like).
    #[must_use]
    pub fn white() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::WHITE,
            axis_color: Rgba::rgb(50, 50, 50),
            text_color: Rgba::rgb(50, 50, 50),
            marginal_fill: Rgba::rgb(120, 160, 200),
            show_axis: true,
        }
    }

    /// Grey theme (ggplot2 default-like).
    #[must_use]
    pub fn grey() -> Self {
        Self {
            background: Rgba::WHITE,
            panel_background: Rgba::rgb(235, 235, 235),
            axis_color: Rgba::rgb(50, 50, 50),
            text_color: Rgba::rgb(50, 50, 50),
            marginal_fill: Rgba::rgb(110, 150, 190),
            show_axis: true,
        }
    }

    /// Dark theme.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: Rgba::rgb(30, 30, 30),
            panel_background: Rgba::rgb(40, 40, 40),
            axis_color: Rgba::rgb(180, 180, 180),
            text_color: Rgba::rgb(220, 220, 220),
            marginal_fill: Rgba::rgb(90, 130, 180),
            show_axis: true,
        }
    }

    /// Set background color.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Set joint area background color.
    #[must_use]
    pub fn panel_background(mut self, color: Rgba) -> Self {
        self.panel_background = color;
        self
    }

    /// Set text color.
    #[must_use]
    pub fn text_color(mut self, color: Rgba) -> Self {
        self.text_color = color;
        self
    }

    /// Set marginal histogram fill color.
    #[must_use]
    pub fn marginal_fill(mut self, color: Rgba) -> Self {
        self.marginal_fill = color;
        self
    }

    /// Enable or disable axis lines.
    #[must_use]
    pub fn axis(mut self, show: bool) -> Self {
        self.show_axis = show;
        self
    }
}
