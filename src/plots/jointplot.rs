//! Jointplot implementation.
//!
//! A jointplot shows two numeric variables as three panels: a central
//! bivariate panel plus a marginal distribution histogram above it (x) and
//! to its right (y). The bivariate panel is a count-binned density raster by
//! default, or raw markers when [`JointKind::Scatter`] is selected.
//!
//! One jointplot renders one facet; the grid composer blits the finished
//! framebuffer into its cell.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::facet::{AxisLabel, PanelLabels};
use crate::framebuffer::Framebuffer;
use crate::geometry::Rect;
use crate::output::PngEncoder;
use crate::render::{draw_dashed_line, draw_point, draw_rect_outline, TextRenderer};
use crate::scale::{Colormap, LinearScale, Scale};
use crate::stats::{bin2d_counts, extent, histogram_counts, padded_domain, sturges_bins, DOMAIN_PADDING};
use crate::theme::Theme;
use std::path::Path;

/// Marginal panels take one part in five of each content side.
const JOINT_RATIO: u32 = 5;
/// Gap between the joint panel and each marginal panel.
const PANEL_GAP: u32 = 2;
/// Left margin, sized for the rotated y-axis label.
const MARGIN_LEFT: u32 = 56;
const MARGIN_RIGHT: u32 = 8;
/// Top margin, sized for the column title.
const MARGIN_TOP: u32 = 22;
/// Bottom margin, sized for the x-axis label.
const MARGIN_BOTTOM: u32 = 42;

/// Fixed marker transparency for the scatter strategy.
const SCATTER_ALPHA: f32 = 0.6;
/// Fixed marker diameter in pixels for the scatter strategy.
const SCATTER_SIZE: f32 = 4.0;
/// Matplotlib's default series blue.
const SCATTER_COLOR: Rgba = Rgba::new(31, 119, 180, 255);

/// On/off length for dashed reference lines.
const DASH_LEN: u32 = 4;
const LABEL_SIZE: f32 = 12.0;
const TITLE_SIZE: f32 = 13.0;
/// Horizontal advance between lines of the rotated y-label.
const Y_LABEL_ADVANCE: i32 = 14;

/// Bivariate estimator kind for the joint panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JointKind {
    /// Count-binned density raster through a colormap.
    #[default]
    Density,
    /// Raw markers with fixed transparency and size. Does not use the
    /// gridsize parameter at all.
    Scatter,
}

/// A dashed reference line drawn over the joint panel.
#[derive(Debug, Clone, PartialEq)]
pub struct RefLine {
    /// X coordinates in data space.
    pub xs: Vec<f32>,
    /// Y coordinates in data space.
    pub ys: Vec<f32>,
}

impl RefLine {
    /// Create a reference line from data-space coordinates.
    #[must_use]
    pub fn new(xs: Vec<f32>, ys: Vec<f32>) -> Self {
        Self { xs, ys }
    }
}

/// Every recognized jointplot option with its default, validated once at the
/// boundary.
#[derive(Debug, Clone)]
pub struct JointConfig {
    /// Bivariate estimator kind.
    pub kind: JointKind,
    /// Density grid resolution (cells per axis).
    pub gridsize: usize,
    /// Colormap for the density panel.
    pub colormap: Colormap,
    /// Show the base x-axis label (the variable name).
    pub x_label: bool,
    /// Show the base y-axis label (the variable name).
    pub y_label: bool,
    /// Caption placed on x-label boundary facets; falls back to the
    /// x variable name.
    pub main_x_label: Option<String>,
    /// Caption placed on y-label boundary facets; falls back to the
    /// y variable name.
    pub main_y_label: Option<String>,
    /// X-axis range override; otherwise padded data extent.
    pub xlim: Option<(f32, f32)>,
    /// Y-axis range override; otherwise padded data extent.
    pub ylim: Option<(f32, f32)>,
    /// Optional dashed reference line overlay.
    pub ref_line: Option<RefLine>,
    /// When set, each facet is also saved standalone as
    /// `{prefix}_{row}_{col}.png`.
    pub facet_save_prefix: Option<String>,
    /// Figure colors.
    pub theme: Theme,
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            kind: JointKind::Density,
            gridsize: 25,
            colormap: Colormap::Blues,
            x_label: true,
            y_label: true,
            main_x_label: None,
            main_y_label: None,
            xlim: None,
            ylim: None,
            ref_line: None,
            facet_save_prefix: None,
            theme: Theme::default(),
        }
    }
}

impl JointConfig {
    /// Validate the option set.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero gridsize, a non-increasing or non-finite
    /// axis range, or a malformed reference line.
    pub fn validate(&self) -> Result<()> {
        if self.gridsize == 0 {
            return Err(Error::InvalidConfig("gridsize must be at least 1".into()));
        }

        for (name, lim) in [("xlim", self.xlim), ("ylim", self.ylim)] {
            if let Some((min, max)) = lim {
                if !min.is_finite() || !max.is_finite() || min >= max {
                    return Err(Error::InvalidConfig(format!(
                        "{name} must be a finite increasing range, got ({min}, {max})"
                    )));
                }
            }
        }

        if let Some(line) = &self.ref_line {
            if line.xs.len() != line.ys.len() {
                return Err(Error::DataLengthMismatch {
                    x_len: line.xs.len(),
                    y_len: line.ys.len(),
                });
            }
            if line.xs.len() < 2 {
                return Err(Error::InvalidConfig(
                    "reference line needs at least two points".into(),
                ));
            }
        }

        Ok(())
    }
}

/// The finished three-panel rendering of one facet.
///
/// Owns its own isolated framebuffer until the composer blits it into the
/// shared figure, and records which labels the placement policy applied.
#[derive(Debug, Clone)]
pub struct PanelPlot {
    framebuffer: Framebuffer,
    labels: PanelLabels,
}

impl PanelPlot {
    /// The rendered pixels.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable access to the rendered pixels, for custom plot functions
    /// that post-process a panel before composition.
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// The labels this panel ended up carrying.
    #[must_use]
    pub fn labels(&self) -> &PanelLabels {
        &self.labels
    }

    /// Save the panel standalone as a PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or file writing fails.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(&self.framebuffer, path)
    }
}

/// Builder for creating jointplots.
#[derive(Debug, Clone)]
pub struct JointPlot {
    x_data: Vec<f32>,
    y_data: Vec<f32>,
    x_name: String,
    y_name: String,
    width: u32,
    height: u32,
    config: JointConfig,
    labels: PanelLabels,
}

impl Default for JointPlot {
    fn default() -> Self {
        Self::new()
    }
}

impl JointPlot {
    /// Create a new jointplot builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            x_data: Vec::new(),
            y_data: Vec::new(),
            x_name: "x".to_string(),
            y_name: "y".to_string(),
            width: 800,
            height: 600,
            config: JointConfig::default(),
            labels: PanelLabels::default(),
        }
    }

    /// Set the x-axis data.
    #[must_use]
    pub fn x(mut self, data: &[f32]) -> Self {
        self.x_data = data.to_vec();
        self
    }

    /// Set the y-axis data.
    #[must_use]
    pub fn y(mut self, data: &[f32]) -> Self {
        self.y_data = data.to_vec();
        self
    }

    /// Set the x variable name used for the base axis label.
    #[must_use]
    pub fn x_name(mut self, name: impl Into<String>) -> Self {
        self.x_name = name.into();
        self
    }

    /// Set the y variable name used for the base axis label.
    #[must_use]
    pub fn y_name(mut self, name: impl Into<String>) -> Self {
        self.y_name = name.into();
        self
    }

    /// Set the output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the plot configuration.
    #[must_use]
    pub fn config(mut self, config: JointConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the resolved facet labels. Standalone plots keep the default
    /// (base axis labels only, no title).
    #[must_use]
    pub fn labels(mut self, labels: PanelLabels) -> Self {
        self.labels = labels;
        self
    }

    /// Get the number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x_data.len().min(self.y_data.len())
    }

    /// Build and validate the jointplot.
    ///
    /// # Errors
    ///
    /// Returns an error if data is empty, x/y lengths differ, or the
    /// configuration is invalid.
    pub fn build(self) -> Result<BuiltJointPlot> {
        if self.x_data.is_empty() || self.y_data.is_empty() {
            return Err(Error::EmptyData);
        }

        if self.x_data.len() != self.y_data.len() {
            return Err(Error::DataLengthMismatch {
                x_len: self.x_data.len(),
                y_len: self.y_data.len(),
            });
        }

        self.config.validate()?;

        Ok(BuiltJointPlot {
            x_data: self.x_data,
            y_data: self.y_data,
            x_name: self.x_name,
            y_name: self.y_name,
            width: self.width,
            height: self.height,
            config: self.config,
            labels: self.labels,
        })
    }
}

impl batuta_common::display::WithDimensions for JointPlot {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// A built jointplot ready for rendering.
#[derive(Debug, Clone)]
pub struct BuiltJointPlot {
    x_data: Vec<f32>,
    y_data: Vec<f32>,
    x_name: String,
    y_name: String,
    width: u32,
    height: u32,
    config: JointConfig,
    labels: PanelLabels,
}

impl BuiltJointPlot {
    /// Render to a new framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let mut fb = Framebuffer::new(self.width, self.height)?;
        self.render(&mut fb)?;
        Ok(fb)
    }

    /// Render to a [`PanelPlot`] carrying the label bookkeeping.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn to_panel(&self) -> Result<PanelPlot> {
        Ok(PanelPlot {
            framebuffer: self.to_framebuffer()?,
            labels: self.labels.clone(),
        })
    }

    fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let theme = &self.config.theme;
        fb.clear(theme.background);

        let content = Rect::new(0, 0, self.width, self.height).inset(
            MARGIN_LEFT,
            MARGIN_TOP,
            MARGIN_RIGHT,
            MARGIN_BOTTOM,
        );
        if content.is_empty() {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        // Classic joint-to-margin split: the x histogram above the joint
        // panel, the y histogram to its right.
        let marg_h = content.height / JOINT_RATIO;
        let marg_w = content.width / JOINT_RATIO;
        let joint = Rect::new(
            content.x,
            content.y + marg_h,
            content.width - marg_w,
            content.height - marg_h,
        );
        let x_marg = Rect::new(
            content.x,
            content.y,
            joint.width,
            marg_h.saturating_sub(PANEL_GAP),
        );
        let y_marg = Rect::new(
            joint.right() + PANEL_GAP,
            joint.y,
            marg_w.saturating_sub(PANEL_GAP),
            joint.height,
        );
        if joint.is_empty() {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let domain_x = match self.config.xlim {
            Some(lim) => lim,
            None => {
                let (min, max) = extent(&self.x_data)?;
                padded_domain(min, max, DOMAIN_PADDING)
            }
        };
        let domain_y = match self.config.ylim {
            Some(lim) => lim,
            None => {
                let (min, max) = extent(&self.y_data)?;
                padded_domain(min, max, DOMAIN_PADDING)
            }
        };

        fb.fill_rect(
            joint.x,
            joint.y,
            joint.width,
            joint.height,
            theme.panel_background,
        );

        let x_scale = LinearScale::new(domain_x, (joint.x as f32, joint.right() as f32))?;
        // Inverted for screen coords
        let y_scale = LinearScale::new(domain_y, (joint.bottom() as f32, joint.y as f32))?;

        match self.config.kind {
            JointKind::Density => self.render_density(fb, domain_x, domain_y, joint)?,
            JointKind::Scatter => self.render_scatter(fb, &x_scale, &y_scale, joint),
        }

        self.render_marginal_x(fb, domain_x, x_marg);
        self.render_marginal_y(fb, domain_y, y_marg);

        if theme.show_axis {
            draw_rect_outline(
                fb,
                joint.x as i32,
                joint.y as i32,
                joint.width,
                joint.height,
                theme.axis_color,
                1,
            );
        }

        if let Some(line) = &self.config.ref_line {
            for i in 1..line.xs.len() {
                draw_dashed_line(
                    fb,
                    x_scale.scale(line.xs[i - 1]) as i32,
                    y_scale.scale(line.ys[i - 1]) as i32,
                    x_scale.scale(line.xs[i]) as i32,
                    y_scale.scale(line.ys[i]) as i32,
                    Rgba::BLACK,
                    DASH_LEN,
                );
            }
        }

        self.render_labels(fb, joint);

        Ok(())
    }

    /// Count-binned density raster. The count matrix has row 0 at the low
    /// end of the y domain, so rows flip when mapping to screen cells.
    fn render_density(
        &self,
        fb: &mut Framebuffer,
        domain_x: (f32, f32),
        domain_y: (f32, f32),
        joint: Rect,
    ) -> Result<()> {
        let gridsize = self.config.gridsize;
        let counts = bin2d_counts(&self.x_data, &self.y_data, domain_x, domain_y, gridsize);

        let min = *counts.iter().min().unwrap_or(&0) as f32;
        let max = *counts.iter().max().unwrap_or(&0) as f32;
        let scale = self.config.colormap.color_scale((min, max))?;

        let n = gridsize as u32;
        for gy in 0..gridsize {
            let y1 = joint.bottom() - (gy as u32 * joint.height) / n;
            let y0 = joint.bottom() - ((gy as u32 + 1) * joint.height) / n;
            for gx in 0..gridsize {
                let x0 = joint.x + (gx as u32 * joint.width) / n;
                let x1 = joint.x + ((gx as u32 + 1) * joint.width) / n;

                let color = scale.scale(counts[gy * gridsize + gx] as f32);
                fb.fill_rect(x0, y0, x1 - x0, y1 - y0, color);
            }
        }

        Ok(())
    }

    /// Raw markers with fixed transparency and size. Never consults the
    /// gridsize parameter.
    fn render_scatter(
        &self,
        fb: &mut Framebuffer,
        x_scale: &LinearScale,
        y_scale: &LinearScale,
        joint: Rect,
    ) {
        let color = SCATTER_COLOR.with_alpha((SCATTER_ALPHA * 255.0) as u8);

        for (&x, &y) in self.x_data.iter().zip(self.y_data.iter()) {
            let px = x_scale.scale(x) as i32;
            let py = y_scale.scale(y) as i32;
            if !joint.contains(px, py) {
                continue;
            }
            draw_point(fb, px as f32, py as f32, SCATTER_SIZE, color);
        }
    }

    /// X marginal histogram: bars grow upward from the panel bottom.
    fn render_marginal_x(&self, fb: &mut Framebuffer, domain: (f32, f32), rect: Rect) {
        if rect.is_empty() {
            return;
        }

        let bins = sturges_bins(self.x_data.len());
        let counts = histogram_counts(&self.x_data, domain, bins);
        let max_count = *counts.iter().max().unwrap_or(&1).max(&1);

        let n = bins as u32;
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let x0 = rect.x + (i as u32 * rect.width) / n;
            let x1 = rect.x + ((i as u32 + 1) * rect.width) / n;
            let bar_h =
                (((count as f32 / max_count as f32) * rect.height as f32) as u32).max(1);

            // 1px gap between bars
            let bar_w = (x1 - x0).saturating_sub(1).max(1);
            fb.fill_rect(
                x0,
                rect.bottom() - bar_h,
                bar_w,
                bar_h,
                self.config.theme.marginal_fill,
            );
        }
    }

    /// Y marginal histogram: bars grow rightward; the low-value bin sits at
    /// the panel bottom, matching the joint panel's inverted y axis.
    fn render_marginal_y(&self, fb: &mut Framebuffer, domain: (f32, f32), rect: Rect) {
        if rect.is_empty() {
            return;
        }

        let bins = sturges_bins(self.y_data.len());
        let counts = histogram_counts(&self.y_data, domain, bins);
        let max_count = *counts.iter().max().unwrap_or(&1).max(&1);

        let n = bins as u32;
        for (i, &count) in counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let y1 = rect.bottom() - (i as u32 * rect.height) / n;
            let y0 = rect.bottom() - ((i as u32 + 1) * rect.height) / n;
            let bar_w = (((count as f32 / max_count as f32) * rect.width as f32) as u32).max(1);

            let bar_h = (y1 - y0).saturating_sub(1).max(1);
            fb.fill_rect(rect.x, y0, bar_w, bar_h, self.config.theme.marginal_fill);
        }
    }

    /// Apply the resolved labels: title over the x margin, x label under
    /// the joint panel, rotated y label at the left edge.
    fn render_labels(&self, fb: &mut Framebuffer, joint: Rect) {
        let text = TextRenderer::new();
        let color = self.config.theme.text_color;

        if let Some(title) = &self.labels.title {
            text.draw_text_centered(fb, joint.center_x() as i32, 4, title, TITLE_SIZE, color);
        }

        let x_label = match &self.labels.x_label {
            AxisLabel::Set(s) => Some(s.as_str()),
            AxisLabel::Keep => self.config.x_label.then_some(self.x_name.as_str()),
            AxisLabel::Blank => None,
        };
        if let Some(label) = x_label {
            text.draw_text_centered(
                fb,
                joint.center_x() as i32,
                joint.bottom() as i32 + 18,
                label,
                LABEL_SIZE,
                color,
            );
        }

        let y_label = match &self.labels.y_label {
            AxisLabel::Set(s) => Some(s.as_str()),
            AxisLabel::Keep => self.config.y_label.then_some(self.y_name.as_str()),
            AxisLabel::Blank => None,
        };
        if let Some(label) = y_label {
            // Composite labels stack their lines left to right
            for (i, line) in label.split('\n').enumerate() {
                if line.is_empty() {
                    continue;
                }
                let (w, _) = text.measure(line, LABEL_SIZE);
                text.draw_text_vertical(
                    fb,
                    2 + (i as i32) * Y_LABEL_ADVANCE,
                    joint.center_y() as i32 - (w as i32) / 2,
                    line,
                    LABEL_SIZE,
                    color,
                );
            }
        }
    }
}
