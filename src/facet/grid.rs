//! The grid composer.
//!
//! Partitions an observation table by a (row, column) key pair, renders one
//! jointplot per partition, and blits each finished panel into its cell of
//! one shared figure. Each panel renders into its own isolated framebuffer
//! first; the merge step is a pixel copy into a pre-computed cell rectangle,
//! so there is no shared figure state while panels render.

use crate::data::{DataFrame, DataValue, FacetKey};
use crate::error::{Error, Result};
use crate::facet::labels::{LabelRefs, PanelLabels};
use crate::framebuffer::Framebuffer;
use crate::output::{PngEncoder, SvgEncoder};
use crate::plots::{JointConfig, JointPlot, PanelPlot};
use std::path::Path;

/// Rendering context handed to the plot function for one facet.
#[derive(Debug)]
pub struct FacetContext<'a> {
    /// The facet's row key value.
    pub row_key: &'a DataValue,
    /// The facet's column key value.
    pub col_key: &'a DataValue,
    /// Boundary references shared by all facets of this grid.
    pub refs: &'a LabelRefs,
    /// Panel width in pixels (one grid cell).
    pub width: u32,
    /// Panel height in pixels (one grid cell).
    pub height: u32,
}

/// Plot function slot of the composer. Defaults to [`joint_panel`].
pub type PlotFn =
    fn(&DataFrame, &str, &str, &FacetContext<'_>, &JointConfig) -> Result<PanelPlot>;

/// Default plot function: render one facet as a three-panel jointplot.
///
/// Resolves the facet's labels from the boundary references, renders the
/// panel, and, when a per-facet save prefix is configured, also persists the
/// standalone panel as `{prefix}_{row}_{col}.png`.
///
/// # Errors
///
/// Returns an error if a variable column is missing or rendering fails.
pub fn joint_panel(
    group: &DataFrame,
    x: &str,
    y: &str,
    ctx: &FacetContext<'_>,
    config: &JointConfig,
) -> Result<PanelPlot> {
    let xs = group
        .get_f32(x)
        .ok_or_else(|| Error::UnknownColumn(x.to_string()))?;
    let ys = group
        .get_f32(y)
        .ok_or_else(|| Error::UnknownColumn(y.to_string()))?;

    let labels = PanelLabels::resolve(
        ctx.row_key,
        ctx.col_key,
        ctx.refs,
        config.main_x_label.as_deref().unwrap_or(x),
        config.main_y_label.as_deref().unwrap_or(y),
    );

    let panel = JointPlot::new()
        .x(&xs)
        .y(&ys)
        .x_name(x)
        .y_name(y)
        .dimensions(ctx.width, ctx.height)
        .config(config.clone())
        .labels(labels)
        .build()?
        .to_panel()?;

    if let Some(prefix) = &config.facet_save_prefix {
        panel.save_png(format!("{prefix}_{}_{}.png", ctx.row_key, ctx.col_key))?;
    }

    Ok(panel)
}

/// Builder for a faceted grid of jointplots.
#[derive(Debug, Clone)]
pub struct FacetGrid {
    data: DataFrame,
    row: String,
    col: String,
    x: String,
    y: String,
    width: u32,
    height: u32,
    wrap: Option<usize>,
    plot_fn: PlotFn,
    config: JointConfig,
}

impl FacetGrid {
    /// Create a grid builder over a table and its facet/variable columns.
    #[must_use]
    pub fn new(data: DataFrame, row: &str, col: &str, x: &str, y: &str) -> Self {
        Self {
            data,
            row: row.to_string(),
            col: col.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            width: 600,
            height: 600,
            wrap: None,
            plot_fn: joint_panel,
            config: JointConfig::default(),
        }
    }

    /// Set the composed figure dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Wrap the facets into a fixed number of columns instead of a full
    /// rectangular row-by-column layout.
    #[must_use]
    pub fn wrap(mut self, width: usize) -> Self {
        self.wrap = Some(width);
        self
    }

    /// Set the shared plot configuration.
    #[must_use]
    pub fn config(mut self, config: JointConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the plot function invoked per facet.
    #[must_use]
    pub fn plot_fn(mut self, plot_fn: PlotFn) -> Self {
        self.plot_fn = plot_fn;
        self
    }

    /// Build and validate the grid.
    ///
    /// Grid dimensions derive from the data: distinct row values by distinct
    /// column values, or, when wrapping, the wrap width by however many rows
    /// the facet count needs.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty table, a missing key or variable
    /// column, a zero wrap width, or an invalid configuration.
    pub fn build(self) -> Result<BuiltFacetGrid> {
        self.config.validate()?;

        if self.data.nrow() == 0 {
            return Err(Error::EmptyData);
        }
        for name in [&self.row, &self.col, &self.x, &self.y] {
            if !self.data.has_column(name) {
                return Err(Error::UnknownColumn(name.clone()));
            }
        }

        // has_column checked above, so these cannot fail
        let rows_asc = self
            .data
            .distinct_sorted(&self.row)
            .ok_or_else(|| Error::UnknownColumn(self.row.clone()))?;
        let cols_asc = self
            .data
            .distinct_sorted(&self.col)
            .ok_or_else(|| Error::UnknownColumn(self.col.clone()))?;
        let partitions = self
            .data
            .partition_by_keys(&self.row, &self.col)
            .ok_or_else(|| Error::UnknownColumn(self.row.clone()))?;

        let (refs, rows, cols) = match self.wrap {
            None => (
                LabelRefs::new(&rows_asc, &cols_asc)?,
                rows_asc.len(),
                cols_asc.len(),
            ),
            Some(width) => {
                let refs = LabelRefs::wrapped(&rows_asc, &cols_asc, width)?;
                // Rows grow to fit, so capacity always suffices
                let rows = partitions.len().div_ceil(width);
                (refs, rows, width)
            }
        };

        Ok(BuiltFacetGrid {
            partitions,
            refs,
            x: self.x,
            y: self.y,
            rows,
            cols,
            width: self.width,
            height: self.height,
            plot_fn: self.plot_fn,
            config: self.config,
        })
    }
}

impl batuta_common::display::WithDimensions for FacetGrid {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

/// A built facet grid ready for composition.
#[derive(Debug)]
pub struct BuiltFacetGrid {
    partitions: Vec<(FacetKey, DataFrame)>,
    refs: LabelRefs,
    x: String,
    y: String,
    rows: usize,
    cols: usize,
    width: u32,
    height: u32,
    plot_fn: PlotFn,
    config: JointConfig,
}

impl BuiltFacetGrid {
    /// Grid row count.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid column count.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of facets, one per distinct (row, col) key pair in the data.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.partitions.len()
    }

    /// The boundary references driving label placement.
    #[must_use]
    pub fn label_refs(&self) -> &LabelRefs {
        &self.refs
    }

    /// Grid cell origin for a linear panel index, row-major.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GridOverflow`] when the index exceeds the grid
    /// capacity; the composer never silently wraps an out-of-range index.
    fn cell_origin(&self, index: usize, cell_w: u32, cell_h: u32) -> Result<(u32, u32)> {
        if index >= self.rows * self.cols {
            return Err(Error::GridOverflow {
                index,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let r = (index / self.cols) as u32;
        let c = (index % self.cols) as u32;
        Ok((c * cell_w, r * cell_h))
    }

    /// Render every facet and compose the shared figure.
    ///
    /// Panels render sequentially, each into its own framebuffer, and are
    /// merged with zero inter-cell spacing. Any failure aborts the whole
    /// composition; the partial figure is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a panel fails to render or the figure is too
    /// small to give each cell at least one pixel.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let cell_w = self.width / self.cols as u32;
        let cell_h = self.height / self.rows as u32;
        if cell_w == 0 || cell_h == 0 {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let mut figure = Framebuffer::new(self.width, self.height)?;
        figure.clear(self.config.theme.background);

        for (index, ((row_key, col_key), group)) in self.partitions.iter().enumerate() {
            let ctx = FacetContext {
                row_key,
                col_key,
                refs: &self.refs,
                width: cell_w,
                height: cell_h,
            };
            let panel = (self.plot_fn)(group, &self.x, &self.y, &ctx, &self.config)?;

            let (origin_x, origin_y) = self.cell_origin(index, cell_w, cell_h)?;
            figure.blit(panel.framebuffer(), origin_x, origin_y);
        }

        Ok(figure)
    }

    /// Compose the figure and persist it, format selected by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if composition fails, the extension is not `.png`
    /// or `.svg`, or writing fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let figure = self.to_framebuffer()?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => PngEncoder::write_to_file(&figure, path),
            Some("svg") => SvgEncoder::from_framebuffer(&figure)?.write_to_file(path),
            other => Err(Error::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}
