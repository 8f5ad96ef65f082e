//! Boundary references and the label-placement policy.
//!
//! Which facet gets a column title, a composite y-axis label, or the shared
//! x caption depends only on the facet's (row, col) key and the boundary
//! values precomputed from the sorted distinct key sets. The policy lives
//! here as a pure function so it can be tested without rendering anything.
//!
//! Comparisons are by exact value equality against the precomputed boundary
//! values, not by grid position.

use crate::data::DataValue;
use crate::error::{Error, Result};

/// Boundary reference values shared by every facet of one grid.
///
/// Built once per composition from the distinct sorted row and column key
/// values, then handed to each facet's label resolution.
#[derive(Debug, Clone)]
pub struct LabelRefs {
    /// First row value in ascending order; its facets carry column titles
    /// in no-wrap mode.
    first_row: DataValue,
    /// Column values whose facets carry the composite y-axis label.
    y_label_cols: Vec<DataValue>,
    /// Row values whose facets carry the x caption.
    x_label_rows: Vec<DataValue>,
    /// Wrap mode changes both the title rule and the blanking rule.
    wrapped: bool,
}

impl LabelRefs {
    /// Boundary references for a full rectangular grid (no wrapping).
    ///
    /// `rows_asc` and `cols_asc` are the distinct key values sorted
    /// ascending. The first row hosts the column titles, the first column
    /// the composite y-labels, the last row the x caption.
    ///
    /// # Errors
    ///
    /// Returns an error if either value set is empty.
    pub fn new(rows_asc: &[DataValue], cols_asc: &[DataValue]) -> Result<Self> {
        let (first_row, last_row) = bounds(rows_asc)?;
        let (first_col, _) = bounds(cols_asc)?;

        Ok(Self {
            first_row,
            y_label_cols: vec![first_col],
            x_label_rows: vec![last_row],
            wrapped: false,
        })
    }

    /// Boundary references for a wrapped layout of the given width.
    ///
    /// Wrapping reuses row positions for unrelated facets, so the boundary
    /// sets become two-element: the first value of the ordering plus the
    /// value offset by the wrap width, when it exists. The y set derives
    /// from the ascending column values, the x set from the descending row
    /// values (the same direction the no-wrap "last row" reference uses).
    ///
    /// # Errors
    ///
    /// Returns an error if either value set is empty or `width` is zero.
    pub fn wrapped(rows_asc: &[DataValue], cols_asc: &[DataValue], width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidConfig("Wrap width must be at least 1".into()));
        }
        let (first_row, _) = bounds(rows_asc)?;
        bounds(cols_asc)?;

        let y_label_cols = boundary_set(cols_asc.iter(), width);
        let x_label_rows = boundary_set(rows_asc.iter().rev(), width);

        Ok(Self {
            first_row,
            y_label_cols,
            x_label_rows,
            wrapped: true,
        })
    }

    /// Whether these references describe a wrapped layout.
    #[must_use]
    pub fn is_wrapped(&self) -> bool {
        self.wrapped
    }
}

/// First and last of a sorted non-empty value slice.
fn bounds(values: &[DataValue]) -> Result<(DataValue, DataValue)> {
    match (values.first(), values.last()) {
        (Some(first), Some(last)) => Ok((first.clone(), last.clone())),
        _ => Err(Error::EmptyData),
    }
}

/// The values at offsets {0, width} of an ordering, deduplicated.
fn boundary_set<'a, I>(values: I, width: usize) -> Vec<DataValue>
where
    I: Iterator<Item = &'a DataValue> + Clone,
{
    let mut set = Vec::with_capacity(2);
    if let Some(first) = values.clone().next() {
        set.push(first.clone());
    }
    if let Some(offset) = values.clone().nth(width) {
        if !set.contains(offset) {
            set.push(offset.clone());
        }
    }
    set
}

/// What happens to an axis label after the conditional policy runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisLabel {
    /// Leave whatever the base rendering applied (the variable name,
    /// subject to the show/hide toggles).
    Keep,
    /// Replace the base label with this text.
    Set(String),
    /// Actively clear the label. Wrap mode blanks labels that no-wrap mode
    /// simply leaves alone, because wrapped rows host unrelated facets.
    Blank,
}

/// The labels one facet ends up carrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLabels {
    /// Column title placed over the x-marginal panel.
    pub title: Option<String>,
    /// X-axis label outcome.
    pub x_label: AxisLabel,
    /// Y-axis label outcome.
    pub y_label: AxisLabel,
}

impl Default for PanelLabels {
    fn default() -> Self {
        Self {
            title: None,
            x_label: AxisLabel::Keep,
            y_label: AxisLabel::Keep,
        }
    }
}

impl PanelLabels {
    /// Resolve the label placement for one facet.
    ///
    /// Pure in (row key, col key, boundary references, captions): the same
    /// inputs always produce the same decision.
    ///
    /// No-wrap: facets in the first row get a column title, facets in the
    /// first column get the composite two-line y-label (row value above the
    /// caption), facets in the last row get the x caption. Wrap: every
    /// facet gets a title; the y-label and x caption appear only on the
    /// boundary sets, and the x-label is blanked everywhere else.
    #[must_use]
    pub fn resolve(
        row_key: &DataValue,
        col_key: &DataValue,
        refs: &LabelRefs,
        x_caption: &str,
        y_caption: &str,
    ) -> Self {
        let title = if refs.wrapped || *row_key == refs.first_row {
            Some(col_key.to_string())
        } else {
            None
        };

        let y_label = if refs.y_label_cols.contains(col_key) {
            AxisLabel::Set(format!("{row_key}\n\n{y_caption}"))
        } else {
            AxisLabel::Keep
        };

        let x_label = if refs.x_label_rows.contains(row_key) {
            AxisLabel::Set(x_caption.to_string())
        } else if refs.wrapped {
            AxisLabel::Blank
        } else {
            AxisLabel::Keep
        };

        Self {
            title,
            x_label,
            y_label,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn distinct_sorted_values(max: usize) -> impl Strategy<Value = Vec<DataValue>> {
        prop::collection::btree_set(0u32..50, 1..=max)
            .prop_map(|set| set.into_iter().map(|v| DataValue::Number(v as f32)).collect())
    }

    proptest! {
        #[test]
        fn no_wrap_exactly_first_row_titled(
            rows in distinct_sorted_values(6),
            cols in distinct_sorted_values(6),
        ) {
            let refs = LabelRefs::new(&rows, &cols).unwrap();
            for (i, row) in rows.iter().enumerate() {
                for col in &cols {
                    let labels = PanelLabels::resolve(row, col, &refs, "x", "y");
                    prop_assert_eq!(labels.title.is_some(), i == 0);
                }
            }
        }

        #[test]
        fn no_wrap_exactly_last_row_captioned(
            rows in distinct_sorted_values(6),
            cols in distinct_sorted_values(6),
        ) {
            let refs = LabelRefs::new(&rows, &cols).unwrap();
            for (i, row) in rows.iter().enumerate() {
                for col in &cols {
                    let labels = PanelLabels::resolve(row, col, &refs, "x", "y");
                    let expected = i == rows.len() - 1;
                    prop_assert_eq!(
                        matches!(labels.x_label, AxisLabel::Set(_)),
                        expected
                    );
                }
            }
        }

        #[test]
        fn wrap_x_label_is_caption_or_blank(
            rows in distinct_sorted_values(8),
            cols in distinct_sorted_values(8),
            width in 1usize..5,
        ) {
            let refs = LabelRefs::wrapped(&rows, &cols, width).unwrap();
            for row in &rows {
                for col in &cols {
                    let labels = PanelLabels::resolve(row, col, &refs, "x", "y");
                    prop_assert!(labels.x_label != AxisLabel::Keep);
                    prop_assert!(labels.title.is_some());
                }
            }
        }

        #[test]
        fn wrap_y_boundary_has_at_most_two_values(
            rows in distinct_sorted_values(8),
            cols in distinct_sorted_values(8),
            width in 1usize..5,
        ) {
            let refs = LabelRefs::wrapped(&rows, &cols, width).unwrap();
            let hits = cols
                .iter()
                .filter(|col| {
                    matches!(
                        PanelLabels::resolve(&rows[0], col, &refs, "x", "y").y_label,
                        AxisLabel::Set(_)
                    )
                })
                .count();
            prop_assert!(hits >= 1 && hits <= 2);
        }
    }
}
