//! Choropleth rendering.
//!
//! Resolves a classification scheme by name, classifies one numeric
//! column, labels every row with the upper bound of its class, and hands a
//! labelled copy of the table to a [`Plotter`] as a categorical column.

use std::time::Instant;
use tracing::debug;

use crate::classify::{lookup_scheme, Classification};
use crate::error::Result;
use crate::logging::{log_classification_stats, log_operation_end, log_operation_start};
use crate::plot::{Canvas, PlotStyle, Plotter, RasterPlotter};
use crate::table::{ClassLabel, Column, GeoTable};

/// Name of the label column added to the plotted table
pub const LABEL_COLUMN: &str = "cl";

/// Everything computed before plotting
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPlan {
    /// Classifier output
    pub classification: Classification,
    /// Legend candidates: every class upper bound, ascending
    pub legend: Vec<f64>,
    /// One label per table row, in row order
    pub labels: Vec<ClassLabel>,
}

/// Label each row with `bins[yb[i]]`, truncated toward zero when
/// `label_int` is set. Truncation can merge neighbouring classes.
pub fn build_labels(bins: &[f64], yb: &[usize], label_int: bool) -> Vec<ClassLabel> {
    yb.iter()
        .map(|&bin| {
            let upper = bins[bin];
            if label_int {
                ClassLabel::Int(upper.trunc() as i64)
            } else {
                ClassLabel::Float(upper)
            }
        })
        .collect()
}

/// Classify `table[column]` with the named scheme and build row labels.
///
/// The scheme is resolved first, so an unknown name fails before the
/// column is even looked at.
pub fn label_plan(
    table: &GeoTable,
    column: &str,
    scheme: &str,
    k: usize,
    label_int: bool,
) -> Result<LabelPlan> {
    let scheme = lookup_scheme(scheme)?;
    let values = table.numeric_column(column)?;
    let classification = scheme.classify(values, k)?;

    log_classification_stats(
        scheme.name(),
        column,
        table.len(),
        k,
        &classification.bins,
        &classification.counts,
    );

    let legend = classification.bins.clone();
    let labels = build_labels(&classification.bins, &classification.yb, label_int);

    Ok(LabelPlan {
        classification,
        legend,
        labels,
    })
}

/// Render a choropleth of `table[column]` with the raster plotter.
///
/// `style` and `target` go to the plotter untouched apart from the legend
/// flag: a legend is drawn whenever at least one class exists, whatever
/// `style.legend` says.
pub fn choropleth(
    table: &GeoTable,
    column: &str,
    scheme: &str,
    k: usize,
    style: &PlotStyle,
    target: Option<Canvas>,
    label_int: bool,
) -> Result<Canvas> {
    choropleth_with(
        &RasterPlotter::default(),
        table,
        column,
        scheme,
        k,
        style,
        target,
        label_int,
    )
}

/// [`choropleth`] against any [`Plotter`]
#[allow(clippy::too_many_arguments)]
pub fn choropleth_with(
    plotter: &dyn Plotter,
    table: &GeoTable,
    column: &str,
    scheme: &str,
    k: usize,
    style: &PlotStyle,
    target: Option<Canvas>,
    label_int: bool,
) -> Result<Canvas> {
    let start = Instant::now();
    log_operation_start("choropleth", Some(column));

    let result = render(plotter, table, column, scheme, k, style, target, label_int);

    log_operation_end("choropleth", start, result.is_ok());
    result
}

#[allow(clippy::too_many_arguments)]
fn render(
    plotter: &dyn Plotter,
    table: &GeoTable,
    column: &str,
    scheme: &str,
    k: usize,
    style: &PlotStyle,
    target: Option<Canvas>,
    label_int: bool,
) -> Result<Canvas> {
    let plan = label_plan(table, column, scheme, k, label_int)?;
    let derived = table.assign(LABEL_COLUMN, Column::Labels(plan.labels))?;

    let style = PlotStyle {
        legend: !plan.legend.is_empty(),
        ..style.clone()
    };
    debug!(
        requested_legend = style.legend,
        legend_entries = plan.legend.len(),
        "Plotting classified table"
    );

    plotter.plot(&derived, LABEL_COLUMN, true, &style, target)
}
