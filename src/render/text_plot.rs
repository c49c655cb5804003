use super::colors::{to_db, trace_glyph};
use super::figure::{span, AxisScale, Figure, LineStyle, Trace};
use std::cmp::Ordering;
use std::fmt::Write as _;

/// Dynamic range shown on log-scaled plots.
const LOG_FLOOR_DB: f64 = -120.0;
/// Columns before the plot area: a 10-wide y label and a space.
const LABEL_WIDTH: usize = 11;

/// Character grid, row 0 at the top.
struct Grid {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    /// Fill rows `top..=bottom` of column `col`.
    fn vline(&mut self, col: usize, top: usize, bottom: usize, glyph: char) {
        let (top, bottom) = (top.min(bottom), top.max(bottom).min(self.height - 1));
        for row in top..=bottom {
            self.cells[row * self.width + col] = glyph;
        }
    }

    fn row(&self, row: usize) -> String {
        self.cells[row * self.width..(row + 1) * self.width].iter().collect()
    }
}

/// Whether a style draws at this column.
fn style_visible(style: LineStyle, col: usize) -> bool {
    match style {
        LineStyle::Solid => true,
        LineStyle::Dashed => (col / 2) % 2 == 0,
        LineStyle::Dotted => col % 3 == 0,
    }
}

/// Values in the figure's y units: raw for linear axes, dB relative to the
/// figure-wide maximum for log axes.
fn scaled_values(figure: &Figure) -> Vec<Vec<f64>> {
    match figure.y_scale {
        AxisScale::Linear => figure.traces.iter().map(|t| t.y.clone()).collect(),
        AxisScale::Log => {
            let max = figure
                .traces
                .iter()
                .map(|t| span(&t.y).1)
                .fold(f64::NEG_INFINITY, f64::max);
            figure
                .traces
                .iter()
                .map(|t| t.y.iter().map(|&v| to_db(v, max, LOG_FLOOR_DB)).collect())
                .collect()
        }
    }
}

/// Min/max of the visible points of one trace per plot column.
fn column_envelope(trace: &Trace, values: &[f64], x_lo: f64, x_hi: f64, cols: usize) -> Vec<Option<(f64, f64)>> {
    let mut env: Vec<Option<(f64, f64)>> = vec![None; cols];
    let px_per_unit = cols as f64 / (x_hi - x_lo);
    for (&x, &y) in trace.x.iter().zip(values) {
        if !y.is_finite() || x < x_lo || x > x_hi {
            continue;
        }
        let col = (((x - x_lo) * px_per_unit) as usize).min(cols - 1);
        env[col] = Some(match env[col] {
            Some((lo, hi)) => (lo.min(y), hi.max(y)),
            None => (y, y),
        });
    }
    env
}

/// Render a figure as a `width × height` character plot with axis labels and
/// a legend.
///
/// Each trace is drawn as a per-column min/max envelope, so dense traces stay
/// readable at any width. Consecutive columns are joined vertically.
pub fn render_figure(figure: &Figure, width: usize, height: usize) -> String {
    let width = width.max(8);
    let height = height.max(4);
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", figure.title);

    let (x_lo, x_hi) = figure.x_window();
    let scaled = scaled_values(figure);
    if figure.traces.is_empty() || x_hi.partial_cmp(&x_lo) != Some(Ordering::Greater) {
        let _ = writeln!(out, "(no data)");
        return out;
    }

    let envelopes: Vec<_> = figure
        .traces
        .iter()
        .zip(&scaled)
        .map(|(t, v)| column_envelope(t, v, x_lo, x_hi, width))
        .collect();

    let (mut y_lo, mut y_hi) = envelopes
        .iter()
        .flatten()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(a, b)| (lo.min(a), hi.max(b)));
    if !y_lo.is_finite() {
        let _ = writeln!(out, "(no visible points)");
        return out;
    }
    if y_hi - y_lo < f64::EPSILON {
        y_lo -= 1.0;
        y_hi += 1.0;
    }

    let to_row = |y: f64| -> usize {
        let t = (y_hi - y) / (y_hi - y_lo);
        ((t * (height - 1) as f64).round() as usize).min(height - 1)
    };

    let mut grid = Grid::new(width, height);
    for (i, (env, trace)) in envelopes.iter().zip(&figure.traces).enumerate() {
        let glyph = trace_glyph(i);
        let mut prev: Option<usize> = None;
        for (col, cell) in env.iter().enumerate() {
            let Some((lo, hi)) = *cell else { continue };
            let (top, bottom) = (to_row(hi), to_row(lo));
            // Join to the previous column so steep slopes stay connected.
            let (top, bottom) = match prev {
                Some(p) => (top.min(p), bottom.max(p).max(top)),
                None => (top, bottom),
            };
            if style_visible(trace.style, col) {
                grid.vline(col, top, bottom, glyph);
            }
            prev = Some(to_row((lo + hi) / 2.0));
        }
    }

    let unit = match figure.y_scale {
        AxisScale::Linear => String::new(),
        AxisScale::Log => " [dB re max]".to_string(),
    };
    let _ = writeln!(out, "{}{unit}", figure.y_label);
    for row in 0..height {
        let label = if row == 0 {
            format!("{y_hi:>10.3e}")
        } else if row == height - 1 {
            format!("{y_lo:>10.3e}")
        } else {
            String::new()
        };
        let _ = writeln!(out, "{label:>10} |{}", grid.row(row));
    }
    let gutter = " ".repeat(LABEL_WIDTH);
    let _ = writeln!(out, "{gutter}+{}", "-".repeat(width));
    let lo_label = format!("{x_lo:.3}");
    let hi_label = format!("{x_hi:.3}");
    let pad = width.saturating_sub(hi_label.len());
    let _ = writeln!(out, "{gutter} {lo_label:<pad$}{hi_label}");
    let _ = writeln!(out, "{gutter} {}", figure.x_label);

    for (i, trace) in figure.traces.iter().enumerate() {
        let style = match trace.style {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        };
        let _ = writeln!(out, "  {} {} ({style})", trace_glyph(i), trace.name);
    }
    out
}
