//! Plain-text chart table.

use tenki_forecast::ChartView;

/// Shown in place of a missing value
pub const MISSING: &str = "—";

pub const EMPTY_STATE: &str = "No data to display. Run again to refresh.";

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => MISSING.to_string(),
    }
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len)), cell)
}

fn unit_of<'a>(view: &'a ChartView, series: &str) -> &'a str {
    view.series_units.get(series).map_or("", String::as_str)
}

/// (min, max) over the present values of one series
fn value_range(view: &ChartView, series: &str) -> Option<(f64, f64)> {
    view.data
        .iter()
        .filter_map(|p| p.values.get(series).copied().flatten())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

fn table_lines(view: &ChartView) -> Vec<String> {
    let header: Vec<String> = std::iter::once(String::new())
        .chain(view.series.iter().cloned())
        .collect();

    let rows: Vec<Vec<String>> = view
        .data
        .iter()
        .map(|point| {
            std::iter::once(point.label.clone())
                .chain(
                    view.series
                        .iter()
                        .map(|name| format_value(point.values.get(name).copied().flatten())),
                )
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .chain(std::iter::once(&header))
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| pad(cell, *width))
                .collect();
            cells.join("  ").trim_end().to_string()
        })
        .collect()
}

/// Render the chart as a table with a unit legend and per-series ranges
pub fn render_chart(view: &ChartView) -> String {
    let mut lines = vec![format!("{} from {}", view.period.description(), view.from_date)];

    if view.is_empty() {
        lines.push(EMPTY_STATE.to_string());
    } else {
        let legend: Vec<String> = view
            .series
            .iter()
            .map(|name| format!("{} ({})", name, unit_of(view, name)))
            .collect();
        lines.push(format!("Legend: {}", legend.join(", ")));
        lines.push(String::new());

        lines.extend(table_lines(view));
        lines.push(String::new());

        lines.extend(view.series.iter().map(|name| match value_range(view, name) {
            Some((lo, hi)) => format!("{}: {:.1} to {:.1} {}", name, lo, hi, unit_of(view, name)),
            None => format!("{}: no values", name),
        }));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
