//! Text line chart for the exchange rate history.

use crate::core::history::RateHistory;
use console::Style;

const HEIGHT: usize = 8;
const COLUMN_WIDTH: usize = 7;
const DECIMALS: usize = 5;

fn series_marker(index: usize) -> (&'static str, Style) {
    match index % 2 {
        0 => ("●", Style::new().cyan()),
        _ => ("◆", Style::new().magenta()),
    }
}

/// Maps a value onto a chart row, 0 being the top row.
fn row_for(value: f64, lo: f64, hi: f64) -> usize {
    if hi <= lo {
        return HEIGHT / 2;
    }
    let scaled = ((value - lo) / (hi - lo) * (HEIGHT - 1) as f64).round() as usize;
    HEIGHT - 1 - scaled.min(HEIGHT - 1)
}

fn centered(glyph: &str) -> String {
    let left = (COLUMN_WIDTH - 1) / 2;
    format!(
        "{}{}{}",
        " ".repeat(left),
        glyph,
        " ".repeat(COLUMN_WIDTH - 1 - left)
    )
}

/// Renders every series on shared axes, followed by day labels and a legend.
pub fn render_history(history: &RateHistory) -> String {
    let Some((lo, hi)) = history.bounds() else {
        return "No history available".to_string();
    };

    let columns = history.labels.len();
    let mut grid: Vec<Vec<Vec<usize>>> = vec![vec![Vec::new(); columns]; HEIGHT];
    for (index, series) in history.series.iter().enumerate() {
        for (column, value) in series.points.iter().take(columns).enumerate() {
            if value.is_finite() {
                grid[row_for(*value, lo, hi)][column].push(index);
            }
        }
    }

    let axis_width = DECIMALS + 4;
    let mut lines = Vec::with_capacity(HEIGHT + 3);
    for (row, cells) in grid.iter().enumerate() {
        let tick = hi - (hi - lo) * row as f64 / (HEIGHT - 1) as f64;
        let mut line = format!("{tick:>axis_width$.DECIMALS$} ┤");
        for cell in cells {
            let glyph = match cell.as_slice() {
                [] => " ".to_string(),
                [only] => {
                    let (marker, style) = series_marker(*only);
                    style.apply_to(marker).to_string()
                }
                // Overlapping series
                _ => "◉".to_string(),
            };
            line.push_str(&centered(&glyph));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.push(format!(
        "{} └{}",
        " ".repeat(axis_width),
        "─".repeat(COLUMN_WIDTH * columns)
    ));

    let labels: String = history
        .labels
        .iter()
        .map(|label| format!("{label:^COLUMN_WIDTH$}"))
        .collect();
    lines.push(format!("{}  {}", " ".repeat(axis_width), labels.trim_end()));

    let legend: Vec<String> = history
        .series
        .iter()
        .enumerate()
        .map(|(index, series)| {
            let (marker, style) = series_marker(index);
            format!("{} {}", style.apply_to(marker), series.name)
        })
        .collect();
    lines.push(format!("{}  {}", " ".repeat(axis_width), legend.join("   ")));

    lines.join("\n")
}
