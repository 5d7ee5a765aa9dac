//! Result rendering as boxed tables, JSON or CSV.

use serde::Serialize;

use crate::config::OutputFormat;
use crate::{CliError, Result};

/// A row that can be laid out in a table.
pub trait TableRow {
    /// Column headers, in cell order.
    fn headers() -> &'static [&'static str];

    /// Formatted cells, one per header.
    fn cells(&self) -> Vec<String>;
}

/// Name/value pair for single-result reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub metric: &'static str,
    pub value: String,
}

impl Metric {
    pub fn new(metric: &'static str, value: impl std::fmt::Display) -> Self {
        Self {
            metric,
            value: value.to_string(),
        }
    }
}

impl TableRow for Metric {
    fn headers() -> &'static [&'static str] {
        &["Metric", "Value"]
    }

    fn cells(&self) -> Vec<String> {
        vec![self.metric.to_string(), self.value.clone()]
    }
}

/// Render rows in the requested format.
pub fn render<R: TableRow + Serialize>(format: OutputFormat, rows: &[R]) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(
            R::headers(),
            rows.iter().map(R::cells).collect(),
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => render_csv(rows),
    }
}

/// Render a structured report; JSON carries `report`, the other formats
/// lay out `metrics`.
pub fn render_report<S: Serialize>(
    format: OutputFormat,
    report: &S,
    metrics: &[Metric],
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        _ => render(format, metrics),
    }
}

fn render_csv<R: Serialize>(rows: &[R]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| CliError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!(" {:<width$} ", cell, width = w))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let mut out = vec![rule("┌", "┬", "┐"), line(&header_cells), rule("├", "┼", "┤")];
    out.extend(rows.iter().map(|row| line(row)));
    out.push(rule("└", "┴", "┘"));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> Vec<Metric> {
        vec![Metric::new("net_pv", "0.000123"), Metric::new("par_spread_bp", 100.5)]
    }

    #[test]
    fn test_table_layout() {
        let table = render(OutputFormat::Table, &metrics()).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[1].contains("Metric"));
        assert!(lines[3].contains("net_pv"));
        assert!(lines[4].contains("100.5"));
        let widths: Vec<usize> = lines.iter().map(|l| l.chars().count()).collect();
        assert!(widths.iter().all(|w| *w == widths[0]));
    }

    #[test]
    fn test_csv_has_header() {
        let csv = render(OutputFormat::Csv, &metrics()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("metric,value"));
        assert_eq!(lines.next(), Some("net_pv,0.000123"));
    }

    #[test]
    fn test_json_array() {
        let json = render(OutputFormat::Json, &metrics()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[1]["metric"], "par_spread_bp");
    }

    #[test]
    fn test_report_json_uses_report() {
        #[derive(Serialize)]
        struct Report {
            hazard_rate: f64,
        }
        let json =
            render_report(OutputFormat::Json, &Report { hazard_rate: 0.02 }, &metrics()).unwrap();
        assert!(json.contains("hazard_rate"));
        assert!(!json.contains("net_pv"));
    }
}
