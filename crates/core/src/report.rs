//! Printable reports for a single dataset.
//!
//! Renderers only ever see a [`DatasetSummary`]; raw rows are gone by the
//! time a report is requested.

use std::fmt::Write as _;

use crate::summary::DatasetSummary;

/// Turns one dataset summary into a downloadable document.
pub trait ReportRenderer: Send + Sync {
    /// MIME type of the rendered bytes.
    fn content_type(&self) -> &'static str;

    /// File extension used for the download name, without the dot.
    fn file_extension(&self) -> &'static str;

    fn render(&self, summary: &DatasetSummary) -> Vec<u8>;
}

/// Plain-text report with the same sections as the exported PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

const LABEL_WIDTH: usize = 22;

fn rule(out: &mut String, width: usize) {
    out.push_str(&"-".repeat(width));
    out.push('\n');
}

impl ReportRenderer for TextReport {
    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, summary: &DatasetSummary) -> Vec<u8> {
        let stats = &summary.stats;
        let mut out = String::new();

        let title = format!("Dataset Analysis Report: {}", summary.source_name);
        let _ = writeln!(out, "{title}");
        rule(&mut out, title.chars().count());
        out.push('\n');

        let metrics = [
            ("Total Equipment", stats.record_count.to_string()),
            ("Average Flowrate", format!("{} L/min", stats.mean_flowrate)),
            ("Average Pressure", format!("{} bar", stats.mean_pressure)),
            ("Average Temperature", format!("{} °C", stats.mean_temperature)),
            ("Uploaded Date", summary.created_at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ];
        let _ = writeln!(out, "{:<LABEL_WIDTH$}{}", "Metric", "Value");
        rule(&mut out, LABEL_WIDTH * 2);
        for (label, value) in &metrics {
            let _ = writeln!(out, "{label:<LABEL_WIDTH$}{value}");
        }
        out.push('\n');

        let _ = writeln!(out, "Equipment Type Distribution");
        let _ = writeln!(out, "{:<LABEL_WIDTH$}{}", "Type", "Count");
        rule(&mut out, LABEL_WIDTH * 2);
        for (kind, count) in stats.kind_distribution.iter() {
            let _ = writeln!(out, "{kind:<LABEL_WIDTH$}{count}");
        }

        out.into_bytes()
    }
}

/// Download name for a rendered report: `<source_name>.<ext>`.
#[must_use]
pub fn report_file_name(summary: &DatasetSummary, renderer: &dyn ReportRenderer) -> String {
    let stem: String = summary
        .source_name
        .chars()
        .map(|c| if c.is_control() || matches!(c, '"' | '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}.{}", renderer.file_extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::SummaryStats;
    use chrono::{TimeZone, Utc};

    fn sample() -> DatasetSummary {
        DatasetSummary {
            id: 3,
            owner: "alice".to_owned(),
            source_name: "plant-a.csv".to_owned(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap(),
            stats: SummaryStats {
                record_count: 2,
                mean_flowrate: 47.85,
                mean_pressure: 2.3,
                mean_temperature: 24.75,
                kind_distribution: [("Pump", 2)].into_iter().collect(),
            },
        }
    }

    #[test]
    fn text_report_contains_every_section() {
        let bytes = TextReport.render(&sample());
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("Dataset Analysis Report: plant-a.csv\n"));
        assert!(text.contains("Total Equipment"));
        assert!(text.contains("47.85 L/min"));
        assert!(text.contains("2.3 bar"));
        assert!(text.contains("24.75 °C"));
        assert!(text.contains("2024-03-09 14:05:00"));
        assert!(text.contains("Equipment Type Distribution"));
        assert!(text.lines().any(|l| l.starts_with("Pump") && l.trim_end().ends_with('2')));
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = sample();
        assert_eq!(TextReport.render(&s), TextReport.render(&s));
    }

    #[test]
    fn file_name_strips_path_separators() {
        let mut s = sample();
        s.source_name = "../etc/\"x\".csv".to_owned();
        assert_eq!(report_file_name(&s, &TextReport), ".._etc__x_.csv.txt");
    }
}
