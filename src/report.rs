//! The one rendering model for a validation outcome.
//!
//! Both the Analyse panel and the headless printer draw from `report_rows`.

use crate::pipeline::ValidationOutcome;

pub const EMPTY_REPORT: &str = "No file information available.";

/// How a row should be emphasised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTone {
    Plain,
    Good,
    Bad,
    /// Multi-line preformatted text
    Preformatted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub label: &'static str,
    pub value: String,
    pub tone: RowTone,
}

impl ReportRow {
    fn plain(label: &'static str, value: impl Into<String>) -> Self {
        Self { label, value: value.into(), tone: RowTone::Plain }
    }
}

pub fn report_rows(outcome: &ValidationOutcome) -> Vec<ReportRow> {
    let n = &outcome.normalized;
    let file = &outcome.file;

    let valid_tone = if n.is_valid() { RowTone::Good } else { RowTone::Bad };
    let raw = serde_json::to_string_pretty(&outcome.raw_response)
        .unwrap_or_else(|_| outcome.raw_response.to_string());

    vec![
        ReportRow::plain("Name", file.name.clone()),
        ReportRow::plain("Size", format!("{} bytes", file.size)),
        ReportRow::plain("Type", file.media_type_hint.clone()),
        ReportRow::plain("Checksum", outcome.checksum.clone()),
        ReportRow::plain("Module", outcome.module_used.as_str()),
        ReportRow { label: "Valid", value: n.valid.to_string(), tone: valid_tone },
        ReportRow::plain("MIME Type", n.mime_type.clone()),
        ReportRow::plain("Format", n.format.clone()),
        ReportRow::plain("Size", n.size_text.clone()),
        ReportRow::plain("Well-Formed", n.well_formed.to_string()),
        ReportRow::plain("Validation Message", n.valid_message.clone()),
        ReportRow::plain("Well-Formed Message", n.well_formed_message.clone()),
        ReportRow::plain("Messages", n.messages_text.clone()),
        ReportRow::plain(
            "Completed",
            outcome.completed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ),
        ReportRow { label: "Raw API Output", value: raw, tone: RowTone::Preformatted },
    ]
}

/// Plain-text table for terminals without the TUI.
pub fn render_text(outcome: Option<&ValidationOutcome>, color: bool) -> String {
    use colored::Colorize;

    let Some(outcome) = outcome else {
        return format!("{}\n", EMPTY_REPORT);
    };

    let rows = report_rows(outcome);
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let label = format!("{:<width$}", row.label, width = width);
        let value = match (row.tone, color) {
            (RowTone::Good, true) => row.value.green().bold().to_string(),
            (RowTone::Bad, true) => row.value.red().bold().to_string(),
            _ => row.value,
        };
        match row.tone {
            RowTone::Preformatted => {
                out.push_str(&format!("{}\n", if color { label.bold().to_string() } else { label }));
                for line in value.lines() {
                    out.push_str(&format!("  {}\n", line));
                }
            }
            _ => {
                let label = if color { label.bold().to_string() } else { label };
                out.push_str(&format!("{}  {}\n", label, value));
            }
        }
    }
    out
}
