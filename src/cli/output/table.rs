//! Table output formatting for CLI commands
//!
//! Formats items and usage summaries with comfy-table.

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use crate::domain::models::{AdmissionDecision, Item, UsageReport};

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Format search or trending results
    pub fn format_items(&self, items: &[Item]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Artist").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
            Cell::new("Video").add_attribute(Attribute::Bold),
        ]);

        for (i, item) in items.iter().enumerate() {
            let video = format!("https://youtu.be/{}", item.source_id);
            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(truncate_text(&item.title, 50)),
                Cell::new(truncate_text(&item.artist, 30)),
                Cell::new(item.duration_iso.as_deref().map_or_else(|| "-".to_string(), format_duration)),
                self.colored(Cell::new(video), Color::Cyan),
            ]);
        }

        table.to_string()
    }

    /// Format the usage summary and current admission state
    pub fn format_usage(&self, report: &UsageReport, decision: &AdmissionDecision) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        let pct_color = match report.percentage_used {
            0..=59 => Color::Green,
            60..=89 => Color::Yellow,
            _ => Color::Red,
        };

        table.add_row(vec![
            Cell::new("Requests today"),
            Cell::new(format!("{} / {}", report.requests_today, report.max_daily_requests)),
        ]);
        table.add_row(vec![
            Cell::new("Remaining today"),
            Cell::new(report.remaining_today),
        ]);
        table.add_row(vec![
            Cell::new("Used"),
            self.colored(Cell::new(format!("{}%", report.percentage_used)), pct_color),
        ]);
        table.add_row(vec![
            Cell::new("Resets in"),
            Cell::new(format_millis(report.resets_in_ms)),
        ]);
        table.add_row(vec![
            Cell::new("Last request"),
            Cell::new(
                report
                    .last_request_time
                    .map_or_else(|| "-".to_string(), |t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string()),
            ),
        ]);

        let admission = if decision.allowed {
            self.colored(Cell::new("ready"), Color::Green)
        } else {
            self.colored(
                Cell::new(decision.reason.as_deref().unwrap_or("denied")),
                Color::Yellow,
            )
        };
        table.add_row(vec![Cell::new("Live requests"), admission]);

        table.to_string()
    }

    fn colored(&self, cell: Cell, color: Color) -> Cell {
        if self.use_colors {
            cell.fg(color)
        } else {
            cell
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render an ISO 8601 duration such as `PT1H3M5S` as `1:03:05`.
fn format_duration(iso: &str) -> String {
    let Some(rest) = iso.strip_prefix("PT") else {
        return iso.to_string();
    };

    let (mut hours, mut minutes, mut seconds) = (0u64, 0u64, 0u64);
    let mut number = String::new();
    for c in rest.chars() {
        if c.is_ascii_digit() {
            number.push(c);
            continue;
        }
        let Ok(value) = number.parse::<u64>() else {
            return iso.to_string();
        };
        match c {
            'H' => hours = value,
            'M' => minutes = value,
            'S' => seconds = value,
            _ => return iso.to_string(),
        }
        number.clear();
    }

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

fn format_millis(ms: i64) -> String {
    let total_minutes = ms.max(0) / 60_000;
    format!("{}h {:02}m", total_minutes / 60, total_minutes % 60)
}
