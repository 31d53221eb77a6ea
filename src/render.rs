//! Terminal rendering for calendar types.
//!
//! Width handling happens on plain text first; colors are applied last so
//! ANSI escapes never count towards a column's width.

use evcal_core::grid::{DayCell, MonthGrid};
use evcal_core::{Event, EventColor};
use owo_colors::OwoColorize;

/// Width of one day column in the month grid.
const CELL_WIDTH: usize = 14;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// A compact chip: title, then the time if there is one.
    fn render(&self) -> String {
        paint(self.color, &chip_text(self, usize::MAX))
    }
}

impl Render for MonthGrid<'_> {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let title = self.title();
        let total_width = CELL_WIDTH * 7;
        lines.push(format!("{:^total_width$}", title).bold().to_string());

        let header: String = self
            .weekday_labels()
            .iter()
            .map(|label| fit(label, CELL_WIDTH))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.weeks() {
            lines.push(week.iter().map(render_day_number).collect());

            for slot in 0..evcal_core::grid::MAX_VISIBLE_EVENTS {
                lines.push(week.iter().map(|cell| render_chip_slot(cell, slot)).collect());
            }

            lines.push(week.iter().map(render_overflow).collect());
        }

        lines.join("\n")
    }
}

fn render_day_number(cell: &DayCell) -> String {
    let label = if cell.is_today {
        fit(&format!("[{}]", cell.date.format("%-d")), CELL_WIDTH)
    } else {
        fit(&cell.date.format("%-d").to_string(), CELL_WIDTH)
    };

    if cell.is_today {
        label.cyan().bold().to_string()
    } else if cell.in_month {
        label
    } else {
        label.dimmed().to_string()
    }
}

fn render_chip_slot(cell: &DayCell, slot: usize) -> String {
    match cell.visible_events().get(slot) {
        Some(event) => {
            let text = fit(&chip_text(event, CELL_WIDTH - 1), CELL_WIDTH);
            if cell.in_month {
                paint(event.color, &text)
            } else {
                text.dimmed().to_string()
            }
        }
        None => " ".repeat(CELL_WIDTH),
    }
}

fn render_overflow(cell: &DayCell) -> String {
    match cell.overflow() {
        0 => " ".repeat(CELL_WIDTH),
        n => fit(&format!("+{} more", n), CELL_WIDTH).dimmed().to_string(),
    }
}

/// Plain chip text, shortened to `max` characters.
fn chip_text(event: &Event, max: usize) -> String {
    let text = match &event.time {
        Some(time) => format!("{} {}", time, event.title),
        None => event.title.clone(),
    };
    truncate(&text, max)
}

fn paint(color: EventColor, text: &str) -> String {
    match color {
        EventColor::Blue => text.blue().to_string(),
        EventColor::Purple => text.magenta().to_string(),
        EventColor::Pink => text.bright_magenta().to_string(),
        EventColor::Green => text.green().to_string(),
        EventColor::Orange => text.yellow().to_string(),
        EventColor::Red => text.red().to_string(),
    }
}

/// Truncate to `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(max - 1).collect();
    cut.push('…');
    cut
}

/// Truncate and left-align into exactly `width` characters.
fn fit(text: &str, width: usize) -> String {
    format!("{:<width$}", truncate(text, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use evcal_core::EventDraft;

    fn event(title: &str, time: Option<&str>) -> Event {
        let mut draft = EventDraft::new(title, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        draft.time = time.map(String::from);
        Event::from_draft("id".to_string(), draft)
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("Standup", 10), "Standup");
        assert_eq!(truncate("Quarterly planning", 8), "Quarter…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn fit_pads_to_width() {
        assert_eq!(fit("ab", 5), "ab   ");
        assert_eq!(fit("abcdefgh", 5).chars().count(), 5);
    }

    #[test]
    fn chip_shows_time_before_title() {
        assert_eq!(chip_text(&event("Standup", Some("09:00")), 40), "09:00 Standup");
        assert_eq!(chip_text(&event("Standup", None), 40), "Standup");
    }

    #[test]
    fn grid_render_has_overflow_summary() {
        let events: Vec<_> = (0..5).map(|i| event(&format!("E{i}"), None)).collect();
        let grid = MonthGrid::build(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Weekday::Sun,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            &events,
        );

        let out = grid.render();
        assert!(out.contains("March 2024"));
        assert!(out.contains("+2 more"));
        assert!(out.contains("E2"));
        assert!(!out.contains("E3"));
    }
}
