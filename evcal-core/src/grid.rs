//! Month grid layout and navigation.
//!
//! A grid covers whole weeks: from the start of the week holding the 1st of
//! the month to the end of the week holding its last day.

use std::collections::HashMap;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};

use crate::event::Event;

/// Events shown per day cell before collapsing the rest into a count.
pub const MAX_VISIBLE_EVENTS: usize = 3;

/// One day slot in the month grid.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub date: NaiveDate,
    /// False for the leading/trailing days borrowed from adjacent months.
    pub in_month: bool,
    pub is_today: bool,
    pub events: Vec<&'a Event>,
}

impl<'a> DayCell<'a> {
    pub fn visible_events(&self) -> &[&'a Event] {
        &self.events[..self.events.len().min(MAX_VISIBLE_EVENTS)]
    }

    /// Number of events hidden behind the "+N more" summary.
    pub fn overflow(&self) -> usize {
        self.events.len().saturating_sub(MAX_VISIBLE_EVENTS)
    }
}

#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub reference: NaiveDate,
    pub week_start: Weekday,
    pub days: Vec<DayCell<'a>>,
}

impl<'a> MonthGrid<'a> {
    pub fn build(
        reference: NaiveDate,
        week_start: Weekday,
        today: NaiveDate,
        events: &'a [Event],
    ) -> Self {
        let (first, last) = month_bounds(reference);
        let start = start_of_week(first, week_start);
        let end = end_of_week(last, week_start);

        let mut by_day: HashMap<NaiveDate, Vec<&'a Event>> = HashMap::new();
        for event in events.iter().filter(|e| e.date >= start && e.date <= end) {
            by_day.entry(event.date).or_default().push(event);
        }

        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|date| DayCell {
                date,
                in_month: date.year() == reference.year() && date.month() == reference.month(),
                is_today: date == today,
                events: by_day.remove(&date).unwrap_or_default(),
            })
            .collect();

        MonthGrid {
            reference,
            week_start,
            days,
        }
    }

    /// Rows of seven days.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell<'a>]> {
        self.days.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell<'a>> {
        self.days.iter().find(|c| c.date == date)
    }

    /// e.g. "March 2024"
    pub fn title(&self) -> String {
        self.reference.format("%B %Y").to_string()
    }

    pub fn weekday_labels(&self) -> [&'static str; 7] {
        weekday_labels(self.week_start)
    }
}

/// The displayed month plus the week convention, as navigated by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarView {
    pub reference: NaiveDate,
    pub week_start: Weekday,
}

impl CalendarView {
    pub fn new(reference: NaiveDate, week_start: Weekday) -> Self {
        CalendarView {
            reference,
            week_start,
        }
    }

    pub fn next(&mut self) {
        self.reference = next_month(self.reference);
    }

    pub fn prev(&mut self) {
        self.reference = prev_month(self.reference);
    }

    /// Jump to the month containing `date`.
    pub fn go_to(&mut self, date: NaiveDate) {
        self.reference = date;
    }

    pub fn grid<'a>(&self, today: NaiveDate, events: &'a [Event]) -> MonthGrid<'a> {
        MonthGrid::build(self.reference, self.week_start, today, events)
    }
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date - Days::new(date.day0() as u64);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX);
    (first, last)
}

/// Clamped to `NaiveDate::MIN` at the edge of the supported range.
pub fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date.checked_sub_days(Days::new(days_into_week(date, week_start)))
        .unwrap_or(NaiveDate::MIN)
}

/// Clamped to `NaiveDate::MAX` at the edge of the supported range.
pub fn end_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    date.checked_add_days(Days::new(6 - days_into_week(date, week_start)))
        .unwrap_or(NaiveDate::MAX)
}

/// Shift by whole calendar months, clamping the day (Jan 31 + 1 = Feb 28/29).
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    shift_months(date, 1)
}

pub fn prev_month(date: NaiveDate) -> NaiveDate {
    shift_months(date, -1)
}

/// Short day names in grid column order.
pub fn weekday_labels(week_start: Weekday) -> [&'static str; 7] {
    const NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
    let offset = week_start.num_days_from_monday() as usize;
    std::array::from_fn(|i| NAMES[(offset + i) % 7])
}

fn days_into_week(date: NaiveDate, week_start: Weekday) -> u64 {
    let day = date.weekday().num_days_from_monday();
    let start = week_start.num_days_from_monday();
    ((7 + day - start) % 7) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDraft;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, on: NaiveDate) -> Event {
        Event::from_draft(id.to_string(), EventDraft::new(id, on))
    }

    #[test]
    fn march_2024_sunday_start() {
        let grid = MonthGrid::build(date(2024, 3, 15), Weekday::Sun, date(2024, 3, 15), &[]);

        assert_eq!(grid.days.len(), 42);
        assert_eq!(grid.days[0].date, date(2024, 2, 25));
        assert_eq!(grid.days[41].date, date(2024, 4, 6));
        assert!(!grid.days[0].in_month);
        assert!(grid.cell(date(2024, 3, 1)).unwrap().in_month);
        assert_eq!(grid.title(), "March 2024");
    }

    #[test]
    fn march_2024_monday_start() {
        let grid = MonthGrid::build(date(2024, 3, 15), Weekday::Mon, date(2024, 3, 15), &[]);

        assert_eq!(grid.days.len(), 35);
        assert_eq!(grid.days[0].date, date(2024, 2, 26));
        assert_eq!(grid.days[34].date, date(2024, 3, 31));
        assert_eq!(grid.weekday_labels()[0], "Mon");
    }

    #[test]
    fn month_aligned_to_week_needs_no_padding() {
        // February 2015 starts on a Sunday and has 28 days.
        let grid = MonthGrid::build(date(2015, 2, 10), Weekday::Sun, date(2015, 2, 10), &[]);
        assert_eq!(grid.days.len(), 28);
        assert_eq!(grid.weeks().count(), 4);
        assert!(grid.days.iter().all(|c| c.in_month));
    }

    #[test]
    fn grid_invariants_hold_for_many_months() {
        for week_start in [Weekday::Sun, Weekday::Mon, Weekday::Wed] {
            let mut reference = date(1999, 1, 31);
            for _ in 0..400 {
                let grid = MonthGrid::build(reference, week_start, reference, &[]);
                let (first, last) = month_bounds(reference);

                assert_eq!(grid.days.len() % 7, 0);
                assert!((4..=6).contains(&grid.weeks().count()));
                assert!(grid.weeks().all(|w| w.len() == 7));
                assert_eq!(grid.days[0].date.weekday(), week_start);

                for day in first.iter_days().take_while(|d| *d <= last) {
                    assert!(grid.cell(day).is_some_and(|c| c.in_month));
                }

                let starts_on_boundary = first.weekday() == week_start;
                assert_eq!(grid.days[0].date == first, starts_on_boundary);
                let ends_on_boundary = last.weekday() == week_start.pred();
                assert_eq!(grid.days[grid.days.len() - 1].date == last, ends_on_boundary);

                reference = next_month(reference);
            }
        }
    }

    #[test]
    fn cells_group_events_by_day_in_collection_order() {
        let events = vec![
            event("b", date(2024, 3, 4)),
            event("x", date(2024, 3, 5)),
            event("a", date(2024, 3, 4)),
            event("outside", date(2024, 7, 1)),
            event("leading", date(2024, 2, 26)),
        ];
        let grid = MonthGrid::build(date(2024, 3, 1), Weekday::Sun, date(2024, 3, 1), &events);

        let ids: Vec<_> = grid
            .cell(date(2024, 3, 4))
            .unwrap()
            .events
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);

        let leading = grid.cell(date(2024, 2, 26)).unwrap();
        assert!(!leading.in_month);
        assert_eq!(leading.events.len(), 1);

        let total: usize = grid.days.iter().map(|c| c.events.len()).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn marks_today() {
        let grid = MonthGrid::build(date(2024, 3, 1), Weekday::Sun, date(2024, 3, 12), &[]);
        let today: Vec<_> = grid.days.iter().filter(|c| c.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2024, 3, 12));
    }

    #[test]
    fn day_cell_caps_visible_events() {
        let events: Vec<_> = ["a", "b", "c", "d", "e"]
            .into_iter()
            .map(|id| event(id, date(2024, 3, 4)))
            .collect();
        let grid = MonthGrid::build(date(2024, 3, 1), Weekday::Sun, date(2024, 3, 1), &events);
        let cell = grid.cell(date(2024, 3, 4)).unwrap();

        assert_eq!(cell.visible_events().len(), MAX_VISIBLE_EVENTS);
        assert_eq!(cell.visible_events()[0].id, "a");
        assert_eq!(cell.overflow(), 2);

        let empty = grid.cell(date(2024, 3, 5)).unwrap();
        assert!(empty.visible_events().is_empty());
        assert_eq!(empty.overflow(), 0);
    }

    #[test]
    fn month_navigation_clamps_day() {
        assert_eq!(next_month(date(2024, 1, 31)), date(2024, 2, 29));
        assert_eq!(next_month(date(2023, 1, 31)), date(2023, 2, 28));
        assert_eq!(prev_month(date(2024, 3, 31)), date(2024, 2, 29));
        assert_eq!(next_month(date(2024, 12, 15)), date(2025, 1, 15));
        assert_eq!(prev_month(date(2024, 1, 15)), date(2023, 12, 15));
        assert_eq!(shift_months(date(2024, 5, 10), -14), date(2023, 3, 10));
    }

    #[test]
    fn month_navigation_is_reversible() {
        let mut d = date(2020, 1, 15);
        for _ in 0..60 {
            let month = |x: NaiveDate| (x.year(), x.month());
            assert_eq!(month(next_month(prev_month(d))), month(d));
            assert_eq!(month(prev_month(next_month(d))), month(d));
            assert_eq!(next_month(prev_month(d)), d);
            d = next_month(d);
        }
    }

    #[test]
    fn view_moves_by_month() {
        let mut view = CalendarView::new(date(2024, 1, 31), Weekday::Sun);
        view.next();
        assert_eq!(view.reference, date(2024, 2, 29));
        view.prev();
        view.prev();
        assert_eq!(view.reference, date(2023, 12, 29));

        view.go_to(date(2024, 3, 4));
        let events = vec![event("s", date(2024, 3, 4))];
        let grid = view.grid(date(2024, 3, 4), &events);
        assert_eq!(grid.title(), "March 2024");
        assert!(grid.cell(date(2024, 3, 4)).unwrap().is_today);
    }

    #[test]
    fn labels_follow_week_start() {
        assert_eq!(
            weekday_labels(Weekday::Sun),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
        assert_eq!(weekday_labels(Weekday::Sat)[1], "Sun");
    }

    #[test]
    fn week_bounds_clamp_at_date_range_edges() {
        let min = NaiveDate::MIN;
        let max = NaiveDate::MAX;
        assert_eq!(start_of_week(min, min.weekday().succ()), min);
        assert_eq!(end_of_week(max, max.weekday()), max);

        for reference in [min, date(262142, 12, 15)] {
            let grid = MonthGrid::build(reference, Weekday::Sun, reference, &[]);
            assert!(grid.cell(reference).unwrap().in_month);
            assert!(grid.weeks().all(|week| week.len() <= 7));
        }
    }
}
