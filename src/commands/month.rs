use anyhow::Result;
use chrono::NaiveDate;
use evcal_core::grid::CalendarView;
use evcal_core::storage::Persistence;
use evcal_core::EventStore;

use crate::render::Render;

pub fn run<P: Persistence>(store: &EventStore<P>, view: &CalendarView, today: NaiveDate) -> Result<()> {
    let grid = view.grid(today, store.events());
    println!("{}", grid.render());
    Ok(())
}
