use anyhow::Result;
use chrono::NaiveDate;
use evcal_core::storage::Persistence;
use evcal_core::EventStore;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn run<P: Persistence>(store: &EventStore<P>, day: NaiveDate) -> Result<()> {
    println!("{}", day.format("%A, %B %-d %Y").bold());

    let events = store.events_on(day);
    if events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in events {
        println!("  {}  {}", event.render(), event.id.dimmed());
        if let Some(description) = &event.description {
            println!("      {}", description.dimmed());
        }
        if let Some(recurrence) = &event.recurrence {
            println!("      {}", format!("repeats {}", recurrence.kind).dimmed());
        }
    }

    Ok(())
}
