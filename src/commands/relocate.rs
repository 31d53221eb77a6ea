use anyhow::Result;
use evcal_core::event::DATE_FORMAT;
use evcal_core::storage::Persistence;
use evcal_core::EventStore;
use owo_colors::OwoColorize;

use crate::dates;

/// Pick the event up, then drop it on the target day.
pub fn run<P: Persistence>(store: &mut EventStore<P>, id: &str, date_input: &str) -> Result<()> {
    if !store.begin_relocate(id) {
        anyhow::bail!("Event '{}' not found", id);
    }

    let date = match dates::parse_date(date_input) {
        Ok(date) => date,
        Err(e) => {
            store.cancel_relocate();
            return Err(e);
        }
    };

    let (title, from) = match store.held() {
        Some(event) => (event.title.clone(), event.date),
        None => anyhow::bail!("Event '{}' not found", id),
    };

    store.complete_relocate(date)?;

    println!(
        "{}",
        format!(
            "  Moved: {} {} → {}",
            title,
            from.format(DATE_FORMAT),
            date.format(DATE_FORMAT)
        )
        .yellow()
    );
    Ok(())
}
