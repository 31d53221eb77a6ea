use anyhow::Result;
use evcal_core::form::EventForm;
use evcal_core::storage::Persistence;
use evcal_core::EventStore;
use owo_colors::OwoColorize;

use super::FormFields;

pub fn run<P: Persistence>(store: &mut EventStore<P>, id: &str, fields: FormFields) -> Result<()> {
    let Some(event) = store.get(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };

    // Pre-fill from the stored record, then overwrite what was given.
    let mut form = EventForm::from_event(event);
    fields.apply_to(&mut form)?;

    let draft = form.submit()?;
    let title = draft.title.clone();
    store.update(id, draft)?;

    println!("{}", format!("  Updated: {}", title).yellow());
    Ok(())
}
