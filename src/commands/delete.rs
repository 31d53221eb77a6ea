use anyhow::Result;
use dialoguer::Confirm;
use evcal_core::storage::Persistence;
use evcal_core::EventStore;
use owo_colors::OwoColorize;

pub fn run<P: Persistence>(store: &mut EventStore<P>, id: &str, yes: bool) -> Result<()> {
    let Some(event) = store.get(id) else {
        anyhow::bail!("Event '{}' not found", id);
    };
    let title = event.title.clone();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("  Delete \"{}\"?", title))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Nothing deleted".dimmed());
            return Ok(());
        }
    }

    store.delete(id)?;

    println!("{}", format!("  Deleted: {}", title).red());
    Ok(())
}
