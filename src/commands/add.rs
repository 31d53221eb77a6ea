use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{Input, Select};
use evcal_core::event::DATE_FORMAT;
use evcal_core::form::EventForm;
use evcal_core::storage::Persistence;
use evcal_core::{EventColor, EventStore};
use owo_colors::OwoColorize;

use super::{FormFields, parse_repeat};
use crate::dates;

const REPEAT_CHOICES: [&str; 5] = ["none", "daily", "weekly", "monthly", "custom"];

pub fn run<P: Persistence>(
    store: &mut EventStore<P>,
    fields: FormFields,
    today: NaiveDate,
) -> Result<()> {
    let interactive = fields.title.is_none();

    // Without a --date this behaves like the floating add button: today.
    let mut form = EventForm::blank(Some(today));
    fields.apply_to(&mut form)?;

    if interactive {
        prompt_form(&mut form, &fields)?;
        println!();
    }

    let draft = form.submit()?;
    let title = draft.title.clone();
    let date = draft.date;
    let id = store.create(draft)?;

    println!(
        "{} {}",
        format!("  Created: {} on {}", title, date.format(DATE_FORMAT)).green(),
        id.dimmed()
    );

    Ok(())
}

/// Ask for every field that wasn't given on the command line.
fn prompt_form(form: &mut EventForm, fields: &FormFields) -> Result<()> {
    loop {
        let title: String = Input::new().with_prompt("  Title").interact_text()?;
        if !title.trim().is_empty() {
            form.title = title;
            break;
        }
        eprintln!("  {}", "Title is required".red());
    }

    if fields.date.is_none() {
        loop {
            let input: String = Input::new()
                .with_prompt("  Date")
                .default(form.date.clone())
                .interact_text()?;
            match dates::parse_date(&input) {
                Ok(date) => {
                    form.date = date.format(DATE_FORMAT).to_string();
                    break;
                }
                Err(e) => eprintln!("  {}", e.to_string().red()),
            }
        }
    }

    if fields.time.is_none() {
        form.time = Input::new()
            .with_prompt("  Time (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
    }

    if fields.description.is_none() {
        form.description = Input::new()
            .with_prompt("  Description (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
    }

    if fields.color.is_none() {
        let names: Vec<&str> = EventColor::ALL.iter().map(|c| c.as_str()).collect();
        let selection = Select::new()
            .with_prompt("  Color")
            .items(&names)
            .default(0)
            .interact()?;
        form.color = EventColor::ALL[selection];
    }

    if fields.repeat.is_none() {
        let selection = Select::new()
            .with_prompt("  Repeat")
            .items(&REPEAT_CHOICES)
            .default(0)
            .interact()?;
        form.recurrence = parse_repeat(REPEAT_CHOICES[selection])?;
    }

    Ok(())
}
