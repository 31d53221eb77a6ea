use anyhow::Result;
use chrono::Weekday;
use evcal_core::config::EvcalConfig;
use owo_colors::OwoColorize;

/// Show the effective settings, after storing a new week start if one was given.
///
/// Only values written in config.toml are stored back; `EVCAL_*` overrides
/// stay temporary.
pub fn run(week_start: Option<Weekday>) -> Result<()> {
    let path = EvcalConfig::config_path()?;

    if let Some(week_start) = week_start {
        EvcalConfig::set_week_start(&path, week_start)?;
        println!("{}", format!("  Week now starts on {}", week_start).green());
    }

    let config = EvcalConfig::load()?;
    println!("{} {}", "config:".dimmed(), path.display());
    println!("{} {}", "data_dir:".dimmed(), config.data_path().display());
    println!("{} {}", "week_start:".dimmed(), config.week_start);
    Ok(())
}
