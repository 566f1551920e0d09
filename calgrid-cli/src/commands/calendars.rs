use anyhow::Result;
use calgrid_core::store::EventStore;
use owo_colors::OwoColorize;

use super::App;
use crate::render::Render;

pub async fn list(app: &App) -> Result<()> {
    let calendars = app.store.list_calendars().await?;

    if calendars.is_empty() {
        println!("{}", "No calendars found.".dimmed());
        println!();
        println!("Create your first calendar with:");
        println!("  calgrid calendars new personal");
        return Ok(());
    }

    let default = app.config.default_calendar.as_deref();
    for calendar in &calendars {
        if default == Some(calendar.id.as_str()) {
            println!("{} {}", calendar.render(), "(default)".dimmed());
        } else {
            println!("{}", calendar.render());
        }
    }

    Ok(())
}

pub async fn create(app: &App, id: &str, title: Option<String>, read_only: bool) -> Result<()> {
    app.store.request_permission().await?;
    let calendar = app.store.create_calendar(id, title, read_only).await?;

    println!("{}", format!("Created calendar {}", calendar.id).green());
    println!("{}", calendar.render());

    Ok(())
}
