use anyhow::Result;
use calgrid_core::time::local_date;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use super::{App, find_event, finish};
use crate::render::render_details;

pub async fn run(app: &App, id: &str, yes: bool) -> Result<()> {
    let event = find_event(&app.store, id).await?;
    println!("{}", render_details(app.locale(), &event, &app.tz));
    println!();

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt("  Delete this event?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "  Nothing deleted".dimmed());
            return Ok(());
        }
    }

    let mut screen = app.screen();
    screen.jump_to(local_date(&app.tz, event.start_date)).await;
    app.open(&mut screen).await;

    let result = screen.delete_event(id).await;
    finish(&mut screen, result)
}
