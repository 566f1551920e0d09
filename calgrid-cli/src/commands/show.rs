use anyhow::Result;

use super::{App, find_event};
use crate::render::render_details;

pub async fn run(app: &App, id: &str) -> Result<()> {
    let event = find_event(&app.store, id).await?;
    println!("{}", render_details(app.locale(), &event, &app.tz));
    Ok(())
}
