use anyhow::Result;
use chrono::NaiveDate;

use super::{App, print_notices};
use crate::render::render_day;

pub async fn run(app: &App, date: Option<NaiveDate>) -> Result<()> {
    let mut screen = app.screen();
    if let Some(date) = date {
        screen.jump_to(date).await;
    }
    app.open(&mut screen).await;

    println!(
        "{}",
        render_day(
            app.locale(),
            screen.selected_date(),
            &screen.selected_events(),
            &app.tz
        )
    );
    print_notices(&mut screen);

    Ok(())
}
