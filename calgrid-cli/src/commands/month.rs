use anyhow::Result;
use calgrid_core::month::YearMonth;
use chrono::NaiveDate;

use super::{App, print_screen};

pub async fn run(app: &App, month: Option<YearMonth>, select: Option<NaiveDate>) -> Result<()> {
    let mut screen = app.screen();

    // Anchors are moved before opening so only the final month is fetched.
    if let Some(month) = month
        && !month.contains(screen.today())
        && let Some(first) = month.first_day()
    {
        screen.jump_to(first).await;
    }
    if let Some(date) = select {
        screen.select_date(date).await;
    }

    app.open(&mut screen).await;
    print_screen(&mut screen, app.locale());

    Ok(())
}
