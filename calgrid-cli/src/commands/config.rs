use anyhow::Result;
use calgrid_core::config::{GlobalConfig, Locale};
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = GlobalConfig::config_path()?;
    let config = GlobalConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Calendars:  {}", config.data_path().display());

    println!();
    println!("{}", "Calendar".bold());
    println!("  Time zone:  {}", config.time_zone);
    println!(
        "  Locale:     {}",
        match config.locale {
            Locale::It => "it",
            Locale::En => "en",
        }
    );
    println!(
        "  Default:    {}",
        config.default_calendar.as_deref().unwrap_or("(first writable)")
    );

    let prefs = &config.preferences;
    println!();
    println!("{}", "Preferences".bold());
    println!("  Week starts on Monday:  {}", prefs.week_starts_on_monday);
    println!("  Show week numbers:      {}", prefs.show_week_numbers);
    println!("  Notifications:          {}", prefs.notifications);

    Ok(())
}
