use anyhow::Result;
use calgrid_core::store::EventStore;

use super::App;
use crate::render::Render;

pub async fn run(app: &App, request: bool) -> Result<()> {
    let permission = if request {
        app.store.request_permission().await?
    } else {
        app.store.permission_status().await?
    };

    println!("Calendar access: {}", permission.render());
    println!("  Directory:  {}", app.store.root().display());

    if !permission.is_granted() && !request {
        println!();
        println!("Grant access with:");
        println!("  calgrid permission --request");
    }

    Ok(())
}
