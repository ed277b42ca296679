use anyhow::Result;
use dialoguer::Confirm;
use eventdesk_core::{EventDeskError, Id};

use super::{report_success, Context};
use crate::render::{event_line, not_found};

pub async fn run(ctx: &mut Context, id: &Id, yes: bool) -> Result<()> {
    ctx.require_user()?;
    ctx.load_events().await?;

    let state = ctx.sync.state();
    let line = match state.event(id) {
        Ok(event) => event_line(state, event),
        Err(EventDeskError::NotFound(message)) => {
            println!("{}", not_found(&message));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    // Confirm unless --yes
    if !yes {
        println!("{}", line);
        let confirmed = Confirm::new()
            .with_prompt("Delete this event? This cannot be undone.")
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    ctx.sync.delete_event(id).await?;
    report_success("Event deleted successfully!");

    Ok(())
}
