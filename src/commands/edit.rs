use anyhow::Result;
use eventdesk_core::validate::EventDraft;
use eventdesk_core::{EventDeskError, Id};

use super::{report_success, Context, EventFields};
use crate::render::{event_line, not_found, Render};

pub async fn run(ctx: &mut Context, id: &Id, fields: EventFields) -> Result<()> {
    ctx.require_user()?;
    ctx.load_events().await?;

    let mut draft = match ctx.sync.state().event(id) {
        Ok(event) => EventDraft::from_event(event),
        Err(EventDeskError::NotFound(message)) => {
            println!("{}", not_found(&message));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    fields.apply_to(&mut draft)?;

    let event = match draft.submit(ctx.session.current_user(), &ctx.config.form_defaults()) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("{}", e.render());
            return Err(e.into());
        }
    };

    let updated = ctx.sync.update_event(id, &event).await?;

    report_success("Event updated successfully!");
    println!("{}", event_line(ctx.sync.state(), &updated));

    Ok(())
}
