use anyhow::Result;
use eventdesk_core::validate::EventDraft;

use super::{parse_time, report_success, Context, EventFields};
use crate::render::{event_line, Render};

pub async fn run(ctx: &mut Context, fields: EventFields) -> Result<()> {
    ctx.require_user()?;

    let (Some(start), Some(end)) = (fields.start.as_deref(), fields.end.as_deref()) else {
        anyhow::bail!("Both --start and --end are required");
    };
    let mut draft = EventDraft::new(String::new(), parse_time(start)?, parse_time(end)?);
    fields.apply_to(&mut draft)?;

    // Rejected drafts never reach the backend.
    let new_event = match draft.submit(ctx.session.current_user(), &ctx.config.form_defaults()) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("{}", e.render());
            return Err(e.into());
        }
    };

    ctx.load_events().await?;
    let created = ctx.sync.add_event(&new_event).await?;

    report_success("Event created successfully!");
    println!("{}", event_line(ctx.sync.state(), &created));

    Ok(())
}
