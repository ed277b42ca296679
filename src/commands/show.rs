use anyhow::Result;
use eventdesk_core::{EventDeskError, Id};

use super::Context;
use crate::render::{event_detail, not_found};

pub async fn run(ctx: &mut Context, id: &Id) -> Result<()> {
    ctx.load_events().await?;

    // Organizer name only; the event is still shown without it.
    if let Err(e) = ctx.session.refresh_users(ctx.sync.api()).await {
        tracing::debug!(error = %e, "no users available for organizer lookup");
    }

    let state = ctx.sync.state();
    match state.event(id) {
        Ok(event) => {
            let creator = event
                .created_by
                .as_ref()
                .and_then(|creator| ctx.session.user_by_id(creator));
            println!("{}", event_detail(state, event, creator));
            Ok(())
        }
        Err(EventDeskError::NotFound(message)) => {
            println!("{}", not_found(&message));
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
