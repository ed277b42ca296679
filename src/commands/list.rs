use anyhow::Result;
use eventdesk_core::filter::{FilterCriteria, SortOrder};
use eventdesk_core::Id;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::{event_line, pluralize};

pub async fn run(
    ctx: &mut Context,
    search: Option<String>,
    categories: Vec<Id>,
    sort: Option<SortOrder>,
    json: bool,
) -> Result<()> {
    ctx.load_events().await?;

    let mut criteria = FilterCriteria::new();
    if let Some(term) = search {
        criteria.set_search_term(term);
    }
    if let Some(order) = sort {
        criteria.set_sort_order(order);
    }
    for id in categories {
        criteria.toggle_category(id, true);
    }

    let state = ctx.sync.state();
    let filtered = criteria.apply(&state.events);

    if json {
        println!("{}", serde_json::to_string_pretty(&filtered)?);
        return Ok(());
    }

    if filtered.is_empty() {
        if criteria.has_active_filters() {
            println!("{}", "No events match your filters".dimmed());
        } else {
            println!("{}", "No events found".dimmed());
        }
        return Ok(());
    }

    for event in &filtered {
        println!("{}", event_line(state, event));
    }

    if criteria.has_active_filters() {
        println!(
            "\n{}",
            format!(
                "{} of {} {}",
                filtered.len(),
                state.events.len(),
                pluralize("event", state.events.len())
            )
            .dimmed()
        );
    }

    Ok(())
}
