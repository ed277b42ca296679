use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;

pub async fn run(ctx: &mut Context) -> Result<()> {
    ctx.load_events().await?;

    let state = ctx.sync.state();
    if state.categories.is_empty() {
        println!("{}", "No categories found".dimmed());
        return Ok(());
    }

    for category in &state.categories {
        let count = state
            .events
            .iter()
            .filter(|e| e.category_ids.contains(&category.id))
            .count();
        let id = format!("[{}]", category.id);
        println!("{} {} {}", id.dimmed(), category.render(), format!("({})", count).dimmed());
    }

    Ok(())
}
