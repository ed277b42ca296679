use anyhow::Result;
use owo_colors::OwoColorize;

use super::Context;
use crate::render::Render;
use crate::utils::tui;

pub async fn run(ctx: &mut Context) -> Result<()> {
    let spinner = tui::create_spinner("Loading users".to_string());
    let result = ctx.session.refresh_users(ctx.sync.api()).await;
    spinner.finish_and_clear();
    result?;

    if ctx.session.users().is_empty() {
        println!("{}", "No users found".dimmed());
        return Ok(());
    }

    let current = ctx.session.current_user().map(|u| u.id.clone());
    for user in ctx.session.users() {
        let marker = if current.as_ref() == Some(&user.id) {
            "*".green().to_string()
        } else {
            " ".to_string()
        };
        println!("{} {}", marker, user.render());
    }

    Ok(())
}
