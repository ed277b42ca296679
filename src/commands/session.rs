use anyhow::Result;
use eventdesk_core::Id;
use owo_colors::OwoColorize;

use super::{report_success, Context};

pub async fn login(ctx: &mut Context, user_id: &Id) -> Result<()> {
    ctx.session.refresh_users(ctx.sync.api()).await?;

    let Some(user) = ctx.session.user_by_id(user_id).cloned() else {
        let available: Vec<_> = ctx
            .session
            .users()
            .iter()
            .map(|u| format!("{} ({})", u.id, u.name))
            .collect();
        anyhow::bail!(
            "User '{}' not found. Available: {}",
            user_id,
            available.join(", ")
        );
    };

    let name = user.name.clone();
    ctx.session.set_current_user(Some(user))?;
    report_success(&format!("Welcome back, {}!", name));

    Ok(())
}

pub fn logout(ctx: &mut Context) -> Result<()> {
    if ctx.session.current_user().is_none() {
        println!("{}", "Not logged in".dimmed());
        return Ok(());
    }

    ctx.session.logout()?;
    report_success("Logged out.");

    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<()> {
    match ctx.session.current_user() {
        Some(user) => println!("{} {}", user.name.bold(), format!("[{}]", user.id).dimmed()),
        None => println!("{}", "Not logged in".dimmed()),
    }
    Ok(())
}
