//! Terminal rendering for eventdesk types.
//!
//! Extension traits that add colored output to eventdesk-core types using
//! owo_colors.

use chrono::{DateTime, Local, Utc};
use eventdesk_core::store::EventState;
use eventdesk_core::validate::{truncate_description, ValidationError, DESCRIPTION_WORD_LIMIT};
use eventdesk_core::{Category, Event, User};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Category {
    fn render(&self) -> String {
        format!("{}", self.display_name().blue())
    }
}

impl Render for User {
    fn render(&self) -> String {
        let role = format!("({:?})", self.role).to_lowercase();
        format!("{} {} {}", self.id.dimmed(), self.name, role.dimmed())
    }
}

impl Render for ValidationError {
    fn render(&self) -> String {
        let title = match self {
            ValidationError::EndNotAfterStart => "Invalid Dates",
            ValidationError::TitleTooLong { .. } => "Title too long",
        };
        format!("{}\n   {}", title.red().bold(), self)
    }
}

/// Format a timestamp in local time (e.g. "Sat Mar 20 2025, 15:00")
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local)
        .format("%a %b %-d %Y, %H:%M")
        .to_string()
}

fn render_categories(state: &EventState, event: &Event) -> String {
    state
        .event_categories(&event.category_ids)
        .into_iter()
        .map(|c| c.render())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary used in lists.
pub fn event_line(state: &EventState, event: &Event) -> String {
    let id = format!("[{}]", event.id);
    let mut line = format!(
        "{} {} {}",
        id.dimmed(),
        event.title.bold(),
        format_time(&event.start_time).dimmed()
    );

    if let Some(location) = &event.location {
        line.push_str(&format!(" @ {}", location));
    }

    let categories = render_categories(state, event);
    if !categories.is_empty() {
        line.push_str(&format!("  {}", categories));
    }

    line
}

/// Full detail view for `show`.
pub fn event_detail(state: &EventState, event: &Event, creator: Option<&User>) -> String {
    let mut lines = vec![format!("{}", event.title.bold())];

    if let Some(image) = &event.image {
        lines.push(format!("   {}", image.dimmed()));
    }

    lines.push(String::new());
    if let Some(location) = &event.location {
        lines.push(format!("   {} {}", "Location:".dimmed(), location));
    }
    lines.push(format!("   {} {}", "Starts:".dimmed(), format_time(&event.start_time)));
    lines.push(format!("   {} {}", "Ends:".dimmed(), format_time(&event.end_time)));

    if let Some(creator) = creator {
        lines.push(format!("   {} {}", "Organizer:".dimmed(), creator.name));
    }

    let categories = render_categories(state, event);
    let categories = if categories.is_empty() {
        "None".dimmed().to_string()
    } else {
        categories
    };
    lines.push(format!("   {} {}", "Categories:".dimmed(), categories));

    if let Some(description) = &event.description {
        lines.push(String::new());
        lines.push(truncate_description(description, DESCRIPTION_WORD_LIMIT));
    }

    lines.join("\n")
}

/// The view shown when an id doesn't resolve to an event.
pub fn not_found(message: &str) -> String {
    format!(
        "{}\n   {}\n\n   {}",
        "Event Not Found".red().bold(),
        message,
        "Run `eventdesk list` to see available events.".dimmed()
    )
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
