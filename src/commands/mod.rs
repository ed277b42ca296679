pub mod categories;
pub mod delete;
pub mod edit;
pub mod list;
pub mod new;
pub mod session;
pub mod show;
pub mod users;

use anyhow::{Context as _, Result};
use eventdesk_core::config::EventDeskConfig;
use eventdesk_core::event::timestamp;
use eventdesk_core::remote::RemoteClient;
use eventdesk_core::session::{Session, SessionStorage};
use eventdesk_core::sync::EventSync;
use eventdesk_core::validate::EventDraft;
use eventdesk_core::Id;
use owo_colors::OwoColorize;

use crate::utils::tui;

/// Everything a command needs: config, the synced event store and the
/// session. Opened once per invocation and closed on the way out.
pub struct Context {
    pub config: EventDeskConfig,
    pub sync: EventSync<RemoteClient>,
    pub session: Session,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = EventDeskConfig::load()?;
        let client = RemoteClient::from_config(&config)?;
        let session = Session::open(SessionStorage::new(config.session_path()));

        Ok(Context {
            config,
            sync: EventSync::new(client),
            session,
        })
    }

    pub fn close(self) -> Result<()> {
        self.session.close()?;
        Ok(())
    }

    /// Fetch events and categories behind a spinner.
    pub async fn load_events(&mut self) -> Result<()> {
        let spinner = tui::create_spinner(format!("Loading events from {}", self.config.api_url));
        let result = self.sync.load().await;
        spinner.finish_and_clear();

        result.with_context(|| format!("Error Loading Events from {}", self.config.api_url))
    }

    /// Refuse mutations while no user is selected.
    pub fn require_user(&self) -> Result<()> {
        if !self.session.can_edit_event() {
            anyhow::bail!(
                "No user selected.\n\n\
                Pick one with:\n  \
                eventdesk users\n  \
                eventdesk login <user-id>"
            );
        }
        Ok(())
    }
}

/// Event form fields as given on the command line. `None` leaves a field
/// as it is.
pub struct EventFields {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image: Option<String>,
    pub categories: Vec<Id>,
}

impl EventFields {
    /// Overwrite the draft with every field that was given.
    pub fn apply_to(self, draft: &mut EventDraft) -> Result<()> {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(start) = self.start {
            draft.start_time = parse_time(&start)?;
        }
        if let Some(end) = self.end {
            draft.end_time = parse_time(&end)?;
        }
        if let Some(description) = self.description {
            draft.description = non_empty(description);
        }
        if let Some(location) = self.location {
            draft.location = non_empty(location);
        }
        if let Some(image) = self.image {
            draft.image = non_empty(image);
        }
        if !self.categories.is_empty() {
            draft.category_ids.clear();
            for id in self.categories {
                draft.toggle_category(id, true);
            }
        }
        Ok(())
    }
}

pub fn parse_time(input: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    timestamp::parse(input).map_err(|e| anyhow::anyhow!(e))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Print a success line in the same spot every mutation uses.
pub fn report_success(message: &str) {
    println!("{} {}", "✓".green(), message.green());
}
