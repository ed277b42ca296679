//! Canonical in-memory event state and its transitions.
//!
//! `apply` is the only way state changes. It is pure: the network calls that
//! produce transitions live in [`crate::sync`].

use crate::error::{CoreResult, EventDeskError};
use crate::event::{Category, Event};
use crate::ids::Id;

const EVENT_GONE: &str = "This event doesn't exist or may have been removed.";
const NO_EVENTS: &str = "No events available.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventState {
    /// Server/insertion order, not sorted.
    pub events: Vec<Event>,
    pub categories: Vec<Category>,
    /// True only while a fetch or mutation is outstanding.
    pub loading: bool,
    /// Set after a failed network operation.
    pub error: Option<String>,
}

/// A state transition, dispatched in response to request lifecycle events.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Loading,
    SetData {
        events: Vec<Event>,
        categories: Vec<Category>,
    },
    AddEvent(Event),
    UpdateEvent(Event),
    DeleteEvent(Id),
    Error(String),
    ClearError,
}

/// Apply one transition to the state.
pub fn apply(mut state: EventState, transition: Transition) -> EventState {
    match transition {
        Transition::Loading => {
            state.loading = true;
            state.error = None;
        }
        Transition::SetData { events, categories } => {
            state.events = events;
            state.categories = categories;
            state.settle();
        }
        Transition::AddEvent(event) => {
            state.events.push(event);
            state.settle();
        }
        Transition::UpdateEvent(event) => {
            if let Some(slot) = state.events.iter_mut().find(|e| e.id == event.id) {
                *slot = event;
            }
            state.settle();
        }
        Transition::DeleteEvent(id) => {
            state.events.retain(|e| e.id != id);
            state.settle();
        }
        Transition::Error(message) => {
            state.error = Some(message);
            state.loading = false;
        }
        Transition::ClearError => {
            state.error = None;
        }
    }
    state
}

impl EventState {
    pub fn apply(self, transition: Transition) -> Self {
        apply(self, transition)
    }

    fn settle(&mut self) {
        self.loading = false;
        self.error = None;
    }

    // SELECTORS:

    pub fn category_by_id(&self, id: &Id) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Resolve category ids in order, skipping ones the store doesn't know.
    pub fn event_categories(&self, ids: &[Id]) -> Vec<&Category> {
        ids.iter().filter_map(|id| self.category_by_id(id)).collect()
    }

    /// Look up an event, distinguishing a stale id from an empty store.
    pub fn event(&self, id: &Id) -> CoreResult<&Event> {
        match self.events.iter().find(|e| &e.id == id) {
            Some(event) => Ok(event),
            None if self.events.is_empty() => Err(EventDeskError::NotFound(NO_EVENTS.into())),
            None => Err(EventDeskError::NotFound(EVENT_GONE.into())),
        }
    }
}
