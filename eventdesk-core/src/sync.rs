//! Drives the event store from backend requests.
//!
//! Every operation dispatches `Loading` first, then the success transition or
//! `Error`. Failures are recorded in the store and also returned, so callers
//! can report them without inspecting state.

use crate::error::{CoreResult, EventDeskError};
use crate::event::{Category, Event, NewEvent};
use crate::ids::Id;
use crate::remote::EventApi;
use crate::store::{EventState, Transition};

pub struct EventSync<A> {
    api: A,
    state: EventState,
}

impl<A: EventApi> EventSync<A> {
    pub fn new(api: A) -> Self {
        EventSync {
            api,
            state: EventState::default(),
        }
    }

    pub fn state(&self) -> &EventState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn dispatch(&mut self, transition: Transition) {
        self.state = std::mem::take(&mut self.state).apply(transition);
    }

    /// Record a failure and hand it back.
    fn fail<T>(&mut self, err: EventDeskError) -> CoreResult<T> {
        tracing::warn!(error = %err, "backend request failed");
        self.dispatch(Transition::Error(err.to_string()));
        Err(err)
    }

    /// Fetch events and categories together and replace the store contents.
    pub async fn load(&mut self) -> CoreResult<()> {
        self.dispatch(Transition::Loading);

        let fetched: CoreResult<(Vec<Event>, Vec<Category>)> =
            tokio::try_join!(self.api.list_events(), self.api.list_categories());

        match fetched {
            Ok((events, categories)) => {
                tracing::debug!(
                    events = events.len(),
                    categories = categories.len(),
                    "loaded"
                );
                self.dispatch(Transition::SetData { events, categories });
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn refresh(&mut self) -> CoreResult<()> {
        self.load().await
    }

    pub async fn add_event(&mut self, event: &NewEvent) -> CoreResult<Event> {
        self.dispatch(Transition::Loading);

        match self.api.create_event(event).await {
            Ok(created) => {
                tracing::info!(id = %created.id, title = %created.title, "event created");
                self.dispatch(Transition::AddEvent(created.clone()));
                Ok(created)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn update_event(&mut self, id: &Id, event: &NewEvent) -> CoreResult<Event> {
        self.dispatch(Transition::Loading);

        match self.api.update_event(id, event).await {
            Ok(updated) => {
                tracing::info!(id = %updated.id, "event updated");
                self.dispatch(Transition::UpdateEvent(updated.clone()));
                Ok(updated)
            }
            Err(err) => self.fail(err),
        }
    }

    pub async fn delete_event(&mut self, id: &Id) -> CoreResult<()> {
        self.dispatch(Transition::Loading);

        match self.api.delete_event(id).await {
            Ok(()) => {
                tracing::info!(%id, "event deleted");
                self.dispatch(Transition::DeleteEvent(id.clone()));
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    pub fn clear_error(&mut self) {
        self.dispatch(Transition::ClearError);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::{User, timestamp};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// In-memory backend. `fail_with` makes every call return that status.
    #[derive(Default)]
    pub(crate) struct MemoryApi {
        pub events: Mutex<Vec<Event>>,
        pub categories: Vec<Category>,
        pub users: Mutex<Vec<User>>,
        pub fail_with: Option<u16>,
        pub next_id: AtomicU64,
    }

    impl MemoryApi {
        pub fn with_events(events: Vec<Event>) -> Self {
            MemoryApi {
                next_id: AtomicU64::new(100),
                events: Mutex::new(events),
                categories: vec![Category {
                    id: Id::from(1),
                    name: "sports".into(),
                }],
                ..Default::default()
            }
        }

        fn check(&self) -> CoreResult<()> {
            match self.fail_with {
                Some(code) => Err(EventDeskError::Network(format!(
                    "HTTP error! status: {}",
                    code
                ))),
                None => Ok(()),
            }
        }
    }

    impl EventApi for MemoryApi {
        async fn list_events(&self) -> CoreResult<Vec<Event>> {
            self.check()?;
            Ok(self.events.lock().unwrap().clone())
        }

        async fn list_categories(&self) -> CoreResult<Vec<Category>> {
            self.check()?;
            Ok(self.categories.clone())
        }

        async fn list_users(&self) -> CoreResult<Vec<User>> {
            self.check()?;
            Ok(self.users.lock().unwrap().clone())
        }

        async fn create_event(&self, event: &NewEvent) -> CoreResult<Event> {
            self.check()?;
            let id = Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
            let created = event.clone().with_id(id);
            self.events.lock().unwrap().push(created.clone());
            Ok(created)
        }

        async fn update_event(&self, id: &Id, event: &NewEvent) -> CoreResult<Event> {
            self.check()?;
            let updated = event.clone().with_id(id.clone());
            let mut events = self.events.lock().unwrap();
            match events.iter_mut().find(|e| &e.id == id) {
                Some(slot) => *slot = updated.clone(),
                None => return Err(EventDeskError::Network("HTTP error! status: 404".into())),
            }
            Ok(updated)
        }

        async fn delete_event(&self, id: &Id) -> CoreResult<()> {
            self.check()?;
            self.events.lock().unwrap().retain(|e| &e.id != id);
            Ok(())
        }
    }

    pub(crate) fn new_event(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: None,
            location: None,
            start_time: timestamp::parse("2024-01-01T10:00").unwrap(),
            end_time: timestamp::parse("2024-01-01T11:00").unwrap(),
            category_ids: vec![Id::from(1)],
            image: None,
            created_by: Some(Id::from(1)),
        }
    }

    #[tokio::test]
    async fn load_fills_store() {
        let api = MemoryApi::with_events(vec![new_event("a").with_id(Id::from(1))]);
        let mut sync = EventSync::new(api);

        sync.load().await.unwrap();

        assert_eq!(sync.state().events.len(), 1);
        assert_eq!(sync.state().categories.len(), 1);
        assert!(!sync.state().loading);
        assert!(sync.state().error.is_none());
    }

    #[tokio::test]
    async fn failed_load_records_error() {
        let api = MemoryApi {
            fail_with: Some(500),
            ..MemoryApi::with_events(vec![])
        };
        let mut sync = EventSync::new(api);

        let err = sync.load().await.unwrap_err();

        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(sync.state().error.as_deref(), Some("HTTP error! status: 500"));
        assert!(!sync.state().loading);
    }

    #[tokio::test]
    async fn crud_round_trip_updates_store() {
        let mut sync = EventSync::new(MemoryApi::with_events(vec![]));
        sync.load().await.unwrap();

        let created = sync.add_event(&new_event("draft")).await.unwrap();
        assert_eq!(sync.state().events, vec![created.clone()]);

        let updated = sync
            .update_event(&created.id, &new_event("final"))
            .await
            .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(sync.state().events[0].title, "final");

        sync.delete_event(&created.id).await.unwrap();
        assert!(sync.state().events.is_empty());
        assert!(sync.api().events.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_mutation_keeps_events_and_can_be_cleared() {
        let mut sync = EventSync::new(MemoryApi::with_events(vec![
            new_event("keep").with_id(Id::from(1)),
        ]));
        sync.load().await.unwrap();

        let err = sync
            .update_event(&Id::from(9), &new_event("ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, EventDeskError::Network(_)));
        assert_eq!(sync.state().events.len(), 1);
        assert!(sync.state().error.is_some());

        sync.clear_error();
        assert!(sync.state().error.is_none());
    }
}
