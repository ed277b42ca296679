//! REST backend access.
//!
//! `EventApi` is the boundary the sync layer talks to; `RemoteClient` is the
//! HTTP implementation of it.

use std::future::Future;
use std::time::Duration;

use reqwest::{Method, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::EventDeskConfig;
use crate::error::{CoreResult, EventDeskError};
use crate::event::{Category, Event, NewEvent, User};
use crate::ids::Id;

/// CRUD endpoints for events plus the read-only category and user lists.
pub trait EventApi {
    fn list_events(&self) -> impl Future<Output = CoreResult<Vec<Event>>> + Send;

    fn list_categories(&self) -> impl Future<Output = CoreResult<Vec<Category>>> + Send;

    fn list_users(&self) -> impl Future<Output = CoreResult<Vec<User>>> + Send;

    /// Returns the created event with its server-assigned id.
    fn create_event(&self, event: &NewEvent) -> impl Future<Output = CoreResult<Event>> + Send;

    fn update_event(
        &self,
        id: &Id,
        event: &NewEvent,
    ) -> impl Future<Output = CoreResult<Event>> + Send;

    fn delete_event(&self, id: &Id) -> impl Future<Output = CoreResult<()>> + Send;
}

/// HTTP client for the events backend.
#[derive(Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteClient {
    pub fn new(base_url: &str, timeout: Duration) -> CoreResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(RemoteClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &EventDeskConfig) -> CoreResult<Self> {
        Self::new(&config.api_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> CoreResult<Response> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        error_for_status(resp)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> CoreResult<T> {
        let resp = self.send::<()>(Method::GET, path, None).await?;
        Ok(resp.json().await?)
    }
}

/// Turn a non-2xx response into a network failure named after its status.
fn error_for_status(resp: Response) -> CoreResult<Response> {
    let status = resp.status();
    if !status.is_success() {
        return Err(EventDeskError::Network(format!(
            "HTTP error! status: {}",
            status.as_u16()
        )));
    }
    Ok(resp)
}

impl EventApi for RemoteClient {
    /// GET /events
    async fn list_events(&self) -> CoreResult<Vec<Event>> {
        self.fetch("/events").await
    }

    /// GET /categories
    async fn list_categories(&self) -> CoreResult<Vec<Category>> {
        self.fetch("/categories").await
    }

    /// GET /users
    async fn list_users(&self) -> CoreResult<Vec<User>> {
        self.fetch("/users").await
    }

    /// POST /events
    async fn create_event(&self, event: &NewEvent) -> CoreResult<Event> {
        let resp = self.send(Method::POST, "/events", Some(event)).await?;
        Ok(resp.json().await?)
    }

    /// PUT /events/:id
    async fn update_event(&self, id: &Id, event: &NewEvent) -> CoreResult<Event> {
        let body = event.clone().with_id(id.clone());
        let resp = self
            .send(Method::PUT, &format!("/events/{}", id), Some(&body))
            .await?;
        Ok(resp.json().await?)
    }

    /// DELETE /events/:id
    async fn delete_event(&self, id: &Id) -> CoreResult<()> {
        self.send::<()>(Method::DELETE, &format!("/events/{}", id), None)
            .await?;
        Ok(())
    }
}
