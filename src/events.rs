use axum::async_trait;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, warn};
use uuid::Uuid;

/// Subset of the user record carried in login events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Fire-and-forget event emitted after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLoginEvent {
    pub user: EventUser,
    #[serde(with = "time::serde::rfc3339")]
    pub login_date: OffsetDateTime,
}

impl UserLoginEvent {
    pub fn now(id: Uuid, name: &str, email: &str) -> Self {
        Self {
            user: EventUser {
                id,
                name: name.to_string(),
                email: email.to_string(),
            },
            login_date: OffsetDateTime::now_utc(),
        }
    }
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Deliver a login event. No acknowledgement contract, no retries;
    /// callers never wait on the outcome.
    async fn publish_login(&self, event: UserLoginEvent) -> anyhow::Result<()>;
}

/// Publishes events to the logging collaborator over HTTP.
pub struct HttpEventPublisher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEventPublisher {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/events/log-user", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl EventPublisher for HttpEventPublisher {
    async fn publish_login(&self, event: UserLoginEvent) -> anyhow::Result<()> {
        let resp = self.client.post(&self.endpoint).json(&event).send().await?;
        debug!(status = %resp.status(), "login event published");
        Ok(())
    }
}

/// Used when no logger endpoint is configured, and in tests.
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish_login(&self, event: UserLoginEvent) -> anyhow::Result<()> {
        warn!(user_id = %event.user.id, "no logger endpoint configured, login event dropped");
        Ok(())
    }
}
