//! Lifecycle hooks for managing the log collection as a declarative resource.
//!
//! An infrastructure-as-code style driver holds a [`ResourceState`] and calls
//! one hook per phase. The state mirrors the managed schema: `id` and
//! `last_updated` are computed, every item needs a `log.body`.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::info;

use crate::client::{ClientError, LogClient};
use crate::models::{Envelope, Record};

/// Id assigned to the collection on create. There is only one collection.
pub const RESOURCE_ID: &str = "0";

// RFC 850: "Monday, 02-Jan-06 15:04:05 UTC"
const LAST_UPDATED_FORMAT: &str = "%A, %d-%b-%y %H:%M:%S UTC";

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Could not create log: {0}")]
    Create(#[source] ClientError),

    #[error("Failed reading order: {0}")]
    Read(#[source] ClientError),

    #[error("Could not update: {0}")]
    Update(#[source] ClientError),

    #[error("Unable to create client: {0}")]
    Configure(#[source] ClientError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceItem {
    /// `None` while the value is still unknown in a plan.
    pub body: Option<String>,
}

impl ResourceItem {
    pub fn new(body: impl Into<String>) -> Self {
        ResourceItem {
            body: Some(body.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceState {
    pub id: String,
    pub items: Vec<ResourceItem>,
    pub last_updated: String,
}

impl ResourceState {
    pub fn planned(items: Vec<ResourceItem>) -> Self {
        ResourceState {
            items,
            ..Default::default()
        }
    }

    pub fn bodies(&self) -> Vec<Option<&str>> {
        self.items.iter().map(|i| i.body.as_deref()).collect()
    }

    // Unset bodies are left out rather than sent as empty strings.
    fn to_envelope(&self) -> Envelope {
        Envelope::from_records(
            self.items
                .iter()
                .filter_map(|item| item.body.as_deref().map(Record::new))
                .collect(),
        )
    }

    fn items_from(envelope: Envelope) -> Vec<ResourceItem> {
        envelope
            .into_records()
            .into_iter()
            .map(|record| ResourceItem::new(record.body))
            .collect()
    }
}

fn now() -> String {
    Utc::now().format(LAST_UPDATED_FORMAT).to_string()
}

/// One hook per resource lifecycle phase.
#[async_trait]
pub trait Lifecycle {
    async fn create(&self, plan: ResourceState) -> Result<ResourceState, ResourceError>;

    async fn read(&self, state: ResourceState) -> Result<ResourceState, ResourceError>;

    async fn update(
        &self,
        plan: ResourceState,
        state: ResourceState,
    ) -> Result<ResourceState, ResourceError>;

    /// Stops managing the resource. Returns nothing to keep in state.
    async fn delete(&self, state: ResourceState) -> Result<(), ResourceError>;

    async fn import_state(&self, id: &str) -> Result<ResourceState, ResourceError>;
}

/// Settings a driver hands over before any lifecycle call.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Base URL of the log store; the client default applies when unset.
    pub host: Option<String>,
}

impl ProviderConfig {
    pub fn configure(&self) -> Result<LogResource, ResourceError> {
        let client = LogClient::new(self.host.as_deref()).map_err(ResourceError::Configure)?;
        Ok(LogResource::new(client))
    }
}

/// The single resource kind: the whole log collection.
#[derive(Debug, Clone)]
pub struct LogResource {
    client: LogClient,
}

impl LogResource {
    pub fn new(client: LogClient) -> Self {
        LogResource { client }
    }
}

#[async_trait]
impl Lifecycle for LogResource {
    async fn create(&self, plan: ResourceState) -> Result<ResourceState, ResourceError> {
        let got = self
            .client
            .create_logs(&plan.to_envelope())
            .await
            .map_err(ResourceError::Create)?;
        info!(len = got.len(), "created log resource");

        Ok(ResourceState {
            id: RESOURCE_ID.to_string(),
            items: ResourceState::items_from(got),
            last_updated: now(),
        })
    }

    async fn read(&self, state: ResourceState) -> Result<ResourceState, ResourceError> {
        let got = self.client.get_logs().await.map_err(ResourceError::Read)?;
        info!(len = got.len(), "read log resource");

        Ok(ResourceState {
            items: ResourceState::items_from(got),
            ..state
        })
    }

    async fn update(
        &self,
        plan: ResourceState,
        state: ResourceState,
    ) -> Result<ResourceState, ResourceError> {
        let got = self
            .client
            .update_logs(&state.id, &plan.to_envelope())
            .await
            .map_err(ResourceError::Update)?;
        info!(id = %state.id, len = got.len(), "updated log resource");

        Ok(ResourceState {
            id: state.id,
            items: ResourceState::items_from(got),
            last_updated: now(),
        })
    }

    async fn delete(&self, state: ResourceState) -> Result<(), ResourceError> {
        // The remote collection is left as is; only management stops.
        info!(id = %state.id, "delete log resource");
        Ok(())
    }

    async fn import_state(&self, id: &str) -> Result<ResourceState, ResourceError> {
        info!(id, "import log resource");
        let state = ResourceState {
            id: id.to_string(),
            ..Default::default()
        };
        self.read(state).await
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::client::test::spawn_server;
    use crate::log::LogStore;

    fn plan(bodies: &[&str]) -> ResourceState {
        ResourceState::planned(bodies.iter().map(|b| ResourceItem::new(*b)).collect())
    }

    #[test]
    fn unset_bodies_are_not_sent() {
        let state = ResourceState::planned(vec![
            ResourceItem::new("a"),
            ResourceItem::default(),
            ResourceItem::new("b"),
        ]);
        assert_eq!(state.to_envelope().bodies(), vec!["a", "b"]);
    }

    #[test]
    fn last_updated_is_rfc850() {
        let stamp = now();
        assert!(NaiveDateTime::parse_from_str(&stamp, LAST_UPDATED_FORMAT).is_ok());
    }

    #[test]
    fn configure_uses_default_host() {
        let resource = ProviderConfig::default().configure().unwrap();
        assert_eq!(resource.client.host_url(), crate::client::DEFAULT_HOST_URL);
    }

    #[actix_web::test]
    async fn create_read_update() {
        let store = Arc::new(LogStore::new());
        let resource = LogResource::new(spawn_server(store.clone()));

        let state = resource.create(plan(&["a", "b"])).await.unwrap();
        assert_eq!(state.id, RESOURCE_ID);
        assert_eq!(state.bodies(), vec![Some("a"), Some("b")]);
        assert!(!state.last_updated.is_empty());

        store.create("", vec![Record::new("changed")]);
        let state = resource.read(state).await.unwrap();
        assert_eq!(state.id, RESOURCE_ID);
        assert_eq!(state.bodies(), vec![Some("changed")]);

        let state = resource.update(plan(&["x", "y", "z"]), state).await.unwrap();
        assert_eq!(state.id, RESOURCE_ID);
        assert_eq!(state.bodies(), vec![Some("x"), Some("y"), Some("z")]);
        assert_eq!(store.read().bodies(), vec!["x", "y", "z"]);
    }

    #[actix_web::test]
    async fn update_with_bad_id_fails() {
        let store = Arc::new(LogStore::new());
        store.create("", vec![Record::new("a")]);
        let resource = LogResource::new(spawn_server(store.clone()));

        let state = ResourceState {
            id: "not-a-number".to_string(),
            ..Default::default()
        };
        let err = resource.update(plan(&["x"]), state).await.unwrap_err();
        assert!(matches!(
            err,
            ResourceError::Update(ClientError::Status { status: 400, .. })
        ));
        assert_eq!(store.read().bodies(), vec!["a"]);
    }

    #[actix_web::test]
    async fn delete_leaves_remote_alone_and_import_reads() {
        let store = Arc::new(LogStore::new());
        store.create("", vec![Record::new("a"), Record::new("b")]);
        let resource = LogResource::new(spawn_server(store.clone()));

        let state = resource.import_state("0").await.unwrap();
        assert_eq!(state.id, "0");
        assert_eq!(state.bodies(), vec![Some("a"), Some("b")]);

        resource.delete(state).await.unwrap();
        assert_eq!(store.read().len(), 2);
    }
}
