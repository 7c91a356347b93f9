//! The databases collection: DTOs and a typed service.
//!
//! Built on [`Resource`] with `reconfigure` and `activate` registered as
//! extensions, the same shape every other collection client follows.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http::{RequestBody, RequestOptions};
use crate::resource::{operation, OperationCall, Resource};
use crate::{Client, Result};

/// Base URL of the databases collection.
pub const DATABASES_URL: &str = "/api/v1/databases";

/// Reference to another object by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    /// Object id.
    pub id: String,
}

impl Ref {
    /// Reference `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Reference enriched with a display name, as the API returns for regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    /// Object id.
    pub id: String,
    /// Display name, when the backend knows one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Database workload size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workload {
    /// Small instance.
    Small,
    /// Medium instance.
    Medium,
    /// Large instance.
    Large,
}

/// Database lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DbStatus {
    /// Awaiting review after creation.
    Reviewing,
    /// Provisioned and usable.
    Active,
    /// A reconfiguration case is in flight.
    Reconfiguring,
    /// Deleted.
    Deleted,
}

/// Payload for creating a database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseCreate {
    /// Instance name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Requested workload size.
    pub workload: Workload,
    /// Technical contact.
    pub tech_contact: Ref,
    /// Hosting region.
    pub region: Ref,
}

/// Payload for editing a database. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseUpdate {
    /// New instance name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Database as returned by list and mutation endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSummary {
    /// Instance id.
    pub id: String,
    /// Instance name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Workload size.
    pub workload: Workload,
    /// Technical contact.
    pub tech_contact: Ref,
    /// Hosting region, with its display name.
    pub region: NamedRef,
    /// Lifecycle status.
    pub status: DbStatus,
    /// Open helpdesk case, when one is in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case: Option<Ref>,
    /// Lifecycle event timestamps, keyed by event name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Value>,
}

/// Database as returned by the detail endpoint; adds access information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDetail {
    /// The summary fields.
    #[serde(flatten)]
    pub summary: DatabaseSummary,
    /// Connection/access details, present once the instance is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Value>,
}

/// Helpdesk case details attached to a reconfiguration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDetails {
    /// Case subject line.
    pub subject: String,
    /// Case description.
    pub description: String,
}

/// Payload for the `reconfigure` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconfigureRequest {
    /// Helpdesk case opened for the reconfiguration.
    pub case: CaseDetails,
    /// New workload size, when the reconfiguration changes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workload: Option<Workload>,
}

/// Typed client for the databases collection.
#[derive(Clone)]
pub struct Databases {
    resource: Resource,
}

impl Databases {
    /// Bind the databases collection to `client`.
    pub fn new(client: &Client) -> Self {
        let resource = Resource::new(client.clone(), DATABASES_URL)
            .extend(
                "reconfigure",
                operation(|call| async move {
                    let path = format!("{}/reconfigure", call.item_path()?);
                    let OperationCall {
                        client,
                        data,
                        options,
                        ..
                    } = call;
                    client.post(&path, data, options).await
                }),
            )
            .extend(
                "activate",
                operation(|call| async move {
                    let path = format!("{}/activate", call.item_path()?);
                    let OperationCall {
                        client,
                        data,
                        options,
                        ..
                    } = call;
                    client.post(&path, data, options).await
                }),
            );
        Self { resource }
    }

    /// The underlying resource client, for untyped or per-call-tuned access.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// List all databases visible in the current installation context.
    pub async fn list(&self) -> Result<Vec<DatabaseSummary>> {
        self.resource.list(RequestOptions::default()).await?.json()
    }

    /// Create a database. It starts in `reviewing` status.
    pub async fn create(&self, input: &DatabaseCreate) -> Result<DatabaseSummary> {
        self.resource
            .create(RequestBody::json(input)?, RequestOptions::default())
            .await?
            .json()
    }

    /// Retrieve one database with access details.
    pub async fn get(&self, id: &str) -> Result<DatabaseDetail> {
        self.resource
            .get(id, RequestOptions::default())
            .await?
            .json()
    }

    /// Update name/description of a database.
    pub async fn update(&self, id: &str, input: &DatabaseUpdate) -> Result<DatabaseDetail> {
        self.resource
            .update(id, RequestBody::json(input)?, RequestOptions::default())
            .await?
            .json()
    }

    /// Delete a database.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.resource
            .delete(id, RequestOptions::default())
            .await?;
        Ok(())
    }

    /// Open a reconfiguration case for a database.
    pub async fn reconfigure(
        &self,
        id: &str,
        input: &ReconfigureRequest,
    ) -> Result<DatabaseDetail> {
        self.resource
            .call(
                "reconfigure",
                Some(id),
                Some(RequestBody::json(input)?),
                RequestOptions::default(),
            )
            .await?
            .json()
    }

    /// Activate a database under review.
    pub async fn activate(&self, id: &str) -> Result<DatabaseDetail> {
        self.resource
            .call("activate", Some(id), None, RequestOptions::default())
            .await?
            .json()
    }
}
