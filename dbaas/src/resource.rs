//! CRUD-shaped resource clients.
//!
//! [`Resource`] binds one collection URL to the pipeline and exposes the
//! five canonical operations plus registered extensions. Extensions
//! override canonical operations of the same name — dispatch consults the
//! override table first — which is how resource-specific verbs like
//! `reconfigure` are added, and how a call site replaces, say, `delete`.
//!
//! A resource holds no mutable state; it is a bound configuration over the
//! pipeline, constructed once and held for the application's lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::errors::{RequestError, Result};
use crate::http::{Reply, RequestBody, RequestOptions};
use crate::Client;

/// The resolved argument bundle one operation invocation receives.
pub struct OperationCall {
    /// The client the resource is bound to.
    pub client: Client,
    /// The collection base URL (root-relative or absolute).
    pub base: String,
    /// The item id, for item-scoped operations.
    pub id: Option<String>,
    /// The request body, when the operation carries one.
    pub data: Option<RequestBody>,
    /// Per-call request options.
    pub options: RequestOptions,
}

impl OperationCall {
    /// The item path `base/id`.
    ///
    /// # Errors
    /// [`RequestError::Validation`] when the call carries no id.
    pub fn item_path(&self) -> Result<String> {
        match self.id.as_deref() {
            Some(id) => Ok(format!("{}/{}", self.base, id)),
            None => Err(RequestError::Validation {
                message: "operation requires an item id".to_string(),
            }
            .into()),
        }
    }
}

/// A named operation: takes the resolved call, returns the pipeline reply.
pub type Operation = Arc<dyn Fn(OperationCall) -> BoxFuture<'static, Result<Reply>> + Send + Sync>;

/// Wrap an async closure as an [`Operation`].
pub fn operation<F, Fut>(f: F) -> Operation
where
    F: Fn(OperationCall) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<Reply>> + Send + 'static,
{
    Arc::new(move |call| Box::pin(f(call)))
}

/// A client for one backend collection.
#[derive(Clone)]
pub struct Resource {
    client: Client,
    base: String,
    overrides: HashMap<String, Operation>,
}

impl Resource {
    /// Bind `base` (e.g. `/api/v1/databases`) to `client`.
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
            overrides: HashMap::new(),
        }
    }

    /// Register a named operation. A name matching a canonical operation
    /// (`list`, `create`, `get`, `update`, `delete`) overrides it.
    pub fn extend(mut self, name: impl Into<String>, op: Operation) -> Self {
        self.overrides.insert(name.into(), op);
        self
    }

    /// The collection base URL.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Whether `name` resolves to a registered extension.
    pub fn has_extension(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    fn bundle(
        &self,
        id: Option<&str>,
        data: Option<RequestBody>,
        options: RequestOptions,
    ) -> OperationCall {
        OperationCall {
            client: self.client.clone(),
            base: self.base.clone(),
            id: id.map(str::to_string),
            data,
            options,
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        id: Option<&str>,
        data: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        let call = self.bundle(id, data, options);
        if let Some(op) = self.overrides.get(name) {
            return op(call).await;
        }
        canonical(name, call).await
    }

    /// GET the collection.
    pub async fn list(&self, options: RequestOptions) -> Result<Reply> {
        self.dispatch("list", None, None, options).await
    }

    /// POST `data` to the collection.
    pub async fn create(&self, data: RequestBody, options: RequestOptions) -> Result<Reply> {
        self.dispatch("create", None, Some(data), options).await
    }

    /// GET one item.
    pub async fn get(&self, id: &str, options: RequestOptions) -> Result<Reply> {
        self.dispatch("get", Some(id), None, options).await
    }

    /// PUT `data` to one item.
    pub async fn update(
        &self,
        id: &str,
        data: RequestBody,
        options: RequestOptions,
    ) -> Result<Reply> {
        self.dispatch("update", Some(id), Some(data), options).await
    }

    /// DELETE one item.
    pub async fn delete(&self, id: &str, options: RequestOptions) -> Result<Reply> {
        self.dispatch("delete", Some(id), None, options).await
    }

    /// Invoke a registered operation by name (canonical or extension).
    ///
    /// # Errors
    /// [`RequestError::Validation`] when `name` matches neither an
    /// extension nor a canonical operation.
    pub async fn call(
        &self,
        name: &str,
        id: Option<&str>,
        data: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Reply> {
        match name {
            "list" | "create" | "get" | "update" | "delete" => {
                self.dispatch(name, id, data, options).await
            }
            _ => match self.overrides.get(name) {
                Some(op) => op(self.bundle(id, data, options)).await,
                None => Err(RequestError::Validation {
                    message: format!("unknown operation: {name}"),
                }
                .into()),
            },
        }
    }
}

async fn canonical(name: &str, call: OperationCall) -> Result<Reply> {
    match name {
        "list" => call.client.get(&call.base, call.options).await,
        "create" => {
            let data = call.data.ok_or_else(|| RequestError::Validation {
                message: "create requires a body".to_string(),
            })?;
            call.client.post(&call.base, Some(data), call.options).await
        }
        "get" => {
            let path = call.item_path()?;
            call.client.get(&path, call.options).await
        }
        "update" => {
            let path = call.item_path()?;
            let data = call.data.ok_or_else(|| RequestError::Validation {
                message: "update requires a body".to_string(),
            })?;
            call.client.put(&path, Some(data), call.options).await
        }
        "delete" => {
            let path = call.item_path()?;
            call.client.delete(&path, call.options).await
        }
        other => Err(RequestError::Validation {
            message: format!("unknown operation: {other}"),
        }
        .into()),
    }
}
