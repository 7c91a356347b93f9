//! The regions collection.

use super::NamedRef;
use crate::{Client, Result};

/// Base URL of the regions collection.
pub const REGIONS_URL: &str = "/api/v1/regions";

/// Typed client for the (read-only) regions collection.
#[derive(Clone)]
pub struct Regions {
    client: Client,
}

impl Regions {
    /// Bind the regions collection to `client`.
    pub fn new(client: &Client) -> Self {
        Self {
            client: client.clone(),
        }
    }

    /// List the hosting regions databases can be provisioned in.
    pub async fn list(&self) -> Result<Vec<NamedRef>> {
        self.client.get_json(REGIONS_URL).await
    }
}
