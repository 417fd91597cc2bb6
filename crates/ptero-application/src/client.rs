//! Asynchronous Application API client implementation.

use crate::models::{
    Allocation, Egg, Location, Nest, NewAllocation, NewLocation, NewNode, NewUser, Node, Resource,
    Server, User,
};
use crate::Result;
use ptero_core::client::{HttpTransport, Method, Transport};
use ptero_core::envelope;
use ptero_core::id::{AllocationId, EggId, LocationId, NestId, NodeId, ServerId, UserId};
use ptero_core::{Error, PanelConfig, ResourceList};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

/// Builder for [`ApplicationClient`].
#[derive(Debug, Clone)]
pub struct ApplicationClientBuilder {
    config: PanelConfig,
}

impl ApplicationClientBuilder {
    /// Create a builder for the given panel URL and Application API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            config: PanelConfig::new(base_url, api_key)?,
        })
    }

    /// Override the request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.config = self.config.with_timeout(seconds);
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.config = self.config.with_tls_verify(verify);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ApplicationClient> {
        ApplicationClient::from_config(&self.config)
    }
}

/// Asynchronous Application API client.
///
/// Every method issues exactly one request and never retries.
#[derive(Clone)]
pub struct ApplicationClient {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApplicationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationClient").finish_non_exhaustive()
    }
}

impl ApplicationClient {
    /// Construct a client directly from the panel URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        ApplicationClientBuilder::new(base_url, api_key)?.build()
    }

    /// Construct a client from a full configuration.
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Construct a client over a custom transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    // ----- users -----

    /// List all users.
    pub async fn list_users(&self) -> Result<ResourceList<User>> {
        self.list("/users").await
    }

    /// Fetch a single user.
    pub async fn get_user(&self, id: UserId) -> Result<User> {
        self.fetch(&format!("/users/{id}")).await
    }

    /// Create a user. The payload is validated before anything is sent.
    pub async fn create_user(&self, request: &NewUser) -> Result<User> {
        self.create("/users", request).await
    }

    /// Delete a user, returning its last representation when the panel sends one.
    pub async fn delete_user(&self, id: UserId) -> Result<Option<User>> {
        let value = self.send(Method::DELETE, &format!("/users/{id}"), None).await?;
        envelope::normalize_optional(value, User::NAME)
    }

    // ----- servers -----

    /// List all servers.
    pub async fn list_servers(&self) -> Result<ResourceList<Server>> {
        self.list("/servers").await
    }

    /// Fetch a single server.
    pub async fn get_server(&self, id: ServerId) -> Result<Server> {
        self.fetch(&format!("/servers/{id}")).await
    }

    /// Suspend a server.
    pub async fn suspend_server(&self, id: ServerId) -> Result<()> {
        self.execute(Method::POST, &format!("/servers/{id}/suspend"))
            .await
    }

    /// Lift a server's suspension.
    pub async fn unsuspend_server(&self, id: ServerId) -> Result<()> {
        self.execute(Method::POST, &format!("/servers/{id}/unsuspend"))
            .await
    }

    /// Delete a server.
    pub async fn delete_server(&self, id: ServerId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/servers/{id}"))
            .await
    }

    // ----- locations -----

    /// List all locations.
    pub async fn list_locations(&self) -> Result<ResourceList<Location>> {
        self.list("/locations").await
    }

    /// Fetch a single location.
    pub async fn get_location(&self, id: LocationId) -> Result<Location> {
        self.fetch(&format!("/locations/{id}")).await
    }

    /// Create a location.
    pub async fn create_location(&self, request: &NewLocation) -> Result<Location> {
        self.create("/locations", request).await
    }

    /// Delete a location.
    pub async fn delete_location(&self, id: LocationId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/locations/{id}"))
            .await
    }

    // ----- nodes -----

    /// List all nodes.
    pub async fn list_nodes(&self) -> Result<ResourceList<Node>> {
        self.list("/nodes").await
    }

    /// Fetch a single node.
    pub async fn get_node(&self, id: NodeId) -> Result<Node> {
        self.fetch(&format!("/nodes/{id}")).await
    }

    /// Create a node.
    pub async fn create_node(&self, request: &NewNode) -> Result<Node> {
        self.create("/nodes", request).await
    }

    /// Delete a node.
    pub async fn delete_node(&self, id: NodeId) -> Result<()> {
        self.execute(Method::DELETE, &format!("/nodes/{id}")).await
    }

    // ----- allocations -----

    /// List the allocations of a node.
    pub async fn list_allocations(&self, node: NodeId) -> Result<ResourceList<Allocation>> {
        self.list(&format!("/nodes/{node}/allocations")).await
    }

    /// Add allocations to a node.
    ///
    /// The panel usually answers with an empty body, in which case `None` is
    /// returned.
    pub async fn create_allocation(
        &self,
        node: NodeId,
        request: &NewAllocation,
    ) -> Result<Option<Allocation>> {
        let body = encode(request)?;
        let value = self
            .send(Method::POST, &format!("/nodes/{node}/allocations"), Some(body))
            .await?;
        envelope::normalize_optional(value, Allocation::NAME)
    }

    /// Remove an allocation from a node.
    pub async fn delete_allocation(&self, node: NodeId, allocation: AllocationId) -> Result<()> {
        self.execute(
            Method::DELETE,
            &format!("/nodes/{node}/allocations/{allocation}"),
        )
        .await
    }

    // ----- nests & eggs -----

    /// List all nests.
    pub async fn list_nests(&self) -> Result<ResourceList<Nest>> {
        self.list("/nests").await
    }

    /// Fetch a single nest.
    pub async fn get_nest(&self, id: NestId) -> Result<Nest> {
        self.fetch(&format!("/nests/{id}")).await
    }

    /// List the eggs of a nest.
    pub async fn list_eggs(&self, nest: NestId) -> Result<ResourceList<Egg>> {
        self.list(&format!("/nests/{nest}/eggs")).await
    }

    /// Fetch a single egg of a nest.
    pub async fn get_egg(&self, nest: NestId, egg: EggId) -> Result<Egg> {
        self.fetch(&format!("/nests/{nest}/eggs/{egg}")).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        self.transport.request(method, path, body).await
    }

    async fn list<R: Resource>(&self, path: &str) -> Result<ResourceList<R>> {
        let value = self.send(Method::GET, path, None).await?;
        let items = envelope::normalize_list::<R>(value, R::NAME)?;
        debug!(path, count = items.len(), "Normalized {} list", R::NAME);
        Ok(items)
    }

    async fn fetch<R: Resource>(&self, path: &str) -> Result<R> {
        let value = self.send(Method::GET, path, None).await?;
        R::from_value(value)
    }

    async fn create<B, R>(&self, path: &str, request: &B) -> Result<R>
    where
        B: Serialize + Validate,
        R: Resource,
    {
        let body = encode(request)?;
        let value = self.send(Method::POST, path, Some(body)).await?;
        R::from_value(value)
    }

    async fn execute(&self, method: Method, path: &str) -> Result<()> {
        self.send(method, path, None).await.map(|_| ())
    }
}

/// Validate a payload and turn it into a JSON body.
fn encode<B: Serialize + Validate>(request: &B) -> Result<Value> {
    request.validate()?;
    serde_json::to_value(request)
        .map_err(|err| Error::ValidationError(format!("Failed to encode request: {err}")))
}
