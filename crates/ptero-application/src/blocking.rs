//! Blocking Application API client.
//!
//! [`ApplicationClient`] drives the asynchronous client on a private
//! current-thread runtime. It must not be used from inside another tokio
//! runtime.

use crate::client::ApplicationClient as AsyncClient;
use crate::models::{
    Allocation, Egg, Location, Nest, NewAllocation, NewLocation, NewNode, NewUser, Node, Server,
    User,
};
use crate::Result;
use ptero_core::id::{AllocationId, EggId, LocationId, NestId, NodeId, ServerId, UserId};
use ptero_core::{Error, PanelConfig, ResourceList, Transport};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Blocking counterpart of [`crate::ApplicationClient`].
pub struct ApplicationClient {
    inner: AsyncClient,
    runtime: Runtime,
}

impl fmt::Debug for ApplicationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationClient")
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl ApplicationClient {
    /// Construct a client directly from the panel URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(&PanelConfig::new(base_url, api_key)?)
    }

    /// Construct a client from a full configuration.
    pub fn from_config(config: &PanelConfig) -> Result<Self> {
        Ok(Self {
            inner: AsyncClient::from_config(config)?,
            runtime: runtime()?,
        })
    }

    /// Construct a client over a custom transport.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            inner: AsyncClient::with_transport(transport),
            runtime: runtime()?,
        })
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// List all users.
    pub fn list_users(&self) -> Result<ResourceList<User>> {
        self.block_on(self.inner.list_users())
    }

    /// Fetch a single user.
    pub fn get_user(&self, id: UserId) -> Result<User> {
        self.block_on(self.inner.get_user(id))
    }

    /// Create a user.
    pub fn create_user(&self, request: &NewUser) -> Result<User> {
        self.block_on(self.inner.create_user(request))
    }

    /// Delete a user.
    pub fn delete_user(&self, id: UserId) -> Result<Option<User>> {
        self.block_on(self.inner.delete_user(id))
    }

    /// List all servers.
    pub fn list_servers(&self) -> Result<ResourceList<Server>> {
        self.block_on(self.inner.list_servers())
    }

    /// Fetch a single server.
    pub fn get_server(&self, id: ServerId) -> Result<Server> {
        self.block_on(self.inner.get_server(id))
    }

    /// Suspend a server.
    pub fn suspend_server(&self, id: ServerId) -> Result<()> {
        self.block_on(self.inner.suspend_server(id))
    }

    /// Lift a server's suspension.
    pub fn unsuspend_server(&self, id: ServerId) -> Result<()> {
        self.block_on(self.inner.unsuspend_server(id))
    }

    /// Delete a server.
    pub fn delete_server(&self, id: ServerId) -> Result<()> {
        self.block_on(self.inner.delete_server(id))
    }

    /// List all locations.
    pub fn list_locations(&self) -> Result<ResourceList<Location>> {
        self.block_on(self.inner.list_locations())
    }

    /// Fetch a single location.
    pub fn get_location(&self, id: LocationId) -> Result<Location> {
        self.block_on(self.inner.get_location(id))
    }

    /// Create a location.
    pub fn create_location(&self, request: &NewLocation) -> Result<Location> {
        self.block_on(self.inner.create_location(request))
    }

    /// Delete a location.
    pub fn delete_location(&self, id: LocationId) -> Result<()> {
        self.block_on(self.inner.delete_location(id))
    }

    /// List all nodes.
    pub fn list_nodes(&self) -> Result<ResourceList<Node>> {
        self.block_on(self.inner.list_nodes())
    }

    /// Fetch a single node.
    pub fn get_node(&self, id: NodeId) -> Result<Node> {
        self.block_on(self.inner.get_node(id))
    }

    /// Create a node.
    pub fn create_node(&self, request: &NewNode) -> Result<Node> {
        self.block_on(self.inner.create_node(request))
    }

    /// Delete a node.
    pub fn delete_node(&self, id: NodeId) -> Result<()> {
        self.block_on(self.inner.delete_node(id))
    }

    /// List the allocations of a node.
    pub fn list_allocations(&self, node: NodeId) -> Result<ResourceList<Allocation>> {
        self.block_on(self.inner.list_allocations(node))
    }

    /// Add allocations to a node.
    pub fn create_allocation(
        &self,
        node: NodeId,
        request: &NewAllocation,
    ) -> Result<Option<Allocation>> {
        self.block_on(self.inner.create_allocation(node, request))
    }

    /// Remove an allocation from a node.
    pub fn delete_allocation(&self, node: NodeId, allocation: AllocationId) -> Result<()> {
        self.block_on(self.inner.delete_allocation(node, allocation))
    }

    /// List all nests.
    pub fn list_nests(&self) -> Result<ResourceList<Nest>> {
        self.block_on(self.inner.list_nests())
    }

    /// Fetch a single nest.
    pub fn get_nest(&self, id: NestId) -> Result<Nest> {
        self.block_on(self.inner.get_nest(id))
    }

    /// List the eggs of a nest.
    pub fn list_eggs(&self, nest: NestId) -> Result<ResourceList<Egg>> {
        self.block_on(self.inner.list_eggs(nest))
    }

    /// Fetch a single egg of a nest.
    pub fn get_egg(&self, nest: NestId, egg: EggId) -> Result<Egg> {
        self.block_on(self.inner.get_egg(nest, egg))
    }
}

fn runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Error::ConfigError(format!("Failed to start runtime: {err}")))
}
