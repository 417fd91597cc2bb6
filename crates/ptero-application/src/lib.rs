//! Application API client and data models for a game server panel.
//!
//! Provides typed records for users, servers, nodes, locations, allocations,
//! nests and eggs, an asynchronous [`ApplicationClient`], and a blocking
//! counterpart in [`blocking`].
//!
//! Responses are accepted wrapped in `{"data": ...}`, `{"attributes": ...}`,
//! both, or neither; every accessor returns the same record for all four.

#![deny(missing_docs)]

pub mod blocking;
pub mod client;
pub mod models;

pub use client::{ApplicationClient, ApplicationClientBuilder};
pub use models::{
    Allocation, Egg, Location, Nest, NewAllocation, NewLocation, NewNode, NewUser, Node, Resource,
    Server, User,
};
pub use ptero_core::id::{AllocationId, EggId, LocationId, NestId, NodeId, ServerId, UserId};
pub use ptero_core::{Error, ErrorKind, PanelConfig, ResourceList};

/// Convenient result alias that reuses the shared panel error type.
pub type Result<T> = ptero_core::Result<T>;
