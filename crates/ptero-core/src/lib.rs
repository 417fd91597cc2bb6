//! # ptero-core
//!
//! Core types and utilities for talking to a game panel's Application API.
//!
//! This crate provides the HTTP transport, the shared error type, client
//! configuration, typed identifiers and the response envelope normalization
//! used by the resource clients.
//!
//! ## Modules
//!
//! - [`error`] - Error type and the validation/API error kinds
//! - [`config`] - Panel connection configuration
//! - [`client`] - The [`Transport`] seam and its `reqwest` implementation
//! - [`envelope`] - `data`/`attributes` envelope stripping and normalization
//! - [`list`] - Ordered, display-formattable result lists
//! - [`id`] - Strongly-typed resource identifiers

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod id;
pub mod list;

// Re-export commonly used types
pub use client::{HttpTransport, Method, Transport};
pub use config::PanelConfig;
pub use error::{Error, ErrorKind, Result};
pub use list::{render_list, Pagination, ResourceList};
