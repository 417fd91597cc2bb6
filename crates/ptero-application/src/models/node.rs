//! Nodes: the daemon hosts game servers run on.
//!
//! Node payloads are inconsistent across endpoints, so every field of
//! [`Node`] is optional. A missing or malformed field reads as `None` and
//! never fails normalization.

use super::{lenient, OrUnknown, Resource};
use chrono::{DateTime, Utc};
use ptero_core::id::{LocationId, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A node record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Node {
    /// Node id.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    /// Node UUID.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    /// Whether the node is offered for automatic deployment.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    /// Display name.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location the node belongs to.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    /// Fully qualified domain name of the daemon.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    /// `http` or `https`.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Whether the daemon sits behind a TLS-terminating proxy.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub behind_proxy: Option<bool>,
    /// Whether the node is in maintenance mode.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    /// Total memory in MiB.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub memory: Option<u64>,
    /// Memory overallocation percentage (`-1` disables the check).
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub memory_overallocate: Option<i64>,
    /// Total disk in MiB.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub disk: Option<u64>,
    /// Disk overallocation percentage (`-1` disables the check).
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub disk_overallocate: Option<i64>,
    /// Maximum web upload size in MiB.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub upload_size: Option<u64>,
    /// Daemon HTTP port.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub daemon_listen: Option<u16>,
    /// Daemon SFTP port.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub daemon_sftp: Option<u16>,
    /// Directory server data lives under on the node.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub daemon_base: Option<String>,
    /// Creation timestamp.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Resource for Node {
    const NAME: &'static str = "node";
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Memory: {}MiB, Disk: {}MiB",
            OrUnknown(&self.name),
            OrUnknown(&self.fqdn),
            OrUnknown(&self.memory),
            OrUnknown(&self.disk)
        )
    }
}

/// Payload for `POST /nodes`.
///
/// [`NewNode::new`] fills in the panel's usual defaults; adjust them with the
/// `with_*` setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewNode {
    /// Display name.
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    /// Location the node belongs to.
    pub location_id: LocationId,
    /// Fully qualified domain name (or IP) of the daemon.
    #[validate(length(min = 1, message = "fqdn is required"))]
    pub fqdn: String,
    /// `http` or `https`.
    #[validate(custom(function = "validate_scheme"))]
    pub scheme: String,
    /// Whether the daemon sits behind a TLS-terminating proxy.
    pub behind_proxy: bool,
    /// Total memory in MiB.
    pub memory: u64,
    /// Memory overallocation percentage.
    pub memory_overallocate: i64,
    /// Total disk in MiB.
    pub disk: u64,
    /// Disk overallocation percentage.
    pub disk_overallocate: i64,
    /// Daemon SFTP port.
    pub daemon_sftp: u16,
    /// Daemon HTTP port.
    pub daemon_listen: u16,
    /// Free-form description.
    pub description: String,
    /// Whether the node is offered for automatic deployment.
    pub public: bool,
    /// Maximum web upload size in MiB.
    pub upload_size: u64,
}

/// Default node scheme.
pub const DEFAULT_SCHEME: &str = "https";
/// Default daemon SFTP port.
pub const DEFAULT_DAEMON_SFTP: u16 = 2022;
/// Default daemon HTTP port.
pub const DEFAULT_DAEMON_LISTEN: u16 = 8080;
/// Default upload size limit in MiB.
pub const DEFAULT_UPLOAD_SIZE: u64 = 100;

impl NewNode {
    /// Create a node payload with default settings.
    pub fn new(name: impl Into<String>, location_id: LocationId, fqdn: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location_id,
            fqdn: fqdn.into(),
            scheme: DEFAULT_SCHEME.to_string(),
            behind_proxy: false,
            memory: 0,
            memory_overallocate: 0,
            disk: 0,
            disk_overallocate: 0,
            daemon_sftp: DEFAULT_DAEMON_SFTP,
            daemon_listen: DEFAULT_DAEMON_LISTEN,
            description: String::new(),
            public: true,
            upload_size: DEFAULT_UPLOAD_SIZE,
        }
    }

    /// Set the scheme.
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Mark the daemon as running behind a proxy.
    #[must_use]
    pub const fn with_behind_proxy(mut self, behind_proxy: bool) -> Self {
        self.behind_proxy = behind_proxy;
        self
    }

    /// Set memory and its overallocation percentage.
    #[must_use]
    pub const fn with_memory(mut self, memory: u64, overallocate: i64) -> Self {
        self.memory = memory;
        self.memory_overallocate = overallocate;
        self
    }

    /// Set disk and its overallocation percentage.
    #[must_use]
    pub const fn with_disk(mut self, disk: u64, overallocate: i64) -> Self {
        self.disk = disk;
        self.disk_overallocate = overallocate;
        self
    }

    /// Set the daemon HTTP and SFTP ports.
    #[must_use]
    pub const fn with_daemon_ports(mut self, listen: u16, sftp: u16) -> Self {
        self.daemon_listen = listen;
        self.daemon_sftp = sftp;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set whether the node is public.
    #[must_use]
    pub const fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Set the upload size limit in MiB.
    #[must_use]
    pub const fn with_upload_size(mut self, upload_size: u64) -> Self {
        self.upload_size = upload_size;
        self
    }
}

fn validate_scheme(scheme: &str) -> Result<(), ValidationError> {
    match scheme {
        "http" | "https" => Ok(()),
        _ => Err(ValidationError::new("scheme").with_message("scheme must be http or https".into())),
    }
}
