//! Eggs: server templates inside a nest.

use super::{lenient, Resource};
use chrono::{DateTime, Utc};
use ptero_core::id::{EggId, NestId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An egg record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawEgg")]
pub struct Egg {
    /// Egg id.
    pub id: EggId,
    /// Egg UUID.
    pub uuid: Uuid,
    /// Display name.
    pub name: String,
    /// Parent nest, read from `nest_id` or, failing that, `nest`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nest_id: Option<NestId>,
    /// Author email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default docker image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_image: Option<String>,
    /// Startup command template.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startup: Option<String>,
    /// Creation timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Wire shape of an egg. The panel names the parent `nest`; some builds send
/// `nest_id` as well.
#[derive(Deserialize)]
struct RawEgg {
    id: EggId,
    uuid: Uuid,
    name: String,
    #[serde(default, deserialize_with = "lenient")]
    nest: Option<NestId>,
    #[serde(default, deserialize_with = "lenient")]
    nest_id: Option<NestId>,
    #[serde(default, deserialize_with = "lenient")]
    author: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    docker_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    startup: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient")]
    updated_at: Option<DateTime<Utc>>,
}

impl From<RawEgg> for Egg {
    fn from(raw: RawEgg) -> Self {
        Self {
            id: raw.id,
            uuid: raw.uuid,
            name: raw.name,
            nest_id: raw.nest_id.or(raw.nest),
            author: raw.author,
            description: raw.description,
            docker_image: raw.docker_image,
            startup: raw.startup,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
        }
    }
}

impl Resource for Egg {
    const NAME: &'static str = "egg";
}

impl fmt::Display for Egg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID {})", self.name, self.id)
    }
}
