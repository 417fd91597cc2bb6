//! Game servers.

use super::Resource;
use chrono::{DateTime, Utc};
use ptero_core::id::{NodeId, ServerId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A game server as seen by the Application API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server id.
    pub id: ServerId,
    /// Id in an external system, if linked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Server UUID.
    pub uuid: Uuid,
    /// Short identifier shown in panel URLs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lifecycle status (`installing`, `suspended`, ...) on panels that report one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Suspension flag; absent means not suspended.
    #[serde(default)]
    pub suspended: bool,
    /// Owning user.
    pub user: UserId,
    /// Node hosting the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<NodeId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Server {
    /// Returns true if either the flag or the status marks the server suspended.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended || self.status.as_deref() == Some("suspended")
    }
}

impl Resource for Server {
    const NAME: &'static str = "server";
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID {})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attributes() -> serde_json::Value {
        json!({
            "id": 5,
            "external_id": null,
            "uuid": "1a7ce997-259b-452e-8b4e-cecc464142ca",
            "identifier": "1a7ce997",
            "name": "Survival",
            "description": "",
            "user": 1,
            "node": 2,
            "created_at": "2019-12-23T06:46:27+00:00",
            "updated_at": "2020-06-13T04:20:53+00:00"
        })
    }

    #[test]
    fn suspended_defaults_to_false() {
        let server = Server::from_value(json!({"attributes": attributes()})).unwrap();
        assert!(!server.suspended);
        assert!(!server.is_suspended());
        assert_eq!(server.user, UserId::new(1));
        assert_eq!(server.node, Some(NodeId::new(2)));
    }

    #[test]
    fn suspended_from_flag_or_status() {
        let mut attrs = attributes();
        attrs["suspended"] = json!(true);
        let server = Server::from_value(json!({"data": {"attributes": attrs}})).unwrap();
        assert!(server.is_suspended());

        let mut attrs = attributes();
        attrs["status"] = json!("suspended");
        let server = Server::from_value(json!({"attributes": attrs})).unwrap();
        assert!(!server.suspended);
        assert!(server.is_suspended());
    }

    #[test]
    fn envelopes_agree() {
        let plain = Server::from_value(json!({"object": "server", "attributes": attributes()}));
        let data = Server::from_value(json!({"data": {"object": "server", "attributes": attributes()}}));
        assert_eq!(plain.unwrap(), data.unwrap());
    }

    #[test]
    fn missing_uuid_fails() {
        let mut attrs = attributes();
        attrs.as_object_mut().unwrap().remove("uuid");
        assert!(Server::from_value(json!({"attributes": attrs})).is_err());
    }

    #[test]
    fn display_uses_name_and_id() {
        let server = Server::from_value(json!({"attributes": attributes()})).unwrap();
        assert_eq!(server.to_string(), "Survival (ID 5)");
    }
}
