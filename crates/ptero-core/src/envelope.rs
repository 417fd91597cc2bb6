//! Response envelope normalization.
//!
//! The panel wraps resources inconsistently. A single resource may arrive as
//! `{"object": "user", "attributes": {...}}`, as `{"data": {...}}` wrapping
//! that shape, or as a bare field object. Normalization strips at most one
//! `data` layer, then at most one `attributes` layer, and deserializes what
//! remains.

use crate::error::{Error, Result};
use crate::list::{Pagination, ResourceList};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Key of the outer response wrapper.
pub const DATA_KEY: &str = "data";
/// Key of the per-object attribute wrapper.
pub const ATTRIBUTES_KEY: &str = "attributes";

const MAX_EXCERPT: usize = 200;

/// Borrow the field source of a raw payload.
#[must_use]
pub fn fields(value: &Value) -> &Value {
    let value = value.get(DATA_KEY).unwrap_or(value);
    value.get(ATTRIBUTES_KEY).unwrap_or(value)
}

/// Take ownership of the field source of a raw payload.
#[must_use]
pub fn into_fields(value: Value) -> Value {
    take_member(take_member(value, DATA_KEY), ATTRIBUTES_KEY)
}

fn take_member(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) => match map.remove(key) {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    }
}

/// Normalize a single resource payload into `T`.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResponse`] when the field source is not an
/// object or a required field is missing or mistyped.
pub fn normalize<T: DeserializeOwned>(value: Value, resource: &str) -> Result<T> {
    let source = fields(&value);
    if !source.is_object() {
        return Err(Error::UnexpectedResponse(format!(
            "expected {resource} object, got {}",
            excerpt(source)
        )));
    }

    serde_json::from_value(into_fields(value)).map_err(|err| {
        warn!(resource, error = %err, "Failed to normalize panel response");
        Error::UnexpectedResponse(format!("invalid {resource} payload: {err}"))
    })
}

/// Normalize a payload that may legitimately be empty.
///
/// An empty object (what the transport returns for an empty body) yields
/// `None`, as does an envelope wrapping an empty object.
///
/// # Errors
///
/// Same as [`normalize`] for non-empty payloads.
pub fn normalize_optional<T: DeserializeOwned>(value: Value, resource: &str) -> Result<Option<T>> {
    if fields(&value).as_object().is_some_and(serde_json::Map::is_empty) {
        return Ok(None);
    }
    normalize(value, resource).map(Some)
}

/// Normalize a list response: `{"data": [item, ...], "meta": {...}}`.
///
/// Items keep the order the panel sent them in.
///
/// # Errors
///
/// Returns [`Error::UnexpectedResponse`] if `data` is missing or not an
/// array, or if any item fails to normalize.
pub fn normalize_list<T: DeserializeOwned>(value: Value, resource: &str) -> Result<ResourceList<T>> {
    let Value::Object(mut body) = value else {
        return Err(Error::UnexpectedResponse(format!(
            "expected {resource} list, got {}",
            excerpt(&value)
        )));
    };

    let items = match body.remove(DATA_KEY) {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(Error::UnexpectedResponse(format!(
                "expected `data` array in {resource} list, got {}",
                excerpt(&other)
            )))
        }
        None => {
            return Err(Error::UnexpectedResponse(format!(
                "{resource} list response has no `data` member"
            )))
        }
    };

    let pagination = body
        .get("meta")
        .and_then(|meta| meta.get("pagination"))
        .and_then(|page| match serde_json::from_value::<Pagination>(page.clone()) {
            Ok(pagination) => Some(pagination),
            Err(err) => {
                warn!(resource, error = %err, "Ignoring malformed pagination block");
                None
            }
        });

    let items = items
        .into_iter()
        .map(|item| normalize(item, resource))
        .collect::<Result<Vec<T>>>()?;

    Ok(ResourceList::with_pagination(items, pagination))
}

fn excerpt(value: &Value) -> String {
    let text = value.to_string();
    if text.len() <= MAX_EXCERPT {
        return text;
    }
    let mut end = MAX_EXCERPT;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: u64,
        name: String,
        #[serde(default)]
        note: Option<String>,
    }

    #[test]
    fn fields_strips_each_layer() {
        let attrs = json!({"id": 1, "name": "a"});
        let bare = attrs.clone();
        let wrapped = json!({"object": "thing", "attributes": attrs.clone()});
        let data_wrapped = json!({"data": {"object": "thing", "attributes": attrs.clone()}});
        let data_bare = json!({"data": attrs.clone()});

        assert_eq!(fields(&bare), &attrs);
        assert_eq!(fields(&wrapped), &attrs);
        assert_eq!(fields(&data_wrapped), &attrs);
        assert_eq!(fields(&data_bare), &attrs);
    }

    #[test]
    fn every_envelope_shape_normalizes_identically() {
        let attrs = json!({"id": 1, "name": "a"});
        let shapes = [
            attrs.clone(),
            json!({"object": "thing", "attributes": attrs.clone()}),
            json!({"data": {"object": "thing", "attributes": attrs.clone()}}),
            json!({"data": attrs.clone()}),
        ];

        let expected = Thing {
            id: 1,
            name: "a".into(),
            note: None,
        };
        for shape in shapes {
            assert_eq!(normalize::<Thing>(shape, "thing").unwrap(), expected);
        }
    }

    #[test]
    fn missing_required_field_fails() {
        let err = normalize::<Thing>(json!({"attributes": {"id": 1}}), "thing").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn non_object_source_fails() {
        let err = normalize::<Thing>(json!({"data": [1, 2]}), "thing").unwrap_err();
        assert!(err.to_string().contains("expected thing object"));

        let err = normalize::<Thing>(json!("text"), "thing").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn optional_empty_object_is_none() {
        let value = normalize_optional::<Thing>(json!({}), "thing").unwrap();
        assert!(value.is_none());

        let value = normalize_optional::<Thing>(json!({"data": {}}), "thing").unwrap();
        assert!(value.is_none());

        let value =
            normalize_optional::<Thing>(json!({"attributes": {"id": 2, "name": "b"}}), "thing")
                .unwrap();
        assert_eq!(value.map(|t| t.id), Some(2));
    }

    #[test]
    fn list_keeps_order_and_pagination() {
        let body = json!({
            "object": "list",
            "data": [
                {"object": "thing", "attributes": {"id": 2, "name": "second"}},
                {"object": "thing", "attributes": {"id": 1, "name": "first"}}
            ],
            "meta": {"pagination": {"total": 2, "count": 2, "per_page": 50, "current_page": 1, "total_pages": 1}}
        });

        let list = normalize_list::<Thing>(body, "thing").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].name, "second");
        assert_eq!(list[1].name, "first");
        assert_eq!(list.pagination().map(|p| p.total), Some(2));
    }

    #[test]
    fn list_drops_malformed_pagination() {
        let body = json!({
            "data": [{"attributes": {"id": 1, "name": "only"}}],
            "meta": {"pagination": {"total": "many"}}
        });

        let list = normalize_list::<Thing>(body, "thing").unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.pagination().is_none());
    }

    #[test]
    fn list_without_data_fails() {
        let err = normalize_list::<Thing>(json!({"object": "list"}), "thing").unwrap_err();
        assert!(err.to_string().contains("no `data` member"));

        let err = normalize_list::<Thing>(json!({"data": {"id": 1}}), "thing").unwrap_err();
        assert!(err.to_string().contains("expected `data` array"));
    }

    #[test]
    fn list_fails_when_any_item_is_invalid() {
        let body = json!({"data": [{"attributes": {"id": 1, "name": "ok"}}, {"attributes": {"id": 2}}]});
        assert!(normalize_list::<Thing>(body, "thing").is_err());
    }

    #[test]
    fn excerpt_truncates_long_payloads() {
        let long = Value::String("x".repeat(500));
        let text = excerpt(&long);
        assert!(text.ends_with("..."));
        assert!(text.len() <= MAX_EXCERPT + 3);
    }
}
