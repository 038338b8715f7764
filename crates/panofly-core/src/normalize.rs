// ── Response normalization ──
//
// The device answers a collection read with `{"entry": [...]}`, a
// single-name read with either `{"entry": {...}}` or a one-element
// array, and an absent node with no result at all or a bare
// `{"@total-count": "0"}` from an empty `<result/>`. Everything here
// flattens those shapes into an ordered list before decoding.

use serde_json::Value;

use crate::error::CoreError;

/// Split a raw read result into its entry objects, in server order.
pub fn entries(raw: &Value) -> Result<Vec<&Value>, CoreError> {
    let list = match raw {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => match map.get("entry") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(inner) => inner,
        },
        Value::Array(_) => raw,
        other => {
            return Err(CoreError::malformed(format!(
                "expected an entry collection, got {}",
                kind(other)
            )));
        }
    };

    match list {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                if item.is_object() {
                    Ok(item)
                } else {
                    Err(CoreError::malformed(format!(
                        "expected an entry object, got {}",
                        kind(item)
                    )))
                }
            })
            .collect(),
        Value::Object(_) => Ok(vec![list]),
        other => Err(CoreError::malformed(format!(
            "expected an entry object, got {}",
            kind(other)
        ))),
    }
}

/// The `@name` of every entry, in server order.
pub fn names(raw: &Value) -> Result<Vec<String>, CoreError> {
    entries(raw)?
        .into_iter()
        .map(|entry| {
            entry
                .get("@name")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| CoreError::malformed("entry without @name"))
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── EntitySet ────────────────────────────────────────────────────────

/// Decoded entities in server order, independent of the schema variant
/// that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySet<E>(Vec<E>);

impl<E> EntitySet<E> {
    pub fn normalize(self) -> Vec<E> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first entity of a single-name read.
    ///
    /// An empty set means the device had no such entity.
    pub fn into_first(self, entity_type: &str, name: &str) -> Result<E, CoreError> {
        self.0.into_iter().next().ok_or_else(|| CoreError::NotFound {
            entity_type: entity_type.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl<E> From<Vec<E>> for EntitySet<E> {
    fn from(entities: Vec<E>) -> Self {
        Self(entities)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn absent_node_is_empty() {
        assert!(entries(&Value::Null).unwrap().is_empty());
        assert!(entries(&json!({})).unwrap().is_empty());
        assert!(entries(&json!({ "entry": null })).unwrap().is_empty());
        assert!(
            entries(&json!({ "@total-count": "0", "@count": "0" }))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn single_object_and_list_shapes() {
        let one = json!({ "entry": { "@name": "ethernet1/1" } });
        let many = json!({ "entry": [{ "@name": "ethernet1/2" }, { "@name": "ethernet1/1" }] });
        assert_eq!(names(&one).unwrap(), vec!["ethernet1/1"]);
        assert_eq!(names(&many).unwrap(), vec!["ethernet1/2", "ethernet1/1"]);
    }

    #[test]
    fn scalar_results_are_malformed() {
        let err = entries(&json!("oops")).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
        let err = entries(&json!({ "entry": [1, 2] })).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }

    #[test]
    fn listing_requires_names() {
        let err = names(&json!({ "entry": [{ "comment": "x" }] })).unwrap_err();
        assert!(err.to_string().contains("@name"));
    }

    #[test]
    fn empty_set_is_not_found() {
        let set: EntitySet<u8> = Vec::new().into();
        let err = set.into_first("tunnel interface", "tunnel.9").unwrap_err();
        assert_eq!(err.to_string(), "tunnel interface not found: tunnel.9");
    }
}
