// ── Bulk write payloads ──
//
// A multi-entry `set` targets the grandparent container and carries the
// collection wrapper; a single-entry `set` targets the collection itself
// and carries the bare entry. Callers strip the write path to match.

use serde_json::{Map, Value, json};

/// Encoded entries collected under a fixed collection tag
/// (e.g. `ethernet`, `units`).
#[derive(Debug, Clone, PartialEq)]
pub struct BulkElement {
    tag: String,
    entries: Vec<Value>,
}

impl BulkElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: Value) {
        self.entries.push(entry);
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The element to send.
    ///
    /// One entry yields `{"entry": {...}}`; two or more yield
    /// `{"<tag>": {"entry": [...]}}`.
    pub fn config(&self) -> Value {
        match self.entries.as_slice() {
            [single] => json!({ "entry": single }),
            many => {
                let mut inner = Map::new();
                inner.insert("entry".into(), Value::Array(many.to_vec()));
                let mut outer = Map::new();
                outer.insert(self.tag.clone(), Value::Object(inner));
                Value::Object(outer)
            }
        }
    }
}

impl Extend<Value> for BulkElement {
    fn extend<T: IntoIterator<Item = Value>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_entry_is_bare() {
        let mut bulk = BulkElement::new("ethernet");
        bulk.push(json!({ "@name": "ethernet1/1" }));
        assert_eq!(bulk.config(), json!({ "entry": { "@name": "ethernet1/1" } }));
    }

    #[test]
    fn multiple_entries_are_wrapped() {
        let mut bulk = BulkElement::new("units");
        bulk.extend([json!({ "@name": "tunnel.1" }), json!({ "@name": "tunnel.2" })]);
        assert_eq!(bulk.len(), 2);
        assert_eq!(
            bulk.config(),
            json!({ "units": { "entry": [{ "@name": "tunnel.1" }, { "@name": "tunnel.2" }] } })
        );
    }
}
