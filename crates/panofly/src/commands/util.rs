//! Shared helpers for command handlers.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read and parse a JSON file for `--from-file` flags.
pub fn read_json_file(path: &Path) -> Result<Value, CliError> {
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })
}

/// Parse entries from a JSON array, or a single object.
pub fn parse_entries<E: DeserializeOwned>(value: Value) -> Result<Vec<E>, CliError> {
    match value {
        Value::Array(items) => items.into_iter().map(parse_entry).collect(),
        other @ Value::Object(_) => Ok(vec![parse_entry(other)?]),
        _ => Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object or an array of objects".into(),
        }),
    }
}

/// Parse exactly one entry from a JSON object.
pub fn parse_entry<E: DeserializeOwned>(value: Value) -> Result<E, CliError> {
    if !value.is_object() {
        return Err(CliError::Validation {
            field: "from-file".into(),
            reason: "expected a JSON object".into(),
        });
    }
    Ok(serde_json::from_value(value)?)
}

pub fn flag(enabled: bool) -> String {
    if enabled { "yes".into() } else { String::new() }
}

pub fn opt<T: ToString>(value: Option<&T>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        name: String,
    }

    #[test]
    fn single_object_becomes_one_entry() {
        let items: Vec<Item> = parse_entries(json!({ "name": "a" })).unwrap();
        assert_eq!(items, vec![Item { name: "a".into() }]);
    }

    #[test]
    fn array_keeps_order() {
        let items: Vec<Item> =
            parse_entries(json!([{ "name": "b" }, { "name": "a" }])).unwrap();
        assert_eq!(items[0].name, "b");
        assert_eq!(items[1].name, "a");
    }

    #[test]
    fn scalars_are_rejected() {
        assert!(matches!(
            parse_entries::<Item>(json!("eth")),
            Err(CliError::Validation { .. })
        ));
        assert!(matches!(
            parse_entry::<Item>(json!([])),
            Err(CliError::Validation { .. })
        ));
    }
}
