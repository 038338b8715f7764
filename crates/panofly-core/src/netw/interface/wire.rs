// Wire helpers shared by the interface families.
//
// The transport hands over the JSON rendition of the device's XML:
// attributes become `@`-prefixed keys, flags are `"yes"`/`"no"`, numbers
// arrive as text, an empty element reads as `{}`, and a repeated element
// collapses to a bare object when it occurs once.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::CoreError;

/// Deserialize one entry object, naming it in the error if possible.
pub(crate) fn from_entry<T: DeserializeOwned>(entry: &Value) -> Result<T, CoreError> {
    T::deserialize(entry).map_err(|e| {
        let name = entry.get("@name").and_then(Value::as_str).unwrap_or("<unnamed>");
        CoreError::malformed(format!("entry {name}: {e}"))
    })
}

/// Serialize one wire struct.
pub(crate) fn to_entry<T: Serialize>(wire: &T) -> Result<Value, CoreError> {
    serde_json::to_value(wire).map_err(|e| CoreError::InvalidArgument {
        message: format!("cannot encode entry: {e}"),
    })
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

/// Marker element with no content (`<tap/>`), written as `{}`.
/// Any content read back is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(d)?;
        Ok(Self {})
    }
}

// ── yes / no ─────────────────────────────────────────────────────────

/// `bool` as `"yes"` / `"no"`. Absent reads as `false`.
pub(crate) mod yes_no {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }
        Ok(match Raw::deserialize(d)? {
            Raw::Flag(flag) => flag,
            Raw::Text(text) => text.eq_ignore_ascii_case("yes"),
        })
    }
}

// ── numbers as text ──────────────────────────────────────────────────

/// `Option<u32>` written as text, read from text or a JSON number.
pub(crate) mod text_num {
    use super::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(value: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_str(&n.to_string()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u32),
            Text(String),
        }
        match Option::<Raw>::deserialize(d)? {
            None => Ok(None),
            Some(Raw::Number(n)) => Ok(Some(n)),
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(Raw::Text(text)) => text
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}

// ── text ─────────────────────────────────────────────────────────────

/// Text content where an empty element (`<x/>`, read as `{}`) means `""`.
pub(crate) fn text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Empty(serde_json::Map<String, Value>),
    }
    Ok(match Option::<Raw>::deserialize(d)? {
        None => None,
        Some(Raw::Text(text)) => Some(text),
        Some(Raw::Empty(_)) => Some(String::new()),
    })
}

// ── one-or-many ──────────────────────────────────────────────────────

/// A repeated element that collapses to a bare object when single.
pub(crate) fn one_or_many<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Many(Vec<T>),
        One(T),
    }
    Ok(match Option::<Raw<T>>::deserialize(d)? {
        None => Vec::new(),
        Some(Raw::Many(items)) => items,
        Some(Raw::One(item)) => vec![item],
    })
}

/// `{"@name": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Named {
    #[serde(rename = "@name")]
    pub name: String,
}

/// `{"entry": [{"@name": ...}, ...]}`, e.g. a static address list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct NamedList {
    #[serde(default, deserialize_with = "one_or_many")]
    pub entry: Vec<Named>,
}

impl NamedList {
    /// `None` for an empty list, so the element is omitted.
    pub fn from_names(names: &[String]) -> Option<Self> {
        if names.is_empty() {
            return None;
        }
        Some(Self {
            entry: names.iter().map(|n| Named { name: n.clone() }).collect(),
        })
    }

    pub fn into_names(list: Option<Self>) -> Vec<String> {
        list.map(|l| l.entry.into_iter().map(|n| n.name).collect())
            .unwrap_or_default()
    }
}

/// `ipv6` block common to layer3 and tunnel interfaces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct Ipv6 {
    #[serde(default, with = "yes_no", skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface_id: Option<String>,
}

impl Ipv6 {
    pub fn from_parts(enabled: bool, interface_id: Option<&String>) -> Option<Self> {
        if !enabled && interface_id.is_none() {
            return None;
        }
        Some(Self {
            enabled,
            interface_id: interface_id.cloned(),
        })
    }
}
