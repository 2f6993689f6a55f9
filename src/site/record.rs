//! Page and viewer records as stored in a site document.

use crate::node::Viewer;
use crate::types::{NodeId, Timestamp, ViewerId};
use crate::window::NodeFields;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A raw field value. Checkboxes are booleans, 0/1 or the words true/false,
/// datetimes are RFC 3339 strings, TOML datetimes or Unix seconds; an empty
/// string or `null` is an empty field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Seconds(i64),
    Text(String),
}

impl FieldValue {
    /// Read as a checkbox. Unrecognized text reads as unchecked; documents
    /// are checked with [`parse_flag`](Self::parse_flag) on load.
    pub fn as_flag(&self) -> bool {
        self.parse_flag().unwrap_or(false)
    }

    pub fn parse_flag(&self) -> Result<bool, String> {
        match self {
            FieldValue::Flag(b) => Ok(*b),
            FieldValue::Seconds(n) => Ok(*n != 0),
            FieldValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "off" => Ok(false),
                "1" | "true" | "on" => Ok(true),
                other => Err(format!("'{}' is not a checkbox value", other)),
            },
        }
    }

    /// Parse as a timestamp. `Ok(None)` for an empty value.
    pub fn as_timestamp(&self) -> Result<Option<Timestamp>, String> {
        match self {
            FieldValue::Flag(_) => Err("expected a datetime, found a boolean".to_string()),
            FieldValue::Seconds(n) => Utc
                .timestamp_opt(*n, 0)
                .single()
                .map(Some)
                .ok_or_else(|| format!("{} is out of range", n)),
            FieldValue::Text(s) if s.trim().is_empty() => Ok(None),
            FieldValue::Text(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| e.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FieldValueVisitor)
    }
}

struct FieldValueVisitor;

impl<'de> Visitor<'de> for FieldValueVisitor {
    type Value = FieldValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, an integer, a string or a datetime")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<FieldValue, E> {
        Ok(FieldValue::Flag(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<FieldValue, E> {
        Ok(FieldValue::Seconds(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<FieldValue, E> {
        i64::try_from(v)
            .map(FieldValue::Seconds)
            .map_err(|_| E::custom(format!("{} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<FieldValue, E> {
        Ok(FieldValue::Text(v))
    }

    // TOML hands native datetimes over as a single-entry map.
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<FieldValue, A::Error> {
        let datetime =
            toml::value::Datetime::deserialize(de::value::MapAccessDeserializer::new(map))?;
        Ok(FieldValue::Text(datetime.to_string()))
    }
}

/// One page of the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: NodeId,
    #[serde(default)]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub name: Option<String>,
    /// Schema fields of the page's template. A key being present means the
    /// schema declares the field, even when its value is empty.
    #[serde(default)]
    pub fields: BTreeMap<String, Option<FieldValue>>,
}

impl PageRecord {
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", name, self.id),
            None => self.id.to_string(),
        }
    }
}

impl NodeFields for PageRecord {
    fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    fn flag(&self, name: &str) -> bool {
        self.fields
            .get(name)
            .and_then(|v| v.as_ref())
            .map(FieldValue::as_flag)
            .unwrap_or(false)
    }

    fn timestamp(&self, name: &str) -> Option<Timestamp> {
        self.fields
            .get(name)
            .and_then(|v| v.as_ref())
            .and_then(|v| v.as_timestamp().ok().flatten())
    }
}

/// A named viewer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerRecord {
    pub name: String,
    #[serde(default)]
    pub id: Option<ViewerId>,
    #[serde(default)]
    pub superuser: bool,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl From<&ViewerRecord> for Viewer {
    fn from(record: &ViewerRecord) -> Self {
        Viewer {
            id: record.id,
            superuser: record.superuser,
            permissions: record.permissions.iter().cloned().collect(),
        }
    }
}
