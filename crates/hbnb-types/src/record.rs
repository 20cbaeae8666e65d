//! The record: an identified, timestamped attribute bag.
//!
//! A [`Record`] carries an immutable id, a creation timestamp, a modification
//! timestamp, the typed fields of its kind, and a side-map of attributes the
//! kind does not declare.
//!
//! # Encoding
//!
//! [`Record::encode`] produces the dict form stored on disk:
//!
//! ```text
//! {"id": ..., "created_at": ISO, "updated_at": ISO, <declared fields>, <extras>, "__class__": Kind}
//! ```
//!
//! [`Record::decode`] is its inverse; `decode(encode(r)) == r` for every record.

use std::fmt;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::{ModelError, ModelResult};
use crate::kind::RecordKind;
use crate::models::RecordBody;
use crate::timestamp::Timestamp;

/// Attribute naming the record kind in the encoded form.
pub const CLASS_TAG: &str = "__class__";

/// Attributes managed by the record itself; never settable by callers.
pub const RESERVED_ATTRIBUTES: [&str; 4] = ["id", "created_at", "updated_at", CLASS_TAG];

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    id: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    body: RecordBody,
    extra: IndexMap<String, Value>,
}

impl Record {
    /// Create a fresh record of `kind` with a new id and both timestamps
    /// set to now.
    pub fn new(kind: RecordKind) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            body: RecordBody::default_for(kind),
            extra: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> RecordKind {
        self.body.kind()
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn body(&self) -> &RecordBody {
        &self.body
    }

    /// Attributes outside the kind's schema, in insertion order.
    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    /// Advance `updated_at` to a time strictly later than its current value.
    pub fn touch(&mut self) {
        self.updated_at = Timestamp::advanced_past(self.updated_at);
    }

    /// Read one attribute in its encoded form.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "id" => Some(Value::String(self.id.clone())),
            "created_at" => Some(Value::String(self.created_at.to_iso())),
            "updated_at" => Some(Value::String(self.updated_at.to_iso())),
            CLASS_TAG => Some(Value::String(self.kind().name().to_string())),
            _ => self
                .body
                .to_fields()
                .remove(name)
                .or_else(|| self.extra.get(name).cloned()),
        }
    }

    /// Set one attribute.
    ///
    /// Declared fields are coerced to their declared type; other names are
    /// kept in the extras map as given. Does not touch `updated_at`.
    pub fn set_attribute(&mut self, name: &str, value: Value) -> ModelResult<()> {
        if RESERVED_ATTRIBUTES.contains(&name) {
            return Err(ModelError::ReadOnlyAttribute(name.to_string()));
        }
        let kind = self.kind();
        match kind.field_type(name) {
            Some(ty) => {
                let coerced = ty.coerce(value).ok_or_else(|| ModelError::InvalidValue {
                    field: name.to_string(),
                    reason: format!("expected {ty}"),
                })?;
                let mut fields = self.body.to_fields();
                fields.insert(name.to_string(), coerced);
                self.body = RecordBody::from_fields(kind, fields)?;
            }
            None => {
                self.extra.insert(name.to_string(), value);
            }
        }
        Ok(())
    }

    /// Set several attributes at once. Either all are applied or none are.
    pub fn merge(&mut self, attributes: Map<String, Value>) -> ModelResult<()> {
        let mut staged = self.clone();
        for (name, value) in attributes {
            staged.set_attribute(&name, value)?;
        }
        *self = staged;
        Ok(())
    }

    /// The dict form of this record, including the `__class__` tag.
    pub fn encode(&self) -> Map<String, Value> {
        let mut map = self.attributes();
        map.insert(
            CLASS_TAG.to_string(),
            Value::String(self.kind().name().to_string()),
        );
        map
    }

    /// Rebuild a record from its dict form.
    pub fn decode(mut map: Map<String, Value>) -> ModelResult<Self> {
        let kind: RecordKind = match map.remove(CLASS_TAG) {
            Some(Value::String(tag)) => tag.parse()?,
            Some(other) => return Err(ModelError::UnknownKind(other.to_string())),
            None => return Err(ModelError::MissingField(CLASS_TAG)),
        };
        let id = match map.remove("id") {
            Some(Value::String(id)) if !id.is_empty() => id,
            Some(other) => {
                return Err(ModelError::InvalidValue {
                    field: "id".into(),
                    reason: format!("expected a non-empty string, got {other}"),
                })
            }
            None => return Err(ModelError::MissingField("id")),
        };
        let created_at = take_timestamp(&mut map, "created_at")?;
        let updated_at = take_timestamp(&mut map, "updated_at")?;

        let mut fields = Map::new();
        let mut extra = IndexMap::new();
        for (name, value) in map {
            match kind.field_type(&name) {
                Some(ty) => {
                    let coerced = ty.coerce(value).ok_or_else(|| ModelError::InvalidValue {
                        field: name.clone(),
                        reason: format!("expected {ty}"),
                    })?;
                    fields.insert(name, coerced);
                }
                None => {
                    extra.insert(name, value);
                }
            }
        }

        Ok(Self {
            id,
            created_at,
            updated_at,
            body: RecordBody::from_fields(kind, fields)?,
            extra,
        })
    }

    /// Display form: `[<Kind>] (<id>) <attributes>`.
    pub fn render(&self) -> String {
        format!(
            "[{}] ({}) {}",
            self.kind(),
            self.id,
            Value::Object(self.attributes())
        )
    }

    /// Encoded attributes without the class tag.
    fn attributes(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::String(self.id.clone()));
        map.insert("created_at".into(), Value::String(self.created_at.to_iso()));
        map.insert("updated_at".into(), Value::String(self.updated_at.to_iso()));
        map.extend(self.body.to_fields());
        map.extend(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn take_timestamp(map: &mut Map<String, Value>, field: &'static str) -> ModelResult<Timestamp> {
    match map.remove(field) {
        Some(Value::String(raw)) => Timestamp::parse_iso(&raw)
            .map_err(|_| ModelError::InvalidTimestamp { field, value: raw }),
        Some(other) => Err(ModelError::InvalidTimestamp {
            field,
            value: other.to_string(),
        }),
        None => Err(ModelError::MissingField(field)),
    }
}
