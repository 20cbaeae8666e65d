use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;

/// The closed set of record kinds known to the store.
///
/// This is the single kind table: the console's name check and the codec's
/// reconstruction both go through [`RecordKind::from_str`], so the two can
/// never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordKind {
    BaseModel,
    User,
    State,
    City,
    Amenity,
    Place,
    Review,
}

impl RecordKind {
    /// Every kind, in declaration order.
    pub const ALL: [RecordKind; 7] = [
        Self::BaseModel,
        Self::User,
        Self::State,
        Self::City,
        Self::Amenity,
        Self::Place,
        Self::Review,
    ];

    /// The kind's name as used in commands, keys, and `__class__` tags.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Subtype-inclusive kind test: every kind is a `BaseModel`.
    pub fn is_a(&self, other: RecordKind) -> bool {
        other == Self::BaseModel || *self == other
    }

    /// Declared fields of this kind, in encoding order.
    pub fn schema(&self) -> &'static [(&'static str, FieldType)] {
        use FieldType::*;
        match self {
            Self::BaseModel => &[],
            Self::User => &[
                ("email", Text),
                ("password", Text),
                ("first_name", Text),
                ("last_name", Text),
            ],
            Self::State => &[("name", Text)],
            Self::City => &[("state_id", Text), ("name", Text)],
            Self::Amenity => &[("name", Text)],
            Self::Place => &[
                ("city_id", Text),
                ("user_id", Text),
                ("name", Text),
                ("description", Text),
                ("number_rooms", Integer),
                ("number_bathrooms", Integer),
                ("max_guest", Integer),
                ("price_by_night", Integer),
                ("latitude", Float),
                ("longitude", Float),
                ("amenity_ids", TextList),
            ],
            Self::Review => &[("place_id", Text), ("user_id", Text), ("text", Text)],
        }
    }

    /// Look up the declared type of a field, if the kind declares it.
    pub fn field_type(&self, field: &str) -> Option<FieldType> {
        self.schema()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, ty)| *ty)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RecordKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ModelError::UnknownKind(s.to_string()))
    }
}

/// Declared type of a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Integer,
    Float,
    TextList,
}

impl FieldType {
    /// Coerce a JSON value into the shape this field stores.
    ///
    /// Text accepts strings and renders numbers and booleans as their JSON
    /// text. Integer and float accept numbers and numeric strings. A list
    /// accepts only an array of strings. Returns `None` when the value does
    /// not fit.
    pub fn coerce(&self, value: Value) -> Option<Value> {
        match (self, value) {
            (Self::Text, Value::String(s)) => Some(Value::String(s)),
            (Self::Text, v @ (Value::Number(_) | Value::Bool(_))) => {
                Some(Value::String(v.to_string()))
            }
            (Self::Integer, Value::Number(n)) => n.as_i64().map(Value::from),
            (Self::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),
            (Self::Float, Value::Number(n)) => n.as_f64().map(Value::from),
            (Self::Float, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::from),
            (Self::TextList, Value::Array(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(Value::String(s)),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map(Value::Array),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Integer => write!(f, "integer"),
            Self::Float => write!(f, "float"),
            Self::TextList => write!(f, "list of text"),
        }
    }
}
