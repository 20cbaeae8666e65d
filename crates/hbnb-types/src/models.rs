//! Typed per-kind fields.
//!
//! Each kind is a flat struct of declared fields with defaults. Field order
//! here is the encoding order and matches [`RecordKind::schema`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult};
use crate::kind::RecordKind;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct State {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub state_id: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub amenity_ids: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    pub place_id: String,
    pub user_id: String,
    pub text: String,
}

/// The typed fields of a record, one variant per kind.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordBody {
    BaseModel,
    User(User),
    State(State),
    City(City),
    Amenity(Amenity),
    Place(Place),
    Review(Review),
}

impl RecordBody {
    /// A body with every declared field at its default.
    pub fn default_for(kind: RecordKind) -> Self {
        match kind {
            RecordKind::BaseModel => Self::BaseModel,
            RecordKind::User => Self::User(User::default()),
            RecordKind::State => Self::State(State::default()),
            RecordKind::City => Self::City(City::default()),
            RecordKind::Amenity => Self::Amenity(Amenity::default()),
            RecordKind::Place => Self::Place(Place::default()),
            RecordKind::Review => Self::Review(Review::default()),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            Self::BaseModel => RecordKind::BaseModel,
            Self::User(_) => RecordKind::User,
            Self::State(_) => RecordKind::State,
            Self::City(_) => RecordKind::City,
            Self::Amenity(_) => RecordKind::Amenity,
            Self::Place(_) => RecordKind::Place,
            Self::Review(_) => RecordKind::Review,
        }
    }

    /// Declared fields as an ordered JSON object.
    pub fn to_fields(&self) -> Map<String, Value> {
        match self {
            Self::BaseModel => Map::new(),
            Self::User(v) => to_map(v),
            Self::State(v) => to_map(v),
            Self::City(v) => to_map(v),
            Self::Amenity(v) => to_map(v),
            Self::Place(v) => to_map(v),
            Self::Review(v) => to_map(v),
        }
    }

    /// Build a body from declared fields. Missing fields take defaults.
    ///
    /// Values must already be coerced to their declared types.
    pub fn from_fields(kind: RecordKind, fields: Map<String, Value>) -> ModelResult<Self> {
        Ok(match kind {
            RecordKind::BaseModel => Self::BaseModel,
            RecordKind::User => Self::User(from_map(kind, fields)?),
            RecordKind::State => Self::State(from_map(kind, fields)?),
            RecordKind::City => Self::City(from_map(kind, fields)?),
            RecordKind::Amenity => Self::Amenity(from_map(kind, fields)?),
            RecordKind::Place => Self::Place(from_map(kind, fields)?),
            RecordKind::Review => Self::Review(from_map(kind, fields)?),
        })
    }
}

fn to_map<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

fn from_map<T: DeserializeOwned>(kind: RecordKind, fields: Map<String, Value>) -> ModelResult<T> {
    serde_json::from_value(Value::Object(fields)).map_err(|e| ModelError::InvalidValue {
        field: kind.name().to_string(),
        reason: e.to_string(),
    })
}
