//! Record types for the HBnB object store.
//!
//! This crate provides the record model shared by the store and the console.
//! Every other HBnB crate depends on `hbnb-types`.
//!
//! # Key Types
//!
//! - [`Record`] -- Attribute bag with an id, two timestamps, typed fields, and extras
//! - [`RecordKind`] -- The closed table of seven record kinds
//! - [`RecordBody`] -- Typed per-kind fields (one struct per kind)
//! - [`FieldType`] -- Declared type of a schema field, with value coercion
//! - [`Timestamp`] -- Microsecond-precision UTC timestamp with ISO-8601 encoding

pub mod error;
pub mod kind;
pub mod models;
pub mod record;
pub mod timestamp;

pub use error::{ModelError, ModelResult};
pub use kind::{FieldType, RecordKind};
pub use models::{Amenity, City, Place, RecordBody, Review, State, User};
pub use record::{Record, CLASS_TAG, RESERVED_ATTRIBUTES};
pub use timestamp::Timestamp;
