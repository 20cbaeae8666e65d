//! JSON document codec.
//!
//! The document is one JSON object mapping composite keys to the dict form
//! of each record (see [`Record::encode`]). Keys appear in registry order,
//! so encoding a freshly decoded document reproduces the same text.

use hbnb_types::{ModelError, Record};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ReloadPolicy;
use crate::error::{StoreError, StoreResult};
use crate::registry::{object_key, Registry};

/// Encode every record in the registry into the document text.
pub fn encode_document(registry: &Registry) -> StoreResult<String> {
    let document: Map<String, Value> = registry
        .all(None)
        .map(|(key, record)| (key.to_string(), Value::Object(record.encode())))
        .collect();
    serde_json::to_string(&Value::Object(document))
        .map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode document text into `(key, record)` pairs in document order.
///
/// Empty or whitespace-only text is an empty store. Invalid JSON and a
/// non-object root are always errors. Entries that fail to rebuild are
/// handled according to `policy`. Keys are recomputed from each record's
/// kind and id; a stored key that disagrees is replaced with a warning.
pub fn decode_document(text: &str, policy: ReloadPolicy) -> StoreResult<Vec<(String, Record)>> {
    if text.trim().is_empty() {
        debug!("empty document; treating as no records");
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(text).map_err(StoreError::Parse)?;
    let Value::Object(entries) = root else {
        return Err(StoreError::NotAnObject);
    };

    let mut decoded = Vec::with_capacity(entries.len());
    for (stored_key, value) in entries {
        let rebuilt = match value {
            Value::Object(map) => Record::decode(map),
            _ => Err(ModelError::NotAnObject),
        };
        match rebuilt {
            Ok(record) => {
                let key = object_key(record.kind(), record.id());
                if key != stored_key {
                    warn!(stored = %stored_key, recomputed = %key, "stored key does not match record; re-keying");
                }
                decoded.push((key, record));
            }
            Err(source) => match policy {
                ReloadPolicy::Fail => {
                    return Err(StoreError::CorruptEntry {
                        key: stored_key,
                        source,
                    })
                }
                ReloadPolicy::Skip => {
                    warn!(key = %stored_key, error = %source, "skipping corrupt entry");
                }
            },
        }
    }
    Ok(decoded)
}
