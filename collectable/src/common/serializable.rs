use serde::de::DeserializeOwned;

use crate::errors::CollectionResult;

/// Binary and JSON export of a collection.
///
/// Only the materialized contents are written, never the factory. Reading them back
/// yields a collection whose factory replays the captured contents.
///
/// Binary form uses `bincode` with the legacy configuration; JSON follows the
/// `pretty_json` setting of the active
/// [CollectionConfig](crate::collection_config::CollectionConfig).
pub trait Serializable: serde::Serialize + DeserializeOwned {
    /// Materializes the collection and encodes its contents.
    fn serialize(&self) -> CollectionResult<Vec<u8>> {
        let bytes = bincode::serde::encode_to_vec(self, bincode::config::legacy())?;
        Ok(bytes)
    }

    /// Rebuilds a collection from bytes produced by [Serializable::serialize].
    fn unserialize(bytes: &[u8]) -> CollectionResult<Self> {
        let (value, _) = bincode::serde::decode_from_slice(bytes, bincode::config::legacy())?;
        Ok(value)
    }

    /// Materializes the collection and renders its contents as JSON.
    fn to_json(&self) -> CollectionResult<String> {
        let json = if crate::config().pretty_json() {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}
