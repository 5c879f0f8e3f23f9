//! Serialization contract shared by every reply-markup kind.

use serde_json::{Map, Value};

/// A keyboard attachment that can be sent as the `reply_markup` field of
/// a message request.
///
/// The base markup layer contributes no fields of its own; concrete
/// keyboard types extend [`Self::base_transport_value`] with their
/// keyboard-specific keys.
pub trait ReplyMarkup {
    /// Mapping contributed by the base markup layer.
    ///
    /// Currently empty. Kept as the extension point so every keyboard
    /// type extends a shared base instead of building its mapping from
    /// scratch.
    fn base_transport_value(&self) -> Map<String, Value> {
        Map::new()
    }

    /// JSON-compatible mapping sent to the messaging API.
    fn to_transport_value(&self) -> Value;

    /// Transport mapping rendered as a JSON string.
    ///
    /// Request bodies commonly embed the markup as a string-encoded
    /// sub-object rather than a nested one.
    fn to_transport_json(&self) -> String {
        self.to_transport_value().to_string()
    }
}
