//! Button value types carried inside keyboards.
//!
//! Buttons are plain value data from the keyboard's point of view: they
//! serialize to their own JSON object, compare structurally, and are
//! owned by exactly one row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One button of an inline keyboard.
///
/// Carries a label and at most one action field describing what pressing
/// the button does. Use the named constructors to get exactly one action
/// set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InlineKeyboardButton {
    /// Label shown on the button.
    pub text: String,
    /// HTTP or `tg://` URL opened when the button is pressed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Payload sent back to the bot in a callback query, 1-64 bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    /// Prompts the user to pick a chat and inserts an inline query there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query: Option<String>,
    /// Inserts an inline query into the current chat's input field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switch_inline_query_current_chat: Option<String>,
    /// Marks the button as a pay button.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay: Option<bool>,
}

impl InlineKeyboardButton {
    fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            url: None,
            callback_data: None,
            switch_inline_query: None,
            switch_inline_query_current_chat: None,
            pay: None,
        }
    }

    /// Button that opens `url` when pressed.
    #[must_use]
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::with_text(text)
        }
    }

    /// Button that sends `data` back to the bot in a callback query.
    #[must_use]
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            callback_data: Some(data.into()),
            ..Self::with_text(text)
        }
    }

    /// Button that prompts the user to pick a chat and start an inline
    /// query there.
    #[must_use]
    pub fn switch_inline_query(text: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            switch_inline_query: Some(query.into()),
            ..Self::with_text(text)
        }
    }

    /// Button that starts an inline query in the current chat.
    #[must_use]
    pub fn switch_inline_query_current_chat(
        text: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            switch_inline_query_current_chat: Some(query.into()),
            ..Self::with_text(text)
        }
    }

    /// Pay button.
    #[must_use]
    pub fn pay(text: impl Into<String>) -> Self {
        Self {
            pay: Some(true),
            ..Self::with_text(text)
        }
    }

    /// Deserialize a single button from its transport value.
    ///
    /// Returns `None` for anything that is not a button object (wrong
    /// JSON type, empty object, missing `text`); callers doing lenient
    /// keyboard parsing skip such entries.
    #[must_use]
    pub fn from_transport_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.is_empty() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Serialize this button to its transport value.
    #[must_use]
    pub fn to_transport_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// One button of a custom reply keyboard.
///
/// Pressing it sends its label as a regular message, unless one of the
/// request flags asks the client for the user's contact or location
/// instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct KeyboardButton {
    /// Label shown on the button; sent as the message text when pressed.
    pub text: String,
    /// Ask the client to send the user's phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_contact: Option<bool>,
    /// Ask the client to send the user's location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_location: Option<bool>,
}

impl KeyboardButton {
    /// Plain text button.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: None,
            request_location: None,
        }
    }

    /// Button requesting the user's phone number.
    #[must_use]
    pub fn request_contact(text: impl Into<String>) -> Self {
        Self {
            request_contact: Some(true),
            ..Self::new(text)
        }
    }

    /// Button requesting the user's location.
    #[must_use]
    pub fn request_location(text: impl Into<String>) -> Self {
        Self {
            request_location: Some(true),
            ..Self::new(text)
        }
    }

    /// Deserialize a single button from its transport value.
    ///
    /// The wire format also allows a bare string in place of a button
    /// object; it becomes a plain text button. Everything else that is
    /// not a button object yields `None`.
    #[must_use]
    pub fn from_transport_value(value: &Value) -> Option<Self> {
        if let Value::String(text) = value {
            return Some(Self::new(text.clone()));
        }
        let object = value.as_object()?;
        if object.is_empty() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Serialize this button to its transport value.
    #[must_use]
    pub fn to_transport_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl From<&str> for KeyboardButton {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for KeyboardButton {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{InlineKeyboardButton, KeyboardButton};
    use serde_json::{json, Value};

    #[test]
    fn test_constructors_set_one_action() {
        let url = InlineKeyboardButton::url("open", "https://example.org");
        assert_eq!(url.url.as_deref(), Some("https://example.org"));
        assert_eq!(url.callback_data, None);

        let callback = InlineKeyboardButton::callback("next", "page_2");
        assert_eq!(callback.callback_data.as_deref(), Some("page_2"));
        assert_eq!(callback.url, None);

        let pay = InlineKeyboardButton::pay("Buy");
        assert_eq!(pay.pay, Some(true));
        assert_eq!(pay.callback_data, None);
    }

    #[test]
    fn test_transport_value_skips_unset_fields() {
        let value = InlineKeyboardButton::callback("next", "page_2").to_transport_value();
        assert_eq!(value, json!({"text": "next", "callback_data": "page_2"}));
    }

    #[test]
    fn test_from_transport_value_rejects_non_buttons() {
        assert_eq!(InlineKeyboardButton::from_transport_value(&Value::Null), None);
        assert_eq!(InlineKeyboardButton::from_transport_value(&json!({})), None);
        assert_eq!(
            InlineKeyboardButton::from_transport_value(&json!({"url": "https://example.org"})),
            None
        );
        assert_eq!(InlineKeyboardButton::from_transport_value(&json!(42)), None);
    }

    #[test]
    fn test_keyboard_button_accepts_bare_string() {
        let button = KeyboardButton::from_transport_value(&json!("top row"));
        assert_eq!(button, Some(KeyboardButton::new("top row")));
    }

    #[test]
    fn test_keyboard_button_from_str() {
        let button: KeyboardButton = "hello".into();
        assert_eq!(button.text, "hello");
        assert_eq!(button.request_contact, None);
    }
}
