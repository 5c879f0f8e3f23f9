#![deny(missing_docs)]
//! Reply-markup keyboard types for Telegram-style bot APIs.
//!
//! Models the `reply_markup` attachment sent alongside a bot message: an
//! inline keyboard grid of url/callback buttons, or a custom reply
//! keyboard replacing the device keyboard. Keyboards are built in memory,
//! mutated in place with index-clamping placement rules, compared by
//! value, and serialized to the JSON mapping the messaging API expects.

/// Button value types carried inside keyboards.
pub mod button;
/// Errors returned by keyboard mutation.
pub mod error;
/// Inline keyboard grid.
pub mod inline;
/// Serialization contract shared by every reply-markup kind.
pub mod markup;
/// Custom reply keyboard.
pub mod reply;

pub use button::{InlineKeyboardButton, KeyboardButton};
pub use error::MarkupError;
pub use inline::{InlineKeyboard, Placement};
pub use markup::ReplyMarkup;
pub use reply::ReplyKeyboard;
