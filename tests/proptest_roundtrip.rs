//! Property tests: transport round-trips and totality of button placement.

use oxide_markup::{
    InlineKeyboard, InlineKeyboardButton, KeyboardButton, Placement, ReplyKeyboard, ReplyMarkup,
};
use proptest::prelude::*;

fn inline_button() -> impl Strategy<Value = InlineKeyboardButton> {
    ("[a-z]{1,8}", "[a-z]{1,8}", proptest::bool::ANY).prop_map(|(text, payload, as_url)| {
        if as_url {
            InlineKeyboardButton::url(text, format!("https://{payload}.example"))
        } else {
            InlineKeyboardButton::callback(text, payload)
        }
    })
}

fn inline_keyboard() -> impl Strategy<Value = InlineKeyboard> {
    proptest::collection::vec(proptest::collection::vec(inline_button(), 0..4), 0..4)
        .prop_map(InlineKeyboard::new)
}

fn reply_button() -> impl Strategy<Value = KeyboardButton> {
    ("[a-z]{1,8}", 0u8..3).prop_map(|(text, kind)| match kind {
        0 => KeyboardButton::new(text),
        1 => KeyboardButton::request_contact(text),
        _ => KeyboardButton::request_location(text),
    })
}

fn reply_keyboard() -> impl Strategy<Value = ReplyKeyboard> {
    (
        proptest::collection::vec(proptest::collection::vec(reply_button(), 0..4), 0..4),
        proptest::bool::ANY,
        proptest::bool::ANY,
    )
        .prop_map(|(rows, resize, one_time)| {
            let mut keyboard = ReplyKeyboard::new(rows);
            if resize {
                keyboard = keyboard.resize();
            }
            if one_time {
                keyboard = keyboard.one_time();
            }
            keyboard
        })
}

fn button_count(keyboard: &InlineKeyboard) -> usize {
    keyboard.rows().iter().map(Vec::len).sum()
}

proptest! {
    /// Serializing and re-parsing an inline keyboard yields the same value.
    #[test]
    fn inline_round_trips(keyboard in inline_keyboard()) {
        let parsed = InlineKeyboard::from_transport_value(&keyboard.to_transport_value());
        prop_assert_eq!(parsed, Some(keyboard));
    }

    /// The strict serde path agrees with the transport serializer.
    #[test]
    fn inline_serde_agrees_with_transport(keyboard in inline_keyboard()) {
        let derived = serde_json::to_value(&keyboard);
        prop_assert_eq!(derived.ok(), Some(keyboard.to_transport_value()));
    }

    /// Serializing and re-parsing a reply keyboard keeps layout and hints.
    #[test]
    fn reply_round_trips(keyboard in reply_keyboard()) {
        let parsed = ReplyKeyboard::from_transport_value(&keyboard.to_transport_value());
        prop_assert!(parsed.is_some());
        if let Some(parsed) = parsed {
            prop_assert_eq!(parsed.rows(), keyboard.rows());
            prop_assert_eq!(parsed.resize_keyboard, keyboard.resize_keyboard);
            prop_assert_eq!(parsed.one_time_keyboard, keyboard.one_time_keyboard);
            prop_assert_eq!(parsed.selective, keyboard.selective);
        }
    }

    /// Any placement either adds exactly one button or fails without
    /// mutating the keyboard.
    #[test]
    fn placement_is_total(
        mut keyboard in inline_keyboard(),
        from_row in proptest::option::of(-3isize..8),
        insert_row in proptest::option::of(-3isize..8),
        insert_column in proptest::option::of(-5isize..12),
    ) {
        let before = keyboard.clone();
        let count = button_count(&keyboard);
        let placement = Placement { from_row, insert_row, insert_column };
        let outcome = keyboard
            .add_button(InlineKeyboardButton::callback("p", "p"), placement)
            .map(|_| ());
        match outcome {
            Ok(()) => prop_assert_eq!(button_count(&keyboard), count + 1),
            Err(_) => prop_assert_eq!(&keyboard, &before),
        }
    }
}
