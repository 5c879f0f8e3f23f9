//! Custom reply keyboard shown in place of the device keyboard.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::button::KeyboardButton;
use crate::error::MarkupError;
use crate::markup::ReplyMarkup;

/// Resolve a possibly negative index against `len`, end-relative:
/// negatives count from the end. `None` outside `[-len, len)`.
fn end_relative(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let index = usize::try_from(index).ok()?;
        (index < len).then_some(index)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

/// Insertion position for a possibly negative index: past-the-end
/// appends, before-the-start becomes 0, in-range negatives count from
/// the end.
fn insert_position(index: isize, len: usize) -> usize {
    if index >= 0 {
        usize::try_from(index).unwrap_or(len).min(len)
    } else {
        len.saturating_sub(index.unsigned_abs())
    }
}

/// A custom keyboard replacing the device keyboard: rows of reply
/// buttons plus display hints for the client.
///
/// The empty keyboard is a single empty row, never zero rows. Unlike the
/// inline grid, this keyboard's mutators resolve in-range negative
/// indices end-relative.
///
/// Keyboards compare by button layout only; the display hint flags do
/// not take part in equality or hashing. Mutating a keyboard while it is
/// held as a hash-map key is unsupported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    #[serde(rename = "keyboard", deserialize_with = "rows_or_default")]
    rows: Vec<Vec<KeyboardButton>>,
    /// Ask clients to vertically shrink the keyboard to fit its rows.
    #[serde(default)]
    pub resize_keyboard: bool,
    /// Ask clients to hide the keyboard after first use.
    #[serde(default)]
    pub one_time_keyboard: bool,
    /// Show the keyboard only to the users targeted by the message.
    #[serde(default)]
    pub selective: bool,
}

fn rows_or_default<'de, D>(deserializer: D) -> Result<Vec<Vec<KeyboardButton>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let rows = Vec::<Vec<KeyboardButton>>::deserialize(deserializer)?;
    Ok(if rows.is_empty() { vec![Vec::new()] } else { rows })
}

impl Default for ReplyKeyboard {
    fn default() -> Self {
        Self {
            rows: vec![Vec::new()],
            resize_keyboard: false,
            one_time_keyboard: false,
            selective: false,
        }
    }
}

impl PartialEq for ReplyKeyboard {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for ReplyKeyboard {}

impl Hash for ReplyKeyboard {
    // Covers the same fields as `eq` so equal keyboards hash equal.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rows.hash(state);
    }
}

impl ReplyKeyboard {
    /// Build a keyboard from raw rows. An empty rows sequence becomes
    /// the single empty row. Display hints start out unset.
    #[must_use]
    pub fn new(rows: Vec<Vec<KeyboardButton>>) -> Self {
        if rows.is_empty() {
            Self::default()
        } else {
            Self {
                rows,
                ..Self::default()
            }
        }
    }

    /// 1x1 keyboard holding just `button`.
    #[must_use]
    pub fn from_button(button: impl Into<KeyboardButton>) -> Self {
        Self {
            rows: vec![vec![button.into()]],
            ..Self::default()
        }
    }

    /// Single-row keyboard.
    #[must_use]
    pub fn from_row(buttons: impl IntoIterator<Item = impl Into<KeyboardButton>>) -> Self {
        Self {
            rows: vec![buttons.into_iter().map(Into::into).collect()],
            ..Self::default()
        }
    }

    /// Single-column keyboard, one row per button.
    #[must_use]
    pub fn from_column(buttons: impl IntoIterator<Item = impl Into<KeyboardButton>>) -> Self {
        Self::new(buttons.into_iter().map(|button| vec![button.into()]).collect())
    }

    /// Ask clients to vertically shrink the keyboard to fit its rows.
    #[must_use]
    pub fn resize(mut self) -> Self {
        self.resize_keyboard = true;
        self
    }

    /// Ask clients to hide the keyboard after first use.
    #[must_use]
    pub fn one_time(mut self) -> Self {
        self.one_time_keyboard = true;
        self
    }

    /// Show the keyboard only to the users targeted by the message.
    #[must_use]
    pub fn selective(mut self) -> Self {
        self.selective = true;
        self
    }

    /// Parse the transport mapping `{"keyboard": [[...]], ...}`.
    ///
    /// Returns `None` when `value` is not an object, is an empty object,
    /// or does not carry an array-of-arrays keyboard key. Entries that
    /// fail button deserialization are skipped; the rest of their row is
    /// kept. Missing hint flags default to false.
    #[must_use]
    pub fn from_transport_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.is_empty() {
            return None;
        }
        let rows_value = object.get("keyboard")?.as_array()?;
        let mut rows = Vec::with_capacity(rows_value.len());
        for (row_index, row_value) in rows_value.iter().enumerate() {
            let cells = row_value.as_array()?;
            let mut row = Vec::with_capacity(cells.len());
            for (column, cell) in cells.iter().enumerate() {
                match KeyboardButton::from_transport_value(cell) {
                    Some(button) => row.push(button),
                    None => {
                        warn!(row = row_index, column, "skipping malformed reply keyboard button");
                    }
                }
            }
            rows.push(row);
        }
        let mut keyboard = Self::new(rows);
        keyboard.resize_keyboard = object
            .get("resize_keyboard")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        keyboard.one_time_keyboard = object
            .get("one_time_keyboard")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        keyboard.selective = object
            .get("selective")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Some(keyboard)
    }

    /// Button rows in on-screen order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<KeyboardButton>] {
        &self.rows
    }

    /// Consume the keyboard, yielding its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<KeyboardButton>> {
        self.rows
    }

    /// Add `button` to the row `from_row` (last row when `None`) at
    /// `column` (appended when `None`), and return the keyboard again so
    /// calls can be chained.
    ///
    /// In-range negative indices count from the end; a `column` past
    /// either end appends or front-inserts.
    ///
    /// # Errors
    ///
    /// [`MarkupError::RowOutOfRange`] when `from_row` is outside
    /// `[-rows, rows)`. The keyboard is untouched on error.
    pub fn add_button(
        &mut self,
        button: impl Into<KeyboardButton>,
        from_row: Option<isize>,
        column: Option<isize>,
    ) -> Result<&mut Self, MarkupError> {
        let len = self.rows.len();
        let row_index = match from_row {
            None => len.saturating_sub(1),
            Some(index) => end_relative(index, len).ok_or(MarkupError::RowOutOfRange {
                index,
                max: len.saturating_sub(1),
            })?,
        };
        let row = &mut self.rows[row_index];
        let button = button.into();
        match column {
            None => row.push(button),
            Some(column) => {
                let at = insert_position(column, row.len());
                trace!(row = row_index, column = at, "inserting reply button");
                row.insert(at, button);
            }
        }
        Ok(self)
    }

    /// Insert a whole row of buttons at `index` (end-relative for
    /// in-range negatives); appends when `index` is `None`. The row may
    /// be empty.
    pub fn add_row(
        &mut self,
        row: impl IntoIterator<Item = impl Into<KeyboardButton>>,
        index: Option<isize>,
    ) -> &mut Self {
        let at = match index {
            Some(index) => insert_position(index, self.rows.len()),
            None => self.rows.len(),
        };
        let row: Vec<KeyboardButton> = row.into_iter().map(Into::into).collect();
        trace!(row = at, buttons = row.len(), "inserting reply row");
        self.rows.insert(at, row);
        self
    }

    /// Splice all rows of `other` into this keyboard at `index`,
    /// preserving both keyboards' row order; appends when `index` is
    /// `None`. The other keyboard's display hints are discarded.
    pub fn merge(&mut self, other: Self, index: Option<isize>) -> &mut Self {
        let at = match index {
            Some(index) => insert_position(index, self.rows.len()),
            None => self.rows.len(),
        };
        trace!(row = at, merged_rows = other.rows.len(), "merging reply keyboard rows");
        self.rows.splice(at..at, other.rows);
        self
    }
}

impl ReplyMarkup for ReplyKeyboard {
    fn to_transport_value(&self) -> Value {
        let mut data = self.base_transport_value();
        let rows = self
            .rows
            .iter()
            .map(|row| Value::Array(row.iter().map(KeyboardButton::to_transport_value).collect()))
            .collect();
        data.insert("keyboard".to_string(), Value::Array(rows));
        data.insert("resize_keyboard".to_string(), Value::Bool(self.resize_keyboard));
        data.insert(
            "one_time_keyboard".to_string(),
            Value::Bool(self.one_time_keyboard),
        );
        data.insert("selective".to_string(), Value::Bool(self.selective));
        Value::Object(data)
    }
}
