//! Inline keyboard grid: construction, mutation, transport form.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{trace, warn};

use crate::button::InlineKeyboardButton;
use crate::error::MarkupError;
use crate::markup::ReplyMarkup;

/// Restrict `value` into `[0, upper]`. Negative values floor to 0, they
/// do not count from the end.
fn clamp_index(value: isize, upper: usize) -> usize {
    usize::try_from(value).unwrap_or(0).min(upper)
}

/// True when `value` is a non-negative index greater than `limit`.
fn exceeds(value: isize, limit: usize) -> bool {
    usize::try_from(value).is_ok_and(|value| value > limit)
}

/// Where [`InlineKeyboard::add_button`] places a button.
///
/// At most one of `from_row` and `insert_row` may be set per call; with
/// neither set the button goes to the last row. Indices are signed so
/// that out-of-range values can be clamped rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placement {
    /// Existing row that receives the button.
    pub from_row: Option<isize>,
    /// Position at which a new single-button row is inserted.
    pub insert_row: Option<isize>,
    /// Column within the target row; appends when unset.
    pub insert_column: Option<isize>,
}

impl Placement {
    /// Place the button in the existing row `index`.
    #[must_use]
    pub fn in_row(index: isize) -> Self {
        Self {
            from_row: Some(index),
            ..Self::default()
        }
    }

    /// Insert a new single-button row at `index`.
    #[must_use]
    pub fn new_row(index: isize) -> Self {
        Self {
            insert_row: Some(index),
            ..Self::default()
        }
    }

    /// Set the column within the target row.
    #[must_use]
    pub fn at_column(mut self, index: isize) -> Self {
        self.insert_column = Some(index);
        self
    }
}

/// An inline keyboard shown next to the message it belongs to: rows of
/// buttons in on-screen order.
///
/// The empty keyboard is a single empty row, never zero rows, so the
/// "last row" addressing mode always has a target. Rows may have
/// different lengths.
///
/// Keyboards compare by value: same shape and equal buttons at every
/// position. The hash is derived from the current button contents;
/// mutating a keyboard while it is held as a hash-map key is
/// unsupported.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct InlineKeyboard {
    #[serde(rename = "inline_keyboard", deserialize_with = "rows_or_default")]
    rows: Vec<Vec<InlineKeyboardButton>>,
}

fn rows_or_default<'de, D>(deserializer: D) -> Result<Vec<Vec<InlineKeyboardButton>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let rows = Vec::<Vec<InlineKeyboardButton>>::deserialize(deserializer)?;
    Ok(if rows.is_empty() { vec![Vec::new()] } else { rows })
}

impl Default for InlineKeyboard {
    fn default() -> Self {
        Self {
            rows: vec![Vec::new()],
        }
    }
}

impl InlineKeyboard {
    /// Build a keyboard from raw rows. An empty rows sequence becomes
    /// the single empty row.
    #[must_use]
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        if rows.is_empty() {
            Self::default()
        } else {
            Self { rows }
        }
    }

    /// 1x1 keyboard holding just `button`.
    #[must_use]
    pub fn from_button(button: InlineKeyboardButton) -> Self {
        Self {
            rows: vec![vec![button]],
        }
    }

    /// Single-row keyboard.
    #[must_use]
    pub fn from_row(buttons: Vec<InlineKeyboardButton>) -> Self {
        Self {
            rows: vec![buttons],
        }
    }

    /// Single-column keyboard, one row per button.
    #[must_use]
    pub fn from_column(buttons: impl IntoIterator<Item = InlineKeyboardButton>) -> Self {
        Self::new(buttons.into_iter().map(|button| vec![button]).collect())
    }

    /// Parse the transport mapping `{"inline_keyboard": [[...]]}`.
    ///
    /// Returns `None` when `value` is not an object, is an empty object,
    /// or does not carry an array-of-arrays keyboard key. Entries that
    /// fail button deserialization are skipped; the rest of their row is
    /// kept.
    #[must_use]
    pub fn from_transport_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        if object.is_empty() {
            return None;
        }
        let rows_value = object.get("inline_keyboard")?.as_array()?;
        let mut rows = Vec::with_capacity(rows_value.len());
        for (row_index, row_value) in rows_value.iter().enumerate() {
            let cells = row_value.as_array()?;
            let mut row = Vec::with_capacity(cells.len());
            for (column, cell) in cells.iter().enumerate() {
                match InlineKeyboardButton::from_transport_value(cell) {
                    Some(button) => row.push(button),
                    None => {
                        warn!(row = row_index, column, "skipping malformed inline keyboard button");
                    }
                }
            }
            rows.push(row);
        }
        Some(Self::new(rows))
    }

    /// Button rows in on-screen order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<InlineKeyboardButton>] {
        &self.rows
    }

    /// Consume the keyboard, yielding its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<InlineKeyboardButton>> {
        self.rows
    }

    /// Place `button` according to `placement`, clamping indices into
    /// range, and return the keyboard again so calls can be chained.
    ///
    /// # Errors
    ///
    /// [`MarkupError::RowOutOfRange`] when `placement.from_row` points
    /// past the last row, [`MarkupError::ConflictingPlacement`] when
    /// both `from_row` and `insert_row` are set. The keyboard is
    /// untouched on error.
    pub fn add_button(
        &mut self,
        button: InlineKeyboardButton,
        placement: Placement,
    ) -> Result<&mut Self, MarkupError> {
        let max_row = self.rows.len().saturating_sub(1);
        match (placement.from_row, placement.insert_row) {
            (Some(from_row), None) => {
                if exceeds(from_row, max_row) {
                    return Err(MarkupError::RowOutOfRange {
                        index: from_row,
                        max: max_row,
                    });
                }
                let row_index = clamp_index(from_row, max_row);
                let row = &mut self.rows[row_index];
                match placement.insert_column {
                    Some(insert_column) => {
                        let column = clamp_index(insert_column, row.len());
                        trace!(row = row_index, column, "inserting button");
                        row.insert(column, button);
                    }
                    None => {
                        trace!(row = row_index, "appending button");
                        row.push(button);
                    }
                }
            }
            (None, Some(insert_row)) => {
                let row_index = clamp_index(insert_row, max_row + 1);
                trace!(row = row_index, "inserting new single-button row");
                self.rows.insert(row_index, vec![button]);
            }
            (None, None) => {
                // Last row always exists: the empty keyboard is one empty row.
                if let Some(row) = self.rows.last_mut() {
                    match placement.insert_column {
                        Some(insert_column) => {
                            let column = clamp_index(insert_column, row.len());
                            trace!(column, "inserting button into last row");
                            row.insert(column, button);
                        }
                        None => row.push(button),
                    }
                }
            }
            (Some(_), Some(_)) => return Err(MarkupError::ConflictingPlacement),
        }
        Ok(self)
    }

    /// Insert a whole row of buttons at `index`, clamped into range;
    /// appends when `index` is `None`. The row may be empty.
    pub fn add_row(
        &mut self,
        row: Vec<InlineKeyboardButton>,
        index: Option<isize>,
    ) -> &mut Self {
        let at = match index {
            Some(index) => clamp_index(index, self.rows.len()),
            None => self.rows.len(),
        };
        trace!(row = at, buttons = row.len(), "inserting row");
        self.rows.insert(at, row);
        self
    }

    /// Splice all rows of `other` into this keyboard at `index`
    /// (clamped), preserving both keyboards' row order; appends when
    /// `index` is `None`.
    pub fn merge(&mut self, other: Self, index: Option<isize>) -> &mut Self {
        let at = match index {
            Some(index) => clamp_index(index, self.rows.len()),
            None => self.rows.len(),
        };
        trace!(row = at, merged_rows = other.rows.len(), "merging keyboard rows");
        self.rows.splice(at..at, other.rows);
        self
    }
}

impl ReplyMarkup for InlineKeyboard {
    fn to_transport_value(&self) -> Value {
        let mut data = self.base_transport_value();
        let rows = self
            .rows
            .iter()
            .map(|row| Value::Array(row.iter().map(InlineKeyboardButton::to_transport_value).collect()))
            .collect();
        data.insert("inline_keyboard".to_string(), Value::Array(rows));
        Value::Object(data)
    }
}

#[cfg(test)]
mod tests {
    use super::{InlineKeyboard, Placement};
    use crate::button::InlineKeyboardButton;
    use crate::error::MarkupError;

    fn callback(label: &str) -> InlineKeyboardButton {
        InlineKeyboardButton::callback(label, "data")
    }

    #[test]
    fn test_default_is_single_empty_row() {
        let keyboard = InlineKeyboard::default();
        assert_eq!(keyboard.rows().len(), 1);
        assert!(keyboard.rows()[0].is_empty());
    }

    #[test]
    fn test_new_normalizes_empty_rows() {
        assert_eq!(InlineKeyboard::new(Vec::new()), InlineKeyboard::default());
    }

    #[test]
    fn test_from_button() {
        let keyboard = InlineKeyboard::from_button(callback("only"));
        assert_eq!(keyboard.rows().len(), 1);
        assert_eq!(keyboard.rows()[0].len(), 1);
    }

    #[test]
    fn test_from_row() {
        let keyboard = InlineKeyboard::from_row(vec![callback("a"), callback("b")]);
        assert_eq!(keyboard.rows().len(), 1);
        assert_eq!(keyboard.rows()[0].len(), 2);
        assert_eq!(keyboard.rows()[0][0].text, "a");
        assert_eq!(keyboard.rows()[0][1].text, "b");
    }

    #[test]
    fn test_from_column() {
        let keyboard = InlineKeyboard::from_column(vec![callback("a"), callback("b")]);
        assert_eq!(keyboard.rows().len(), 2);
        assert_eq!(keyboard.rows()[0].len(), 1);
        assert_eq!(keyboard.rows()[1].len(), 1);
        assert_eq!(keyboard.rows()[0][0].text, "a");
        assert_eq!(keyboard.rows()[1][0].text, "b");
    }

    #[test]
    fn test_add_button_appends_to_last_row() -> Result<(), MarkupError> {
        let mut keyboard = InlineKeyboard::from_column(vec![callback("a"), callback("b")]);
        keyboard.add_button(callback("c"), Placement::default())?;
        assert_eq!(keyboard.rows()[1].len(), 2);
        assert_eq!(keyboard.rows()[1][1].text, "c");
        Ok(())
    }

    #[test]
    fn test_add_button_conflicting_placement() {
        let mut keyboard = InlineKeyboard::from_button(callback("a"));
        let before = keyboard.clone();
        let placement = Placement {
            from_row: Some(0),
            insert_row: Some(0),
            insert_column: None,
        };
        let result = keyboard.add_button(callback("b"), placement);
        assert_eq!(result.err(), Some(MarkupError::ConflictingPlacement));
        assert_eq!(keyboard, before);
    }

    #[test]
    fn test_add_button_row_out_of_range() {
        let mut keyboard = InlineKeyboard::from_button(callback("a"));
        let before = keyboard.clone();
        let result = keyboard.add_button(callback("b"), Placement::in_row(5));
        assert_eq!(
            result.err(),
            Some(MarkupError::RowOutOfRange { index: 5, max: 0 })
        );
        assert_eq!(keyboard, before);
    }
}
