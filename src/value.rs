//! Cell Values
//!
//! A small scalar type covering what a spreadsheet cell can hold, with
//! conversions to and from the engine's raw cell representation and from the
//! stringly-typed keyword surface.

use serde::Serialize;
use umya_spreadsheet::Cell;
use umya_spreadsheet::CellRawValue;

/// A single cell value
///
/// Serializes untagged, so keyword returns come out as plain JSON scalars
/// (null, boolean, number, string).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Absent or blank cell
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Read a scalar out of an engine cell
    ///
    /// Blank text cells collapse to [`Scalar::Empty`], matching how the rest
    /// of the crate treats cells that were never written.
    pub fn from_cell(cell: &Cell) -> Self {
        match cell.get_raw_value() {
            CellRawValue::Numeric(n) => Self::Number(*n),
            CellRawValue::Bool(b) => Self::Bool(*b),
            CellRawValue::Empty => Self::Empty,
            _ => {
                let text = cell.get_value().to_string();
                if text.is_empty() {
                    Self::Empty
                } else {
                    Self::Text(text)
                }
            }
        }
    }

    /// Store this scalar into an engine cell
    pub fn write_to(&self, cell: &mut Cell) {
        match self {
            Self::Empty => {
                cell.set_value_string("");
            }
            Self::Bool(b) => {
                cell.set_value_bool(*b);
            }
            Self::Number(n) => {
                cell.set_value_number(*n);
            }
            Self::Text(t) => {
                cell.set_value_string(t.as_str());
            }
        }
    }

    /// Coerce a keyword argument string into a typed cell value
    ///
    /// Recognizes boolean literals and numeric literals; an empty string
    /// means an empty cell; anything else is text.
    pub fn parse(input: &str) -> Self {
        if input.is_empty() {
            return Self::Empty;
        }
        match input {
            "true" | "True" | "TRUE" => return Self::Bool(true),
            "false" | "False" | "FALSE" => return Self::Bool(false),
            _ => {}
        }
        // Only attempt a numeric parse on digit-like input, so words such as
        // "inf" or "nan" stay text.
        let numeric_looking = input
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.');
        if numeric_looking {
            if let Ok(n) = input.parse::<f64>() {
                return Self::Number(n);
            }
        }
        Self::Text(input.to_string())
    }

    /// Whether this is the empty value
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}
