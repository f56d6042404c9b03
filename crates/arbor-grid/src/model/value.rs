//! Cell values and per-column display conversion.
//!
//! [`CellValue`] is the typed container for one cell of a row record.
//! [`ColumnKind`] selects how a value is converted to display text: `Number`
//! columns group thousands with commas, `Float` columns render with exactly
//! three decimals, and `Text` columns pass through. Search matching runs
//! against the *converted* text, so a search for `"12,3"` finds the number
//! `12345`.

use std::fmt;

/// What type of data a column holds, driving display conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    /// Plain text; values pass through unconverted.
    #[default]
    Text,
    /// Integral numbers; rendered with thousands separators (`12,345`).
    Number,
    /// Floating point numbers; rendered with three decimals (`1234.500`).
    Float,
}

/// Typed container for one cell of a row record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// No data (the row has no value for this column).
    #[default]
    None,
    /// String data.
    Text(String),
    /// Integer data.
    Int(i64),
    /// Floating point data.
    Float(f64),
    /// Boolean data.
    Bool(bool),
}

impl CellValue {
    /// Returns `true` if this is `CellValue::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, CellValue::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Attempts to get the data as a string slice.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Attempts to get the data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to get the data as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a number, coercing across numeric representations.
    fn numeric(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::None => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(n) => write!(f, "{n}"),
            CellValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n as i64)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<f32> for CellValue {
    fn from(n: f32) -> Self {
        CellValue::Float(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Converts a cell value to display text according to the column kind.
///
/// Values that cannot be converted (text in a `Number` column, for example)
/// pass through via their plain `Display` form rather than erroring.
pub fn converted_text(kind: ColumnKind, value: &CellValue) -> String {
    match kind {
        ColumnKind::Text => value.to_string(),
        ColumnKind::Number => number_with_comma(value).unwrap_or_else(|| value.to_string()),
        ColumnKind::Float => match value.numeric() {
            Some(n) => format!("{n:.3}"),
            None => value.to_string(),
        },
    }
}

/// Formats a numeric value with thousands separators, e.g. `12345` → `"12,345"`.
///
/// Returns `None` for values with no numeric reading.
pub fn number_with_comma(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Int(n) => Some(group_integer(&n.to_string())),
        CellValue::Float(f) => Some(group_integer(&f.to_string())),
        CellValue::Text(s) if s.trim().parse::<f64>().is_ok() => {
            Some(group_integer(s.trim()))
        }
        _ => None,
    }
}

/// Inserts commas into the integer part of an already-formatted number.
fn group_integer(formatted: &str) -> String {
    let (sign, rest) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (rest, None),
    };

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_grouping() {
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Int(12345)),
            "12,345"
        );
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Int(1234567)),
            "1,234,567"
        );
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Int(-12345)),
            "-12,345"
        );
        // Too short to group.
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Int(100)),
            "100"
        );
        // A fractional value groups its integer part only.
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Float(1234.5)),
            "1,234.5"
        );
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(
            converted_text(ColumnKind::Float, &CellValue::Float(1234.5)),
            "1234.500"
        );
        assert_eq!(
            converted_text(ColumnKind::Float, &CellValue::Int(5)),
            "5.000"
        );
        assert_eq!(
            converted_text(ColumnKind::Float, &CellValue::Text("2.25".into())),
            "2.250"
        );
    }

    #[test]
    fn test_unconvertible_values_pass_through() {
        assert_eq!(
            converted_text(ColumnKind::Number, &CellValue::Text("widget".into())),
            "widget"
        );
        assert_eq!(
            converted_text(ColumnKind::Float, &CellValue::Text("widget".into())),
            "widget"
        );
        assert_eq!(converted_text(ColumnKind::Text, &CellValue::None), "");
    }

    #[test]
    fn test_cell_value_accessors() {
        let v = CellValue::from("hello");
        assert_eq!(v.as_text(), Some("hello"));
        assert!(v.as_int().is_none());
        assert!(CellValue::None.is_none());
        assert_eq!(CellValue::from(7).as_int(), Some(7));
        assert_eq!(CellValue::from(true).as_bool(), Some(true));
        assert_eq!(CellValue::from(2.5).as_float(), Some(2.5));
    }
}
