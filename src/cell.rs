//! Cell positions, values, references and the output cell record

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use crate::Result;
use crate::constants::{DEFAULT_ANCHOR_LABEL, FALSE_TOKEN, TRUE_TOKEN};
use crate::error::LayoutError;
use crate::style::{CellStyle, CellType, resolve_style};

static REFERENCE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)([0-9]+)$").expect("reference pattern is valid"));

/// Zero-based grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: u32,
    pub column: u32,
}

impl Position {
    pub fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_reference(*self))
    }
}

/// Rectangular block of cells merged into one, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRegion {
    pub start_row: u32,
    pub start_column: u32,
    pub end_row: u32,
    pub end_column: u32,
}

impl MergeRegion {
    /// Top-left cell of the region
    pub fn anchor(&self) -> Position {
        Position::new(self.start_row, self.start_column)
    }

    /// Number of columns covered
    pub fn width(&self) -> u32 {
        self.end_column - self.start_column + 1
    }

    /// Number of rows covered
    pub fn height(&self) -> u32 {
        self.end_row - self.start_row + 1
    }

    /// True when the region covers exactly one cell
    pub fn is_single_cell(&self) -> bool {
        self.start_row == self.end_row && self.start_column == self.end_column
    }

    /// True when `position` lies inside the region
    pub fn contains(&self, position: Position) -> bool {
        (self.start_row..=self.end_row).contains(&position.row)
            && (self.start_column..=self.end_column).contains(&position.column)
    }
}

impl fmt::Display for MergeRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            format_reference(self.anchor()),
            format_reference(Position::new(self.end_row, self.end_column))
        )
    }
}

/// Raw input value of a record field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// Display value of a laid-out cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Empty text
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(text) if text.is_empty())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{n:.0}"),
            CellValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// One positioned, styled output cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub position: Position,
    pub value: CellValue,
    pub cell_type: CellType,
    pub style: CellStyle,
    pub merge: Option<MergeRegion>,
}

impl CellRecord {
    /// Build a record, resolving the style of `cell_type` with `override_style`
    pub fn new(
        position: Position,
        value: CellValue,
        cell_type: CellType,
        override_style: Option<&CellStyle>,
    ) -> Self {
        trace!("{} cell at {}: {}", cell_type, position, value);
        Self {
            position,
            value,
            cell_type,
            style: resolve_style(cell_type, override_style),
            merge: None,
        }
    }

    /// Attach a merge region
    pub fn with_merge(mut self, region: MergeRegion) -> Self {
        self.merge = Some(region);
        self
    }
}

/// Build a position from coordinates
pub fn resolve_position(row: u32, column: u32) -> Position {
    Position::new(row, column)
}

/// Build a merge region; the caller guarantees `end >= start`
pub fn resolve_merge(start_row: u32, start_column: u32, end_row: u32, end_column: u32) -> MergeRegion {
    MergeRegion {
        start_row,
        start_column,
        end_row,
        end_column,
    }
}

/// Resolve where a cell is anchored
///
/// An explicit position wins. Without one the label is parsed as an A1
/// reference, and with neither the cell lands on [`DEFAULT_ANCHOR_LABEL`].
pub fn resolve_anchor(position: Option<Position>, label: Option<&str>) -> Result<Position> {
    match position {
        Some(position) => Ok(position),
        None => parse_reference(label.unwrap_or(DEFAULT_ANCHOR_LABEL)),
    }
}

/// Normalize a raw value for display
pub fn normalize_value(raw: &Value) -> CellValue {
    match raw {
        Value::Null => CellValue::empty(),
        Value::Bool(true) => CellValue::Text(TRUE_TOKEN.to_string()),
        Value::Bool(false) => CellValue::Text(FALSE_TOKEN.to_string()),
        Value::Number(n) => CellValue::Number(*n),
        Value::Text(text) => CellValue::Text(text.clone()),
    }
}

/// Parse an A1-style reference (`"B2"` is row 1, column 1)
pub fn parse_reference(reference: &str) -> Result<Position> {
    let malformed = || LayoutError::MalformedReference(reference.to_string());
    let captures = REFERENCE_PATTERN.captures(reference).ok_or_else(malformed)?;

    let mut column: u32 = 0;
    for letter in captures[1].bytes() {
        column = column
            .checked_mul(26)
            .and_then(|c| c.checked_add(u32::from(letter - b'A') + 1))
            .ok_or_else(malformed)?;
    }
    let row: u32 = captures[2].parse().map_err(|_| malformed())?;
    if row == 0 {
        return Err(malformed());
    }

    Ok(Position::new(row - 1, column - 1))
}

/// Format a position as an A1-style reference
pub fn format_reference(position: Position) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(position.column) + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    let column: String = letters.iter().rev().collect();
    format!("{column}{}", u64::from(position.row) + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_value() {
        assert_eq!(normalize_value(&Value::from(true)).to_string(), "YES");
        assert_eq!(normalize_value(&Value::from(false)).to_string(), "NO");
        assert_eq!(normalize_value(&Value::from(0)), CellValue::Number(0.0));
        assert_eq!(normalize_value(&Value::from(0)).to_string(), "0");
        assert_eq!(normalize_value(&Value::Null).to_string(), "");
        assert_eq!(normalize_value(&Value::from(None::<i32>)), CellValue::empty());
        assert_eq!(normalize_value(&Value::from(12.5)).to_string(), "12.5");
        assert_eq!(normalize_value(&Value::from(-7)).to_string(), "-7");
        assert_eq!(normalize_value(&Value::from("abc")).to_string(), "abc");
    }

    #[test]
    fn test_large_whole_numbers_display_exactly() {
        assert_eq!(
            normalize_value(&Value::from(1e20)).to_string(),
            "100000000000000000000"
        );
        assert_eq!(CellValue::Number(-1e19).to_string(), "-10000000000000000000");
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(parse_reference("A1").unwrap(), Position::new(0, 0));
        assert_eq!(parse_reference("B2").unwrap(), Position::new(1, 1));
        assert_eq!(parse_reference("Z10").unwrap(), Position::new(9, 25));
        assert_eq!(parse_reference("AA3").unwrap(), Position::new(2, 26));
    }

    #[test]
    fn test_parse_reference_rejects_malformed() {
        for bad in ["", "b2", "2B", "B", "12", "B0", "B-2", " B2", "B2:C3"] {
            let err = parse_reference(bad).unwrap_err();
            assert!(matches!(err, LayoutError::MalformedReference(_)), "{bad}");
        }
    }

    #[test]
    fn test_format_reference() {
        assert_eq!(format_reference(Position::new(0, 0)), "A1");
        assert_eq!(format_reference(Position::new(1, 25)), "Z2");
        assert_eq!(format_reference(Position::new(4, 26)), "AA5");
        assert_eq!(format_reference(Position::new(0, 701)), "ZZ1");
        assert_eq!(format_reference(Position::new(0, 702)), "AAA1");

        let position = Position::new(41, 123);
        assert_eq!(parse_reference(&format_reference(position)).unwrap(), position);
    }

    #[test]
    fn test_resolve_anchor() {
        let explicit = Position::new(7, 3);
        assert_eq!(resolve_anchor(Some(explicit), Some("A1")).unwrap(), explicit);
        assert_eq!(resolve_anchor(None, Some("C4")).unwrap(), Position::new(3, 2));
        assert_eq!(resolve_anchor(None, None).unwrap(), Position::new(1, 1));
        assert!(resolve_anchor(None, Some("4C")).is_err());
    }

    #[test]
    fn test_merge_region() {
        let region = resolve_merge(2, 1, 2, 4);
        assert_eq!(region.width(), 4);
        assert_eq!(region.height(), 1);
        assert!(region.contains(Position::new(2, 3)));
        assert!(!region.contains(Position::new(3, 3)));
        assert!(!region.is_single_cell());
        assert!(resolve_merge(0, 0, 0, 0).is_single_cell());
        assert_eq!(region.to_string(), "B3:E3");
    }
}
