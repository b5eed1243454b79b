//! Table input structures

use std::collections::HashMap;

use tracing::trace;

use crate::Result;
use crate::cell::{Position, Value};
use crate::error::LayoutError;
use crate::style::CellStyle;

/// One body or footer row, keyed by header name
pub type Record = HashMap<String, Value>;

/// Build a [`Record`] from `(header, value)` pairs
pub fn record<K, V, I>(fields: I) -> Record
where
    K: Into<String>,
    V: Into<Value>,
    I: IntoIterator<Item = (K, V)>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Optional style overrides per table section
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionStyles {
    pub title: Option<CellStyle>,
    pub header: Option<CellStyle>,
    pub body: Option<CellStyle>,
    pub footer: Option<CellStyle>,
}

/// A table to be laid out on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub title: Option<String>,
    pub headers: Vec<String>,
    pub body: Vec<Record>,
    pub footer: Option<Record>,
    pub start_row: u32,
    pub start_column: u32,
    /// Columns the table occupies; headers beyond it are dropped
    pub table_width: u32,
    pub styles: SectionStyles,
}

impl TableSpec {
    /// Create a table with the given headers, anchored at the origin and as wide as its headers
    ///
    /// A table without headers still gets one column so a title has somewhere to go.
    pub fn new<S: Into<String>>(headers: impl IntoIterator<Item = S>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        let table_width = u32::try_from(headers.len()).unwrap_or(u32::MAX).max(1);
        Self {
            title: None,
            headers,
            body: Vec::new(),
            footer: None,
            start_row: 0,
            start_column: 0,
            table_width,
            styles: SectionStyles::default(),
        }
    }

    /// Set the title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a body record
    pub fn add_record(mut self, record: Record) -> Self {
        trace!("Adding record with {} fields", record.len());
        self.body.push(record);
        self
    }

    /// Replace all body records
    pub fn with_body(mut self, body: Vec<Record>) -> Self {
        self.body = body;
        self
    }

    /// Set the footer record
    pub fn with_footer(mut self, footer: Record) -> Self {
        self.footer = Some(footer);
        self
    }

    /// Anchor the table at `(row, column)`
    pub fn at(mut self, row: u32, column: u32) -> Self {
        self.start_row = row;
        self.start_column = column;
        self
    }

    /// Set the number of grid columns the table occupies
    pub fn with_width(mut self, table_width: u32) -> Self {
        self.table_width = table_width;
        self
    }

    /// Set all section style overrides at once
    pub fn with_styles(mut self, styles: SectionStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Override the title style
    pub fn with_title_style(mut self, style: CellStyle) -> Self {
        self.styles.title = Some(style);
        self
    }

    /// Override the header style
    pub fn with_header_style(mut self, style: CellStyle) -> Self {
        self.styles.header = Some(style);
        self
    }

    /// Override the body style
    pub fn with_body_style(mut self, style: CellStyle) -> Self {
        self.styles.body = Some(style);
        self
    }

    /// Override the footer style
    pub fn with_footer_style(mut self, style: CellStyle) -> Self {
        self.styles.footer = Some(style);
        self
    }

    /// Table origin
    pub fn origin(&self) -> Position {
        Position::new(self.start_row, self.start_column)
    }

    /// Headers that fit within the table width
    pub fn visible_headers(&self) -> &[String] {
        let width = usize::try_from(self.table_width).unwrap_or(usize::MAX);
        &self.headers[..self.headers.len().min(width)]
    }

    /// Rows the table occupies, title and header rows included
    pub fn height(&self) -> u32 {
        let leading = if self.title.is_some() { 2 } else { 1 };
        let footer = u32::from(self.footer.is_some());
        let body = u32::try_from(self.body.len()).unwrap_or(u32::MAX);
        body.saturating_add(leading + footer)
    }

    /// Validate table structure
    ///
    /// A zero width is only rejected when a title needs a merge region; an
    /// untitled zero-width table lays out as no cells.
    pub fn validate(&self) -> Result<()> {
        if self.table_width == 0 && self.title.is_some() {
            return Err(LayoutError::Precondition(
                "a titled table needs table_width of at least 1".to_string(),
            ));
        }

        // The row below the table must stay addressable.
        let last_column = u64::from(self.start_column) + u64::from(self.table_width.max(1)) - 1;
        let end_row = u64::from(self.start_row) + u64::from(self.height());
        if last_column > u64::from(u32::MAX) || end_row > u64::from(u32::MAX) {
            return Err(LayoutError::Precondition(format!(
                "table anchored at ({}, {}) does not fit the grid",
                self.start_row, self.start_column
            )));
        }

        Ok(())
    }
}

impl Default for TableSpec {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_validation() {
        let mut table = TableSpec::new(Vec::<String>::new());
        assert_eq!(table.table_width, 1);
        assert!(table.validate().is_ok());

        table = table.with_width(0);
        assert!(table.validate().is_ok());
        assert!(table.clone().with_title("T").validate().is_err());

        table = table.with_width(3);
        assert!(table.validate().is_ok());

        table = table.at(0, u32::MAX - 1);
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_last_row_must_leave_room_below() {
        let table = TableSpec::new(["a"]).at(u32::MAX, 0);
        assert!(matches!(table.validate(), Err(LayoutError::Precondition(_))));

        let table = TableSpec::new(["a"]).at(u32::MAX - 1, 0);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_table_builder() {
        let table = TableSpec::new(["name", "age"])
            .with_title("People")
            .add_record(record([("name", Value::from("John")), ("age", Value::from(30))]))
            .with_footer(record([("name", "Total")]))
            .at(4, 2);

        assert_eq!(table.table_width, 2);
        assert_eq!(table.origin(), Position::new(4, 2));
        assert_eq!(table.body.len(), 1);
        assert_eq!(table.height(), 4);
    }

    #[test]
    fn test_visible_headers() {
        let table = TableSpec::new(["a", "b", "c"]).with_width(2);
        assert_eq!(table.visible_headers(), ["a", "b"]);

        let table = table.with_width(5);
        assert_eq!(table.visible_headers().len(), 3);
    }
}
