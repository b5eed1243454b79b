//! Whole-sheet composition: free text cells, single tables and packed grids

use tracing::{debug, instrument};

use crate::Result;
use crate::cell::{CellRecord, MergeRegion, Position, Value, normalize_value, resolve_anchor, resolve_merge};
use crate::error::LayoutError;
use crate::grid::{GridPackingConfig, pack_tables};
use crate::layout::compose_table;
use crate::style::{CellStyle, CellType};
use crate::table::TableSpec;

/// Where a free text cell is anchored
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Explicit coordinates
    At(Position),
    /// A1-style reference such as `"C3"`
    Label(String),
    /// The default anchor cell
    #[default]
    Default,
}

impl Anchor {
    pub fn resolve(&self) -> Result<Position> {
        match self {
            Anchor::At(position) => resolve_anchor(Some(*position), None),
            Anchor::Label(label) => resolve_anchor(None, Some(label.as_str())),
            Anchor::Default => resolve_anchor(None, None),
        }
    }
}

/// A standalone cell outside any table, e.g. a report heading or note
#[derive(Debug, Clone, PartialEq)]
pub struct TextCell {
    pub anchor: Anchor,
    pub value: Value,
    pub cell_type: CellType,
    pub style: Option<CellStyle>,
    /// Columns merged to the right of the anchor, the anchor included
    pub span: u32,
}

impl TextCell {
    pub fn new<V: Into<Value>>(value: V) -> Self {
        Self {
            anchor: Anchor::Default,
            value: value.into(),
            cell_type: CellType::Text,
            style: None,
            span: 1,
        }
    }

    /// Anchor at explicit coordinates
    pub fn at(mut self, row: u32, column: u32) -> Self {
        self.anchor = Anchor::At(Position::new(row, column));
        self
    }

    /// Anchor at an A1-style reference
    pub fn at_label<S: Into<String>>(mut self, label: S) -> Self {
        self.anchor = Anchor::Label(label.into());
        self
    }

    /// Style the cell as a subtitle
    pub fn subtitle(mut self) -> Self {
        self.cell_type = CellType::Subtitle;
        self
    }

    pub fn with_style(mut self, style: CellStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Merge the cell across `span` columns
    pub fn with_span(mut self, span: u32) -> Self {
        self.span = span.max(1);
        self
    }

    fn to_record(&self) -> Result<CellRecord> {
        let position = self.anchor.resolve()?;
        let record = CellRecord::new(
            position,
            normalize_value(&self.value),
            self.cell_type,
            self.style.as_ref(),
        );
        if self.span <= 1 {
            return Ok(record);
        }

        let end_column = position.column.checked_add(self.span - 1).ok_or_else(|| {
            LayoutError::Precondition(format!("text cell at {position} spans past the grid"))
        })?;
        Ok(record.with_merge(resolve_merge(
            position.row,
            position.column,
            position.row,
            end_column,
        )))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum SheetItem {
    Text(TextCell),
    Table(TableSpec),
    Grid(GridPackingConfig, Vec<TableSpec>),
}

/// Ordered collection of everything painted onto one worksheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    items: Vec<SheetItem>,
}

impl SheetLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free text cell
    pub fn add_text(mut self, cell: TextCell) -> Self {
        self.items.push(SheetItem::Text(cell));
        self
    }

    /// Add a table at its own origin
    pub fn add_table(mut self, table: TableSpec) -> Self {
        self.items.push(SheetItem::Table(table));
        self
    }

    /// Add tables tiled with `config`
    pub fn add_grid(mut self, config: GridPackingConfig, tables: Vec<TableSpec>) -> Self {
        self.items.push(SheetItem::Grid(config, tables));
        self
    }

    /// Number of items added
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lay out every item into one list of cells, in insertion order
    #[instrument(skip(self), fields(items = self.items.len()))]
    pub fn render(&self) -> Result<Vec<CellRecord>> {
        let mut cells = Vec::new();
        for item in &self.items {
            match item {
                SheetItem::Text(text) => cells.push(text.to_record()?),
                SheetItem::Table(table) => cells.extend(compose_table(table)?.into_cells()),
                SheetItem::Grid(config, tables) => {
                    cells.extend(pack_tables(config, tables)?.into_cells())
                }
            }
        }
        debug!("Rendered sheet into {} cells", cells.len());
        Ok(cells)
    }
}

/// Bounding box of `cells`, merge regions included
pub fn used_range(cells: &[CellRecord]) -> Option<MergeRegion> {
    cells
        .iter()
        .map(|cell| {
            cell.merge.unwrap_or_else(|| {
                resolve_merge(
                    cell.position.row,
                    cell.position.column,
                    cell.position.row,
                    cell.position.column,
                )
            })
        })
        .reduce(|acc, region| {
            resolve_merge(
                acc.start_row.min(region.start_row),
                acc.start_column.min(region.start_column),
                acc.end_row.max(region.end_row),
                acc.end_column.max(region.end_column),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::record;

    #[test]
    fn test_text_cell_anchors() {
        let cells = SheetLayout::new()
            .add_text(TextCell::new("Default"))
            .add_text(TextCell::new("Labelled").at_label("D7"))
            .add_text(TextCell::new("Explicit").at(0, 0))
            .render()
            .unwrap();

        let positions: Vec<Position> = cells.iter().map(|c| c.position).collect();
        assert_eq!(
            positions,
            [Position::new(1, 1), Position::new(6, 3), Position::new(0, 0)]
        );
        assert!(cells.iter().all(|c| c.cell_type == CellType::Text));
    }

    #[test]
    fn test_malformed_label_fails_render() {
        let sheet = SheetLayout::new().add_text(TextCell::new("x").at_label("7D"));
        assert!(matches!(
            sheet.render(),
            Err(LayoutError::MalformedReference(_))
        ));
    }

    #[test]
    fn test_subtitle_span() {
        let cells = SheetLayout::new()
            .add_text(TextCell::new("Q3 summary").subtitle().at(0, 2).with_span(3))
            .render()
            .unwrap();

        assert_eq!(cells[0].cell_type, CellType::Subtitle);
        assert_eq!(cells[0].style.alignment.wrap_text, Some(true));
        assert_eq!(cells[0].merge, Some(resolve_merge(0, 2, 0, 4)));
    }

    #[test]
    fn test_render_order_and_range() {
        let table = TableSpec::new(["month", "total"])
            .add_record(record([("month", Value::from("Jan")), ("total", Value::from(120))]))
            .at(2, 0);
        let grid_tables = vec![
            TableSpec::new(["a"]).with_title("A"),
            TableSpec::new(["b"]).with_title("B"),
        ];
        let sheet = SheetLayout::new()
            .add_text(TextCell::new("Report").at(0, 0).with_span(6))
            .add_table(table)
            .add_grid(
                GridPackingConfig::new(3, 4, 2).with_initial_row(5),
                grid_tables,
            );
        assert_eq!(sheet.len(), 3);

        let cells = sheet.render().unwrap();
        assert_eq!(cells[0].value.to_string(), "Report");
        assert_eq!(cells[1].cell_type, CellType::Header);
        assert_eq!(cells.len(), 1 + 4 + 4);

        let range = used_range(&cells).unwrap();
        assert_eq!(range, resolve_merge(0, 0, 6, 5));
    }

    #[test]
    fn test_used_range_empty() {
        assert_eq!(used_range(&[]), None);
    }
}
