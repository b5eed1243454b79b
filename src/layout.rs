//! Layout calculation for tables

use tracing::{debug, instrument, trace, warn};

use crate::Result;
use crate::cell::{CellRecord, CellValue, Position, Value, normalize_value, resolve_merge};
use crate::style::{CellStyle, CellType};
use crate::table::{Record, TableSpec};

/// Cells of one composed table plus the rectangle it occupies
#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub origin: Position,
    pub width: u32,
    pub height: u32,
    pub cells: Vec<CellRecord>,
}

impl TableLayout {
    /// Cells of one section, in emission order
    pub fn cells_of(&self, cell_type: CellType) -> impl Iterator<Item = &CellRecord> {
        self.cells.iter().filter(move |c| c.cell_type == cell_type)
    }

    /// First row below the table
    pub fn end_row(&self) -> u32 {
        self.origin.row.saturating_add(self.height)
    }

    /// Consume the layout, keeping only its cells
    pub fn into_cells(self) -> Vec<CellRecord> {
        self.cells
    }
}

/// Compose the title, header, body and footer cells of a table
///
/// Without a title the header takes the title's row and the body moves up one.
/// Only the first `table_width` headers are laid out, and a record missing a
/// header's field renders that cell empty.
#[instrument(skip(table), fields(rows = table.body.len(), headers = table.headers.len()))]
pub fn compose_table(table: &TableSpec) -> Result<TableLayout> {
    table.validate()?;

    let origin = table.origin();
    let headers = table.visible_headers();
    if headers.len() < table.headers.len() {
        warn!(
            "Table width {} drops {} of {} headers",
            table.table_width,
            table.headers.len() - headers.len(),
            table.headers.len()
        );
    }

    let title_cell = table.title.as_ref().map(|title| {
        let merge = resolve_merge(
            origin.row,
            origin.column,
            origin.row,
            origin.column + table.table_width - 1,
        );
        CellRecord::new(
            origin,
            CellValue::Text(title.clone()),
            CellType::Title,
            table.styles.title.as_ref(),
        )
        .with_merge(merge)
    });

    let header_row = origin.row + u32::from(title_cell.is_some());
    let body_row = header_row + 1;

    let header_cells = headers.iter().zip(origin.column..).map(|(header, column)| {
        CellRecord::new(
            Position::new(header_row, column),
            CellValue::Text(header.clone()),
            CellType::Header,
            table.styles.header.as_ref(),
        )
    });

    let body_rows = table
        .body
        .iter()
        .map(|record| (record, CellType::Body, table.styles.body.as_ref()))
        .chain(
            table
                .footer
                .iter()
                .map(|record| (record, CellType::Footer, table.styles.footer.as_ref())),
        );

    let row_cells = body_rows
        .zip(body_row..)
        .flat_map(|((record, cell_type, style), row)| {
            record_cells(record, headers, Position::new(row, origin.column), cell_type, style)
        });

    let cells: Vec<CellRecord> = title_cell
        .into_iter()
        .chain(header_cells)
        .chain(row_cells)
        .collect();

    debug!(
        "Composed table at {} into {} cells ({}x{})",
        origin,
        cells.len(),
        table.table_width,
        table.height()
    );

    Ok(TableLayout {
        origin,
        width: table.table_width,
        height: table.height(),
        cells,
    })
}

/// Cells of one record row, one per header, starting at `start`
fn record_cells<'a>(
    record: &'a Record,
    headers: &'a [String],
    start: Position,
    cell_type: CellType,
    style: Option<&'a CellStyle>,
) -> impl Iterator<Item = CellRecord> + 'a {
    headers.iter().zip(start.column..).map(move |(header, column)| {
        let value = match record.get(header) {
            Some(raw) => normalize_value(raw),
            None => {
                trace!("Record has no field {:?}", header);
                normalize_value(&Value::Null)
            }
        };
        CellRecord::new(Position::new(start.row, column), value, cell_type, style)
    })
}
