//! A layout engine that turns tabular data into spreadsheet cells
//!
//! Tables (title, headers, body records, optional footer) are converted into
//! absolutely positioned cells with resolved styles and merge regions, ready
//! to be painted onto a worksheet. Several tables can be tiled onto one sheet
//! with a fixed-size grid.

use tracing::{debug, instrument};

pub mod cell;
pub mod constants;
pub mod error;
pub mod grid;
pub mod layout;
pub mod sheet;
pub mod style;
pub mod table;
pub mod writer;

pub use cell::{
    CellRecord, CellValue, MergeRegion, Position, Value, format_reference, normalize_value,
    parse_reference, resolve_anchor, resolve_merge, resolve_position,
};
pub use error::{LayoutError, Result};
pub use grid::{GridPackingConfig, GridPlacement, PackedGrid, pack_tables};
pub use layout::{TableLayout, compose_table};
pub use sheet::{Anchor, SheetLayout, TextCell, used_range};
pub use style::{
    Alignment, Border, BorderStyle, CellStyle, CellType, Color, Fill, FillPattern, Font,
    HorizontalAlignment, VerticalAlignment, resolve_style,
};
pub use table::{Record, SectionStyles, TableSpec, record};
pub use writer::{SheetWriter, write_cells};

/// Extension trait adding table layout to any [`SheetWriter`]
pub trait TablePainting {
    /// Lay out a table at its own origin and paint it
    ///
    /// # Returns
    /// The composed layout, so callers can place content below it
    fn paint_table(&mut self, table: &TableSpec) -> Result<TableLayout>;

    /// Tile tables with `config` and paint them
    fn paint_grid(&mut self, config: &GridPackingConfig, tables: &[TableSpec]) -> Result<u32>;

    /// Render and paint a whole sheet, returning the number of cells written
    fn paint_sheet(&mut self, sheet: &SheetLayout) -> Result<usize>;
}

impl<W: SheetWriter + ?Sized> TablePainting for W {
    #[instrument(skip(self, table), fields(table_rows = table.body.len()))]
    fn paint_table(&mut self, table: &TableSpec) -> Result<TableLayout> {
        debug!("Painting table at {}", table.origin());

        let layout = compose_table(table)?;
        write_cells(self, &layout.cells)?;

        Ok(layout)
    }

    #[instrument(skip(self, config, tables), fields(tables = tables.len()))]
    fn paint_grid(&mut self, config: &GridPackingConfig, tables: &[TableSpec]) -> Result<u32> {
        let packed = pack_tables(config, tables)?;
        let next_row = packed.next_row;
        write_cells(self, &packed.into_cells())?;
        Ok(next_row)
    }

    fn paint_sheet(&mut self, sheet: &SheetLayout) -> Result<usize> {
        let cells = sheet.render()?;
        write_cells(self, &cells)?;
        Ok(cells.len())
    }
}
