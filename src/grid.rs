//! Tiling of several tables onto one sheet

use tracing::{debug, instrument, warn};

use crate::Result;
use crate::error::LayoutError;
use crate::layout::{TableLayout, compose_table};
use crate::table::TableSpec;

/// Grid that tables are tiled onto, `tables_per_row` side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPackingConfig {
    /// Columns reserved for each table
    pub table_width: u32,
    /// Rows reserved for each band of tables
    pub row_height: u32,
    pub tables_per_row: u32,
    pub initial_row: u32,
    /// Column of the first table in every band
    pub start_column: u32,
}

impl GridPackingConfig {
    pub fn new(table_width: u32, row_height: u32, tables_per_row: u32) -> Self {
        Self {
            table_width,
            row_height,
            tables_per_row,
            initial_row: 0,
            start_column: 0,
        }
    }

    /// Set the row of the first band
    pub fn with_initial_row(mut self, row: u32) -> Self {
        self.initial_row = row;
        self
    }

    /// Set the column of the first table in every band
    pub fn with_start_column(mut self, column: u32) -> Self {
        self.start_column = column;
        self
    }

    /// Validate grid configuration
    pub fn validate(&self) -> Result<()> {
        if self.tables_per_row == 0 {
            return Err(LayoutError::Precondition(
                "tables_per_row must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Place the table at `index` relative to a band starting at `current_row`
    pub fn place(&self, index: u32, current_row: u32) -> Result<GridPlacement> {
        self.validate()?;

        let overflow = || {
            LayoutError::Precondition(format!("grid placement of table {index} overflows"))
        };

        let band = index / self.tables_per_row;
        let slot = index % self.tables_per_row;

        let row = band
            .checked_mul(self.row_height)
            .and_then(|offset| offset.checked_add(current_row))
            .ok_or_else(overflow)?;
        let column = slot
            .checked_mul(self.table_width)
            .and_then(|offset| offset.checked_add(self.start_column))
            .ok_or_else(overflow)?;

        let is_last_in_row = (index + 1) % self.tables_per_row == 0;
        let (next_row, next_column) = if is_last_in_row {
            (
                row.checked_add(self.row_height).ok_or_else(overflow)?,
                self.start_column,
            )
        } else {
            (
                row,
                column.checked_add(self.table_width).ok_or_else(overflow)?,
            )
        };

        Ok(GridPlacement {
            row,
            column,
            is_last_in_row,
            next_row,
            next_column,
        })
    }
}

impl Default for GridPackingConfig {
    fn default() -> Self {
        Self::new(4, 14, 3)
    }
}

/// Origin of one packed table and of the table after it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
    pub row: u32,
    pub column: u32,
    pub is_last_in_row: bool,
    pub next_row: u32,
    pub next_column: u32,
}

/// Tables composed at their packed positions
#[derive(Debug, Clone, PartialEq)]
pub struct PackedGrid {
    pub tables: Vec<TableLayout>,
    /// First row free for content below the grid
    pub next_row: u32,
}

impl PackedGrid {
    /// All cells of all tables, in table order
    pub fn into_cells(self) -> Vec<crate::cell::CellRecord> {
        self.tables
            .into_iter()
            .flat_map(TableLayout::into_cells)
            .collect()
    }
}

/// Tile `tables` onto the grid and compose each one at its placement
///
/// Each table is moved to its slot and takes the grid's table width. Bands are
/// measured from `initial_row`, so placements never overlap as long as every
/// table fits in `row_height` rows.
#[instrument(skip(tables), fields(tables = tables.len()))]
pub fn pack_tables(config: &GridPackingConfig, tables: &[TableSpec]) -> Result<PackedGrid> {
    config.validate()?;

    let initial = PackedGrid {
        tables: Vec::with_capacity(tables.len()),
        next_row: config.initial_row,
    };

    let packed = tables
        .iter()
        .zip(0u32..)
        .try_fold(initial, |mut packed, (table, index)| {
            let placement = config.place(index, config.initial_row)?;
            let placed = table
                .clone()
                .at(placement.row, placement.column)
                .with_width(config.table_width);

            if placed.height() > config.row_height {
                warn!(
                    "Table {} needs {} rows but the grid reserves {}",
                    index,
                    placed.height(),
                    config.row_height
                );
            }

            packed.tables.push(compose_table(&placed)?);
            packed.next_row = if placement.is_last_in_row {
                placement.next_row
            } else {
                placement.row.saturating_add(config.row_height)
            };
            Ok::<_, LayoutError>(packed)
        })?;

    debug!(
        "Packed {} tables, next free row {}",
        packed.tables.len(),
        packed.next_row
    );
    Ok(packed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Value;
    use crate::style::CellType;
    use crate::table::record;

    #[test]
    fn test_first_band() {
        let config = GridPackingConfig::new(4, 14, 3).with_start_column(1);
        let columns: Vec<u32> = (0..3)
            .map(|i| config.place(i, 0).unwrap())
            .map(|p| {
                assert_eq!(p.row, 0);
                p.column
            })
            .collect();
        assert_eq!(columns, [1, 5, 9]);

        let fourth = config.place(3, 0).unwrap();
        assert_eq!(fourth.row, 14);
        assert_eq!(fourth.column, 1);
    }

    #[test]
    fn test_next_position() {
        let config = GridPackingConfig::new(4, 14, 3).with_initial_row(13);

        let first = config.place(0, 13).unwrap();
        assert!(!first.is_last_in_row);
        assert_eq!(first.next_row, 13);
        assert_eq!(first.next_column, 4);

        let third = config.place(2, 13).unwrap();
        assert!(third.is_last_in_row);
        assert_eq!(third.next_row, 27);
        assert_eq!(third.next_column, 0);

        let fifth = config.place(4, 13).unwrap();
        assert_eq!((fifth.row, fifth.column), (27, 4));
    }

    #[test]
    fn test_zero_tables_per_row_fails() {
        let config = GridPackingConfig::new(4, 14, 0);
        assert!(matches!(
            config.place(0, 0),
            Err(LayoutError::Precondition(_))
        ));
        assert!(pack_tables(&config, &[]).is_err());
    }

    #[test]
    fn test_overflow_fails() {
        let config = GridPackingConfig::new(4, u32::MAX, 1);
        assert!(config.place(2, 0).is_err());
    }

    #[test]
    fn test_pack_tables_do_not_overlap() {
        let config = GridPackingConfig::new(3, 6, 2).with_initial_row(2);
        let tables: Vec<TableSpec> = (0..5)
            .map(|i| {
                TableSpec::new(["id", "label"])
                    .with_title(format!("Table {i}"))
                    .add_record(record([("id", Value::from(i)), ("label", Value::from("x"))]))
            })
            .collect();

        let packed = pack_tables(&config, &tables).unwrap();
        assert_eq!(packed.tables.len(), 5);
        assert_eq!(packed.next_row, 20);

        let origins: Vec<(u32, u32)> = packed
            .tables
            .iter()
            .map(|t| (t.origin.row, t.origin.column))
            .collect();
        assert_eq!(origins, [(2, 0), (2, 3), (8, 0), (8, 3), (14, 0)]);

        let mut seen = std::collections::HashSet::new();
        for table in &packed.tables {
            for cell in &table.cells {
                assert!(seen.insert(cell.position), "overlap at {}", cell.position);
            }
            let title = table.cells_of(CellType::Title).next().unwrap();
            assert_eq!(title.merge.unwrap().width(), 3);
        }
    }
}
