//! Hand-off of laid-out cells to a worksheet

use tracing::{debug, trace};

use crate::Result;
use crate::cell::{CellRecord, CellValue, MergeRegion, Position};
use crate::style::CellStyle;

/// A worksheet that positioned cells can be painted onto
pub trait SheetWriter {
    /// Write one value with its resolved style
    fn set_cell(&mut self, position: Position, value: &CellValue, style: &CellStyle) -> Result<()>;

    /// Merge a rectangular region, styled like its anchor cell
    fn merge_cells(&mut self, region: &MergeRegion, style: &CellStyle) -> Result<()>;
}

/// Paint `cells` in order
///
/// Multi-cell merge regions are merged before their anchor value is written so
/// the value is not blanked by the merge. Single-cell regions are skipped.
pub fn write_cells<W: SheetWriter + ?Sized>(writer: &mut W, cells: &[CellRecord]) -> Result<()> {
    debug!("Writing {} cells", cells.len());
    for cell in cells {
        if let Some(region) = cell.merge.as_ref().filter(|r| !r.is_single_cell()) {
            trace!("Merging {}", region);
            writer.merge_cells(region, &cell.style)?;
        }
        writer.set_cell(cell.position, &cell.value, &cell.style)?;
    }
    Ok(())
}

#[cfg(feature = "xlsx")]
mod xlsx {
    use rust_xlsxwriter::{
        Color as XlsxColor, ColNum, Format, FormatAlign, FormatBorder, FormatPattern, RowNum,
        Worksheet,
    };

    use super::SheetWriter;
    use crate::Result;
    use crate::cell::{CellValue, MergeRegion, Position};
    use crate::constants::{MAX_COLUMN_INDEX, MAX_ROW_INDEX};
    use crate::error::LayoutError;
    use crate::style::{
        BorderStyle, CellStyle, Color, FillPattern, HorizontalAlignment, VerticalAlignment,
    };

    impl SheetWriter for Worksheet {
        fn set_cell(
            &mut self,
            position: Position,
            value: &CellValue,
            style: &CellStyle,
        ) -> Result<()> {
            let (row, column) = worksheet_coordinates(position)?;
            let format = xlsx_format(style);
            match value {
                CellValue::Text(text) if text.is_empty() => {
                    self.write_blank(row, column, &format)?;
                }
                CellValue::Text(text) => {
                    self.write_string_with_format(row, column, text, &format)?;
                }
                CellValue::Number(n) => {
                    self.write_number_with_format(row, column, *n, &format)?;
                }
            }
            Ok(())
        }

        fn merge_cells(&mut self, region: &MergeRegion, style: &CellStyle) -> Result<()> {
            let (first_row, first_column) = worksheet_coordinates(region.anchor())?;
            let (last_row, last_column) =
                worksheet_coordinates(Position::new(region.end_row, region.end_column))?;
            self.merge_range(
                first_row,
                first_column,
                last_row,
                last_column,
                "",
                &xlsx_format(style),
            )?;
            Ok(())
        }
    }

    fn worksheet_coordinates(position: Position) -> Result<(RowNum, ColNum)> {
        if position.row > MAX_ROW_INDEX || position.column > MAX_COLUMN_INDEX {
            return Err(LayoutError::OutOfBounds(format!(
                "{position} is outside the worksheet"
            )));
        }
        let column = ColNum::try_from(position.column)
            .map_err(|_| LayoutError::OutOfBounds(format!("column {}", position.column)))?;
        Ok((position.row, column))
    }

    fn xlsx_color(color: Color) -> XlsxColor {
        XlsxColor::RGB(color.value())
    }

    fn xlsx_border(style: BorderStyle) -> FormatBorder {
        match style {
            BorderStyle::None => FormatBorder::None,
            BorderStyle::Thin => FormatBorder::Thin,
            BorderStyle::Medium => FormatBorder::Medium,
            BorderStyle::Thick => FormatBorder::Thick,
            BorderStyle::Dashed => FormatBorder::Dashed,
            BorderStyle::Dotted => FormatBorder::Dotted,
            BorderStyle::Double => FormatBorder::Double,
            BorderStyle::Hair => FormatBorder::Hair,
        }
    }

    fn xlsx_pattern(pattern: FillPattern) -> FormatPattern {
        match pattern {
            FillPattern::None => FormatPattern::None,
            FillPattern::Solid => FormatPattern::Solid,
            FillPattern::LightGray => FormatPattern::LightGray,
            FillPattern::MediumGray => FormatPattern::MediumGray,
            FillPattern::DarkGray => FormatPattern::DarkGray,
            FillPattern::Gray125 => FormatPattern::Gray125,
        }
    }

    /// Map a resolved style onto an xlsx format
    fn xlsx_format(style: &CellStyle) -> Format {
        let mut format = Format::new();

        if let Some(name) = &style.font.name {
            format = format.set_font_name(name);
        }
        if let Some(size) = style.font.size {
            format = format.set_font_size(size);
        }
        if style.font.bold == Some(true) {
            format = format.set_bold();
        }
        if let Some(color) = style.font.color {
            format = format.set_font_color(xlsx_color(color));
        }

        if let Some(horizontal) = style.alignment.horizontal {
            format = format.set_align(match horizontal {
                HorizontalAlignment::General => FormatAlign::General,
                HorizontalAlignment::Left => FormatAlign::Left,
                HorizontalAlignment::Center => FormatAlign::Center,
                HorizontalAlignment::Right => FormatAlign::Right,
                HorizontalAlignment::Fill => FormatAlign::Fill,
                HorizontalAlignment::Justify => FormatAlign::Justify,
            });
        }
        if let Some(vertical) = style.alignment.vertical {
            format = format.set_align(match vertical {
                VerticalAlignment::Top => FormatAlign::Top,
                VerticalAlignment::Middle => FormatAlign::VerticalCenter,
                VerticalAlignment::Bottom => FormatAlign::Bottom,
                VerticalAlignment::Justify => FormatAlign::VerticalJustify,
            });
        }
        if style.alignment.wrap_text == Some(true) {
            format = format.set_text_wrap();
        }

        if let Some(top) = style.border.top {
            format = format.set_border_top(xlsx_border(top));
        }
        if let Some(left) = style.border.left {
            format = format.set_border_left(xlsx_border(left));
        }
        if let Some(right) = style.border.right {
            format = format.set_border_right(xlsx_border(right));
        }
        if let Some(bottom) = style.border.bottom {
            format = format.set_border_bottom(xlsx_border(bottom));
        }

        if let Some(fill) = style.fill {
            format = format.set_pattern(xlsx_pattern(fill.pattern));
            // Solid fills paint with the background color in xlsx
            format = match (fill.pattern, fill.foreground_color) {
                (FillPattern::Solid, Some(color)) => format.set_background_color(xlsx_color(color)),
                (_, Some(color)) => format.set_foreground_color(xlsx_color(color)),
                (_, None) => format,
            };
        }

        format
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::cell::resolve_merge;
    use crate::style::CellType;

    /// In-memory sheet recording every call
    #[derive(Default)]
    struct MemorySheet {
        cells: BTreeMap<Position, (String, CellStyle)>,
        merges: Vec<MergeRegion>,
        calls: Vec<&'static str>,
    }

    impl SheetWriter for MemorySheet {
        fn set_cell(
            &mut self,
            position: Position,
            value: &CellValue,
            style: &CellStyle,
        ) -> Result<()> {
            self.calls.push("set");
            self.cells
                .insert(position, (value.to_string(), style.clone()));
            Ok(())
        }

        fn merge_cells(&mut self, region: &MergeRegion, _style: &CellStyle) -> Result<()> {
            self.calls.push("merge");
            self.merges.push(*region);
            Ok(())
        }
    }

    #[test]
    fn test_merge_before_value() {
        let cells = vec![
            CellRecord::new(Position::new(0, 0), "Title".into(), CellType::Title, None)
                .with_merge(resolve_merge(0, 0, 0, 3)),
            CellRecord::new(Position::new(1, 0), "Note".into(), CellType::Text, None)
                .with_merge(resolve_merge(1, 0, 1, 0)),
        ];
        let mut sheet = MemorySheet::default();
        write_cells(&mut sheet, &cells).unwrap();

        assert_eq!(sheet.calls, ["merge", "set", "set"]);
        assert_eq!(sheet.merges, [resolve_merge(0, 0, 0, 3)]);
        assert_eq!(sheet.cells[&Position::new(0, 0)].0, "Title");
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_write_to_workbook() {
        let cells = vec![
            CellRecord::new(Position::new(0, 0), "Title".into(), CellType::Title, None)
                .with_merge(resolve_merge(0, 0, 0, 3)),
            CellRecord::new(Position::new(1, 0), "Header".into(), CellType::Header, None),
            CellRecord::new(Position::new(2, 0), CellValue::Number(0.0), CellType::Body, None),
            CellRecord::new(Position::new(2, 1), CellValue::empty(), CellType::Body, None),
        ];

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let worksheet = workbook.add_worksheet();
        write_cells(worksheet, &cells).unwrap();

        let buffer = workbook.save_to_buffer().unwrap();
        assert!(!buffer.is_empty());
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_worksheet_rejects_out_of_bounds() {
        let mut worksheet = rust_xlsxwriter::Worksheet::new();
        let style = crate::style::resolve_style(CellType::Body, None);

        let result = worksheet.set_cell(Position::new(0, 20_000), &"x".into(), &style);
        assert!(matches!(result, Err(crate::LayoutError::OutOfBounds(_))));

        assert!(
            worksheet
                .set_cell(Position::new(3, 2), &CellValue::Number(0.0), &style)
                .is_ok()
        );
    }
}
