//! Monthly finance report: a heading, a summary table and a grid of category tables

use rust_xlsxwriter::Workbook;
use sheet_layout::{
    CellStyle, Color, GridPackingConfig, SheetLayout, TablePainting, TableSpec, TextCell, Value,
    record,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let summary = TableSpec::new(["month", "income", "expenses", "closed"])
        .with_title("Summary")
        .add_record(record([
            ("month", Value::from("January")),
            ("income", Value::from(5200)),
            ("expenses", Value::from(4100.5)),
            ("closed", Value::from(true)),
        ]))
        .add_record(record([
            ("month", Value::from("February")),
            ("income", Value::from(4900)),
            ("expenses", Value::from(0)),
            ("closed", Value::from(false)),
        ]))
        .with_footer(record([
            ("month", Value::from("Total")),
            ("income", Value::from(10100)),
            ("expenses", Value::from(4100.5)),
        ]))
        .with_header_style(CellStyle::new().with_font_color(Color::white()).with_fill(
            sheet_layout::Fill::solid(Color::rgb(0x1F4E78)),
        ))
        .at(3, 1);

    let categories: Vec<TableSpec> = ["Housing", "Food", "Transport", "Leisure", "Health"]
        .iter()
        .map(|name| {
            TableSpec::new(["item", "amount"])
                .with_title(*name)
                .add_record(record([("item", Value::from("Budget")), ("amount", Value::from(800))]))
                .add_record(record([("item", Value::from("Spent")), ("amount", Value::from(640))]))
        })
        .collect();

    let sheet = SheetLayout::new()
        .add_text(
            TextCell::new("Household finances 2026")
                .subtitle()
                .at_label("B2")
                .with_span(4),
        )
        .add_table(summary)
        .add_grid(
            GridPackingConfig::new(4, 6, 3)
                .with_initial_row(11)
                .with_start_column(1),
            categories,
        );

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let written = worksheet.paint_sheet(&sheet)?;

    workbook.save("finance_report.xlsx")?;
    println!("Wrote {written} cells to finance_report.xlsx");

    Ok(())
}
