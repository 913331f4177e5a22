//! Build one table with an explicit structure.
//!
//! This example shows how to:
//! - Write nested data with the `nested!` macro
//! - Apply a structure and inspect the merged headers
//! - Render the table and walk its cells
//!
//! Run with `RUST_LOG=trace` to see table construction.

use nested_tables::Axis::{Column, Row};
use nested_tables::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data = nested! {
        "1901" {
            "men" => 50;
            "women" => 30;
        }
        "1902" {
            "men" => 80;
            "women" => 40;
            "girls" => 2;
        }
    };

    println!("=== Basic Table Example ===\n");

    let table = build_table(&data, [Row, Column])?;

    println!("Structure: {} ({})", table.structure(), table.structure().symbols());
    println!("Row headers:    {:?}", header_keys(table.row_headers()));
    println!("Column headers: {:?}", header_keys(table.column_headers()));
    println!("Ugliness: {}", table.ugliness());
    println!();

    println!("Cells:");
    for row in table.row_paths() {
        for column in table.column_paths() {
            let shown = match table.resolve(row, column) {
                Cell::Value(scalar) => scalar.to_string(),
                Cell::Absent => DEFAULT_PLACEHOLDER.to_string(),
            };
            println!("  {:?} x {:?} = {}", row, column, shown);
        }
    }
    println!();

    println!("HTML:\n{}", table.generate_html());
    Ok(())
}

fn header_keys(headers: &[Header]) -> Vec<String> {
    headers.iter().map(|h| h.key().to_string()).collect()
}
