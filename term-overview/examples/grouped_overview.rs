//! Builds a grouped overview of a small sales table and prints it.
//!
//! Run with `cargo run --example grouped_overview`. Set `RUST_LOG=debug` for
//! per-request logging.

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;
use term_overview::logging::setup::{init_logging, LoggingConfig};
use term_overview::prelude::*;
use term_overview::visualize::HumanRenderer;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    init_logging(LoggingConfig::default())?;

    let table = RecordBatch::try_from_iter(vec![
        (
            "region",
            Arc::new(StringArray::from(vec![
                "north", "north", "south", "south", "south", "west",
            ])) as ArrayRef,
        ),
        (
            "amount",
            Arc::new(Float64Array::from(vec![
                Some(120.0),
                Some(80.5),
                None,
                Some(42.0),
                Some(310.0),
                Some(15.25),
            ])) as ArrayRef,
        ),
        (
            "quantity",
            Arc::new(Int64Array::from(vec![3, 1, 2, 1, 7, 1])) as ArrayRef,
        ),
        (
            "product",
            Arc::new(StringArray::from(vec![
                Some("tea"),
                Some("coffee"),
                Some("tea"),
                None,
                Some("cocoa"),
                Some("tea"),
            ])) as ArrayRef,
        ),
    ])?;

    let report = DataOverview::new()
        .with_config(ReportConfig::new().with_group_by("region"))
        .run(&table)
        .await?;

    println!("{}", report.visualize_with(&HumanRenderer::new(), "sales")?);
    println!("{}", report.visualize("sales")?);
    Ok(())
}
